//! Token commands

use bitcash_primitives::Name;
use clap::Subcommand;

use super::{Context, SigningArgs};
use crate::{output::Output, CliError};

const SEPARATOR: &str = "-----------";

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Create a new token
    Create {
        /// The account that will issue the token
        #[arg(long)]
        issuer: Name,
        /// Token symbol code (e.g. BTC)
        #[arg(long)]
        symbol: String,
        /// Decimal places of the token
        #[arg(long, default_value_t = 4)]
        precision: u8,
        /// Maximum supply of the token
        #[arg(long)]
        max_supply: f64,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// List all tokens
    List,
}

impl TokenCommand {
    /// Run the subcommand
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        let sdk = ctx.token()?;
        match self {
            TokenCommand::Create { issuer, symbol, precision, max_supply, signing } => {
                let private_key = signing.private_key.unwrap_or_else(|| ctx.env.private_key.as_str().to_owned());
                let result = sdk
                    .create_token(issuer, &symbol, precision, max_supply, &private_key, signing.permission.as_deref())
                    .await;
                match result {
                    Ok(result) => ctx.transacted("Token created successfully!", &result),
                    Err(e) => ctx.failed("Error creating token", &e),
                }
            }
            TokenCommand::List => match sdk.get_all_tokens().await {
                Ok(tokens) => {
                    let mut lines = vec!["All tokens:".to_string(), SEPARATOR.to_string()];
                    for token in &tokens {
                        lines.push(format!("Symbol: {}", token.symbol));
                        lines.push(format!("Precision: {}", token.precision));
                        lines.push(format!("Supply: {}", token.supply));
                        lines.push(format!("Max Supply: {}", token.max_supply));
                        lines.push(format!("Issuer: {}", token.issuer));
                        lines.push(SEPARATOR.to_string());
                    }
                    Output::new(ctx.json)
                        .field_value("tokens", serde_json::to_value(&tokens)?)
                        .message(&lines.join("\n"))
                        .print();
                }
                Err(e) => ctx.failed("Error getting tokens", &e),
            },
        }
        Ok(())
    }
}
