//! Oracle commands

use bitcash_contracts::delphioracle::{PairInput, Quote, TableName, TableQuery};
use bitcash_primitives::{Checksum256, Name, Symbol, UInt64};
use bitcash_sdk::ScopeParams;
use clap::{Args, Subcommand};

use super::{Context, SigningArgs};
use crate::{output::Output, CliError};

/// Oracle values are reported with four decimals
const QUOTE_PRECISION: u32 = 4;

const SEPARATOR: &str = "-------------------";

/// Oracle subcommands
#[derive(Debug, Subcommand)]
pub enum OracleCommand {
    /// Register as a new oracle
    Register {
        /// The account that will be registered as an oracle
        #[arg(long)]
        owner: Name,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Submit oracle data points
    Write {
        /// The oracle account submitting data
        #[arg(long)]
        owner: Name,
        /// The trading pair to report on (e.g. btcusd)
        #[arg(long)]
        pair: Name,
        /// The value to report, multiplied by 10000
        #[arg(long)]
        value: f64,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Claim oracle rewards
    Claim {
        /// The oracle account claiming rewards
        #[arg(long)]
        owner: Name,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Propose a new trading pair
    NewPair(NewPairArgs),
    /// Get oracle statistics
    Stats {
        /// The oracle account to check
        #[arg(long)]
        owner: Name,
    },
    /// List all trading pairs
    Pairs,
    /// Vote for a bounty
    VoteBounty {
        /// The account voting
        #[arg(long)]
        owner: Name,
        /// The bounty to vote for
        #[arg(long)]
        bounty: Name,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Write hash for the multi-party oracle
    WriteHash {
        /// The oracle account submitting the hash
        #[arg(long)]
        owner: Name,
        /// The hash to submit
        #[arg(long)]
        hash: Checksum256,
        /// The reveal string
        #[arg(long)]
        reveal: String,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Delete an existing trading pair
    DeletePair {
        /// The account that will delete the pair
        #[arg(long)]
        owner: Name,
        /// Name of the pair to delete
        #[arg(long)]
        pair: Name,
        /// Reason for deleting the pair
        #[arg(long)]
        reason: String,
        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Read rows of a contract table
    #[command(after_help = available_tables())]
    Table(TableArgs),
    /// Get all scopes of a contract table
    #[command(after_help = available_tables())]
    GetScopes(ScopesArgs),
}

/// `new-pair` flags
#[derive(Debug, Args)]
pub struct NewPairArgs {
    /// The account proposing the new pair
    #[arg(long)]
    proposer: Name,
    /// Name for the trading pair (e.g. btcusd)
    #[arg(long)]
    name: Name,
    /// Base token symbol with precision (e.g. 8,BTC)
    #[arg(long)]
    base_symbol: Symbol,
    /// Base token type
    #[arg(long)]
    base_type: u16,
    /// Base token contract
    #[arg(long)]
    base_contract: Name,
    /// Quote token symbol with precision (e.g. 2,USD)
    #[arg(long)]
    quote_symbol: Symbol,
    /// Quote token type
    #[arg(long)]
    quote_type: u16,
    /// Quote token contract
    #[arg(long)]
    quote_contract: Name,
    /// Precision of quoted prices
    #[arg(long)]
    quoted_precision: u64,
    #[command(flatten)]
    signing: SigningArgs,
}

/// `table` flags
#[derive(Debug, Args)]
pub struct TableArgs {
    /// Table to read
    table_name: Option<String>,
    /// Table to read, when not given as argument
    #[arg(long)]
    table: Option<String>,
    /// Scope for the table lookup
    #[arg(long)]
    scope: Option<String>,
    /// Primary key of a single row
    #[arg(long)]
    key: Option<String>,
    /// Start primary key for range queries
    #[arg(long)]
    from: Option<String>,
    /// End primary key for range queries
    #[arg(long)]
    to: Option<String>,
    /// Index position to use (default: primary key)
    #[arg(long)]
    index: Option<u32>,
    /// Key type of secondary indices
    #[arg(long)]
    key_type: Option<String>,
    /// Lower bound for range queries
    #[arg(long)]
    lower: Option<String>,
    /// Upper bound for range queries
    #[arg(long)]
    upper: Option<String>,
    /// Maximum number of rows to return
    #[arg(long)]
    limit: Option<u32>,
    /// Reverse the order of results
    #[arg(long)]
    reverse: bool,
    /// Show the first page with pagination info instead of all rows
    #[arg(long)]
    paginate: bool,
}

/// `get-scopes` flags
#[derive(Debug, Args)]
pub struct ScopesArgs {
    /// Table to inspect
    table_name: Option<String>,
    /// Table to inspect, when not given as argument
    #[arg(long)]
    table: Option<String>,
    /// Maximum number of scopes to return
    #[arg(long)]
    limit: Option<u32>,
    /// Lower bound scope name
    #[arg(long)]
    lower: Option<String>,
    /// Upper bound scope name
    #[arg(long)]
    upper: Option<String>,
}

fn available_tables() -> String {
    format!("Available tables: {}", TableName::list())
}

impl OracleCommand {
    /// Run the subcommand
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        match self {
            OracleCommand::Register { owner, signing } => {
                let sdk = ctx.oracle(&signing)?;
                match sdk.register_user(owner).await {
                    Ok(result) => ctx.transacted("Successfully registered as an oracle!", &result),
                    Err(e) => ctx.failed("Error registering as oracle", &e),
                }
            }
            OracleCommand::Write { owner, pair, value, signing } => {
                let sdk = ctx.oracle(&signing)?;
                let outcome = match Quote::scaled(pair, value, QUOTE_PRECISION) {
                    Ok(quote) => sdk.write_oracle_data(owner, vec![quote]).await,
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(result) => ctx.transacted("Oracle data submitted successfully!", &result),
                    Err(e) => ctx.failed("Error submitting oracle data", &e),
                }
            }
            OracleCommand::Claim { owner, signing } => {
                let sdk = ctx.oracle(&signing)?;
                match sdk.claim_oracle_rewards(owner).await {
                    Ok(result) => ctx.transacted("Rewards claimed successfully!", &result),
                    Err(e) => ctx.failed("Error claiming rewards", &e),
                }
            }
            OracleCommand::NewPair(args) => new_pair(ctx, args).await?,
            OracleCommand::Stats { owner } => stats(ctx, owner).await?,
            OracleCommand::Pairs => pairs(ctx).await?,
            OracleCommand::VoteBounty { owner, bounty, signing } => {
                let sdk = ctx.oracle(&signing)?;
                match sdk.vote_bounty(owner, bounty).await {
                    Ok(result) => ctx.transacted("Successfully voted for bounty!", &result),
                    Err(e) => ctx.failed("Error voting for bounty", &e),
                }
            }
            OracleCommand::WriteHash { owner, hash, reveal, signing } => {
                let sdk = ctx.oracle(&signing)?;
                match sdk.write_hash(owner, hash, reveal).await {
                    Ok(result) => ctx.transacted("Hash written successfully!", &result),
                    Err(e) => ctx.failed("Error writing hash", &e),
                }
            }
            OracleCommand::DeletePair { owner, pair, reason, signing } => {
                let sdk = ctx.oracle(&signing)?;
                match sdk.delete_pair(owner, pair, reason).await {
                    Ok(result) => ctx.transacted(&format!("Successfully deleted pair: {pair}"), &result),
                    Err(e) => ctx.failed("Error deleting pair", &e),
                }
            }
            OracleCommand::Table(args) => table(ctx, args).await?,
            OracleCommand::GetScopes(args) => scopes(ctx, args).await?,
        }
        Ok(())
    }
}

async fn new_pair(ctx: &Context, args: NewPairArgs) -> Result<(), CliError> {
    let sdk = ctx.oracle(&args.signing)?;
    let pair = PairInput {
        name: args.name,
        base_symbol: args.base_symbol,
        base_type: args.base_type,
        base_contract: args.base_contract,
        quote_symbol: args.quote_symbol,
        quote_type: args.quote_type,
        quote_contract: args.quote_contract,
        quoted_precision: UInt64(args.quoted_precision),
    };
    match sdk.create_new_pair(args.proposer, pair).await {
        Ok(result) => ctx.transacted("New trading pair proposed successfully!", &result),
        Err(e) => ctx.failed("Error proposing new trading pair", &e),
    }
    Ok(())
}

async fn stats(ctx: &Context, owner: Name) -> Result<(), CliError> {
    let sdk = ctx.oracle(&SigningArgs::default())?;
    match sdk.get_oracle_stats(owner).await {
        Ok(Some(stats)) => {
            let message = format!(
                "Oracle statistics:\n-----------------\nOwner: {}\nData points submitted: {}\nCurrent balance: {}\nLast claim: {}",
                stats.owner, stats.count, stats.balance, stats.last_claim
            );
            Output::new(ctx.json).field_value("stats", serde_json::to_value(&stats)?).message(&message).print();
        }
        Ok(None) => Output::new(ctx.json)
            .field_value("stats", serde_json::Value::Null)
            .message(&format!("No statistics found for oracle: {owner}"))
            .print(),
        Err(e) => ctx.failed("Error getting oracle stats", &e),
    }
    Ok(())
}

async fn pairs(ctx: &Context) -> Result<(), CliError> {
    let sdk = ctx.oracle(&SigningArgs::default())?;
    match sdk.get_all_pairs().await {
        Ok(pairs) if pairs.is_empty() => Output::new(ctx.json)
            .field_value("pairs", serde_json::json!([]))
            .message("No active trading pairs found")
            .print(),
        Ok(pairs) => {
            let mut lines = vec!["Active trading pairs:".to_string(), SEPARATOR.to_string()];
            for pair in &pairs {
                lines.push(format!("Name: {}", pair.name));
                lines.push(format!("Base Symbol: {}", pair.base_symbol));
                lines.push(format!("Quote Symbol: {}", pair.quote_symbol));
                lines.push(format!("Quoted Precision: {}", pair.quoted_precision));
                lines.push(format!("Owner: {}", pair.proposer));
                lines.push(SEPARATOR.to_string());
            }
            Output::new(ctx.json)
                .field_value("pairs", serde_json::to_value(&pairs)?)
                .message(&lines.join("\n"))
                .print();
        }
        Err(e) => ctx.failed("Error getting active pairs", &e),
    }
    Ok(())
}

/// Table name from the argument or `--table`; prints the available tables
/// when neither is given
fn require_table(positional: Option<String>, flag: Option<String>) -> Option<String> {
    let table = positional.or(flag);
    if table.is_none() {
        eprintln!("Error: Table name is required. Please specify a table name.");
        println!("{}", available_tables());
    }
    table
}

async fn table(ctx: &Context, args: TableArgs) -> Result<(), CliError> {
    let Some(table) = require_table(args.table_name, args.table) else {
        return Ok(());
    };
    let label = if args.key.is_some() { "Table row:" } else { "Query results:" };
    let query = TableQuery {
        table,
        scope: args.scope,
        primary_key: args.key,
        from: args.from,
        to: args.to,
        index_position: args.index,
        key_type: args.key_type,
        lower_bound: args.lower,
        upper_bound: args.upper,
        limit: args.limit,
        reverse: args.reverse,
        paginate: args.paginate,
    };

    let sdk = ctx.oracle(&SigningArgs::default())?;
    match sdk.read_table_data(&query).await {
        Ok(result) => print_json(ctx, label, &result)?,
        Err(e) => ctx.failed("Error reading table data", &e),
    }
    Ok(())
}

async fn scopes(ctx: &Context, args: ScopesArgs) -> Result<(), CliError> {
    let Some(table) = require_table(args.table_name, args.table) else {
        return Ok(());
    };
    let params = ScopeParams { lower_bound: args.lower, upper_bound: args.upper, limit: args.limit };

    let sdk = ctx.oracle(&SigningArgs::default())?;
    match sdk.get_table_scopes(&table, params).await {
        Ok(scopes) => print_json(ctx, "Table scopes:", &scopes)?,
        Err(e) => ctx.failed("Error retrieving table scopes", &e),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(ctx: &Context, label: &str, value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    if ctx.json {
        println!("{text}");
    } else {
        println!("{label}\n{text}");
    }
    Ok(())
}
