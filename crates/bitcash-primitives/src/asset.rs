//! Token symbols and asset quantities

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Name, PrimitiveError};

/// Largest supported precision
pub const MAX_PRECISION: u8 = 18;

/// Largest absolute asset amount (2^62 - 1)
const MAX_AMOUNT: i64 = (1 << 62) - 1;

/// Symbol code: 1 to 7 uppercase letters packed into a `u64`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolCode(u64);

impl SymbolCode {
    /// Create from the raw value
    pub const fn from_u64(value: u64) -> Self {
        SymbolCode(value)
    }

    /// Raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl FromStr for SymbolCode {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 7 {
            return Err(PrimitiveError::InvalidSymbol(s.to_string(), "code must be 1 to 7 characters"));
        }
        let mut value = 0u64;
        for (i, c) in s.bytes().enumerate() {
            if !c.is_ascii_uppercase() {
                return Err(PrimitiveError::InvalidSymbol(s.to_string(), "code must be uppercase A-Z"));
            }
            value |= (c as u64) << (8 * i);
        }
        Ok(SymbolCode(value))
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = self.0;
        while v > 0 {
            write!(f, "{}", (v & 0xff) as u8 as char)?;
            v >>= 8;
        }
        Ok(())
    }
}

impl fmt::Debug for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolCode({})", self)
    }
}

serde_via_string!(SymbolCode, "a symbol code");

/// Token symbol: precision plus code, text form `"4,EOS"`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    precision: u8,
    code: SymbolCode,
}

impl Symbol {
    /// Create a symbol from precision and code
    pub fn new(precision: u8, code: SymbolCode) -> Result<Self, PrimitiveError> {
        if precision > MAX_PRECISION {
            return Err(PrimitiveError::InvalidSymbol(
                format!("{},{}", precision, code),
                "precision exceeds 18",
            ));
        }
        Ok(Symbol { precision, code })
    }

    /// Decode from the packed `u64` (low byte precision, code above)
    pub fn from_u64(value: u64) -> Result<Self, PrimitiveError> {
        Symbol::new((value & 0xff) as u8, SymbolCode(value >> 8))
    }

    /// Packed `u64` value
    pub fn as_u64(&self) -> u64 {
        (self.code.0 << 8) | self.precision as u64
    }

    /// Decimal places
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Symbol code
    pub fn code(&self) -> SymbolCode {
        self.code
    }
}

impl FromStr for Symbol {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| PrimitiveError::InvalidSymbol(s.to_string(), "expected '<precision>,<code>'"))?;
        let precision: u8 = precision
            .trim()
            .parse()
            .map_err(|_| PrimitiveError::InvalidSymbol(s.to_string(), "invalid precision"))?;
        Symbol::new(precision, code.trim().parse()?)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

serde_via_string!(Symbol, "a symbol such as \"4,EOS\"");

/// Token quantity, text form `"1.0000 EOS"`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    /// Create from raw amount (in smallest units) and symbol
    pub fn new(amount: i64, symbol: Symbol) -> Result<Self, PrimitiveError> {
        if amount.unsigned_abs() > MAX_AMOUNT as u64 {
            return Err(PrimitiveError::InvalidAsset(amount.to_string(), "amount out of range"));
        }
        Ok(Asset { amount, symbol })
    }

    /// Build an asset from a decimal value, rounding to `precision` places.
    /// Ties round away from zero.
    ///
    /// `Asset::from_float(1000.5, 4, "BTC")` is `"1000.5000 BTC"`.
    pub fn from_float(value: f64, precision: u8, code: &str) -> Result<Self, PrimitiveError> {
        let symbol = Symbol::new(precision, code.parse()?)?;
        let scaled = (value * 10f64.powi(precision as i32)).round();
        if !scaled.is_finite() || scaled.abs() > MAX_AMOUNT as f64 {
            return Err(PrimitiveError::InvalidAsset(format!("{} {}", value, code), "amount out of range"));
        }
        Asset::new(scaled as i64, symbol)
    }

    /// Amount in smallest units
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Symbol
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Amount as a decimal value (lossy)
    pub fn value(&self) -> f64 {
        self.amount as f64 / 10f64.powi(self.symbol.precision as i32)
    }
}

impl FromStr for Asset {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why| PrimitiveError::InvalidAsset(s.to_string(), why);

        let (number, code) = s.trim().split_once(' ').ok_or_else(|| invalid("expected '<amount> <code>'"))?;
        let code: SymbolCode = code.trim().parse()?;

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|c| c.is_ascii_digit()) {
            return Err(invalid("invalid amount"));
        }
        if !frac_part.bytes().all(|c| c.is_ascii_digit()) {
            return Err(invalid("invalid amount"));
        }
        let precision = u8::try_from(frac_part.len()).map_err(|_| invalid("too many decimals"))?;
        let symbol = Symbol::new(precision, code)?;

        let amount: i64 = format!("{}{}", int_part, frac_part)
            .parse()
            .map_err(|_| invalid("amount out of range"))?;
        Asset::new(if negative { -amount } else { amount }, symbol)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision as u32;
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        if precision == 0 {
            return write!(f, "{}{} {}", sign, abs, self.symbol.code);
        }
        let unit = 10u64.pow(precision);
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            abs / unit,
            abs % unit,
            self.symbol.code,
            width = precision as usize
        )
    }
}

impl fmt::Debug for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset({})", self)
    }
}

serde_via_string!(Asset, "an asset such as \"1.0000 EOS\"");

/// Symbol qualified by the issuing contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtendedSymbol {
    /// Symbol
    pub sym: Symbol,
    /// Token contract account
    pub contract: Name,
}

/// Asset qualified by the issuing contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtendedAsset {
    /// Quantity
    pub quantity: Asset,
    /// Token contract account
    pub contract: Name,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_symbol_packing() {
        let sym: Symbol = "4,EOS".parse().unwrap();
        assert_eq!(sym.as_u64().to_le_bytes(), [4, b'E', b'O', b'S', 0, 0, 0, 0]);
        assert_eq!(Symbol::from_u64(sym.as_u64()).unwrap(), sym);
        assert_eq!(sym.to_string(), "4,EOS");
    }

    #[test]
    fn test_asset_parse_display() {
        let asset: Asset = "1.0000 EOS".parse().unwrap();
        assert_eq!(asset.amount(), 10000);
        assert_eq!(asset.symbol().precision(), 4);
        assert_eq!(asset.to_string(), "1.0000 EOS");

        let neg: Asset = "-0.0500 BTC".parse().unwrap();
        assert_eq!(neg.amount(), -500);
        assert_eq!(neg.to_string(), "-0.0500 BTC");

        let whole: Asset = "42 GEM".parse().unwrap();
        assert_eq!(whole.symbol().precision(), 0);
        assert_eq!(whole.to_string(), "42 GEM");
    }

    #[test]
    fn test_asset_from_float() {
        let asset = Asset::from_float(1000000.0, 4, "BTC").unwrap();
        assert_eq!(asset.to_string(), "1000000.0000 BTC");
        let rounded = Asset::from_float(0.123456, 2, "USD").unwrap();
        assert_eq!(rounded.to_string(), "0.12 USD");
    }

    #[test]
    fn test_asset_from_float_ties_round_up() {
        assert_eq!(Asset::from_float(2.5, 0, "BTC").unwrap().to_string(), "3 BTC");
        assert_eq!(Asset::from_float(0.125, 2, "USD").unwrap().to_string(), "0.13 USD");
        assert_eq!(Asset::from_float(-2.5, 0, "BTC").unwrap().to_string(), "-3 BTC");
    }

    #[test]
    fn test_asset_from_float_rejects_out_of_range() {
        assert!(Asset::from_float(f64::NAN, 4, "BTC").is_err());
        assert!(Asset::from_float(f64::INFINITY, 4, "BTC").is_err());
        assert!(Asset::from_float(1e18, 4, "BTC").is_err());
        assert!(Asset::from_float(1.0, 19, "BTC").is_err());
        assert!(Asset::from_float(1.0, 4, "btc").is_err());
    }

    #[test]
    fn test_rejects_invalid() {
        assert!("1.0000".parse::<Asset>().is_err());
        assert!("1.0000 eos".parse::<Asset>().is_err());
        assert!("1.00.00 EOS".parse::<Asset>().is_err());
        assert!("abc EOS".parse::<Asset>().is_err());
        assert!("1 TOOLONGX".parse::<Asset>().is_err());
        assert!("19,EOS".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_extended_json() {
        let ext: ExtendedAsset =
            serde_json::from_str(r#"{"quantity":"2.50 USD","contract":"bank.bk"}"#).unwrap();
        assert_eq!(ext.quantity.amount(), 250);
        assert_eq!(ext.contract.to_string(), "bank.bk");

        let sym = ExtendedSymbol { sym: "8,BTC".parse().unwrap(), contract: "token.bk".parse().unwrap() };
        assert_eq!(
            serde_json::to_value(sym).unwrap(),
            serde_json::json!({"sym": "8,BTC", "contract": "token.bk"})
        );
    }

    proptest! {
        #[test]
        fn prop_asset_text_round_trip(amount in -1_000_000_000_000i64..1_000_000_000_000, precision in 0u8..9) {
            let asset = Asset::new(amount, Symbol::new(precision, "TEST".parse().unwrap()).unwrap()).unwrap();
            let back: Asset = asset.to_string().parse().unwrap();
            prop_assert_eq!(back, asset);
        }
    }
}
