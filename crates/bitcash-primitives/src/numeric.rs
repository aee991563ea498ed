//! 64-bit numerics as rendered by the node's JSON API
//!
//! The node quotes 64-bit integers above `u32::MAX` and every double, so
//! these wrappers deserialize from either a JSON number or a string.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitiveError;

macro_rules! lenient_number {
    ($(#[$meta:meta])* $name:ident($inner:ty), $visit:ident, $expecting:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, PartialOrd, Default, Debug)]
        pub struct $name(pub $inner);

        impl $name {
            /// Wrapped value
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                $name(value)
            }
        }

        impl From<$name> for $inner {
            fn from(value: $name) -> $inner {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = PrimitiveError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<$inner>()
                    .map($name)
                    .map_err(|_| PrimitiveError::InvalidNumber(s.to_string()))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.$visit(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct NumVisitor;

                impl Visitor<'_> for NumVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<$name, E> {
                        <$inner as NumFrom>::from_u64(v).map($name).ok_or_else(|| E::custom("number out of range"))
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<$name, E> {
                        <$inner as NumFrom>::from_i64(v).map($name).ok_or_else(|| E::custom("number out of range"))
                    }

                    fn visit_f64<E: de::Error>(self, v: f64) -> Result<$name, E> {
                        <$inner as NumFrom>::from_f64(v).map($name).ok_or_else(|| E::custom("expected an integer"))
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$name, E> {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(NumVisitor)
            }
        }
    };
}

/// Conversions from the JSON number kinds
trait NumFrom: Sized {
    fn from_u64(v: u64) -> Option<Self>;
    fn from_i64(v: i64) -> Option<Self>;
    fn from_f64(v: f64) -> Option<Self>;
}

impl NumFrom for u64 {
    fn from_u64(v: u64) -> Option<Self> {
        Some(v)
    }
    fn from_i64(v: i64) -> Option<Self> {
        u64::try_from(v).ok()
    }
    fn from_f64(v: f64) -> Option<Self> {
        (v.fract() == 0.0 && v >= 0.0 && v <= u64::MAX as f64).then_some(v as u64)
    }
}

impl NumFrom for i64 {
    fn from_u64(v: u64) -> Option<Self> {
        i64::try_from(v).ok()
    }
    fn from_i64(v: i64) -> Option<Self> {
        Some(v)
    }
    fn from_f64(v: f64) -> Option<Self> {
        (v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64).then_some(v as i64)
    }
}

impl NumFrom for f64 {
    fn from_u64(v: u64) -> Option<Self> {
        Some(v as f64)
    }
    fn from_i64(v: i64) -> Option<Self> {
        Some(v as f64)
    }
    fn from_f64(v: f64) -> Option<Self> {
        Some(v)
    }
}

lenient_number!(
    /// ABI `uint64`
    UInt64(u64), serialize_u64, "an unsigned integer or numeric string"
);
lenient_number!(
    /// ABI `int64`
    Int64(i64), serialize_i64, "an integer or numeric string"
);
lenient_number!(
    /// ABI `float64`
    Float64(f64), serialize_f64, "a number or numeric string"
);

impl Eq for UInt64 {}
impl Eq for Int64 {}

impl Ord for UInt64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Ord for Int64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_number_or_string() {
        let a: UInt64 = serde_json::from_str("42").unwrap();
        let b: UInt64 = serde_json::from_str("\"18446744073709551615\"").unwrap();
        assert_eq!(a.get(), 42);
        assert_eq!(b.get(), u64::MAX);

        let c: Int64 = serde_json::from_str("\"-7\"").unwrap();
        assert_eq!(c.get(), -7);

        let d: Float64 = serde_json::from_str("\"18023458394294896.00000000000000000\"").unwrap();
        assert_eq!(d.get(), 18023458394294896.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(serde_json::from_str::<UInt64>("-1").is_err());
        assert!(serde_json::from_str::<Int64>("1.5").is_err());
        assert!(serde_json::from_str::<UInt64>("\"abc\"").is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&UInt64(10)).unwrap(), "10");
        assert_eq!(serde_json::to_string(&Float64(1.5)).unwrap(), "1.5");
    }
}
