//! # bitcash-primitives
//!
//! Primitive chain types used by the BitCash contract bindings.
//!
//! Every type here has a canonical text form, which is also its JSON form
//! as returned by the node's HTTP API:
//!
//! - [`Name`]: base32 encoded 64-bit account, action and table names
//! - [`Symbol`], [`SymbolCode`], [`Asset`] and their extended variants
//! - [`Checksum256`]: 32-byte hashes
//! - [`TimePoint`], [`TimePointSec`]: block timestamps
//! - [`PermissionLevel`]: `actor@permission` authorizations
//! - [`UInt64`], [`Int64`], [`Float64`]: numerics the node may quote as strings

#![warn(missing_docs)]
#![warn(clippy::all)]

#[macro_use]
mod macros;

mod asset;
mod checksum;
mod error;
mod name;
mod numeric;
mod permission;
mod time;

pub use asset::{Asset, ExtendedAsset, ExtendedSymbol, Symbol, SymbolCode, MAX_PRECISION};
pub use checksum::Checksum256;
pub use error::PrimitiveError;
pub use name::Name;
pub use numeric::{Float64, Int64, UInt64};
pub use permission::PermissionLevel;
pub use time::{TimePoint, TimePointSec};

/// Chain identifier (hash of the genesis state)
pub type ChainId = Checksum256;

/// Block number type
pub type BlockNum = u32;
