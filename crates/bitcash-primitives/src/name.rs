//! Base32 encoded 64-bit names

use std::fmt;
use std::str::FromStr;

use crate::PrimitiveError;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum length of a name in characters
const MAX_LEN: usize = 13;

/// Account, action, table or permission name.
///
/// Names pack up to 13 characters into a `u64`: the first twelve characters
/// take five bits each and the thirteenth takes the remaining four, so it is
/// limited to `.12345abcdefghij`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(u64);

impl Name {
    /// The empty name (`""`, value 0)
    pub const EMPTY: Name = Name(0);

    /// Create from the raw 64-bit value
    pub const fn from_u64(value: u64) -> Self {
        Name(value)
    }

    /// Raw 64-bit value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Name from a literal; invalid literals fail to compile in const
    /// context.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid name.
    pub const fn from_static(s: &'static str) -> Self {
        match encode(s.as_bytes()) {
            Ok(value) => Name(value),
            Err(_) => panic!("invalid name literal"),
        }
    }

    /// Check if this is the empty name
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

const fn symbol_value(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

const fn encode(s: &[u8]) -> Result<u64, &'static str> {
    if s.len() > MAX_LEN {
        return Err("longer than 13 characters");
    }

    let mut value = 0u64;
    let mut i = 0;
    while i < s.len() {
        let sym = match symbol_value(s[i]) {
            Some(sym) => sym,
            None => return Err("character outside .12345a-z"),
        };
        if i < 12 {
            value |= (sym & 0x1f) << (64 - 5 * (i + 1));
        } else if sym > 0x0f {
            return Err("13th character must be one of .12345a-j");
        } else {
            value |= sym;
        }
        i += 1;
    }
    Ok(value)
}

impl FromStr for Name {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encode(s.as_bytes()).map(Name).map_err(|reason| PrimitiveError::InvalidName(s.to_string(), reason))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[MAX_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let len = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // CHARMAP is ASCII
        f.write_str(std::str::from_utf8(&out[..len]).map_err(|_| fmt::Error)?)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> u64 {
        name.0
    }
}

impl TryFrom<&str> for Name {
    type Error = PrimitiveError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

serde_via_string!(Name, "an account name");
