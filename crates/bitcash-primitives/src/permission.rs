//! Authorization levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Name, PrimitiveError};

/// Actor/permission pair authorizing an action, text form `actor@permission`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// Authorizing account
    pub actor: Name,
    /// Permission of that account
    pub permission: Name,
}

impl PermissionLevel {
    /// Create a permission level
    pub fn new(actor: Name, permission: Name) -> Self {
        PermissionLevel { actor, permission }
    }

    /// Parse `actor@permission`; a bare permission name is bound to
    /// `default_actor`.
    pub fn parse_with_actor(s: &str, default_actor: Name) -> Result<Self, PrimitiveError> {
        if s.contains('@') {
            return s.parse();
        }
        let permission = s.parse().map_err(|_| PrimitiveError::InvalidPermission(s.to_string()))?;
        Ok(PermissionLevel::new(default_actor, permission))
    }
}

impl FromStr for PermissionLevel {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PrimitiveError::InvalidPermission(s.to_string());
        let (actor, permission) = s.split_once('@').ok_or_else(invalid)?;
        Ok(PermissionLevel {
            actor: actor.parse().map_err(|_| invalid())?,
            permission: permission.parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let level: PermissionLevel = "alice@active".parse().unwrap();
        assert_eq!(level.actor.to_string(), "alice");
        assert_eq!(level.permission.to_string(), "active");
        assert_eq!(level.to_string(), "alice@active");
        assert!("alice".parse::<PermissionLevel>().is_err());
    }

    #[test]
    fn test_parse_with_default_actor() {
        let token: Name = "token.bk".parse().unwrap();
        let level = PermissionLevel::parse_with_actor("active", token).unwrap();
        assert_eq!(level.to_string(), "token.bk@active");
        let explicit = PermissionLevel::parse_with_actor("bob@owner", token).unwrap();
        assert_eq!(explicit.to_string(), "bob@owner");
    }

    #[test]
    fn test_json_shape() {
        let level: PermissionLevel = "alice@active".parse().unwrap();
        assert_eq!(
            serde_json::to_value(level).unwrap(),
            serde_json::json!({"actor": "alice", "permission": "active"})
        );
    }
}
