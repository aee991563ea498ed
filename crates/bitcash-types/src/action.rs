//! Contract actions

use bitcash_codec::{CodecError, Decoder, Encoder, Pack, Unpack};
use bitcash_primitives::{Name, PermissionLevel};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Named, typed request to a contract, with its data already encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Contract account
    pub account: Name,
    /// Action name
    pub name: Name,
    /// Authorizing permission levels
    pub authorization: Vec<PermissionLevel>,
    /// Encoded action data
    #[serde(with = "crate::hex_bytes")]
    pub data: Bytes,
}

impl Action {
    /// Build an action, encoding `data`
    pub fn new<T: Pack + ?Sized>(
        account: Name,
        name: Name,
        authorization: Vec<PermissionLevel>,
        data: &T,
    ) -> Self {
        let mut enc = Encoder::new();
        data.pack(&mut enc);
        Action { account, name, authorization, data: enc.freeze() }
    }

    /// Decode the action data as `T`
    pub fn decode_data<T: Unpack>(&self) -> Result<T, CodecError> {
        bitcash_codec::decode(&self.data)
    }

    /// Check if any authorization is present
    pub fn is_authorized(&self) -> bool {
        !self.authorization.is_empty()
    }
}

impl Pack for Action {
    fn pack(&self, enc: &mut Encoder) {
        self.account.pack(enc);
        self.name.pack(enc);
        self.authorization.pack(enc);
        self.data.pack(enc);
    }
}

impl Unpack for Action {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Action {
            account: Name::unpack(dec)?,
            name: Name::unpack(dec)?,
            authorization: Vec::unpack(dec)?,
            data: Bytes::unpack(dec)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_action_layout() {
        let owner = name("alice");
        let action = Action::new(
            name("delphioracle"),
            name("reguser"),
            vec!["alice@active".parse().unwrap()],
            &owner,
        );
        assert_eq!(
            hex::encode(bitcash_codec::encode(&action)),
            "a0223297ba56a34a000000e02aac99ba010000000000855c3400000000a8ed3232080000000000855c34"
        );
        assert_eq!(action.decode_data::<Name>().unwrap(), owner);
    }

    #[test]
    fn test_action_json() {
        let action = Action::new(name("token.bk"), name("open"), vec![], &name("bob"));
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["account"], "token.bk");
        assert_eq!(json["authorization"], serde_json::json!([]));
        assert_eq!(json["data"], "0000000000000e3d");
        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
        assert!(!back.is_authorized());
    }
}
