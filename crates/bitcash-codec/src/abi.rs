//! Contract ABI definitions (`eosio::abi/1.x`)
//!
//! Reads the binary ABI blobs embedded in the contract bindings, and the JSON
//! form returned by `get_abi`.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bitcash_primitives::Name;
use serde::{Deserialize, Serialize};

use crate::{CodecError, Decoder, Unpack};

/// Type alias (`new_type_name` is an alias of `type`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiTypeDef {
    /// Alias name
    pub new_type_name: String,
    /// Aliased type
    #[serde(rename = "type")]
    pub type_: String,
}

/// Struct field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiField {
    /// Field name
    pub name: String,
    /// Field type, possibly with `[]`, `?` or `$` suffix
    #[serde(rename = "type")]
    pub type_: String,
}

/// Struct definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiStructDef {
    /// Struct name
    pub name: String,
    /// Base struct, empty when none
    #[serde(default)]
    pub base: String,
    /// Fields in encoding order
    pub fields: Vec<AbiField>,
}

/// Action definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiAction {
    /// Action name
    pub name: Name,
    /// Struct type of the action data
    #[serde(rename = "type")]
    pub type_: String,
    /// Ricardian contract text
    #[serde(default)]
    pub ricardian_contract: String,
}

/// Table definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiTable {
    /// Table name
    pub name: Name,
    /// Primary index type (`i64`)
    #[serde(default)]
    pub index_type: String,
    /// Secondary key names
    #[serde(default)]
    pub key_names: Vec<String>,
    /// Secondary key types
    #[serde(default)]
    pub key_types: Vec<String>,
    /// Row struct type
    #[serde(rename = "type")]
    pub type_: String,
}

/// Ricardian clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiClause {
    /// Clause id
    pub id: String,
    /// Clause text
    pub body: String,
}

/// Error code description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiErrorMessage {
    /// Error code
    pub error_code: u64,
    /// Message
    pub error_msg: String,
}

/// Variant definition (ABI 1.1+)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiVariant {
    /// Variant name
    pub name: String,
    /// Alternative types
    pub types: Vec<String>,
}

/// Action return type (ABI 1.2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiActionResult {
    /// Action name
    pub name: Name,
    /// Return type
    pub result_type: String,
}

/// Complete contract ABI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbiDef {
    /// Version string, `eosio::abi/1.x`
    pub version: String,
    /// Type aliases
    #[serde(default)]
    pub types: Vec<AbiTypeDef>,
    /// Structs
    #[serde(default)]
    pub structs: Vec<AbiStructDef>,
    /// Actions
    #[serde(default)]
    pub actions: Vec<AbiAction>,
    /// Tables
    #[serde(default)]
    pub tables: Vec<AbiTable>,
    /// Ricardian clauses
    #[serde(default)]
    pub ricardian_clauses: Vec<AbiClause>,
    /// Error messages
    #[serde(default)]
    pub error_messages: Vec<AbiErrorMessage>,
    /// Variants
    #[serde(default)]
    pub variants: Vec<AbiVariant>,
    /// Action results
    #[serde(default)]
    pub action_results: Vec<AbiActionResult>,
}

impl AbiDef {
    /// Decode a base64 encoded binary ABI
    pub fn from_base64(blob: &str) -> Result<Self, CodecError> {
        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|e| CodecError::InvalidAbi(format!("base64: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a binary ABI
    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        let mut dec = Decoder::new(data);

        let version = dec.read_string()?;
        if !version.starts_with("eosio::abi/1.") {
            return Err(CodecError::InvalidAbi(format!("unsupported version '{version}'")));
        }

        let mut abi = AbiDef {
            version,
            types: read_list(&mut dec, |d| {
                Ok(AbiTypeDef { new_type_name: d.read_string()?, type_: d.read_string()? })
            })?,
            structs: read_list(&mut dec, |d| {
                Ok(AbiStructDef {
                    name: d.read_string()?,
                    base: d.read_string()?,
                    fields: read_list(d, |d| {
                        Ok(AbiField { name: d.read_string()?, type_: d.read_string()? })
                    })?,
                })
            })?,
            actions: read_list(&mut dec, |d| {
                Ok(AbiAction {
                    name: Name::unpack(d)?,
                    type_: d.read_string()?,
                    ricardian_contract: d.read_string()?,
                })
            })?,
            tables: read_list(&mut dec, |d| {
                Ok(AbiTable {
                    name: Name::unpack(d)?,
                    index_type: d.read_string()?,
                    key_names: Vec::<String>::unpack(d)?,
                    key_types: Vec::<String>::unpack(d)?,
                    type_: d.read_string()?,
                })
            })?,
            ..AbiDef::default()
        };

        // Trailing sections are binary extensions: absent in older blobs
        if !dec.is_empty() {
            abi.ricardian_clauses = read_list(&mut dec, |d| {
                Ok(AbiClause { id: d.read_string()?, body: d.read_string()? })
            })?;
        }
        if !dec.is_empty() {
            abi.error_messages = read_list(&mut dec, |d| {
                Ok(AbiErrorMessage { error_code: d.read_u64()?, error_msg: d.read_string()? })
            })?;
        }
        if !dec.is_empty() {
            // abi_extensions: (u16 tag, bytes) pairs, no known tags
            read_list(&mut dec, |d| {
                d.read_u16()?;
                d.read_bytes()?;
                Ok(())
            })?;
        }
        if !dec.is_empty() {
            abi.variants = read_list(&mut dec, |d| {
                Ok(AbiVariant { name: d.read_string()?, types: Vec::<String>::unpack(d)? })
            })?;
        }
        if !dec.is_empty() {
            abi.action_results = read_list(&mut dec, |d| {
                Ok(AbiActionResult { name: Name::unpack(d)?, result_type: d.read_string()? })
            })?;
        }
        if !dec.is_empty() {
            return Err(CodecError::TrailingBytes(dec.remaining()));
        }

        Ok(abi)
    }

    /// Follow type aliases to the underlying type name
    pub fn resolve_type<'a>(&'a self, mut ty: &'a str) -> &'a str {
        // Alias chains are short; the bound guards against cycles
        for _ in 0..self.types.len() {
            match self.types.iter().find(|t| t.new_type_name == ty) {
                Some(alias) => ty = &alias.type_,
                None => break,
            }
        }
        ty
    }

    /// Look up a struct by name
    pub fn struct_def(&self, name: &str) -> Option<&AbiStructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// All fields of a struct including those inherited from its bases,
    /// base fields first
    pub fn struct_fields(&self, name: &str) -> Option<Vec<&AbiField>> {
        let def = self.struct_def(self.resolve_type(name))?;
        let mut fields = if def.base.is_empty() {
            Vec::new()
        } else {
            self.struct_fields(&def.base)?
        };
        fields.extend(def.fields.iter());
        Some(fields)
    }

    /// Look up an action by name
    pub fn action(&self, name: Name) -> Option<&AbiAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Struct describing an action's data
    pub fn action_struct(&self, name: Name) -> Option<&AbiStructDef> {
        let action = self.action(name)?;
        self.struct_def(self.resolve_type(&action.type_))
    }

    /// Look up a table by name
    pub fn table(&self, name: Name) -> Option<&AbiTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Check if the ABI declares the table
    pub fn has_table(&self, name: Name) -> bool {
        self.table(name).is_some()
    }

    /// Table names in declaration order
    pub fn table_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.tables.iter().map(|t| t.name)
    }

    /// Action names in declaration order
    pub fn action_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.actions.iter().map(|a| a.name)
    }

    /// Map of table name to row type
    pub fn table_types(&self) -> HashMap<Name, &str> {
        self.tables.iter().map(|t| (t.name, t.type_.as_str())).collect()
    }
}

fn read_list<'a, T>(
    dec: &mut Decoder<'a>,
    mut item: impl FnMut(&mut Decoder<'a>) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    let len = dec.read_varuint32()? as usize;
    let mut out = Vec::with_capacity(len.min(dec.remaining()));
    for _ in 0..len {
        out.push(item(dec)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_ABI: &str = "DmVvc2lvOjphYmkvMS4yAAgHYWNjb3VudAABB2JhbGFuY2UFYXNzZXQFY2xvc2UAAgVvd25lcgRuYW1lBnN5bWJvbAZzeW1ib2wGY3JlYXRlAAIGaXNzdWVyBG5hbWUObWF4aW11bV9zdXBwbHkFYXNzZXQOY3VycmVuY3lfc3RhdHMAAwZzdXBwbHkFYXNzZXQKbWF4X3N1cHBseQVhc3NldAZpc3N1ZXIEbmFtZQVpc3N1ZQADAnRvBG5hbWUIcXVhbnRpdHkFYXNzZXQEbWVtbwZzdHJpbmcEb3BlbgADBW93bmVyBG5hbWUGc3ltYm9sBnN5bWJvbAlyYW1fcGF5ZXIEbmFtZQZyZXRpcmUAAghxdWFudGl0eQVhc3NldARtZW1vBnN0cmluZwh0cmFuc2ZlcgAEBGZyb20EbmFtZQJ0bwRuYW1lCHF1YW50aXR5BWFzc2V0BG1lbW8Gc3RyaW5nBgAAAAAAhWlEBWNsb3NlAAAAAACobNRFBmNyZWF0ZQAAAAAAAKUxdgVpc3N1ZQAAAAAAADBVpQRvcGVuAAAAAACo67K6BnJldGlyZQAAAABXLTzNzQh0cmFuc2ZlcgACAAAAOE9NETIDaTY0AAAHYWNjb3VudAAAAAAAkE3GA2k2NAAADmN1cnJlbmN5X3N0YXRzAAAAAAA=";

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_decode_token_abi() {
        let abi = AbiDef::from_base64(TOKEN_ABI).unwrap();
        assert_eq!(abi.version, "eosio::abi/1.2");
        assert_eq!(abi.structs.len(), 8);
        assert_eq!(abi.actions.len(), 6);
        assert_eq!(abi.table_names().collect::<Vec<_>>(), vec![name("accounts"), name("stat")]);

        let transfer = abi.action_struct(name("transfer")).unwrap();
        let fields: Vec<_> = transfer.fields.iter().map(|f| (f.name.as_str(), f.type_.as_str())).collect();
        assert_eq!(
            fields,
            vec![("from", "name"), ("to", "name"), ("quantity", "asset"), ("memo", "string")]
        );
        assert_eq!(abi.table(name("stat")).unwrap().type_, "currency_stats");
    }

    #[test]
    fn test_resolve_alias_and_base() {
        let abi = AbiDef {
            version: "eosio::abi/1.1".into(),
            types: vec![AbiTypeDef { new_type_name: "asset_type".into(), type_: "uint16".into() }],
            structs: vec![
                AbiStructDef {
                    name: "base".into(),
                    base: String::new(),
                    fields: vec![AbiField { name: "id".into(), type_: "uint64".into() }],
                },
                AbiStructDef {
                    name: "child".into(),
                    base: "base".into(),
                    fields: vec![AbiField { name: "kind".into(), type_: "asset_type".into() }],
                },
            ],
            ..AbiDef::default()
        };
        assert_eq!(abi.resolve_type("asset_type"), "uint16");
        assert_eq!(abi.resolve_type("name"), "name");
        let names: Vec<_> = abi.struct_fields("child").unwrap().iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, vec!["id", "kind"]);
    }

    #[test]
    fn test_rejects_bad_blobs() {
        assert!(matches!(AbiDef::from_base64("!!!"), Err(CodecError::InvalidAbi(_))));
        // version string "hello"
        assert!(matches!(AbiDef::from_bytes(b"\x05hello"), Err(CodecError::InvalidAbi(_))));
        // truncated after version
        let truncated = b"\x0eeosio::abi/1.2\x01";
        assert!(matches!(AbiDef::from_bytes(truncated), Err(CodecError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_json_form() {
        let json = serde_json::json!({
            "version": "eosio::abi/1.1",
            "structs": [{"name": "claim", "base": "", "fields": [{"name": "owner", "type": "name"}]}],
            "actions": [{"name": "claim", "type": "claim", "ricardian_contract": ""}],
            "tables": []
        });
        let abi: AbiDef = serde_json::from_value(json).unwrap();
        assert_eq!(abi.action_struct(name("claim")).unwrap().fields[0].name, "owner");
    }
}
