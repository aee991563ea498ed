//! Record declaration macro

/// Declare ABI records.
///
/// Each record becomes a `pub struct` with serde support (the node's JSON
/// row/action form), a [`Pack`](crate::Pack)/[`Unpack`](crate::Unpack)
/// encoding that concatenates the fields in declaration order, and an
/// [`AbiStruct`](crate::AbiStruct) impl carrying the ABI struct name and
/// field types.
///
/// ```
/// use bitcash_codec::{abi_struct, encode, AbiStruct};
/// use bitcash_primitives::Name;
///
/// abi_struct! {
///     /// Register an oracle
///     pub struct RegUser = "reguser" {
///         /// Oracle account
///         pub owner: Name => "name",
///     }
/// }
///
/// let data = RegUser { owner: "alice".parse().unwrap() };
/// assert_eq!(encode(&data).len(), 8);
/// assert_eq!(RegUser::FIELDS, &[("owner", "name")]);
/// ```
#[macro_export]
macro_rules! abi_struct {
    ($(
        $(#[$meta:meta])*
        pub struct $name:ident = $abi:literal {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $ty:ty => $fabi:literal
            ),* $(,)?
        }
    )*) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        #[derive($crate::__private::serde::Serialize, $crate::__private::serde::Deserialize)]
        #[serde(crate = "bitcash_codec::__private::serde")]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $crate::Pack for $name {
            fn pack(&self, _enc: &mut $crate::Encoder) {
                $( $crate::Pack::pack(&self.$field, _enc); )*
            }
        }

        impl $crate::Unpack for $name {
            fn unpack(_dec: &mut $crate::Decoder<'_>) -> ::core::result::Result<Self, $crate::CodecError> {
                ::core::result::Result::Ok($name {
                    $( $field: $crate::Unpack::unpack(_dec)?, )*
                })
            }
        }

        impl $crate::AbiStruct for $name {
            const ABI_NAME: &'static str = $abi;
            const FIELDS: &'static [(&'static str, &'static str)] = &[
                $( (stringify!($field), $fabi), )*
            ];
        }
    )*};
}

#[cfg(test)]
mod tests {
    use crate::{decode, encode, AbiStruct};
    use bitcash_primitives::{Asset, Name};

    abi_struct! {
        /// Test record
        pub struct Transfer = "transfer" {
            pub from: Name => "name",
            pub to: Name => "name",
            pub quantity: Asset => "asset",
            pub memo: String => "string",
        }

        pub struct Empty = "empty" {}
    }

    #[test]
    fn test_generated_layout() {
        let t = Transfer {
            from: "alice".parse().unwrap(),
            to: "bob".parse().unwrap(),
            quantity: "1.0000 EOS".parse().unwrap(),
            memo: "hi".into(),
        };
        let bytes = encode(&t);
        assert_eq!(bytes.len(), 8 + 8 + 16 + 3);
        assert_eq!(&bytes[..8], &encode(&t.from)[..]);
        assert_eq!(&bytes[32..], &[2, b'h', b'i']);
        assert_eq!(decode::<Transfer>(&bytes).unwrap(), t);

        assert_eq!(Transfer::ABI_NAME, "transfer");
        assert_eq!(
            Transfer::FIELDS,
            &[("from", "name"), ("to", "name"), ("quantity", "asset"), ("memo", "string")]
        );
    }

    #[test]
    fn test_generated_json() {
        let json = serde_json::json!({
            "from": "alice", "to": "bob", "quantity": "0.5000 EOS", "memo": ""
        });
        let t: Transfer = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(t.quantity.amount(), 5000);
        assert_eq!(serde_json::to_value(&t).unwrap(), json);
    }

    #[test]
    fn test_empty_record() {
        assert!(encode(&Empty {}).is_empty());
        assert_eq!(decode::<Empty>(&[]).unwrap(), Empty {});
        assert!(Empty::FIELDS.is_empty());
    }
}
