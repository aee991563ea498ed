//! Binding generator

/// Generate the contract-level items of a binding module: the default
/// account, the cached ABI, `TableName`, the typed `Contract` wrapper and
/// ABI conformance tests.
///
/// Expects `ABI_BLOB` and every listed record type in scope.
macro_rules! contract_bindings {
    (
        account: $account:literal,
        actions { $($aty:ident => $aname:literal),* $(,)? }
        tables { $($variant:ident => $tname:literal : $row:ident),* $(,)? }
        records { $($rty:ident),* $(,)? }
    ) => {
        /// Default contract account
        pub const ACCOUNT: ::bitcash_primitives::Name = ::bitcash_primitives::Name::from_static($account);

        /// Action names declared in the ABI
        pub const ACTIONS: &[&str] = &[$($aname),*];

        $(
            impl ::bitcash_sdk::ActionData for $aty {
                const ACTION: &'static str = $aname;
            }
        )*

        static ABI: ::std::sync::OnceLock<
            ::std::result::Result<::std::sync::Arc<::bitcash_codec::AbiDef>, ::bitcash_codec::CodecError>,
        > = ::std::sync::OnceLock::new();

        /// Contract ABI decoded from [`ABI_BLOB`], cached after the first call
        pub fn abi() -> ::std::result::Result<::std::sync::Arc<::bitcash_codec::AbiDef>, ::bitcash_sdk::SdkError> {
            ABI.get_or_init(|| ::bitcash_codec::AbiDef::from_base64(ABI_BLOB).map(::std::sync::Arc::new))
                .clone()
                .map_err(::bitcash_sdk::SdkError::from)
        }

        /// Tables declared in the ABI
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TableName {
            $(
                #[doc = concat!("`", $tname, "`")]
                $variant,
            )*
        }

        impl TableName {
            /// Every table, in ABI order
            pub const ALL: &'static [TableName] = &[$(TableName::$variant),*];

            /// Table name text
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TableName::$variant => $tname,)*
                }
            }

            /// Table name
            pub fn name(&self) -> ::bitcash_primitives::Name {
                match self {
                    $(TableName::$variant => ::bitcash_primitives::Name::from_static($tname),)*
                }
            }

            /// ABI struct of the table's rows
            pub fn row_type(&self) -> &'static str {
                match self {
                    $(TableName::$variant => <$row as ::bitcash_codec::AbiStruct>::ABI_NAME,)*
                }
            }

            /// Comma separated list of every table
            pub fn list() -> String {
                Self::ALL.iter().map(TableName::as_str).collect::<Vec<_>>().join(", ")
            }
        }

        impl ::std::str::FromStr for TableName {
            type Err = ::bitcash_sdk::SdkError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $($tname => Ok(TableName::$variant),)*
                    _ => Err(::bitcash_sdk::SdkError::UnknownTable { contract: $account.to_string(), table: s.to_string() }),
                }
            }
        }

        impl ::std::fmt::Display for TableName {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        /// Contract handle with typed actions and tables
        #[derive(Clone)]
        pub struct Contract {
            inner: ::bitcash_sdk::Contract,
        }

        impl Contract {
            /// Contract at the default account
            pub fn new(client: ::bitcash_sdk::ApiClient) -> ::std::result::Result<Self, ::bitcash_sdk::SdkError> {
                Self::with_account(ACCOUNT, client)
            }

            /// Contract deployed at `account`
            pub fn with_account(
                account: ::bitcash_primitives::Name,
                client: ::bitcash_sdk::ApiClient,
            ) -> ::std::result::Result<Self, ::bitcash_sdk::SdkError> {
                Ok(Self { inner: ::bitcash_sdk::Contract::new(account, abi()?, client) })
            }

            /// Contract account
            pub fn account(&self) -> ::bitcash_primitives::Name {
                self.inner.account()
            }

            /// Untyped handle
            pub fn inner(&self) -> &::bitcash_sdk::Contract {
                &self.inner
            }

            /// Build an action
            pub fn action<T: ::bitcash_sdk::ActionData>(
                &self,
                data: &T,
                options: ::bitcash_sdk::ActionOptions,
            ) -> ::std::result::Result<::bitcash_types::Action, ::bitcash_sdk::SdkError> {
                self.inner.action(data, options)
            }

            /// Table handle with rows decoded as `R`
            pub fn table<R: ::serde::de::DeserializeOwned>(
                &self,
                table: TableName,
                scope: Option<&str>,
            ) -> ::std::result::Result<::bitcash_sdk::Table<R>, ::bitcash_sdk::SdkError> {
                self.inner.table(table.name(), scope)
            }

            /// Table handle with rows as raw JSON
            pub fn table_json(
                &self,
                table: TableName,
                scope: Option<&str>,
            ) -> ::std::result::Result<::bitcash_sdk::Table<::serde_json::Value>, ::bitcash_sdk::SdkError> {
                self.inner.table(table.name(), scope)
            }
        }

    };
}
