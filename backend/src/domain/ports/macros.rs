//! Helper macro for port error enums whose variants each carry one field.

/// Generate a `thiserror` enum plus one snake-case constructor per variant.
///
/// Each variant names its constructor explicitly:
/// `Query { message: String } => query, "query failed: {message}"`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : $ty:ty } => $ctor:ident, $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: $ty },
            )*
        }

        impl $name {
            $(
                #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                pub fn $ctor($field: impl Into<$ty>) -> Self {
                    Self::$variant { $field: $field.into() }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;
