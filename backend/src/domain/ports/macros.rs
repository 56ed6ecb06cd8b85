//! Macro for port error enums whose variants each carry one text detail.
//!
//! Every variant gets a snake-case constructor accepting `impl Into<String>`,
//! so adapters can write `RepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StorageFailure {
            Offline { host } => "{host} is offline",
            RejectedWrite { reason } => "write rejected: {reason}",
        }
    }

    #[test]
    fn constructors_accept_borrowed_and_owned_text() {
        assert_eq!(
            StorageFailure::offline("db-1").to_string(),
            "db-1 is offline"
        );
        assert_eq!(
            StorageFailure::rejected_write(String::from("duplicate key")),
            StorageFailure::RejectedWrite {
                reason: "duplicate key".to_owned()
            }
        );
    }
}
