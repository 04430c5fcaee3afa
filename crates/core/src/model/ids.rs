use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map($name::new)
                    .map_err(|_| ParseIdError {
                        kind: stringify!($name),
                    })
            }
        }
    };
}

numeric_id!(
    /// Identifier of a persisted quiz result (row id in `SQLite`).
    QuizResultId
);

numeric_id!(
    /// Identifier of a source document inside a study set.
    SourceId
);

numeric_id!(
    /// Identifier of a persisted summary or study note.
    AssetId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_result_id_display() {
        assert_eq!(QuizResultId::new(42).to_string(), "42");
    }

    #[test]
    fn source_id_from_str() {
        let id: SourceId = " 7 ".parse().unwrap();
        assert_eq!(id, SourceId::new(7));
    }

    #[test]
    fn asset_id_from_str_invalid() {
        let err = "abc".parse::<AssetId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse AssetId from string");
    }

    #[test]
    fn debug_names_the_kind() {
        assert_eq!(format!("{:?}", QuizResultId::new(3)), "QuizResultId(3)");
    }
}
