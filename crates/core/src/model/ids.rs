use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an ID from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot be empty", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

// Backend ids are opaque strings; the newtypes keep them from being mixed up.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self::new(trimmed))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a flashcard.
    FlashcardId
);
string_id!(
    /// Identifier of a dictionary word.
    WordId
);
string_id!(
    /// Identifier of one meaning of a word.
    MeaningId
);
string_id!(
    /// Identifier of a generated media artifact.
    MediaId
);
string_id!(
    /// Identifier of a media comparison (old vs. new variant).
    ComparisonId
);
string_id!(
    /// Identifier of a generation template.
    TemplateId
);
string_id!(
    /// Identifier of the signed-in user.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_id_display() {
        let id = FlashcardId::new("card-1");
        assert_eq!(id.to_string(), "card-1");
        assert_eq!(format!("{id:?}"), "FlashcardId(card-1)");
    }

    #[test]
    fn test_id_from_str_trims() {
        let id: UserId = "  user-9 ".parse().unwrap();
        assert_eq!(id, UserId::new("user-9"));
    }

    #[test]
    fn test_id_from_str_empty() {
        let result = "   ".parse::<MeaningId>();
        assert_eq!(result.unwrap_err().to_string(), "MeaningId cannot be empty");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&MediaId::new("m-1")).unwrap();
        assert_eq!(json, "\"m-1\"");
    }
}
