//! Product identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty.
    #[error("product id cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("product id must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Identifier of a financial product.
///
/// Identifiers are chosen by the user when the product is created and are
/// unique across the upstream product API.
///
/// ## Constraints
///
/// - Length: 3-10 characters (Unicode scalar values, not bytes)
///
/// Deserialization is transparent and does not re-check the length, since
/// identifiers coming back from the API are authoritative.
///
/// ## Examples
///
/// ```
/// use finprod_core::ProductId;
///
/// assert!(ProductId::parse("trj-crd").is_ok());
/// assert!(ProductId::parse("ab").is_err());          // too short
/// assert!(ProductId::parse("abcdefghijk").is_err()); // too long
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Minimum length of a product id.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a product id.
    pub const MAX_LENGTH: usize = 10;

    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, shorter than 3 characters or
    /// longer than 10 characters.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let len = s.chars().count();

        if len == 0 {
            return Err(ProductIdError::Empty);
        }

        if len < Self::MIN_LENGTH {
            return Err(ProductIdError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if len > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_boundaries() {
        assert_eq!(ProductId::parse("abc").unwrap().as_str(), "abc");
        assert_eq!(ProductId::parse("abcdefghij").unwrap().as_str(), "abcdefghij");
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(
            ProductId::parse("ab"),
            Err(ProductIdError::TooShort { min: 3 })
        );
        assert_eq!(
            ProductId::parse("abcdefghijk"),
            Err(ProductIdError::TooLong { max: 10 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 3 characters, 6 bytes
        assert!(ProductId::parse("ñññ").is_ok());
        // 10 characters, 20 bytes
        assert!(ProductId::parse("áéíóúáéíóú").is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::parse("trj-crd").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"trj-crd\"");

        let back: ProductId = serde_json::from_str("\"trj-crd\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_compares_with_str() {
        let id = ProductId::parse("trj-crd").unwrap();
        assert!(id == "trj-crd");
        assert_eq!(id.to_string(), "trj-crd");
    }
}
