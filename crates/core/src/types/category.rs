//! Canonical category name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when canonicalizing a [`CategoryName`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CategoryNameError {
    /// The input is empty after trimming.
    #[error("category name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("category name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The canonical, deduplicated form of a seller-supplied category string.
///
/// Sellers type category names free-form; the canonical form is the trimmed,
/// title-cased rendition of that text. It is the uniqueness key for the
/// category table: every input that canonicalizes to the same string refers
/// to the same category.
///
/// Title-casing uppercases the first letter of every alphabetic run and
/// lowercases the rest, so `"shoes "`, `"Shoes"` and `" SHOES"` all
/// canonicalize to `"Shoes"`.
///
/// ## Examples
///
/// ```
/// use palengke_core::CategoryName;
///
/// let a = CategoryName::canonicalize("ceramics ").unwrap();
/// let b = CategoryName::canonicalize(" CERAMICS").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Ceramics");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Maximum length of a category name.
    pub const MAX_LENGTH: usize = 300;

    /// Canonicalize a raw category string: trim, then title-case.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after trimming or longer than
    /// [`Self::MAX_LENGTH`] characters.
    pub fn canonicalize(raw: &str) -> Result<Self, CategoryNameError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CategoryNameError::Empty);
        }

        if trimmed.len() > Self::MAX_LENGTH {
            return Err(CategoryNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let mut canonical = String::with_capacity(trimmed.len());
        let mut in_word = false;
        for ch in trimmed.chars() {
            if ch.is_alphabetic() {
                if in_word {
                    canonical.extend(ch.to_lowercase());
                } else {
                    canonical.extend(ch.to_uppercase());
                }
                in_word = true;
            } else {
                canonical.push(ch);
                in_word = false;
            }
        }

        Ok(Self(canonical))
    }

    /// Returns the canonical name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CategoryName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CategoryName {
    type Err = CategoryNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::canonicalize(s)
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with sqlite feature)
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for CategoryName {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for CategoryName {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        // Stored values are already canonical
        Ok(Self(s))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for CategoryName {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_titlecases() {
        assert_eq!(
            CategoryName::canonicalize("shoes ").unwrap().as_str(),
            "Shoes"
        );
        assert_eq!(
            CategoryName::canonicalize(" SHOES").unwrap().as_str(),
            "Shoes"
        );
        assert_eq!(
            CategoryName::canonicalize("Shoes").unwrap().as_str(),
            "Shoes"
        );
    }

    #[test]
    fn test_equal_inputs_converge() {
        let variants = ["ceramics", "Ceramics", " ceramics ", "CERAMICS"];
        let first = CategoryName::canonicalize("ceramics").unwrap();
        for v in variants {
            assert_eq!(CategoryName::canonicalize(v).unwrap(), first);
        }
    }

    #[test]
    fn test_multi_word() {
        assert_eq!(
            CategoryName::canonicalize("home decor").unwrap().as_str(),
            "Home Decor"
        );
        assert_eq!(
            CategoryName::canonicalize("hand-made goods")
                .unwrap()
                .as_str(),
            "Hand-Made Goods"
        );
    }

    #[test]
    fn test_inner_whitespace_preserved() {
        // Only leading/trailing whitespace is trimmed
        assert_eq!(
            CategoryName::canonicalize("wood  carving").unwrap().as_str(),
            "Wood  Carving"
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            CategoryName::canonicalize("   "),
            Err(CategoryNameError::Empty)
        ));
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "a".repeat(301);
        assert!(matches!(
            CategoryName::canonicalize(&long),
            Err(CategoryNameError::TooLong { .. })
        ));
    }
}
