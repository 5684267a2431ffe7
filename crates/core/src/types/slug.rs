//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A URL-safe slug.
///
/// Slugs are derived deterministically from display titles: lowercased,
/// whitespace runs become a single `-`, anything that is not alphanumeric,
/// `_`, or `-` is dropped, runs of `-` are collapsed, and leading/trailing
/// `-` are trimmed. The same title always yields the same slug; uniqueness
/// is enforced by the storage layer, not here.
///
/// ```
/// use luxe_core::Slug;
///
/// assert_eq!(Slug::from_title("Classic White Shirt").as_str(), "classic-white-shirt");
/// assert_eq!(Slug::from_title("  Summer -- Sale!  ").as_str(), "summer-sale");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a display title.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let mut out = String::with_capacity(title.len());
        let mut pending_dash = false;

        for c in title.trim().chars() {
            if c.is_whitespace() || c == '-' {
                pending_dash = !out.is_empty();
            } else if c.is_ascii_alphanumeric() || c == '_' {
                if pending_dash {
                    out.push('-');
                    pending_dash = false;
                }
                out.extend(c.to_lowercase());
            }
            // everything else is dropped
        }

        Self(out)
    }

    /// Wrap an already-slugified string without re-deriving it.
    ///
    /// Used when the caller supplies an explicit slug (e.g. organization
    /// creation) that should be stored verbatim.
    #[must_use]
    pub fn from_raw(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(Slug::from_title("Classic White Shirt").as_str(), "classic-white-shirt");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            Slug::from_title("Evening Gown"),
            Slug::from_title("Evening Gown")
        );
    }

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(Slug::from_title("Shirts & Tops!").as_str(), "shirts-tops");
        assert_eq!(Slug::from_title("50% Off (Today)").as_str(), "50-off-today");
    }

    #[test]
    fn test_dash_runs_collapsed() {
        assert_eq!(Slug::from_title("a -- b").as_str(), "a-b");
        assert_eq!(Slug::from_title("a----b").as_str(), "a-b");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(Slug::from_title("  -hello-  ").as_str(), "hello");
    }

    #[test]
    fn test_underscore_kept() {
        assert_eq!(Slug::from_title("snake_case title").as_str(), "snake_case-title");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Slug::from_title("").as_str(), "");
        assert_eq!(Slug::from_title("!!!").as_str(), "");
    }

    #[test]
    fn test_serde_transparent() {
        let slug = Slug::from_title("Men Shirts");
        assert_eq!(serde_json::to_string(&slug).unwrap(), "\"men-shirts\"");
    }
}
