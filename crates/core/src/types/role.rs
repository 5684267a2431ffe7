//! Role and section enums.

use serde::{Deserialize, Serialize};

/// User role with escalating permission levels.
///
/// Serialized in SCREAMING_SNAKE_CASE to match the wire format expected by
/// the dashboard clients, and stored as TEXT in `PostgreSQL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular shopper. No access to admin surfaces.
    #[default]
    User,
    /// Organization administrator. Sees and mutates rows belonging to
    /// their own organization only.
    Admin,
    /// Global administrator. Exempt from organization scoping.
    Superadmin,
}

impl Role {
    /// Whether this role may use the admin surfaces at all.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    /// The wire representation (`USER`/`ADMIN`/`SUPERADMIN`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Superadmin => "SUPERADMIN",
        }
    }

    /// Parse the wire representation.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            "SUPERADMIN" => Some(Self::Superadmin),
            _ => None,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a home-page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    /// Full-width hero banner.
    Banner,
    /// Grid of products selected by a filter in the section settings.
    ProductGrid,
    /// Showcase of a single category.
    CategoryShowcase,
}

impl SectionKind {
    /// The wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "BANNER",
            Self::ProductGrid => "PRODUCT_GRID",
            Self::CategoryShowcase => "CATEGORY_SHOWCASE",
        }
    }

    /// Parse the wire representation.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "BANNER" => Some(Self::Banner),
            "PRODUCT_GRID" => Some(Self::ProductGrid),
            "CATEGORY_SHOWCASE" => Some(Self::CategoryShowcase),
            _ => None,
        }
    }
}

// Both enums are stored as TEXT; the sqlx impls mirror the Email wrapper's.

#[cfg(feature = "postgres")]
mod postgres_impls {
    use super::{Role, SectionKind};

    macro_rules! text_enum_sqlx {
        ($name:ident) => {
            impl sqlx::Type<sqlx::Postgres> for $name {
                fn type_info() -> sqlx::postgres::PgTypeInfo {
                    <String as sqlx::Type<sqlx::Postgres>>::type_info()
                }

                fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                    <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
                }
            }

            impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
                fn decode(
                    value: sqlx::postgres::PgValueRef<'r>,
                ) -> Result<Self, sqlx::error::BoxDynError> {
                    let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                    Self::from_str_opt(&s).ok_or_else(|| {
                        format!("invalid {} value in database: {s}", stringify!($name)).into()
                    })
                }
            }

            impl sqlx::Encode<'_, sqlx::Postgres> for $name {
                fn encode_by_ref(
                    &self,
                    buf: &mut sqlx::postgres::PgArgumentBuffer,
                ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                    <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
                }
            }
        };
    }

    text_enum_sqlx!(Role);
    text_enum_sqlx!(SectionKind);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Superadmin).unwrap(), "\"SUPERADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"ADMIN\"").unwrap(),
            Role::Admin
        );
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
    }

    #[test]
    fn test_is_staff() {
        assert!(!Role::User.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(Role::Superadmin.is_staff());
    }

    #[test]
    fn test_as_str_roundtrip() {
        for role in [Role::User, Role::Admin, Role::Superadmin] {
            assert_eq!(Role::from_str_opt(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str_opt("OWNER"), None);
    }

    #[test]
    fn test_section_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&SectionKind::ProductGrid).unwrap(),
            "\"PRODUCT_GRID\""
        );
    }
}
