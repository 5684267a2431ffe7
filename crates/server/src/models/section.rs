//! Home-page section domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use luxe_core::{SectionId, SectionKind};

/// A configurable home-page section.
///
/// Sections are rendered in ascending `position`; the settings payload is
/// free-form JSON interpreted by the storefront renderer for each kind.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique section ID.
    pub id: SectionId,
    /// Admin-facing title.
    pub title: String,
    /// What the section renders. Serialized as `type` on the wire.
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Kind-specific settings (banner URL, product filter, ...).
    pub settings: serde_json::Value,
    /// Whether the section is currently shown.
    pub is_enabled: bool,
    /// Sort position, ascending. Serialized as `order` on the wire; the
    /// column avoids the SQL keyword.
    #[serde(rename = "order")]
    pub position: i32,
    /// When the section was created.
    pub created_at: DateTime<Utc>,
    /// When the section was last updated.
    pub updated_at: DateTime<Utc>,
}
