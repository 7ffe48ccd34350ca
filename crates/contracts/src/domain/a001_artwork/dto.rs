use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of an artwork record. The only field used for identity.
pub type ArtworkId = i64;

// ============================================================================
// Artwork
// ============================================================================

/// One artwork record as returned by the artworks endpoint.
///
/// The live API sends `date_start` / `date_end` as integers and most text
/// fields may be `null`, so every descriptive field is normalised to
/// `Option<String>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default, deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub place_of_origin: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub artist_display: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub inscriptions: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub date_start: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub date_end: Option<String>,
}

impl Artwork {
    /// Record with only an identifier and a title.
    pub fn new(id: ArtworkId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }
}

/// Accepts a string, a number or null.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

// ============================================================================
// Page envelope
// ============================================================================

/// Pagination block of a page response. Only `total` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// One fetched batch of artworks plus the dataset's total count.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArtworkPage {
    pub data: Vec<Artwork>,
    pub pagination: Pagination,
}

impl ArtworkPage {
    pub fn new(data: Vec<Artwork>, total: u64) -> Self {
        Self {
            data,
            pagination: Pagination {
                total,
                ..Pagination::default()
            },
        }
    }

    pub fn total(&self) -> u64 {
        self.pagination.total
    }

    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.data.iter().map(|a| a.id)
    }
}

/// Query parameters of `GET <endpoint>`. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtworkPageQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}
