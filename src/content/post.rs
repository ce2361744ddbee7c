//! Post, author, category and image models as projected by the CMS queries

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::ContentBlock;

/// Publication status of a post
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
    /// Any status value this front-end does not know about
    Other(String),
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "draft" => Self::Draft,
            "published" => Self::Published,
            "archived" => Self::Archived,
            _ => Self::Other(value),
        }
    }
}

impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
            Self::Other(s) => s,
        }
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Document id
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Post title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Slug (`slug.current`, projected flat)
    #[serde(default)]
    pub slug: Option<String>,

    /// Publication date
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PostStatus,

    #[serde(default)]
    pub excerpt: Option<String>,

    /// Rich body content
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: Vec<ContentBlock>,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,

    #[serde(default, deserialize_with = "lenient")]
    pub main_image: Option<ImageRef>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub seo: Option<Seo>,
}

impl Post {
    /// Whether this post may be shown to readers at all
    pub fn is_displayable(&self) -> bool {
        self.status == PostStatus::Published
            && self.slug.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Whether this post may appear in the index (needs a date to sort by)
    pub fn is_listable(&self) -> bool {
        self.is_displayable() && self.published_at.is_some()
    }

    /// Non-empty tags
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flatten()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageRef>,
}

/// Post category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// Search metadata overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,

    #[serde(default)]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// Reference to an image asset, with its editorial fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<AssetPointer>,

    #[serde(default)]
    pub alt: Option<String>,

    #[serde(default)]
    pub caption: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub crop: Option<Crop>,
}

impl ImageRef {
    /// Asset id, whether the asset was referenced or dereferenced
    pub fn asset_id(&self) -> Option<&str> {
        self.asset.as_ref().map(|a| a.reference.as_str())
    }
}

/// `asset._ref`, or `asset._id` when the query dereferenced the asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPointer {
    #[serde(rename = "_ref", alias = "_id")]
    pub reference: String,
}

/// Crop insets as fractions of the source image
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
}

impl Crop {
    pub fn is_empty(&self) -> bool {
        self.top == 0.0 && self.bottom == 0.0 && self.left == 0.0 && self.right == 0.0
    }
}

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an optional value, treating a malformed one as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(
                field = std::any::type_name::<T>(),
                error = %e,
                "ignoring malformed field"
            );
            None
        }
    }))
}

/// Accept RFC 3339 timestamps and bare dates; anything else becomes `None`
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_datetime))
}

/// Parse a CMS datetime value
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
