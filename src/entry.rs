//! Typed model of a Contentful `blogPost` entry.
//!
//! The delivery API payload is loosely shaped: fields may be missing, null,
//! empty, or of the wrong JSON type. Parsing here never fails. Text fields
//! follow JavaScript truthiness: `null`, `false`, `0` and `""` are absent,
//! `true` and non-zero numbers are stringified. Arrays and objects where text
//! is expected are treated as absent, and a `featuredMedia` value that is not
//! an array is treated as empty.

use serde_json::Value;

/// One media item attached to a post's `featuredMedia` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub url: Option<String>,
    /// Fallback for `url`.
    pub preview_url: Option<String>,
    /// Smaller image, preferred for avatars.
    pub thumbnail: Option<String>,
}

impl MediaDescriptor {
    /// Parse a media item. Non-object values yield an empty descriptor.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            url: truthy_text(value.get("url")),
            preview_url: truthy_text(value.get("previewUrl")),
            thumbnail: truthy_text(value.get("thumbnail")),
        }
    }
}

/// A blog post entry as returned by the delivery API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostEntry {
    /// `sys.id`
    pub id: Option<String>,
    /// `sys.createdAt`, unparsed.
    pub created_at: Option<String>,
    /// `fields.title`
    pub title: Option<String>,
    /// `fields.slug`
    pub slug: Option<String>,
    /// `fields.featuredMedia`, in API order.
    pub featured_media: Vec<MediaDescriptor>,
}

impl BlogPostEntry {
    /// Parse an entry object, degrading malformed fields to absent.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let sys = value.get("sys");
        let fields = value.get("fields");

        let featured_media = fields
            .and_then(|f| f.get("featuredMedia"))
            .and_then(Value::as_array)
            .map(|items| items.iter().map(MediaDescriptor::from_value).collect())
            .unwrap_or_default();

        Self {
            id: truthy_text(sys.and_then(|s| s.get("id"))),
            created_at: truthy_text(sys.and_then(|s| s.get("createdAt"))),
            title: truthy_text(fields.and_then(|f| f.get("title"))),
            slug: truthy_text(fields.and_then(|f| f.get("slug"))),
            featured_media,
        }
    }

    /// The first featured media item, if any.
    #[must_use]
    pub fn first_media(&self) -> Option<&MediaDescriptor> {
        self.featured_media.first()
    }
}

/// Extract the first entry from an `/entries` response payload.
///
/// Returns `None` when `items` is missing, not an array, empty, or its first
/// element is falsy (`null`, `false`, `0`, `""`).
#[must_use]
pub fn latest_entry(payload: &Value) -> Option<BlogPostEntry> {
    payload
        .get("items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .filter(|item| is_truthy(item))
        .map(BlogPostEntry::from_value)
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a truthy scalar. Integral numbers print without a fraction.
fn truthy_text(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| is_truthy(v))?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        _ => None,
    }
}
