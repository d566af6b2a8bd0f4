//! Projection of a [`BlogPostEntry`] into the values the post card displays.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::DEFAULT_DETAIL_PAGE;
use crate::entry::{BlogPostEntry, MediaDescriptor};

/// Title used when the entry has none.
pub const UNTITLED: &str = "Untitled";

/// Author shown on every card. Author entries are not resolved.
pub const AUTHOR_LABEL: &str = "Contentful Author";

/// Link target used when no slug can be derived.
pub const NO_DETAIL_URL: &str = "#";

/// Render-ready values for the latest post card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostViewModel {
    /// Never empty.
    pub title: String,
    /// Empty when the entry has no usable slug or id.
    pub slug: String,
    pub cover_url: String,
    pub avatar_url: String,
    pub author_label: String,
    /// e.g. `Mon Jan 15 2024`
    pub created_at_display: Option<String>,
    /// e.g. `2024-01-15T10:00:00.000Z`
    pub created_at_iso: Option<String>,
    pub detail_url: String,
}

/// Cover and avatar URLs picked from a post's featured media.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaUrls {
    pub cover_url: String,
    pub avatar_url: String,
}

/// Project an entry using the default detail page.
#[must_use]
pub fn project(entry: &BlogPostEntry) -> PostViewModel {
    project_with_detail_page(entry, DEFAULT_DETAIL_PAGE)
}

/// Project an entry, linking to `detail_page` with a `slug` query parameter.
#[must_use]
pub fn project_with_detail_page(entry: &BlogPostEntry, detail_page: &str) -> PostViewModel {
    let title = entry
        .title
        .clone()
        .unwrap_or_else(|| UNTITLED.to_string());
    let slug = entry
        .slug
        .clone()
        .or_else(|| entry.id.clone())
        .unwrap_or_default();

    let created_at = entry.created_at.as_deref().and_then(parse_created_at);
    let MediaUrls {
        cover_url,
        avatar_url,
    } = pick_media_urls(&entry.featured_media);

    PostViewModel {
        detail_url: detail_url(detail_page, &slug),
        title,
        slug,
        cover_url,
        avatar_url,
        author_label: AUTHOR_LABEL.to_string(),
        created_at_display: created_at.map(|d| format_display_date(&d)),
        created_at_iso: created_at.map(|d| format_iso(&d)),
    }
}

/// Pick the cover and avatar URLs from the first media item.
///
/// Cover prefers `url` then `previewUrl`. Avatar prefers `thumbnail`, then
/// `url`, then `previewUrl`. Missing values become empty strings.
#[must_use]
pub fn pick_media_urls(media: &[MediaDescriptor]) -> MediaUrls {
    let Some(first) = media.first() else {
        return MediaUrls::default();
    };

    let cover_url = first
        .url
        .as_ref()
        .or(first.preview_url.as_ref())
        .cloned()
        .unwrap_or_default();
    let avatar_url = first
        .thumbnail
        .as_ref()
        .or(first.url.as_ref())
        .or(first.preview_url.as_ref())
        .cloned()
        .unwrap_or_default();

    MediaUrls {
        cover_url,
        avatar_url,
    }
}

/// Build the detail-page link for a slug, or `#` when the slug is empty.
#[must_use]
pub fn detail_url(detail_page: &str, slug: &str) -> String {
    if slug.is_empty() {
        NO_DETAIL_URL.to_string()
    } else {
        format!("{detail_page}?slug={}", encode_uri_component(slug))
    }
}

/// Percent-encode a string the way browsers' `encodeURIComponent` does.
///
/// `urlencoding` leaves only `A-Z a-z 0-9 - _ . ~` alone; `encodeURIComponent`
/// additionally keeps `! ' ( ) *`.
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    urlencoding::encode(input)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Parse an RFC 3339 `sys.createdAt` value. Unparseable values are absent.
#[must_use]
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Day string such as `Mon Jan 15 2024`, in UTC.
#[must_use]
pub fn format_display_date(date: &DateTime<Utc>) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
#[must_use]
pub fn format_iso(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
