//! The one-shot page-load handler: fetch, project, render.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use crate::contentful::ContentfulClient;
use crate::entry::latest_entry;
use crate::render::{render_post, RenderTargets};
use crate::view::{project_with_detail_page, PostViewModel};

/// What a page load did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The latest post was rendered into the targets.
    Rendered(PostViewModel),
    /// The API returned no entries; nothing was rendered.
    NoEntries,
    /// The fetch failed; nothing was rendered.
    Failed(String),
}

/// Fetch the latest post and render it. Failures are logged, never returned,
/// and leave the targets untouched.
pub async fn load_latest_post(
    client: &ContentfulClient,
    detail_page: &str,
    targets: &mut RenderTargets<'_>,
) -> LoadOutcome {
    match client.fetch_latest_blog_post().await {
        Ok(payload) => render_payload(&payload, detail_page, targets),
        Err(e) => {
            error!("Error fetching Contentful data: {e}");
            LoadOutcome::Failed(e.to_string())
        }
    }
}

/// Render the first entry of an `/entries` payload, if there is one.
pub fn render_payload(
    payload: &Value,
    detail_page: &str,
    targets: &mut RenderTargets<'_>,
) -> LoadOutcome {
    let Some(entry) = latest_entry(payload) else {
        warn!("No blogPost entries found. Make sure at least one entry is published.");
        return LoadOutcome::NoEntries;
    };

    let view = project_with_detail_page(&entry, detail_page);
    render_post(&view, targets);
    info!(title = %view.title, detail_url = %view.detail_url, "Rendered latest post");
    LoadOutcome::Rendered(view)
}

/// Write rendered HTML to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub async fn write_output(path: Option<&Path>, html: &str) -> Result<()> {
    if let Some(path) = path {
        tokio::fs::write(path, html)
            .await
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        info!(path = %path.display(), "Wrote post card");
    } else {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(html.as_bytes())
            .await
            .context("Failed to write to stdout")?;
        stdout.flush().await.context("Failed to flush stdout")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PostCardPage;
    use serde_json::json;

    #[test]
    fn test_render_payload_empty_items() {
        let mut page = PostCardPage::default();
        let outcome = render_payload(&json!({ "items": [] }), "./blog1.html", &mut page.targets());
        assert_eq!(outcome, LoadOutcome::NoEntries);
        assert!(page.is_untouched());
    }

    #[test]
    fn test_render_payload_falsy_first_item() {
        for payload in [
            json!({ "items": [false] }),
            json!({ "items": [0] }),
            json!({ "items": [""] }),
        ] {
            let mut page = PostCardPage::default();
            let outcome = render_payload(&payload, "./blog1.html", &mut page.targets());
            assert_eq!(outcome, LoadOutcome::NoEntries, "payload: {payload}");
            assert!(page.is_untouched(), "payload: {payload}");
        }
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        assert_eq!(
            serde_json::to_value(&LoadOutcome::NoEntries).unwrap(),
            json!({ "status": "no_entries" })
        );
        assert_eq!(
            serde_json::to_value(LoadOutcome::Failed("boom".to_string())).unwrap(),
            json!({ "status": "failed", "detail": "boom" })
        );

        let mut page = PostCardPage::default();
        let payload = json!({ "items": [ { "sys": { "id": "a1" } } ] });
        let outcome = render_payload(&payload, "./blog1.html", &mut page.targets());
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "rendered");
        assert_eq!(value["detail"]["title"], "Untitled");
        assert_eq!(value["detail"]["detail_url"], "./blog1.html?slug=a1");
        assert_eq!(value["detail"]["created_at_iso"], serde_json::Value::Null);
    }

    #[test]
    fn test_render_payload_renders_first_item() {
        let payload = json!({
            "items": [
                { "sys": { "id": "a1" }, "fields": { "title": "Newest" } },
                { "sys": { "id": "a0" }, "fields": { "title": "Older" } }
            ]
        });
        let mut page = PostCardPage::default();
        let outcome = render_payload(&payload, "./blog1.html", &mut page.targets());

        let LoadOutcome::Rendered(view) = &outcome else {
            panic!("expected a rendered outcome, got {outcome:?}");
        };
        assert_eq!(view.title, "Newest");
        assert_eq!(view.detail_url, "./blog1.html?slug=a1");
        assert_eq!(page.post_title.text.as_deref(), Some("Newest"));
    }
}
