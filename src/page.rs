//! In-memory post card page.
//!
//! Holds the state of each element of the post card layout, exposes them as
//! [`RenderTargets`], and renders the result to HTML with maud. A page that
//! was never rendered into produces the static placeholder markup.

use std::collections::BTreeMap;

use maud::{html, Markup, Render, DOCTYPE};
use serde_json::Value;

use crate::render::{ids, Element, RenderTargets};

/// Mutable state of one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub text: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub click_href: Option<String>,
}

impl ElementState {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Text content, or `fallback` when never set.
    #[must_use]
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.text.as_deref().unwrap_or(fallback)
    }

    /// Inline `style` attribute value, if any properties are set.
    #[must_use]
    pub fn style_attr(&self) -> Option<String> {
        if self.style.is_empty() {
            return None;
        }
        Some(
            self.style
                .iter()
                .map(|(k, v)| format!("{k}: {v};"))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Inline `onclick` handler navigating to `click_href`.
    #[must_use]
    pub fn onclick_attr(&self) -> Option<String> {
        self.click_href
            .as_ref()
            .map(|href| format!("window.location.href = {};", Value::String(href.clone())))
    }
}

impl Element for ElementState {
    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_style(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_string(), value.to_string());
    }

    fn navigate_on_click(&mut self, url: &str) {
        self.click_href = Some(url.to_string());
    }
}

/// The post card layout with one state per fixed element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCardPage {
    pub cover_image: ElementState,
    pub post_title: ElementState,
    pub avatar_image: ElementState,
    pub author_name: ElementState,
    pub created_at: ElementState,
    pub post_card: ElementState,
    pub post_link: ElementState,
}

impl PostCardPage {
    /// Borrow every element as a render target.
    pub fn targets(&mut self) -> RenderTargets<'_> {
        RenderTargets {
            cover_image: Some(&mut self.cover_image),
            post_title: Some(&mut self.post_title),
            avatar_image: Some(&mut self.avatar_image),
            author_name: Some(&mut self.author_name),
            created_at: Some(&mut self.created_at),
            post_card: Some(&mut self.post_card),
            post_link: Some(&mut self.post_link),
        }
    }

    /// True when nothing has been written to the page.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        *self == Self::default()
    }

    /// Wrap the card in a complete HTML document.
    #[must_use]
    pub fn to_document(&self) -> Markup {
        let title = self.post_title.text_or("Latest post");
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                }
                body {
                    main class="container" {
                        (self)
                    }
                }
            }
        }
    }
}

impl Render for PostCardPage {
    fn render(&self) -> Markup {
        let cover = &self.cover_image;
        let title = &self.post_title;
        let avatar = &self.avatar_image;
        let created = &self.created_at;
        let card = &self.post_card;
        let link = &self.post_link;

        html! {
            article id=(ids::POST_CARD) class="post-card" style=[card.style_attr()] onclick=[card.onclick_attr()] {
                img id=(ids::POST_COVER) class="post-cover" src=[cover.attribute("src")] alt=[cover.attribute("alt")];
                div class="post-body" {
                    h2 class="post-title" {
                        a id=(ids::POST_TITLE) href=[title.attribute("href")] { (title.text_or("")) }
                    }
                    div class="post-meta" {
                        img id=(ids::AUTHOR_AVATAR) class="author-avatar" src=[avatar.attribute("src")] alt=[avatar.attribute("alt")];
                        span id=(ids::AUTHOR_NAME) class="author-name" { (self.author_name.text_or("")) }
                        time id=(ids::CREATED_AT) datetime=[created.attribute("datetime")] { (created.text_or("")) }
                    }
                    a id=(ids::POST_LINK) class="read-more" href=[link.attribute("href")] { "Read more" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{BlogPostEntry, MediaDescriptor};
    use crate::render::render_post;
    use crate::view::project;

    #[test]
    fn test_untouched_page_renders_static_markup() {
        let page = PostCardPage::default();
        assert!(page.is_untouched());

        let html = page.render().into_string();
        assert!(html.contains(r#"id="postCard""#));
        assert!(html.contains(r#"id="postCover""#));
        assert!(!html.contains("src="));
        assert!(!html.contains("onclick"));
        assert!(!html.contains("datetime="));
    }

    #[test]
    fn test_rendered_page_markup() {
        let entry = BlogPostEntry {
            id: Some("id1".to_string()),
            created_at: Some("2024-01-15T10:00:00.000Z".to_string()),
            title: Some("Fish & Chips".to_string()),
            slug: Some("fish-chips".to_string()),
            featured_media: vec![MediaDescriptor {
                url: Some("https://img/cover.jpg".to_string()),
                ..Default::default()
            }],
        };
        let mut page = PostCardPage::default();
        render_post(&project(&entry), &mut page.targets());
        assert!(!page.is_untouched());

        let html = page.render().into_string();
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains(r#"src="https://img/cover.jpg""#));
        assert!(html.contains(r#"href="./blog1.html?slug=fish-chips""#));
        assert!(html.contains(r#"datetime="2024-01-15T10:00:00.000Z""#));
        assert!(html.contains("Mon Jan 15 2024"));
        assert!(html.contains("Contentful Author"));
        assert!(html.contains(r#"style="cursor: pointer;""#));
        assert!(html.contains("window.location.href = &quot;./blog1.html?slug=fish-chips&quot;;"));
    }

    #[test]
    fn test_document_title() {
        let mut page = PostCardPage::default();
        assert!(page.to_document().into_string().contains("<title>Latest post</title>"));

        page.post_title.set_text("Hello");
        let doc = page.to_document().into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Hello</title>"));
    }

    #[test]
    fn test_style_attr_joins_properties() {
        let mut el = ElementState::default();
        assert!(el.style_attr().is_none());
        el.set_style("cursor", "pointer");
        el.set_style("color", "red");
        assert_eq!(el.style_attr().as_deref(), Some("color: red; cursor: pointer;"));
    }
}
