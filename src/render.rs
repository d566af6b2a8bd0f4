//! Writing a [`PostViewModel`] into host-supplied render targets.
//!
//! The host decides what an element is (a live DOM node, an in-memory page,
//! a test recorder). Targets are optional; a missing target is skipped.

use tracing::debug;

use crate::view::PostViewModel;

/// Fixed element identifiers of the post card layout.
pub mod ids {
    pub const POST_COVER: &str = "postCover";
    pub const POST_TITLE: &str = "postTitle";
    pub const AUTHOR_AVATAR: &str = "authorAvatar";
    pub const AUTHOR_NAME: &str = "authorName";
    pub const CREATED_AT: &str = "createdAt";
    pub const POST_CARD: &str = "postCard";
    pub const POST_LINK: &str = "postLink";
}

/// Accessible text placed on the avatar image.
pub const AVATAR_ALT: &str = "Author";

/// The mutations the renderer performs on an element.
pub trait Element {
    fn set_text(&mut self, text: &str);
    fn set_attribute(&mut self, name: &str, value: &str);
    fn set_style(&mut self, property: &str, value: &str);
    /// Navigate to `url` when the element is clicked.
    fn navigate_on_click(&mut self, url: &str);
}

/// Named targets of the post card. `post_title` doubles as the title link.
#[derive(Default)]
pub struct RenderTargets<'a> {
    pub cover_image: Option<&'a mut dyn Element>,
    pub post_title: Option<&'a mut dyn Element>,
    pub avatar_image: Option<&'a mut dyn Element>,
    pub author_name: Option<&'a mut dyn Element>,
    pub created_at: Option<&'a mut dyn Element>,
    pub post_card: Option<&'a mut dyn Element>,
    pub post_link: Option<&'a mut dyn Element>,
}

/// Apply a view model to the targets.
pub fn render_post(view: &PostViewModel, targets: &mut RenderTargets<'_>) {
    if let Some(title) = targets.post_title.as_deref_mut() {
        title.set_text(&view.title);
    }

    if let Some(cover) = targets.cover_image.as_deref_mut() {
        if !view.cover_url.is_empty() {
            cover.set_attribute("src", &view.cover_url);
        }
        cover.set_attribute("alt", &view.title);
    }

    if let Some(author) = targets.author_name.as_deref_mut() {
        author.set_text(&view.author_label);
    }

    if let Some(avatar) = targets.avatar_image.as_deref_mut() {
        if !view.avatar_url.is_empty() {
            avatar.set_attribute("src", &view.avatar_url);
            avatar.set_attribute("alt", AVATAR_ALT);
        }
    }

    if let (Some(created_at), Some(display), Some(iso)) = (
        targets.created_at.as_deref_mut(),
        view.created_at_display.as_deref(),
        view.created_at_iso.as_deref(),
    ) {
        created_at.set_text(display);
        created_at.set_attribute("datetime", iso);
    }

    if let Some(link) = targets.post_link.as_deref_mut() {
        link.set_attribute("href", &view.detail_url);
    }
    if let Some(title_link) = targets.post_title.as_deref_mut() {
        title_link.set_attribute("href", &view.detail_url);
    }

    match targets.post_card.as_deref_mut() {
        Some(card) if !view.slug.is_empty() => {
            card.set_style("cursor", "pointer");
            card.navigate_on_click(&view.detail_url);
        }
        _ => debug!("Post card not made clickable"),
    }
}
