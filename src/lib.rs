//! Latest post card.
//!
//! Fetches the newest `blogPost` entry from the Contentful delivery API,
//! projects it into a render-ready view model, and writes that into the
//! elements of a post card layout.

pub mod app;
pub mod config;
pub mod contentful;
pub mod entry;
pub mod page;
pub mod render;
pub mod view;
