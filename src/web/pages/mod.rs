//! Maud-based page templates for the web UI.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod timeline;

pub use timeline::render_timeline_page;
