//! Maud HTML template components for the web UI.
//!
//! Components are organized into submodules by functionality:
//!
//! - `layout`: Base page layout with the language switcher and disclaimer
//! - `links`: URL builder preserving language, direction and filter
//! - `date_nav`: Previous/next page controls and the direction switch
//! - `calendar`: Calendar popover
//! - `account_filter`: Account filter form
//! - `post`: Rich text, post cards and day sections
//!
//! # Example
//!
//! ```ignore
//! use maud::{html, Markup};
//! use crate::components::{BaseLayout, DateNav, PageLinks};
//!
//! fn my_page(page: &ArchivePage) -> Markup {
//!     let links = PageLinks::for_page(page);
//!     let strings = page.language.strings();
//!     let content = html! {
//!         (DateNav::new(&page.bounds, &links, strings))
//!     };
//!     BaseLayout::new(page.language).render(content)
//! }
//! ```

pub mod account_filter;
pub mod calendar;
pub mod date_nav;
pub mod layout;
pub mod links;
pub mod post;

pub use account_filter::AccountFilter;
pub use calendar::CalendarWidget;
pub use date_nav::{DateNav, DirectionSwitch};
pub use layout::BaseLayout;
pub use links::PageLinks;
pub use post::{Avatar, DaySection, PostCard, RichTextBlock};
