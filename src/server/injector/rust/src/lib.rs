/* src/server/injector/rust/src/lib.rs */

//! Layout placeholder scanning and injection.
//!
//! A layout is an HTML document with placeholders (`<REACT "body" />`,
//! `<SEO "title" />`, `<OG "image" />`, `<LANG "preinit" />`, `{{BUILDID}}`
//! and literal `<title>` elements). [`ScannedLayout`] finds them once;
//! [`ScannedLayout::render`] splices a page body and its head metadata in.

pub mod ast;
pub mod context;
mod helpers;
pub mod og;
pub mod render;
pub mod resolve;
pub mod seo;
pub mod token;

#[cfg(test)]
mod tests;

pub use ast::{Tag, TagKind, TagMatch};
pub use context::RenderContext;
pub use og::build_og_tags;
pub use render::{ScannedLayout, compose, inject};
pub use resolve::{FragmentResolver, LANG_PREINIT, LayoutHooks, NoHooks};
pub use seo::{LocaleInfo, SeoMetadata};
pub use token::scan;
