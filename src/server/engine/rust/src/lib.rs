/* src/server/engine/rust/src/lib.rs */

pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod locale;
pub mod page;

// Public API re-exports
pub use cache::MemoCache;
pub use config::{EngineConfig, PartialsDir, PartialsEntry, PartialsSource};
pub use engine::{LayoutChoice, RenderOptions, ViewEngine};
pub use errors::{BoxError, ConfigError, LoadError, RenderError};
pub use locale::locale_candidates;
pub use page::{
  BoxFuture, ComponentLoader, ComponentRegistry, Markup, MarkupLoader, PageComponent, Partials,
  RenderMode, RenderProps,
};

/// Re-export the injector so callers can name layout types without a
/// second dependency.
pub use rsp_injector;
