//! Style engine: owns the active stylesheet and hands out per-node computed
//! styles and transition requests.
//!
//! The engine never walks the widget tree on its own. Hosts query nodes
//! through a [`css_selectors::NodeAdapter`] when they need a style, and
//! report changes through the invalidation calls.

mod cache;
mod config;
mod engine;

pub use config::StyleEngineConfig;
pub use engine::{AnimationBinding, StyleEngine};
