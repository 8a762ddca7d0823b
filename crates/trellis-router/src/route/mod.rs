//! Route module
//!
//! Segment classification and route templates. Everything here is pure:
//! templates are parsed once at startup and never mutated afterwards.

pub mod pattern;
pub mod template;

pub use pattern::{classify_segment, Segment};
pub use template::RouteTemplate;
