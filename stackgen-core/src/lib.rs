//! # Stackgen Core
//!
//! Runtime types referenced by stackgen generated code.
//!
//! This crate provides:
//! - The [`Value`] envelope wrapping literals and deferred expressions
//! - The [`Resource`] trait implemented by every generated resource type
//! - The [`Template`] trait resources register themselves into
//! - A reference [`TemplateBuilder`] with deterministic logical name allocation

pub mod error;
pub mod resource;
pub mod template;
pub mod value;

pub use error::{Error, Result};
pub use resource::Resource;
pub use template::{Template, TemplateBuilder};
pub use value::{Deferred, Value};

/// Structured document type used for `Json` primitives.
pub type Json = serde_json::Value;

/// Instant type used for `Timestamp` primitives.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
