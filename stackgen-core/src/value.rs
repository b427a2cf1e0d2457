//! The value envelope carried by every scalar member of a generated type.
//!
//! A [`Value`] is either a concrete literal or a [`Deferred`] expression that
//! the template system resolves when the document is rendered.

use crate::Json;

/// Literal value or deferred expression producing a `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    /// Concrete literal.
    Of(T),
    /// Expression evaluated by the template system.
    Deferred(Deferred),
}

/// Expressions a [`Value`] may defer to.
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// Reference to another resource by logical name.
    Reference(String),
    /// Read-only attribute of a resource.
    Attribute {
        /// Logical name of the owning resource.
        logical_name: String,
        /// Attribute name as declared in the schema.
        attribute: String,
    },
    /// Template parameter placeholder.
    Parameter(String),
    /// Intrinsic function call.
    Function {
        /// Function name (e.g. `Fn::Join`).
        name: String,
        /// Function arguments.
        arguments: Vec<Json>,
    },
}

impl<T> Value<T> {
    /// Wraps a literal.
    #[must_use]
    pub fn of(value: impl Into<T>) -> Self {
        Self::Of(value.into())
    }

    /// References a resource by logical name.
    #[must_use]
    pub fn reference(logical_name: impl Into<String>) -> Self {
        Self::Deferred(Deferred::Reference(logical_name.into()))
    }

    /// References an attribute of a resource.
    #[must_use]
    pub fn attribute(logical_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Deferred(Deferred::Attribute {
            logical_name: logical_name.into(),
            attribute: attribute.into(),
        })
    }

    /// References a template parameter.
    #[must_use]
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Deferred(Deferred::Parameter(name.into()))
    }

    /// Calls an intrinsic function.
    #[must_use]
    pub fn function(name: impl Into<String>, arguments: Vec<Json>) -> Self {
        Self::Deferred(Deferred::Function {
            name: name.into(),
            arguments,
        })
    }

    /// Returns the literal, if this value is not deferred.
    #[must_use]
    pub const fn literal(&self) -> Option<&T> {
        match self {
            Self::Of(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// Returns true if this value is resolved by the template system.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Of(value)
    }
}
