//! Expression trees for generated bodies.
//!
//! Method and function bodies are described as small trees of [`Expr`]
//! nodes so that the emitter stays independent of the rendered syntax.
//! Type references inside nodes use schema type names; the renderer turns
//! them into module paths.

/// A node of a generated body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A parameter of the enclosing callable.
    Param(String),
    /// A member held by the receiver (`self.member`).
    Held(String),
    /// A raw scalar moved into the value envelope.
    Wrap(Box<Expr>),
    /// Every element of a raw list moved into the value envelope.
    WrapEach(Box<Expr>),
    /// Every value of a raw map moved into the value envelope.
    WrapValues(Box<Expr>),
    /// A value moved to the heap.
    Boxed(Box<Expr>),
    /// An optional value moved to the heap when present.
    BoxedOptional(Box<Expr>),
    /// An optional member set to a value (`Some(..)`).
    Present(Box<Expr>),
    /// An optional member left unset.
    Absent,
    /// The data type of `target` built from member values.
    Construct {
        /// Schema name of the type.
        target: String,
        /// Member name and value pairs, in declaration order.
        fields: Vec<(String, Expr)>,
    },
    /// The builder state of `target` built from member values.
    ConstructBuilder {
        /// Schema name of the type.
        target: String,
        /// Member name and value pairs, in declaration order.
        fields: Vec<(String, Expr)>,
    },
    /// A fresh builder of `target` (`TargetBuilder::new(args)`).
    NewBuilder {
        /// Schema name of the type.
        target: String,
        /// Constructor arguments.
        args: Vec<Expr>,
    },
    /// The factory of `target` (`Target::create(args)`).
    InvokeFactory {
        /// Schema name of the type.
        target: String,
        /// Factory arguments.
        args: Vec<Expr>,
    },
    /// A configuration closure applied to a builder.
    ApplyConfigure {
        /// Name of the closure parameter.
        step: String,
        /// Builder expression passed to the closure.
        builder: Box<Expr>,
    },
    /// `build()` called on a builder expression.
    InvokeBuild(Box<Expr>),
    /// A setter of the receiver called with one value.
    CallSetter {
        /// Setter method name.
        setter: String,
        /// Argument.
        value: Box<Expr>,
    },
    /// A builder member overwritten, returning the builder.
    Assign {
        /// Member name.
        member: String,
        /// New value.
        value: Box<Expr>,
    },
    /// A supplied logical name, or one allocated from the context.
    LogicalNameOr {
        /// Optional logical name.
        supplied: Box<Expr>,
        /// Context parameter name.
        context: String,
        /// Allocation scope, the class name.
        scope: String,
    },
    /// Supplied dependencies, or the context's current dependee.
    DependenciesOr {
        /// Optional dependency list.
        supplied: Box<Expr>,
        /// Context parameter name.
        context: String,
    },
    /// A built resource registered with the context, returning it.
    Register {
        /// Context parameter name.
        context: String,
        /// Resource expression.
        value: Box<Expr>,
    },
    /// A deferred reference to an attribute of the receiver.
    AttributeRef {
        /// Schema attribute name.
        attribute: String,
    },
}

impl Expr {
    /// Creates a parameter reference.
    pub fn param(name: impl Into<String>) -> Self {
        Self::Param(name.into())
    }

    /// Creates a held-member reference.
    pub fn held(name: impl Into<String>) -> Self {
        Self::Held(name.into())
    }

    /// Wraps `self` in `Some`.
    #[must_use]
    pub fn some(self) -> Self {
        Self::Present(Box::new(self))
    }

    /// Calls `build()` on `self`.
    #[must_use]
    pub fn build(self) -> Self {
        Self::InvokeBuild(Box::new(self))
    }

    /// Passes `self` through the configuration closure `step`.
    #[must_use]
    pub fn configure(self, step: impl Into<String>) -> Self {
        Self::ApplyConfigure {
            step: step.into(),
            builder: Box::new(self),
        }
    }

    /// Returns every schema type this expression mentions, in visit order.
    #[must_use]
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_types(&mut out);
        out
    }

    fn collect_types<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Construct { target, fields } | Self::ConstructBuilder { target, fields } => {
                out.push(target);
                for (_, value) in fields {
                    value.collect_types(out);
                }
            }
            Self::NewBuilder { target, args } | Self::InvokeFactory { target, args } => {
                out.push(target);
                for arg in args {
                    arg.collect_types(out);
                }
            }
            Self::Wrap(inner)
            | Self::WrapEach(inner)
            | Self::WrapValues(inner)
            | Self::Boxed(inner)
            | Self::BoxedOptional(inner)
            | Self::Present(inner)
            | Self::InvokeBuild(inner) => inner.collect_types(out),
            Self::ApplyConfigure { builder, .. } => builder.collect_types(out),
            Self::CallSetter { value, .. }
            | Self::Assign { value, .. }
            | Self::Register { value, .. } => value.collect_types(out),
            Self::LogicalNameOr { supplied, .. } | Self::DependenciesOr { supplied, .. } => {
                supplied.collect_types(out);
            }
            Self::Param(_) | Self::Held(_) | Self::Absent | Self::AttributeRef { .. } => {}
        }
    }
}
