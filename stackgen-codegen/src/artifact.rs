//! Generated artifact model.
//!
//! The emitter produces one [`TypeArtifact`] per schema type. Each artifact
//! bundles the data type, its builder, the factory and the DSL helper as
//! plain descriptions; rendering them to source is a separate step.

use crate::expr::Expr;
use crate::naming::TypePath;
use stackgen_schema::{TypeKind, TypeRef};

/// Every artifact produced from one merged schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactTree {
    /// Artifacts of property types, by schema name.
    pub properties: Vec<TypeArtifact>,
    /// Artifacts of resource types, by schema name.
    pub resources: Vec<TypeArtifact>,
}

impl ArtifactTree {
    /// Iterates property artifacts, then resource artifacts.
    pub fn iter(&self) -> impl Iterator<Item = &TypeArtifact> {
        self.properties.iter().chain(self.resources.iter())
    }

    /// Looks up an artifact by schema name, preferring property types.
    #[must_use]
    pub fn get(&self, schema_name: &str) -> Option<&TypeArtifact> {
        self.iter().find(|artifact| artifact.schema_name == schema_name)
    }

    /// Returns the total number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len() + self.resources.len()
    }

    /// Returns true if no artifacts were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Artifacts generated for a single schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArtifact {
    /// Fully qualified schema type name.
    pub schema_name: String,
    /// Section the type was declared in.
    pub kind: TypeKind,
    /// Module path and class name.
    pub path: TypePath,
    /// Documentation link from the schema.
    pub documentation: Option<String>,
    /// The data type.
    pub data: DataType,
    /// The builder type.
    pub builder: BuilderType,
    /// Factory returning a builder with the required values set.
    pub factory: Callable,
    /// DSL entry point.
    pub helper: Callable,
}

impl TypeArtifact {
    /// Returns true for a resource artifact.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        self.kind.is_resource()
    }

    /// Finds a builder setter by name.
    #[must_use]
    pub fn setter(&self, name: &str) -> Option<&Setter> {
        self.builder
            .setters
            .iter()
            .find(|setter| setter.callable.name == name)
    }
}

/// A generated data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataType {
    /// Type name.
    pub name: String,
    /// Schema fields, required first then by name.
    pub members: Vec<Member>,
    /// Resource identity, absent for property types.
    pub identity: Option<ResourceIdentity>,
    /// Full constructor taking every member.
    pub constructor: Callable,
    /// Deferred attribute accessors.
    pub attributes: Vec<AttributeAccessor>,
}

impl DataType {
    /// Returns the required members.
    pub fn required_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|member| member.required)
    }

    /// Finds a member by member name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }
}

/// One schema field of a data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Field name as written in the schema.
    pub schema_name: String,
    /// Generated member name.
    pub name: String,
    /// Resolved type.
    pub ty: TypeRef,
    /// Required fields are never absent.
    pub required: bool,
    /// Stored behind a `Box` to break a containment cycle.
    pub boxed: bool,
    /// Documentation link from the schema.
    pub documentation: Option<String>,
}

/// Identity carried by resource data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    /// Resource type name used in templates.
    pub resource_type: String,
}

/// A method returning a deferred reference to a resource attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeAccessor {
    /// Method name.
    pub name: String,
    /// Attribute name as written in the schema.
    pub attribute: String,
    /// Accessor body.
    pub body: Expr,
}

/// A generated builder type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderType {
    /// Type name.
    pub name: String,
    /// Constructor taking the identity and the required members.
    pub constructor: Callable,
    /// Setters for every member.
    pub setters: Vec<Setter>,
    /// `build` producing the data type.
    pub build: Callable,
}

/// A builder setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setter {
    /// Signature and body.
    pub callable: Callable,
    /// Member the setter writes.
    pub member: String,
    /// Setter flavour.
    pub kind: SetterKind,
}

/// Setter flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterKind {
    /// Takes the member's exact type.
    Direct,
    /// Takes raw scalars and wraps them in the value envelope.
    Wrapping,
    /// Takes the nested type's required values and a configuration closure.
    Nested,
}

/// A generated function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    /// Function name.
    pub name: String,
    /// Parameters in call order.
    pub params: Vec<Param>,
    /// Body.
    pub body: Expr,
}

impl Callable {
    /// Returns the parameter names in call order.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|param| param.name.as_str()).collect()
    }
}

/// A parameter of a generated callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: ParamType,
}

impl Param {
    /// Creates a parameter.
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Parameter types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// A value of the given type.
    Value(TypeRef),
    /// An optional value of the given type.
    Optional(TypeRef),
    /// A resource logical name.
    LogicalName,
    /// A logical name that may be allocated instead.
    OptionalLogicalName,
    /// Optional explicit dependencies.
    Dependencies,
    /// A closure configuring the builder of the named schema type.
    Configure(String),
    /// The template context resources are registered with.
    Context,
}
