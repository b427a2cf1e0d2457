//! Artifact emission.
//!
//! The [`Emitter`] walks a merged schema and produces one [`TypeArtifact`]
//! per declared type. Field types are resolved for every type before any
//! artifact is built, so the first unresolvable field aborts the run.

use crate::artifact::{
    ArtifactTree, AttributeAccessor, BuilderType, Callable, DataType, Member, Param, ParamType,
    ResourceIdentity, Setter, SetterKind, TypeArtifact,
};
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::expr::Expr;
use crate::naming::{TypePath, member_name, required_first, setter_name};
use stackgen_schema::{Schema, TypeInfo, TypeKind, TypeRef, TypeResolver};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Identity member holding a resource's logical name.
pub const LOGICAL_NAME: &str = "logical_name";
/// Identity member holding a resource's explicit dependencies.
pub const DEPENDS_ON: &str = "depends_on";
/// Name of the factory function.
pub const FACTORY: &str = "create";

const CONTEXT: &str = "ctx";
const CONFIGURE: &str = "configure";

type MemberTable<'s> = HashMap<(TypeKind, &'s str), Vec<Member>>;

/// Produces artifacts from a merged schema.
pub struct Emitter<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
    resolver: TypeResolver,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter over `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Self {
        Self {
            schema,
            config,
            resolver: TypeResolver::from_schema(schema),
        }
    }

    /// Emits artifacts for every declared type, sorted by type name.
    ///
    /// # Errors
    /// Returns `CodegenError::Resolve` for the first field whose type cannot
    /// be resolved, `MemberCollision` when two generated names of one type
    /// coincide and `ArtifactCollision` when two types map to the same
    /// generated item or helper.
    pub fn emit(&self) -> Result<ArtifactTree, CodegenError> {
        let mut table = MemberTable::new();
        for (kind, name, info) in self.types() {
            table.insert((kind, name.as_str()), self.members(name, info)?);
        }
        box_cycles(&mut table);
        self.check_collisions()?;

        let mut tree = ArtifactTree::default();
        for (kind, name, info) in self.types() {
            let artifact = self.artifact(kind, name, info, &table);
            check_type_names(&artifact)?;
            tracing::debug!(
                "emitted {} as {}::{} ({} members, {} setters)",
                name,
                artifact.path.module_path().join("::"),
                artifact.path.class_name,
                artifact.data.members.len(),
                artifact.builder.setters.len()
            );
            match kind {
                TypeKind::Property => tree.properties.push(artifact),
                TypeKind::Resource => tree.resources.push(artifact),
            }
        }

        tracing::info!(
            "emitted {} property and {} resource artifacts",
            tree.properties.len(),
            tree.resources.len()
        );
        Ok(tree)
    }

    fn types(&self) -> impl Iterator<Item = (TypeKind, &'a String, &'a TypeInfo)> {
        let properties = self
            .schema
            .property_types
            .iter()
            .map(|(name, info)| (TypeKind::Property, name, info));
        let resources = self
            .schema
            .resource_types
            .iter()
            .map(|(name, info)| (TypeKind::Resource, name, info));
        properties.chain(resources)
    }

    /// Resolves and orders the fields of one type.
    fn members(&self, type_name: &str, info: &TypeInfo) -> Result<Vec<Member>, CodegenError> {
        let mut fields: Vec<_> = info.properties.iter().collect();
        fields.sort_by(|a, b| required_first(*a, *b));

        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut members = Vec::with_capacity(fields.len());
        for (field_name, field) in fields {
            let ty = self
                .resolver
                .resolve(field, type_name)
                .map_err(|e| CodegenError::resolve(type_name, field_name, e))?;
            let name = member_name(field_name);
            if let Some(first) = seen.insert(name.clone(), field_name) {
                return Err(CodegenError::MemberCollision {
                    type_name: type_name.to_string(),
                    first: first.to_string(),
                    second: field_name.clone(),
                    member: name,
                });
            }
            members.push(Member {
                schema_name: field_name.clone(),
                name,
                ty,
                required: field.required,
                boxed: false,
                documentation: field.documentation.clone(),
            });
        }
        Ok(members)
    }

    /// Fails if two types produce the same item in the same module.
    ///
    /// Types and modules share one namespace, helper functions another.
    fn check_collisions(&self) -> Result<(), CodegenError> {
        let paths: Vec<(&String, TypePath)> = self
            .types()
            .map(|(kind, name, _)| (name, TypePath::derive(name, kind, self.config)))
            .collect();

        let mut types: HashMap<String, &str> = HashMap::new();
        for (name, path) in &paths {
            let module = path.module_path();
            for depth in 1..module.len() {
                let key = module[..=depth].join("::");
                types.entry(key).or_insert(name.as_str());
            }
        }

        let mut functions: HashMap<String, &str> = HashMap::new();
        for (name, path) in &paths {
            let module = path.module_path().join("::");
            for item in [path.class_name.clone(), path.builder_name()] {
                claim_item(&mut types, format!("{module}::{item}"), name.as_str())?;
            }
            let helper = format!("{module}::{}", path.helper_name());
            claim_item(&mut functions, helper, name.as_str())?;
        }
        Ok(())
    }

    fn artifact(
        &self,
        kind: TypeKind,
        name: &str,
        info: &TypeInfo,
        table: &MemberTable<'_>,
    ) -> TypeArtifact {
        let path = TypePath::derive(name, kind, self.config);
        let members = table.get(&(kind, name)).cloned().unwrap_or_default();
        let resource = kind.is_resource();

        let data = DataType {
            name: path.class_name.clone(),
            identity: resource.then(|| ResourceIdentity {
                resource_type: name.to_string(),
            }),
            constructor: data_constructor(name, &members, resource),
            attributes: if resource {
                attribute_accessors(info)
            } else {
                Vec::new()
            },
            members,
        };

        let builder = BuilderType {
            name: path.builder_name(),
            constructor: builder_constructor(name, &data.members, resource),
            setters: self.setters(&data.members, table),
            build: build_callable(name, &data.members, resource),
        };

        let factory = Callable {
            name: FACTORY.to_string(),
            params: builder.constructor.params.clone(),
            body: Expr::NewBuilder {
                target: name.to_string(),
                args: param_exprs(&builder.constructor.params),
            },
        };

        let helper = if resource {
            resource_helper(name, &path, &data.members)
        } else {
            property_helper(name, &path, &data.members)
        };

        TypeArtifact {
            schema_name: name.to_string(),
            kind,
            documentation: info.documentation.clone(),
            path,
            data,
            builder,
            factory,
            helper,
        }
    }

    fn setters(&self, members: &[Member], table: &MemberTable<'_>) -> Vec<Setter> {
        let mut setters = Vec::new();
        for member in members {
            let primary = setter_name(&member.name);
            if member.ty.is_wrapped_scalar() {
                setters.push(Setter {
                    callable: Callable {
                        name: primary,
                        params: vec![Param::new(
                            &member.name,
                            ParamType::Value(member.ty.unwrapped()),
                        )],
                        body: assign(member, wrap(&member.ty, Expr::param(&member.name))),
                    },
                    member: member.name.clone(),
                    kind: SetterKind::Wrapping,
                });
                setters.push(direct_setter(member, format!("{}_value", member.name)));
                continue;
            }

            setters.push(direct_setter(member, primary.clone()));
            if let Some(target) = member.ty.as_named()
                && let Some(nested) = self.nested_setter(member, &primary, target, table)
            {
                setters.push(nested);
            }
        }
        setters
    }

    /// Builds `<member>_with`, which creates the nested value in place.
    ///
    /// Only property types get one; nested resources need a context.
    fn nested_setter(
        &self,
        member: &Member,
        primary: &str,
        target: &str,
        table: &MemberTable<'_>,
    ) -> Option<Setter> {
        if !self.schema.property_types.contains_key(target) {
            return None;
        }
        let required: Vec<&Member> = table
            .get(&(TypeKind::Property, target))?
            .iter()
            .filter(|m| m.required)
            .collect();

        let mut params: Vec<Param> = required
            .iter()
            .map(|m| Param::new(&m.name, ParamType::Value(m.ty.clone())))
            .collect();
        let configure = unused_name(CONFIGURE, &params);
        let args = param_exprs(&params);
        params.push(Param::new(&configure, ParamType::Configure(target.to_string())));

        let built = Expr::InvokeFactory {
            target: target.to_string(),
            args,
        }
        .configure(configure)
        .build();

        Some(Setter {
            callable: Callable {
                name: format!("{}_with", member.name),
                params,
                body: Expr::CallSetter {
                    setter: primary.to_string(),
                    value: Box::new(built),
                },
            },
            member: member.name.clone(),
            kind: SetterKind::Nested,
        })
    }
}

fn claim_item<'n>(
    items: &mut HashMap<String, &'n str>,
    path: String,
    name: &'n str,
) -> Result<(), CodegenError> {
    match items.entry(path) {
        Entry::Occupied(first) => Err(CodegenError::ArtifactCollision {
            first: (*first.get()).to_string(),
            second: name.to_string(),
            path: first.key().clone(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(name);
            Ok(())
        }
    }
}

/// Fails if two generated names of one type coincide.
///
/// Struct fields (identity and members), data type methods (constructor,
/// factory, attribute accessors) and builder methods (constructor, setters,
/// `build`) are each checked on their own.
fn check_type_names(artifact: &TypeArtifact) -> Result<(), CodegenError> {
    let origin = |member: &str| {
        artifact
            .data
            .member(member)
            .map_or_else(|| member.to_string(), |m| m.schema_name.clone())
    };

    let mut fields = HashMap::new();
    if artifact.is_resource() {
        fields.insert(LOGICAL_NAME, LOGICAL_NAME.to_string());
        fields.insert(DEPENDS_ON, DEPENDS_ON.to_string());
    }
    for member in &artifact.data.members {
        claim_name(artifact, &mut fields, &member.name, member.schema_name.clone())?;
    }

    let mut methods = HashMap::new();
    for callable in [&artifact.data.constructor, &artifact.factory] {
        methods.insert(callable.name.as_str(), callable.name.clone());
    }
    for accessor in &artifact.data.attributes {
        claim_name(artifact, &mut methods, &accessor.name, accessor.attribute.clone())?;
    }

    let mut builder = HashMap::new();
    for callable in [&artifact.builder.constructor, &artifact.builder.build] {
        builder.insert(callable.name.as_str(), callable.name.clone());
    }
    for setter in &artifact.builder.setters {
        claim_name(artifact, &mut builder, &setter.callable.name, origin(&setter.member))?;
    }
    Ok(())
}

fn claim_name<'a>(
    artifact: &TypeArtifact,
    names: &mut HashMap<&'a str, String>,
    name: &'a str,
    origin: String,
) -> Result<(), CodegenError> {
    match names.entry(name) {
        Entry::Occupied(first) => Err(CodegenError::MemberCollision {
            type_name: artifact.schema_name.clone(),
            first: first.get().clone(),
            second: origin,
            member: name.to_string(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(origin);
            Ok(())
        }
    }
}

fn direct_setter(member: &Member, name: String) -> Setter {
    Setter {
        callable: Callable {
            name,
            params: vec![Param::new(&member.name, ParamType::Value(member.ty.clone()))],
            body: assign(member, boxed(member, Expr::param(&member.name))),
        },
        member: member.name.clone(),
        kind: SetterKind::Direct,
    }
}

/// Moves a value of a boxed member to the heap.
fn boxed(member: &Member, value: Expr) -> Expr {
    if member.boxed {
        Expr::Boxed(Box::new(value))
    } else {
        value
    }
}

fn assign(member: &Member, value: Expr) -> Expr {
    let value = if member.required { value } else { value.some() };
    Expr::Assign {
        member: member.name.clone(),
        value: Box::new(value),
    }
}

/// Moves a raw value into the envelope matching `ty`.
fn wrap(ty: &TypeRef, raw: Expr) -> Expr {
    match ty {
        TypeRef::List(_) => Expr::WrapEach(Box::new(raw)),
        TypeRef::Map(_) => Expr::WrapValues(Box::new(raw)),
        _ => Expr::Wrap(Box::new(raw)),
    }
}

/// Logical name, required members, dependencies.
fn required_params(members: &[Member], resource: bool) -> Vec<Param> {
    let mut params = Vec::new();
    if resource {
        params.push(Param::new(LOGICAL_NAME, ParamType::LogicalName));
    }
    params.extend(
        members
            .iter()
            .filter(|m| m.required)
            .map(|m| Param::new(&m.name, ParamType::Value(m.ty.clone()))),
    );
    if resource {
        params.push(Param::new(DEPENDS_ON, ParamType::Dependencies));
    }
    params
}

fn param_exprs(params: &[Param]) -> Vec<Expr> {
    params.iter().map(|p| Expr::param(&p.name)).collect()
}

/// Member values in declaration order, identity around the schema fields.
fn fields_with(
    members: &[Member],
    resource: bool,
    value: impl Fn(&str, Option<&Member>) -> Expr,
) -> Vec<(String, Expr)> {
    let mut fields = Vec::new();
    if resource {
        fields.push((LOGICAL_NAME.to_string(), value(LOGICAL_NAME, None)));
    }
    for member in members {
        fields.push((member.name.clone(), value(&member.name, Some(member))));
    }
    if resource {
        fields.push((DEPENDS_ON.to_string(), value(DEPENDS_ON, None)));
    }
    fields
}

fn data_constructor(name: &str, members: &[Member], resource: bool) -> Callable {
    let mut params = Vec::new();
    if resource {
        params.push(Param::new(LOGICAL_NAME, ParamType::LogicalName));
    }
    params.extend(members.iter().map(|m| {
        let ty = if m.required {
            ParamType::Value(m.ty.clone())
        } else {
            ParamType::Optional(m.ty.clone())
        };
        Param::new(&m.name, ty)
    }));
    if resource {
        params.push(Param::new(DEPENDS_ON, ParamType::Dependencies));
    }

    Callable {
        name: "new".to_string(),
        params,
        body: Expr::Construct {
            target: name.to_string(),
            fields: fields_with(members, resource, |field, member| match member {
                Some(m) if m.boxed && !m.required => {
                    Expr::BoxedOptional(Box::new(Expr::param(field)))
                }
                Some(m) => boxed(m, Expr::param(field)),
                None => Expr::param(field),
            }),
        },
    }
}

fn builder_constructor(name: &str, members: &[Member], resource: bool) -> Callable {
    Callable {
        name: "new".to_string(),
        params: required_params(members, resource),
        body: Expr::ConstructBuilder {
            target: name.to_string(),
            fields: fields_with(members, resource, |field, member| match member {
                Some(m) if !m.required => Expr::Absent,
                Some(m) => boxed(m, Expr::param(field)),
                None => Expr::param(field),
            }),
        },
    }
}

fn build_callable(name: &str, members: &[Member], resource: bool) -> Callable {
    Callable {
        name: "build".to_string(),
        params: Vec::new(),
        body: Expr::Construct {
            target: name.to_string(),
            fields: fields_with(members, resource, |field, _| Expr::held(field)),
        },
    }
}

fn attribute_accessors(info: &TypeInfo) -> Vec<AttributeAccessor> {
    info.attributes
        .keys()
        .map(|attribute| AttributeAccessor {
            name: member_name(attribute),
            attribute: attribute.clone(),
            body: Expr::AttributeRef {
                attribute: attribute.clone(),
            },
        })
        .collect()
}

/// `<class>(required.., configure)`, returning the built value.
fn property_helper(name: &str, path: &TypePath, members: &[Member]) -> Callable {
    let mut params = required_params(members, false);
    let configure = unused_name(CONFIGURE, &params);
    let args = param_exprs(&params);
    params.push(Param::new(&configure, ParamType::Configure(name.to_string())));

    Callable {
        name: path.helper_name(),
        params,
        body: Expr::InvokeFactory {
            target: name.to_string(),
            args,
        }
        .configure(configure)
        .build(),
    }
}

/// `<class>(ctx, required.., logical_name, depends_on, configure)`, registering
/// the built resource with the context.
fn resource_helper(name: &str, path: &TypePath, members: &[Member]) -> Callable {
    let required: Vec<Param> = required_params(members, false);
    let context = unused_name(CONTEXT, &required);

    let mut params = vec![Param::new(&context, ParamType::Context)];
    params.extend(required.iter().cloned());
    params.push(Param::new(LOGICAL_NAME, ParamType::OptionalLogicalName));
    params.push(Param::new(DEPENDS_ON, ParamType::Dependencies));
    let configure = unused_name(CONFIGURE, &params);
    params.push(Param::new(&configure, ParamType::Configure(name.to_string())));

    let mut args = vec![Expr::LogicalNameOr {
        supplied: Box::new(Expr::param(LOGICAL_NAME)),
        context: context.clone(),
        scope: path.class_name.clone(),
    }];
    args.extend(param_exprs(&required));
    args.push(Expr::DependenciesOr {
        supplied: Box::new(Expr::param(DEPENDS_ON)),
        context: context.clone(),
    });

    let built = Expr::InvokeFactory {
        target: name.to_string(),
        args,
    }
    .configure(configure)
    .build();

    Callable {
        name: path.helper_name(),
        params,
        body: Expr::Register {
            context,
            value: Box::new(built),
        },
    }
}

/// Boxes nested members whose type contains the owning type again.
///
/// Only direct nested members count; lists and maps already allocate.
fn box_cycles(table: &mut MemberTable<'_>) {
    let mut cyclic = Vec::new();
    for (key, members) in table.iter() {
        for (index, member) in members.iter().enumerate() {
            if let Some(target) = member.ty.as_named()
                && let Some(kind) = kind_of(table, target)
                && reaches(table, (kind, target), *key)
            {
                cyclic.push((*key, index));
            }
        }
    }

    for (key, index) in cyclic {
        if let Some(member) = table.get_mut(&key).and_then(|m| m.get_mut(index)) {
            tracing::debug!("boxing member '{}' of '{}'", member.name, key.1);
            member.boxed = true;
        }
    }
}

/// Kind of the type a nested reference to `name` denotes, property types
/// shadowing resource types.
fn kind_of(table: &MemberTable<'_>, name: &str) -> Option<TypeKind> {
    [TypeKind::Property, TypeKind::Resource]
        .into_iter()
        .find(|kind| table.contains_key(&(*kind, name)))
}

/// Returns true if `to` is reachable from `from` over direct nested members.
fn reaches(table: &MemberTable<'_>, from: (TypeKind, &str), to: (TypeKind, &str)) -> bool {
    let mut stack = vec![from];
    let mut visited = HashSet::new();
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(members) = table.get(&current) {
            for target in members.iter().filter_map(|m| m.ty.as_named()) {
                if let Some(kind) = kind_of(table, target) {
                    stack.push((kind, target));
                }
            }
        }
    }
    false
}

/// Appends underscores to `base` until no parameter uses it.
fn unused_name(base: &str, params: &[Param]) -> String {
    let mut name = base.to_string();
    while params.iter().any(|p| p.name == name) {
        name.push('_');
    }
    name
}
