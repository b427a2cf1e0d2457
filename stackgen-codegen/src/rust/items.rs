//! Item rendering: data types, builders, factories and DSL helpers.

use super::exprs::body_tokens;
use super::types::{dependencies_type, params_tokens, type_tokens};
use super::{Scope, ident};
use crate::artifact::{BuilderType, Callable, DataType, Member, Setter, SetterKind, TypeArtifact};
use crate::emitter::{DEPENDS_ON, LOGICAL_NAME};
use crate::error::CodegenError;
use crate::expr::Expr;
use proc_macro2::TokenStream;
use quote::quote;

/// Renders every item generated for one artifact.
pub(crate) fn artifact_tokens(
    artifact: &TypeArtifact,
    scope: &Scope<'_>,
) -> Result<TokenStream, CodegenError> {
    let data = data_tokens(artifact, scope)?;
    let builder = builder_tokens(artifact, scope)?;
    let helper = helper_tokens(artifact, scope)?;
    Ok(quote! {
        #data
        #builder
        #helper
    })
}

fn type_docs(artifact: &TypeArtifact) -> TokenStream {
    let kind = if artifact.is_resource() {
        "resource"
    } else {
        "property type"
    };
    let summary = format!(" `{}` {kind}.", artifact.schema_name);
    match &artifact.documentation {
        Some(url) => {
            let url = format!(" <{url}>");
            quote! {
                #[doc = #summary]
                #[doc = ""]
                #[doc = #url]
            }
        }
        None => quote!(#[doc = #summary]),
    }
}

fn member_docs(member: &Member) -> TokenStream {
    let summary = format!(" `{}` field.", member.schema_name);
    match &member.documentation {
        Some(url) => {
            let url = format!(" <{url}>");
            quote! {
                #[doc = #summary]
                #[doc = ""]
                #[doc = #url]
            }
        }
        None => quote!(#[doc = #summary]),
    }
}

/// Member declarations, identity around the schema fields.
fn member_decls(
    data: &DataType,
    public: bool,
    scope: &Scope<'_>,
) -> Result<Vec<TokenStream>, CodegenError> {
    let vis = if public { quote!(pub) } else { quote!() };
    let resource = data.identity.is_some();
    let mut decls = Vec::with_capacity(data.members.len() + 2);

    if resource {
        let name = ident(LOGICAL_NAME)?;
        decls.push(quote! {
            #[doc = " Logical name in the template."]
            #vis #name: ::std::string::String
        });
    }
    for member in &data.members {
        let name = ident(&member.name)?;
        let ty = type_tokens(&member.ty, scope)?;
        let ty = if member.boxed {
            quote!(::std::boxed::Box<#ty>)
        } else {
            ty
        };
        let ty = if member.required {
            ty
        } else {
            quote!(::std::option::Option<#ty>)
        };
        let docs = if public {
            member_docs(member)
        } else {
            quote!()
        };
        decls.push(quote! {
            #docs
            #vis #name: #ty
        });
    }
    if resource {
        let name = ident(DEPENDS_ON)?;
        let ty = dependencies_type();
        decls.push(quote! {
            #[doc = " Logical names this resource depends on."]
            #vis #name: #ty
        });
    }
    Ok(decls)
}

/// Renders a free function or associated function.
fn function(
    callable: &Callable,
    scope: &Scope<'_>,
    receiver: Option<TokenStream>,
    returns: TokenStream,
    doc: &str,
) -> Result<TokenStream, CodegenError> {
    let name = ident(&callable.name)?;
    let params = params_tokens(&callable.params, scope)?;
    let body = body_tokens(&callable.body, scope)?;
    let doc = format!(" {doc}");
    let inputs = receiver.into_iter().chain(params);
    let attrs = if callable.params.len() > 7 {
        quote!(#[allow(clippy::too_many_arguments)])
    } else {
        quote!()
    };
    Ok(quote! {
        #[doc = #doc]
        #attrs
        pub fn #name(#(#inputs),*) -> #returns {
            #body
        }
    })
}

fn data_tokens(artifact: &TypeArtifact, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    let data = &artifact.data;
    let name = ident(&data.name)?;
    let builder = ident(&artifact.builder.name)?;
    let docs = type_docs(artifact);
    let decls = member_decls(data, true, scope)?;

    let constructor = function(
        &data.constructor,
        scope,
        None,
        quote!(Self),
        "Creates a value from every member.",
    )?;
    let factory = function(
        &artifact.factory,
        scope,
        None,
        quote!(#builder),
        "Starts a builder with the required values set.",
    )?;

    let runtime = scope.runtime;
    let mut attributes = Vec::with_capacity(data.attributes.len());
    for accessor in &data.attributes {
        let method = ident(&accessor.name)?;
        let doc = format!(" Deferred reference to the `{}` attribute.", accessor.attribute);
        let body = body_tokens(&accessor.body, scope)?;
        attributes.push(quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #method(&self) -> #runtime::Value<::std::string::String> {
                #body
            }
        });
    }

    let identity = match &data.identity {
        Some(identity) => {
            let resource_type = &identity.resource_type;
            let logical_name = ident(LOGICAL_NAME)?;
            let depends_on = ident(DEPENDS_ON)?;
            quote! {
                impl #name {
                    #[doc = " Resource type name used in templates."]
                    pub const RESOURCE_TYPE: &'static str = #resource_type;
                }

                impl #runtime::Resource for #name {
                    fn logical_name(&self) -> &str {
                        &self.#logical_name
                    }

                    fn resource_type(&self) -> &'static str {
                        Self::RESOURCE_TYPE
                    }

                    fn depends_on(&self) -> ::std::option::Option<&[::std::string::String]> {
                        self.#depends_on.as_deref()
                    }
                }
            }
        }
        None => quote!(),
    };

    Ok(quote! {
        #docs
        #[derive(Debug, Clone, PartialEq)]
        pub struct #name {
            #(#decls,)*
        }

        impl #name {
            #[must_use]
            #constructor

            #[must_use]
            #factory

            #(#attributes)*
        }

        #identity
    })
}

fn builder_tokens(
    artifact: &TypeArtifact,
    scope: &Scope<'_>,
) -> Result<TokenStream, CodegenError> {
    let BuilderType {
        name,
        constructor,
        setters,
        build,
    } = &artifact.builder;
    let name = ident(name)?;
    let data = ident(&artifact.data.name)?;
    let doc = format!(" Builder for [`{}`].", artifact.data.name);
    let decls = member_decls(&artifact.data, false, scope)?;

    let constructor = function(
        constructor,
        scope,
        None,
        quote!(Self),
        "Creates a builder with the required values set.",
    )?;
    let setters = setters
        .iter()
        .map(|setter| setter_tokens(setter, scope))
        .collect::<Result<Vec<_>, _>>()?;
    let build = function(
        build,
        scope,
        Some(quote!(self)),
        quote!(#data),
        "Builds the value.",
    )?;

    Ok(quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        #[must_use]
        pub struct #name {
            #(#decls,)*
        }

        impl #name {
            #constructor

            #(#setters)*

            #[must_use]
            #build
        }
    })
}

fn setter_tokens(setter: &Setter, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    let doc = match setter.kind {
        SetterKind::Direct => format!("Sets `{}`.", setter.member),
        SetterKind::Wrapping => format!("Sets `{}` from raw values.", setter.member),
        SetterKind::Nested => format!("Creates and sets `{}`.", setter.member),
    };
    let receiver = if matches!(setter.callable.body, Expr::Assign { .. }) {
        quote!(mut self)
    } else {
        quote!(self)
    };
    function(&setter.callable, scope, Some(receiver), quote!(Self), &doc)
}

fn helper_tokens(artifact: &TypeArtifact, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    let data = ident(&artifact.data.name)?;
    let runtime = scope.runtime;
    let helper = &artifact.helper;

    if matches!(helper.body, Expr::Register { .. }) {
        let doc = format!(
            "Builds a `{}` and registers it with the template.",
            artifact.schema_name
        );
        return function(helper, scope, None, quote!(#runtime::Result<#data>), &doc);
    }

    let doc = format!("Builds a `{}`.", artifact.schema_name);
    let helper = function(helper, scope, None, quote!(#data), &doc)?;
    Ok(quote! {
        #[must_use]
        #helper
    })
}
