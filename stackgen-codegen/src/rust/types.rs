//! Type and parameter rendering.

use super::{Scope, ident};
use crate::artifact::{Param, ParamType};
use crate::error::CodegenError;
use proc_macro2::TokenStream;
use quote::quote;
use stackgen_schema::{Scalar, TypeRef};

/// Renders a resolved field type.
pub(crate) fn type_tokens(ty: &TypeRef, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    let runtime = scope.runtime;
    Ok(match ty {
        TypeRef::Scalar(scalar) => scalar_tokens(scalar, runtime)?,
        TypeRef::Value(scalar) => {
            let inner = scalar_tokens(scalar, runtime)?;
            quote!(#runtime::Value<#inner>)
        }
        TypeRef::List(inner) => {
            let inner = type_tokens(inner, scope)?;
            quote!(::std::vec::Vec<#inner>)
        }
        TypeRef::Map(inner) => {
            let inner = type_tokens(inner, scope)?;
            quote!(::std::collections::BTreeMap<::std::string::String, #inner>)
        }
        TypeRef::Named(name) => scope.data_path(name)?,
    })
}

fn scalar_tokens(scalar: &Scalar, runtime: &TokenStream) -> Result<TokenStream, CodegenError> {
    if *scalar == Scalar::String {
        return Ok(quote!(::std::string::String));
    }
    let name = ident(scalar.rust_type())?;
    Ok(if scalar.is_runtime_alias() {
        quote!(#runtime::#name)
    } else {
        quote!(#name)
    })
}

/// Renders a parameter type.
pub(crate) fn param_type_tokens(
    ty: &ParamType,
    scope: &Scope<'_>,
) -> Result<TokenStream, CodegenError> {
    let runtime = scope.runtime;
    Ok(match ty {
        ParamType::Value(ty) => type_tokens(ty, scope)?,
        ParamType::Optional(ty) => {
            let ty = type_tokens(ty, scope)?;
            quote!(::std::option::Option<#ty>)
        }
        ParamType::LogicalName => quote!(::std::string::String),
        ParamType::OptionalLogicalName => {
            quote!(::std::option::Option<::std::string::String>)
        }
        ParamType::Dependencies => dependencies_type(),
        ParamType::Configure(target) => {
            let builder = scope.builder_path(target)?;
            quote!(impl FnOnce(#builder) -> #builder)
        }
        ParamType::Context => quote!(&mut impl #runtime::Template),
    })
}

/// Type of the explicit dependency list.
pub(crate) fn dependencies_type() -> TokenStream {
    quote!(::std::option::Option<::std::vec::Vec<::std::string::String>>)
}

/// Renders a parameter list entry (`name: Type`).
pub(crate) fn param_tokens(param: &Param, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    let name = ident(&param.name)?;
    let ty = param_type_tokens(&param.ty, scope)?;
    Ok(quote!(#name: #ty))
}

/// Renders a parameter list.
pub(crate) fn params_tokens(
    params: &[Param],
    scope: &Scope<'_>,
) -> Result<Vec<TokenStream>, CodegenError> {
    params.iter().map(|param| param_tokens(param, scope)).collect()
}
