//! Expression rendering.

use super::{Scope, ident};
use crate::error::CodegenError;
use crate::expr::Expr;
use proc_macro2::TokenStream;
use quote::quote;

/// Renders `expr` as the body of a function, without surrounding braces.
///
/// Assignments and registrations become statements followed by a tail
/// expression; everything else is a single tail expression.
pub(crate) fn body_tokens(expr: &Expr, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    match expr {
        Expr::Assign { member, value } => {
            let member = ident(member)?;
            let value = expr_tokens(value, scope)?;
            Ok(quote! {
                self.#member = #value;
                self
            })
        }
        Expr::Register { context, value } => {
            let context = ident(context)?;
            let value = expr_tokens(value, scope)?;
            Ok(quote! {
                let resource = #value;
                #context.register(resource)
            })
        }
        other => expr_tokens(other, scope),
    }
}

/// Renders `expr` as a single expression.
pub(crate) fn expr_tokens(expr: &Expr, scope: &Scope<'_>) -> Result<TokenStream, CodegenError> {
    let runtime = scope.runtime;
    Ok(match expr {
        Expr::Param(name) => {
            let name = ident(name)?;
            quote!(#name)
        }
        Expr::Held(name) => {
            let name = ident(name)?;
            quote!(self.#name)
        }
        Expr::Wrap(inner) => {
            let inner = expr_tokens(inner, scope)?;
            quote!(#runtime::Value::Of(#inner))
        }
        Expr::WrapEach(inner) => {
            let inner = expr_tokens(inner, scope)?;
            quote!(#inner.into_iter().map(#runtime::Value::Of).collect())
        }
        Expr::WrapValues(inner) => {
            let inner = expr_tokens(inner, scope)?;
            quote! {
                #inner
                    .into_iter()
                    .map(|(key, value)| (key, #runtime::Value::Of(value)))
                    .collect()
            }
        }
        Expr::Boxed(inner) => {
            let inner = expr_tokens(inner, scope)?;
            quote!(::std::boxed::Box::new(#inner))
        }
        Expr::BoxedOptional(inner) => {
            let inner = expr_tokens(inner, scope)?;
            quote!(#inner.map(::std::boxed::Box::new))
        }
        Expr::Present(inner) => {
            let inner = expr_tokens(inner, scope)?;
            quote!(::std::option::Option::Some(#inner))
        }
        Expr::Absent => quote!(::std::option::Option::None),
        Expr::Construct { target, fields } => {
            let path = scope.data_path(target)?;
            let fields = field_inits(fields, scope)?;
            quote!(#path { #(#fields),* })
        }
        Expr::ConstructBuilder { target, fields } => {
            let path = scope.builder_path(target)?;
            let fields = field_inits(fields, scope)?;
            quote!(#path { #(#fields),* })
        }
        Expr::NewBuilder { target, args } => {
            let path = scope.builder_path(target)?;
            let args = args_tokens(args, scope)?;
            quote!(#path::new(#(#args),*))
        }
        Expr::InvokeFactory { target, args } => {
            let path = scope.data_path(target)?;
            let args = args_tokens(args, scope)?;
            quote!(#path::create(#(#args),*))
        }
        Expr::ApplyConfigure { step, builder } => {
            let step = ident(step)?;
            let builder = expr_tokens(builder, scope)?;
            quote!(#step(#builder))
        }
        Expr::InvokeBuild(builder) => {
            let builder = expr_tokens(builder, scope)?;
            quote!(#builder.build())
        }
        Expr::CallSetter { setter, value } => {
            let setter = ident(setter)?;
            let value = expr_tokens(value, scope)?;
            quote!(self.#setter(#value))
        }
        Expr::LogicalNameOr {
            supplied,
            context,
            scope: allocation_scope,
        } => {
            let supplied = expr_tokens(supplied, scope)?;
            let context = ident(context)?;
            quote!(#supplied.unwrap_or_else(|| #context.allocate_logical_name(#allocation_scope)))
        }
        Expr::DependenciesOr { supplied, context } => {
            let supplied = expr_tokens(supplied, scope)?;
            let context = ident(context)?;
            quote!(#supplied.or_else(|| #context.current_dependee()))
        }
        Expr::AttributeRef { attribute } => {
            quote!(#runtime::Value::attribute(self.logical_name.clone(), #attribute))
        }
        Expr::Assign { .. } | Expr::Register { .. } => {
            let body = body_tokens(expr, scope)?;
            quote!({ #body })
        }
    })
}

fn field_inits(
    fields: &[(String, Expr)],
    scope: &Scope<'_>,
) -> Result<Vec<TokenStream>, CodegenError> {
    fields
        .iter()
        .map(|(name, value)| {
            let field = ident(name)?;
            if matches!(value, Expr::Param(param) if param == name) {
                return Ok(quote!(#field));
            }
            let value = expr_tokens(value, scope)?;
            Ok(quote!(#field: #value))
        })
        .collect()
}

fn args_tokens(args: &[Expr], scope: &Scope<'_>) -> Result<Vec<TokenStream>, CodegenError> {
    args.iter().map(|arg| expr_tokens(arg, scope)).collect()
}
