//! 宏工具函数

use syn::{GenericArgument, Generics, PathArguments, Result, Type, TypePath};

/// 泛型类型无法在编译期登记
pub fn reject_generics(generics: &Generics, what: &str) -> Result<()> {
    if generics.params.is_empty() && generics.where_clause.is_none() {
        return Ok(());
    }
    Err(syn::Error::new_spanned(
        generics,
        format!("{what} 不支持泛型参数"),
    ))
}

fn last_segment_is<'a>(ty: &'a Type, name: &str) -> Option<&'a syn::PathSegment> {
    match ty {
        Type::Path(TypePath { qself: None, path }) => {
            path.segments.last().filter(|segment| segment.ident == name)
        }
        _ => None,
    }
}

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner_type)) => Some(inner_type),
            _ => None,
        },
        _ => None,
    }
}

/// `Arc<D>` 的内部类型
pub fn arc_inner(ty: &Type) -> Option<&Type> {
    last_segment_is(ty, "Arc").and_then(|_| extract_generic_type(ty))
}

/// 检查类型是否为 Result<T, E>
pub fn is_result_type(ty: &Type) -> bool {
    last_segment_is(ty, "Result").is_some()
}

/// 检查类型是否为 `Self` 或与 impl 目标同名
pub fn is_self_type(ty: &Type, self_ty: &Type) -> bool {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return false;
    };
    if path.is_ident("Self") {
        return true;
    }
    match (path.segments.last(), self_ty) {
        (Some(segment), Type::Path(TypePath { qself: None, path: self_path })) => self_path
            .segments
            .last()
            .map(|self_segment| self_segment.ident == segment.ident)
            .unwrap_or(false),
        _ => false,
    }
}

/// 检查类型中是否出现 `impl Trait` 或 `Self`
pub fn mentions_impl_or_self(ty: &Type) -> bool {
    match ty {
        Type::ImplTrait(_) => true,
        Type::Reference(reference) => mentions_impl_or_self(&reference.elem),
        Type::Path(TypePath { qself: None, path }) => {
            path.segments.iter().any(|segment| {
                segment.ident == "Self"
                    || match &segment.arguments {
                        PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| {
                            matches!(arg, GenericArgument::Type(inner) if mentions_impl_or_self(inner))
                        }),
                        _ => false,
                    }
            })
        }
        _ => false,
    }
}
