//! 类型登记宏实现
//!
//! `#[component]`、`#[annotated(..)]` 与 `#[annotation(..)]` 都只登记类型及其直接注解，
//! 不改动被标注的条目本身。

use crate::utils::reject_generics;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse::Parser, punctuated::Punctuated, DeriveInput, Ident, Path, Result, Token};

/// 登记的类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Class,
    Annotation,
}

/// 解析注解列表 `A, b::B, ..`
pub fn parse_annotations(args: TokenStream) -> Result<Vec<Path>> {
    let parsed = Punctuated::<Path, Token![,]>::parse_terminated.parse2(args)?;
    Ok(parsed.into_iter().collect())
}

/// 实现 #[component] 宏
///
/// `#[component(default)]` 额外登记 `Default::default` 作为无参构造函数
pub fn component_impl(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let default_constructor = if args.is_empty() {
        false
    } else {
        let option: Ident = syn::parse2(args.clone())
            .map_err(|_| syn::Error::new_spanned(&args, "#[component] 只接受 `default` 参数"))?;
        if option != "default" {
            return Err(syn::Error::new_spanned(option, "#[component] 只接受 `default` 参数"));
        }
        true
    };
    let marker: Path = syn::parse_quote!(::infrastructure_common::Component);
    let output = register_type(Kind::Class, vec![marker], input.clone(), "#[component]")?;
    if !default_constructor {
        return Ok(output);
    }

    let item: DeriveInput = syn::parse2(input)?;
    let ident = &item.ident;
    Ok(quote! {
        #output

        const _: () = {
            #[::ctor::ctor]
            fn __register_default_constructor() {
                ::infrastructure_common::submit_constructors(
                    ::infrastructure_common::TypeInfo::of::<#ident>(),
                    ::std::vec![::infrastructure_common::ConstructorDescriptor::new(
                        "default",
                        ::std::vec::Vec::new(),
                        ::std::sync::Arc::new(
                            |_: &[::infrastructure_common::Bean]|
                                -> ::std::result::Result<::infrastructure_common::Bean, ::infrastructure_common::BoxError> {
                                let instance = <#ident as ::std::default::Default>::default();
                                ::std::result::Result::Ok(::std::sync::Arc::new(instance) as ::infrastructure_common::Bean)
                            },
                        ),
                    )],
                );
            }
        };
    })
}

/// 实现 #[annotated(..)] 宏
pub fn annotated_impl(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let annotations = parse_annotations(args)?;
    if annotations.is_empty() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[annotated] 至少需要一个注解",
        ));
    }
    register_type(Kind::Class, annotations, input, "#[annotated]")
}

/// 实现 #[annotation(..)] 宏
pub fn annotation_impl(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let annotations = parse_annotations(args)?;
    register_type(Kind::Annotation, annotations, input, "#[annotation]")
}

fn register_type(
    kind: Kind,
    annotations: Vec<Path>,
    input: TokenStream,
    what: &str,
) -> Result<TokenStream> {
    let item: DeriveInput = syn::parse2(input.clone())?;
    reject_generics(&item.generics, what)?;

    let ident = &item.ident;
    let kind = match kind {
        Kind::Class => quote! { ::infrastructure_common::TypeKind::Class },
        Kind::Annotation => quote! { ::infrastructure_common::TypeKind::Annotation },
    };

    Ok(quote! {
        #input

        const _: () = {
            // 程序启动时登记到全局类型目录
            #[::ctor::ctor]
            fn __register_type() {
                ::infrastructure_common::submit_type(
                    ::infrastructure_common::TypeInfo::of::<#ident>(),
                    #kind,
                    ::std::vec![#(::infrastructure_common::TypeInfo::of::<#annotations>()),*],
                );
            }
        };
    })
}
