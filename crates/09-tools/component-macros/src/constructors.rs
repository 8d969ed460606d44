//! 构造函数登记宏实现

use crate::utils::{
    arc_inner, extract_generic_type, is_result_type, is_self_type, mentions_impl_or_self,
    reject_generics,
};
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Result, ReturnType, Type, Visibility};

/// 构造函数参数
enum Parameter {
    /// `Arc<D>` 参数，登记为 `D`
    Injected(Type),
    /// 其他参数，登记为自身类型，无法由容器提供
    Plain(Type),
}

impl Parameter {
    fn registered_type(&self) -> &Type {
        match self {
            Self::Injected(ty) | Self::Plain(ty) => ty,
        }
    }
}

/// 识别出的构造函数
struct Constructor<'a> {
    function: &'a ImplItemFn,
    parameters: Vec<Parameter>,
    fallible: bool,
}

/// 实现 #[constructors] 宏
pub fn constructors_impl(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    if !args.is_empty() {
        return Err(syn::Error::new_spanned(args, "#[constructors] 不接受参数"));
    }
    let item: ItemImpl = syn::parse2(input)?;
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[constructors] 只能用于固有 impl 块",
        ));
    }
    reject_generics(&item.generics, "#[constructors]")?;

    let self_ty = &item.self_ty;
    let constructors: Vec<Constructor<'_>> = item
        .items
        .iter()
        .filter_map(|impl_item| match impl_item {
            ImplItem::Fn(function) => constructor_of(function, self_ty),
            _ => None,
        })
        .collect();
    let descriptors = constructors
        .iter()
        .map(|constructor| descriptor_tokens(constructor, self_ty));

    Ok(quote! {
        #item

        const _: () = {
            // 程序启动时登记到全局类型目录
            #[::ctor::ctor]
            fn __register_constructors() {
                ::infrastructure_common::submit_constructors(
                    ::infrastructure_common::TypeInfo::of::<#self_ty>(),
                    ::std::vec![#(#descriptors),*],
                );
            }
        };
    })
}

/// 公开、无接收者、返回自身类型（或其 Result）的关联函数
fn constructor_of<'a>(function: &'a ImplItemFn, self_ty: &Type) -> Option<Constructor<'a>> {
    let signature = &function.sig;
    if !matches!(function.vis, Visibility::Public(_))
        || signature.receiver().is_some()
        || !signature.generics.params.is_empty()
        || signature.asyncness.is_some()
    {
        return None;
    }

    let ReturnType::Type(_, output) = &signature.output else {
        return None;
    };
    let fallible = if is_self_type(output, self_ty) {
        false
    } else if is_result_type(output) {
        match extract_generic_type(output) {
            Some(ok) if is_self_type(ok, self_ty) => true,
            _ => return None,
        }
    } else {
        return None;
    };

    let mut parameters = Vec::new();
    for input in &signature.inputs {
        let FnArg::Typed(pat_type) = input else {
            return None;
        };
        let ty = pat_type.ty.as_ref();
        if mentions_impl_or_self(ty) {
            return None;
        }
        parameters.push(match arc_inner(ty) {
            Some(inner) => Parameter::Injected(inner.clone()),
            None => Parameter::Plain(ty.clone()),
        });
    }

    Some(Constructor {
        function,
        parameters,
        fallible,
    })
}

fn descriptor_tokens(constructor: &Constructor<'_>, self_ty: &Type) -> TokenStream {
    let function = &constructor.function.sig.ident;
    let name = function.to_string();
    let parameter_types = constructor
        .parameters
        .iter()
        .map(Parameter::registered_type);

    let body = if constructor
        .parameters
        .iter()
        .any(|parameter| matches!(parameter, Parameter::Plain(_)))
    {
        let message = format!(
            "{}::{} 的参数无法由容器提供",
            self_ty.to_token_stream(),
            name
        );
        quote! {
            ::std::result::Result::Err(::std::convert::From::from(#message))
        }
    } else {
        let arguments = constructor
            .parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| {
                let ty = parameter.registered_type();
                quote! { ::infrastructure_common::inject::<#ty>(args, #index)? }
            });
        let call = quote! { <#self_ty>::#function(#(#arguments),*) };
        let instance = if constructor.fallible {
            quote! {
                #call.map_err(|e| -> ::infrastructure_common::BoxError { ::std::convert::Into::into(e) })?
            }
        } else {
            call
        };
        quote! {
            let instance = #instance;
            ::std::result::Result::Ok(::std::sync::Arc::new(instance) as ::infrastructure_common::Bean)
        }
    };

    // 按值参数即使类型是组件也不会被注入
    let plain_indices = constructor
        .parameters
        .iter()
        .enumerate()
        .filter(|(_, parameter)| matches!(parameter, Parameter::Plain(_)))
        .map(|(index, _)| index);

    quote! {
        ::infrastructure_common::ConstructorDescriptor::new(
            #name,
            ::std::vec![#(::infrastructure_common::TypeInfo::of::<#parameter_types>()),*],
            ::std::sync::Arc::new(
                |args: &[::infrastructure_common::Bean]|
                    -> ::std::result::Result<::infrastructure_common::Bean, ::infrastructure_common::BoxError> {
                    let _ = args;
                    #body
                },
            ),
        )
        #(.plain_parameter(#plain_indices))*
    }
}
