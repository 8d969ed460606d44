//! # Component Macros
//!
//! 这个 crate 提供了在编译期把类型登记到全局类型目录的过程宏。
//!
//! ## 核心宏
//!
//! - [`component`] - 登记组件类型
//! - [`annotated`] - 登记带有指定注解的类型
//! - [`annotation`] - 登记注解类型（可带元注解）
//! - [`constructors`] - 登记 impl 块中的构造函数
//!
//! 生成的代码通过 `::ctor` 和 `::infrastructure_common` 引用运行时，
//! 使用方需要同时依赖这两个 crate。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{annotated, annotation, component, constructors};
//! use infrastructure_common::Component;
//! use std::sync::Arc;
//!
//! #[annotation(Component)]
//! pub struct Service;
//!
//! #[component]
//! pub struct UserRepository;
//!
//! #[constructors]
//! impl UserRepository {
//!     pub fn new() -> Self {
//!         Self
//!     }
//! }
//!
//! #[annotated(Service)]
//! pub struct UserService {
//!     repository: Arc<UserRepository>,
//! }
//!
//! #[constructors]
//! impl UserService {
//!     pub fn new(repository: Arc<UserRepository>) -> Self {
//!         Self { repository }
//!     }
//! }
//! ```

use proc_macro::TokenStream;

mod component;
mod constructors;
mod utils;

// Re-exports are not allowed in proc-macro crates

fn into_output(result: syn::Result<proc_macro2::TokenStream>) -> TokenStream {
    match result {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// 组件登记宏
///
/// 把结构体或枚举登记为带有 `Component` 标记的类型，不支持泛型。
///
/// 类型不会自动获得构造函数：没有 `#[constructors]` 块的组件在初始化时报告
/// 没有可用的构造函数。`#[component(default)]` 会把 `Default::default`
/// 登记为名为 `default` 的无参构造函数。
///
/// # 示例
///
/// ```rust,ignore
/// #[component]
/// pub struct UserRepository;
///
/// #[component(default)]
/// #[derive(Default)]
/// pub struct Settings {
///     port: u16,
/// }
/// ```
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    into_output(component::component_impl(args.into(), input.into()))
}

/// 注解登记宏
///
/// 把类型登记为带有给定直接注解的类型，注解可以是 `Component` 或任意注解类型。
/// 构造函数需要通过 `#[constructors]` 登记。
///
/// # 示例
///
/// ```rust,ignore
/// #[annotated(Service, Audited)]
/// pub struct UserService;
/// ```
#[proc_macro_attribute]
pub fn annotated(args: TokenStream, input: TokenStream) -> TokenStream {
    into_output(component::annotated_impl(args.into(), input.into()))
}

/// 注解类型宏
///
/// 注解类型本身不会被创建，只用于标注其他类型；参数为其元注解。
///
/// # 示例
///
/// ```rust,ignore
/// #[annotation(Component)]
/// pub struct Service;
/// ```
#[proc_macro_attribute]
pub fn annotation(args: TokenStream, input: TokenStream) -> TokenStream {
    into_output(component::annotation_impl(args.into(), input.into()))
}

/// 构造函数登记宏
///
/// 用于固有 impl 块。公开、无接收者、返回 `Self`（或 `Result<Self, E>`）的关联函数
/// 按声明顺序登记为构造函数，`Arc<D>` 参数由容器注入。
///
/// # 示例
///
/// ```rust,ignore
/// #[constructors]
/// impl UserService {
///     pub fn new(repository: Arc<UserRepository>) -> Self {
///         Self { repository }
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn constructors(args: TokenStream, input: TokenStream) -> TokenStream {
    into_output(constructors::constructors_impl(args.into(), input.into()))
}
