//! # Infrastructure Common
//!
//! 这个 crate 提供了 IoC 容器的公共类型和工具。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件能力标记
//! - [`TypeDescriptor`] - 类型描述符（注解与构造函数）
//! - [`CapabilityResolver`] - 元注解感知的能力解析
//! - [`TypeCatalog`] - 编译期生成的类型目录
//! - [`NamingConventions`] - 组件命名约定
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 约定优于配置
//! - 构造函数注入

pub mod capability;
pub mod component;
pub mod constructor;
pub mod conventions;
pub mod discovery;
pub mod errors;
pub mod metadata;

pub use capability::*;
pub use component::*;
pub use constructor::*;
pub use conventions::*;
pub use discovery::*;
pub use errors::*;
pub use metadata::*;
