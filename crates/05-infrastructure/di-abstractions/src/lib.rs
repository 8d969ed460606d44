//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件发现和依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentDiscovery`] - 组件发现器接口
//! - [`BeanLookup`] - 组件注册表查询接口
//! - [`ResolveContext`] - 解析上下文（循环依赖检测）
//! - [`ContainerConfig`] - 容器配置

pub mod container;
pub mod discovery;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use discovery::*;
pub use registry::*;
pub use resolver::*;
