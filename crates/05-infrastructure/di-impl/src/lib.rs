//! # 依赖注入具体实现
//!
//! 提供组件发现、组件工厂、注册表以及应用上下文的具体实现
//!
//! ```ignore
//! let mut context = ApplicationContext::create("my_app::services");
//! context.init()?;
//! let service = context.get_bean::<UserService>("userService")?;
//! ```

pub mod config;
pub mod context;
pub mod discovery;
pub mod factory;
pub mod registry;

pub use config::ContainerConfigLoader;
pub use context::ApplicationContext;
pub use discovery::{CatalogDiscovery, CatalogSource};
pub use factory::BeanFactory;
pub use registry::BeanRegistryImpl;
