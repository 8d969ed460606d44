//! # 组件发现机制演示
//!
//! 演示完整的容器流程，包括：
//! - 使用过程宏在编译期登记组件、注解与构造函数
//! - 通过元注解识别组件能力
//! - 按命名空间发现组件并完成构造函数注入
//! - 循环依赖与不可用构造函数的错误报告

use di_abstractions::{ContainerConfig, ErrorMode};
use di_impl::ApplicationContext;
use infrastructure_common::TypeInfo;
use std::sync::Arc;
use tracing::{error, info};

// ========== 注解 ==========

mod stereotypes {
    use component_macros::annotation;
    use infrastructure_common::Component;

    /// 服务注解，携带组件标记
    #[annotation(Component)]
    pub struct Service;

    /// 控制器注解，通过服务注解间接携带组件标记
    #[annotation(Service)]
    pub struct Controller;
}

// ========== 示例组件 ==========

mod app {
    use crate::stereotypes::{Controller, Service};
    use component_macros::{annotated, component, constructors};
    use std::sync::Arc;

    /// 内存中的用户仓储
    #[component]
    pub struct UserRepository {
        pub users: Vec<String>,
    }

    #[constructors]
    impl UserRepository {
        pub fn new() -> Self {
            Self {
                users: vec!["alice".to_string(), "bob".to_string()],
            }
        }
    }

    #[annotated(Service)]
    pub struct UserService {
        pub repository: Arc<UserRepository>,
    }

    #[constructors]
    impl UserService {
        pub fn new(repository: Arc<UserRepository>) -> Self {
            Self { repository }
        }

        pub fn count(&self) -> usize {
            self.repository.users.len()
        }
    }

    #[annotated(Controller)]
    pub struct UserController {
        pub service: Arc<UserService>,
    }

    #[constructors]
    impl UserController {
        /// 需要配置参数，容器无法提供，会被跳过
        pub fn with_prefix(service: Arc<UserService>, _prefix: String) -> Self {
            Self { service }
        }

        pub fn new(service: Arc<UserService>) -> Self {
            Self { service }
        }

        pub fn handle(&self) -> String {
            format!("共有 {} 个用户", self.service.count())
        }
    }
}

mod broken {
    use component_macros::{component, constructors};
    use std::sync::Arc;

    #[component]
    pub struct Left {
        pub right: Arc<Right>,
    }

    #[constructors]
    impl Left {
        pub fn new(right: Arc<Right>) -> Self {
            Self { right }
        }
    }

    #[component]
    pub struct Right {
        pub left: Arc<Left>,
    }

    #[constructors]
    impl Right {
        pub fn new(left: Arc<Left>) -> Self {
            Self { left }
        }
    }

    #[component]
    pub struct Mailer {
        pub host: String,
    }

    #[constructors]
    impl Mailer {
        pub fn new(host: String) -> Self {
            Self { host }
        }
    }
}

// ========== 演示函数 ==========

/// 演示组件发现与依赖注入
fn demo_injection() -> anyhow::Result<()> {
    info!("=== 依赖注入演示 ===");

    let namespace = TypeInfo::of::<app::UserService>().module_path;
    let mut context = ApplicationContext::create(&namespace);
    context.init()?;

    info!("已注册的 Bean: {:?}", context.bean_names());

    let controller = context.get_bean::<app::UserController>("userController")?;
    let service = context.get_bean_of::<app::UserService>()?;
    info!("控制器响应: {}", controller.handle());
    info!(
        "控制器持有的服务与容器中的服务是同一实例: {}",
        Arc::ptr_eq(&controller.service, &service)
    );
    info!("初始化统计: {:?}", context.stats());

    Ok(())
}

/// 演示错误报告
fn demo_errors() {
    info!("=== 错误报告演示 ===");

    let namespace = TypeInfo::of::<broken::Mailer>().module_path;
    let mut context = ApplicationContext::create(&namespace)
        .with_config(ContainerConfig::default().with_error_mode(ErrorMode::CollectAll));

    match context.init() {
        Ok(()) => info!("意外地初始化成功"),
        Err(e) => {
            error!("初始化失败: {}", e);
            for dependency_error in e.dependency_errors() {
                error!("  - {}", dependency_error);
            }
        }
    }
    info!("容器是否已初始化: {}", context.is_initialized());
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("🚀 启动组件发现机制演示");

    demo_injection()?;
    demo_errors();

    info!("✅ 演示完成");
    Ok(())
}
