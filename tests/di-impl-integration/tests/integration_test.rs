//! Centralized integration tests for di-impl crate
//!
//! 组件通过宏登记到全局类型目录，每个场景使用独立的命名空间

use di_impl::ApplicationContext;
use infrastructure_common::{ContainerError, DependencyError, TypeInfo};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_test_writer()
            .try_init();
    });
}

fn namespace_of<T: 'static>() -> String {
    TypeInfo::of::<T>().module_path
}

mod stereotypes {
    use component_macros::annotation;
    use infrastructure_common::Component;

    #[annotation(Component)]
    pub struct Service;

    #[annotation(Service)]
    pub struct Controller;

    #[annotation(Controller)]
    pub struct RestController;

    #[annotation(Documented)]
    pub struct Documented;
}

mod shop {
    use crate::stereotypes::Service;
    use component_macros::{annotated, component, constructors};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub static REPOSITORIES_CREATED: AtomicUsize = AtomicUsize::new(0);

    #[component]
    pub struct Repository {
        pub items: Vec<String>,
    }

    #[constructors]
    impl Repository {
        pub fn new() -> Self {
            REPOSITORIES_CREATED.fetch_add(1, Ordering::SeqCst);
            Self {
                items: vec!["book".to_string()],
            }
        }
    }

    #[annotated(Service)]
    pub struct CatalogService {
        pub repository: Arc<Repository>,
    }

    #[constructors]
    impl CatalogService {
        pub fn new(repository: Arc<Repository>) -> Self {
            Self { repository }
        }
    }

    #[component]
    pub struct OrderService {
        pub repository: Arc<Repository>,
        pub catalog: Arc<CatalogService>,
    }

    #[constructors]
    impl OrderService {
        pub fn new(catalog: Arc<CatalogService>, repository: Arc<Repository>) -> Self {
            Self {
                repository,
                catalog,
            }
        }
    }

    /// 没有任何标记，不会被创建
    pub struct Helper;
}

mod deep {
    use crate::stereotypes::{Documented, RestController};
    use component_macros::{annotated, component, constructors};

    #[annotated(RestController)]
    pub struct DeepController;

    #[constructors]
    impl DeepController {
        pub fn new() -> Self {
            Self
        }
    }

    #[component]
    pub struct DirectComponent;

    #[constructors]
    impl DirectComponent {
        pub fn new() -> Self {
            Self
        }
    }

    #[annotated(Documented)]
    pub struct OnlyDocumented;

    #[constructors]
    impl OnlyDocumented {
        pub fn new() -> Self {
            Self
        }
    }
}

mod cycle {
    use component_macros::{component, constructors};
    use std::sync::Arc;

    #[component]
    pub struct A {
        pub b: Arc<B>,
    }

    #[constructors]
    impl A {
        pub fn new(b: Arc<B>) -> Self {
            Self { b }
        }
    }

    #[component]
    pub struct B {
        pub a: Arc<A>,
    }

    #[constructors]
    impl B {
        pub fn new(a: Arc<A>) -> Self {
            Self { a }
        }
    }
}

mod broken {
    use component_macros::{component, constructors};

    #[component]
    pub struct Mailer {
        pub host: String,
    }

    #[constructors]
    impl Mailer {
        pub fn new(host: String) -> Self {
            Self { host }
        }

        pub fn with_port(host: String, port: u16) -> Self {
            Self {
                host: format!("{host}:{port}"),
            }
        }
    }
}

mod fallback {
    use component_macros::{component, constructors};
    use std::sync::Arc;

    #[component]
    pub struct Clock;

    #[constructors]
    impl Clock {
        pub fn new() -> Self {
            Self
        }
    }

    #[component]
    pub struct Scheduler {
        pub clock: Arc<Clock>,
        pub label: String,
    }

    #[constructors]
    impl Scheduler {
        pub fn with_label(clock: Arc<Clock>, label: String) -> Self {
            Self { clock, label }
        }

        pub fn new(clock: Arc<Clock>) -> Self {
            Self {
                clock,
                label: "default".to_string(),
            }
        }
    }
}

mod defaults {
    use component_macros::{component, constructors};
    use std::sync::Arc;

    #[component(default)]
    #[derive(Default)]
    pub struct Settings {
        pub retries: u32,
    }

    #[component]
    pub struct Client {
        pub settings: Arc<Settings>,
    }

    #[constructors]
    impl Client {
        pub fn new(settings: Arc<Settings>) -> Self {
            Self { settings }
        }
    }
}

mod bare {
    use component_macros::component;

    /// 没有登记任何构造函数
    #[component]
    pub struct Bare;
}

mod by_value {
    use component_macros::{component, constructors};
    use std::sync::Arc;

    #[component]
    pub struct Ledger;

    #[constructors]
    impl Ledger {
        pub fn new() -> Self {
            Self
        }
    }

    #[component]
    pub struct Accounting {
        pub ledger: Arc<Ledger>,
    }

    #[constructors]
    impl Accounting {
        /// 按值接收组件，容器无法注入
        pub fn from_ledger(ledger: Ledger) -> Self {
            Self {
                ledger: Arc::new(ledger),
            }
        }

        pub fn new(ledger: Arc<Ledger>) -> Self {
            Self { ledger }
        }
    }
}

#[test]
fn test_repository_and_service() -> anyhow::Result<()> {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<shop::Repository>());
    context.init()?;

    let repository = context.get_bean::<shop::Repository>("repository")?;
    let catalog = context.get_bean::<shop::CatalogService>("catalogService")?;
    let order = context.get_bean::<shop::OrderService>("orderService")?;

    assert_eq!(repository.items, ["book"]);
    assert!(Arc::ptr_eq(&catalog.repository, &repository));
    assert!(Arc::ptr_eq(&order.repository, &repository));
    assert!(Arc::ptr_eq(&order.catalog, &catalog));
    assert_eq!(
        shop::REPOSITORIES_CREATED.load(std::sync::atomic::Ordering::SeqCst),
        1
    );
    assert!(!context.contains_bean("helper"));
    assert!(Arc::ptr_eq(
        &context.get_bean_of::<shop::Repository>()?,
        &repository
    ));
    Ok(())
}

#[test]
fn test_meta_annotation_depth_does_not_matter() -> anyhow::Result<()> {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<deep::DeepController>());
    context.init()?;

    assert!(context.contains_bean("deepController"));
    assert!(context.contains_bean("directComponent"));
    // 自引用的注解链不携带组件标记
    assert!(!context.contains_bean("onlyDocumented"));
    Ok(())
}

#[test]
fn test_cyclic_dependency_is_reported() {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<cycle::A>());

    let error = context.init().unwrap_err();

    let errors = error.dependency_errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], DependencyError::CyclicDependency { .. }));
    let cycle = errors[0].cycle_members();
    assert!(cycle.iter().any(|name| name == "A"));
    assert!(cycle.iter().any(|name| name == "B"));
    assert!(error.to_string().contains("A -> B -> A"));
}

#[test]
fn test_no_usable_constructor() {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<broken::Mailer>());

    let error = context.init().unwrap_err();

    match error {
        ContainerError::Dependency(DependencyError::NoUsableConstructor { type_name, rejected }) => {
            assert!(type_name.ends_with("Mailer"));
            assert_eq!(rejected.len(), 2);
            assert_eq!(rejected[0].constructor, "new");
            assert_eq!(rejected[1].non_component_parameters.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        context.get_bean::<broken::Mailer>("mailer"),
        Err(DependencyError::ContainerNotInitialized)
    ));
}

#[test]
fn test_falls_back_to_satisfiable_constructor() -> anyhow::Result<()> {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<fallback::Scheduler>());
    context.init()?;

    let scheduler = context.get_bean::<fallback::Scheduler>("scheduler")?;
    let clock = context.get_bean::<fallback::Clock>("clock")?;
    assert_eq!(scheduler.label, "default");
    assert!(Arc::ptr_eq(&scheduler.clock, &clock));
    assert_eq!(context.bean_names(), ["clock", "scheduler"]);
    Ok(())
}

#[test]
fn test_dotted_namespace() -> anyhow::Result<()> {
    init_logging();
    let dotted = namespace_of::<fallback::Clock>().replace("::", ".");
    let mut context = ApplicationContext::create(&dotted);
    context.init()?;

    assert_eq!(context.namespace(), namespace_of::<fallback::Clock>());
    assert!(context.contains_bean("clock"));
    assert_eq!(context.stats().init_count, 1);
    Ok(())
}

#[test]
fn test_by_value_component_parameter_falls_back() -> anyhow::Result<()> {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<by_value::Ledger>());
    context.init()?;

    let accounting = context.get_bean::<by_value::Accounting>("accounting")?;
    let ledger = context.get_bean::<by_value::Ledger>("ledger")?;
    assert!(Arc::ptr_eq(&accounting.ledger, &ledger));
    Ok(())
}

#[test]
fn test_default_constructor_is_injected() -> anyhow::Result<()> {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<defaults::Client>());
    context.init()?;

    let settings = context.get_bean::<defaults::Settings>("settings")?;
    let client = context.get_bean::<defaults::Client>("client")?;
    assert_eq!(settings.retries, 0);
    assert!(Arc::ptr_eq(&client.settings, &settings));
    Ok(())
}

#[test]
fn test_component_without_constructors_is_reported() {
    init_logging();
    let mut context = ApplicationContext::create(&namespace_of::<bare::Bare>());

    let error = context.init().unwrap_err();

    match error {
        ContainerError::Dependency(DependencyError::NoUsableConstructor { type_name, rejected }) => {
            assert!(type_name.ends_with("Bare"));
            assert!(rejected.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}
