//! 应用上下文
//!
//! 容器的对外入口：发现命名空间下的组件，构建并按名称或类型提供组件实例

use crate::discovery::CatalogDiscovery;
use crate::factory::BeanFactory;
use crate::registry::BeanRegistryImpl;
use di_abstractions::{
    BeanLookup, ComponentDiscovery, ContainerConfig, ContainerStats, DiscoveryCriteria, ErrorMode,
    ReinitPolicy,
};
use infrastructure_common::{
    ContainerError, DependencyError, NamespaceConventions, NamingConventions, TypeInfo,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn};

/// 应用上下文
pub struct ApplicationContext {
    namespace: String,
    discovery: Box<dyn ComponentDiscovery>,
    config: ContainerConfig,
    registry: BeanRegistryImpl,
    initialized: bool,
    stats: ContainerStats,
}

impl ApplicationContext {
    /// 创建应用上下文，不做任何扫描
    pub fn create(namespace: &str) -> Self {
        Self {
            namespace: NamespaceConventions::normalize(namespace),
            discovery: Box::new(CatalogDiscovery::global()),
            config: ContainerConfig::default(),
            registry: BeanRegistryImpl::new(),
            initialized: false,
            stats: ContainerStats::default(),
        }
    }

    /// 替换组件发现器
    pub fn with_discovery(mut self, discovery: impl ComponentDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 发现并创建命名空间下的所有组件
    ///
    /// 失败时保留原有状态
    pub fn init(&mut self) -> Result<(), ContainerError> {
        let span = info_span!("init", namespace = %self.namespace);
        let _enter = span.enter();

        if self.initialized {
            match self.config.reinit_policy {
                ReinitPolicy::Ignore => {
                    warn!("容器已初始化，忽略重复调用");
                    return Ok(());
                }
                ReinitPolicy::Rebuild => info!("容器已初始化，重新构建所有组件"),
            }
        }

        let started = Instant::now();
        info!("开始初始化容器, 发现器: {}", self.discovery.name());

        let criteria = DiscoveryCriteria::new(&self.namespace);
        let candidates = self.discovery.discover(&criteria).map_err(|e| {
            error!("组件发现失败: {}", e);
            ContainerError::from(e)
        })?;

        let mut registry = BeanRegistryImpl::new();
        let mut errors = Vec::new();
        {
            let mut factory = BeanFactory::new(
                self.discovery.introspector(),
                &mut registry,
                criteria.marker.id,
            );
            for candidate in &candidates {
                if let Err(e) = factory.ensure_built(candidate) {
                    error!("组件创建失败: {}, 原因: {}", candidate.type_info().path, e);
                    errors.push(e);
                    if self.config.error_mode == ErrorMode::FailFast {
                        break;
                    }
                }
            }
        }

        if !errors.is_empty() {
            error!("容器初始化失败, 共 {} 个错误", errors.len());
            return Err(if errors.len() == 1 {
                ContainerError::Dependency(errors.remove(0))
            } else {
                ContainerError::Multiple { errors }
            });
        }

        self.stats
            .record_init(candidates.len(), registry.len(), started.elapsed());
        self.registry = registry;
        self.initialized = true;
        info!(
            "容器初始化完成: 发现 {} 个组件, 注册 {} 个实例, 耗时 {:?}",
            candidates.len(),
            self.registry.len(),
            started.elapsed()
        );
        Ok(())
    }

    /// 按名称获取组件
    pub fn get_bean<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, DependencyError> {
        self.ensure_initialized()?;
        self.registry
            .lookup_by_name(name)
            .ok_or_else(|| DependencyError::BeanNotFound {
                name: name.to_string(),
            })?
            .downcast::<T>(name)
    }

    /// 按类型获取组件
    pub fn get_bean_of<T: Any + Send + Sync>(&self) -> Result<Arc<T>, DependencyError> {
        self.ensure_initialized()?;
        let type_info = TypeInfo::of::<T>();
        let name = NamingConventions::canonical_name(&type_info);
        self.registry
            .lookup_by_type(&type_info)
            .ok_or(DependencyError::BeanNotFound { name: name.clone() })?
            .downcast::<T>(&name)
    }

    /// 检查组件是否已注册
    pub fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains_bean(name)
    }

    /// 已注册的组件名称（按创建顺序）
    pub fn bean_names(&self) -> Vec<String> {
        self.registry.bean_names()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 规范化后的根命名空间
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn stats(&self) -> &ContainerStats {
        &self.stats
    }

    fn ensure_initialized(&self) -> Result<(), DependencyError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DependencyError::ContainerNotInitialized)
        }
    }
}

impl std::fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("namespace", &self.namespace)
            .field("discovery", &self.discovery.name())
            .field("config", &self.config)
            .field("initialized", &self.initialized)
            .field("beans", &self.registry.len())
            .finish()
    }
}
