//! 基于类型目录的组件发现

use di_abstractions::{ComponentDiscovery, DiscoveryCriteria};
use infrastructure_common::{
    global_catalog, CapabilityResolver, ComponentError, NamespaceConventions, TypeCatalog,
    TypeDescriptor, TypeIntrospector, TypeKind,
};
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;
use tracing::{debug, warn};

static EMPTY_CATALOG: Lazy<TypeCatalog> = Lazy::new(TypeCatalog::default);

/// 类型目录来源
pub type CatalogSource = fn() -> Result<TypeCatalog, ComponentError>;

/// 基于类型目录的组件发现器
///
/// `global()` 在首次发现时获取全局目录快照
#[derive(Debug)]
pub struct CatalogDiscovery {
    catalog: OnceCell<TypeCatalog>,
    source: CatalogSource,
}

impl CatalogDiscovery {
    /// 使用指定的类型目录
    pub fn new(catalog: TypeCatalog) -> Self {
        Self {
            catalog: OnceCell::with_value(catalog),
            source: global_catalog,
        }
    }

    /// 使用组件宏登记的全局类型目录
    pub fn global() -> Self {
        Self::lazy(global_catalog)
    }

    /// 首次发现时从 `source` 获取类型目录
    pub fn lazy(source: CatalogSource) -> Self {
        Self {
            catalog: OnceCell::new(),
            source,
        }
    }

    fn catalog(&self, namespace: &str) -> Result<&TypeCatalog, ComponentError> {
        self.catalog.get_or_try_init(|| {
            (self.source)().map_err(|e| ComponentError::discovery_error(namespace, e.to_string()))
        })
    }
}

impl Default for CatalogDiscovery {
    fn default() -> Self {
        Self::global()
    }
}

impl ComponentDiscovery for CatalogDiscovery {
    fn discover(&self, criteria: &DiscoveryCriteria) -> Result<Vec<Arc<TypeDescriptor>>, ComponentError> {
        let namespace = NamespaceConventions::normalize(&criteria.namespace);
        if let Some(segment) = NamespaceConventions::invalid_segment(&namespace) {
            return Err(ComponentError::scan_error(format!(
                "命名空间 '{}' 包含非法片段 '{}'",
                criteria.namespace, segment
            )));
        }

        let catalog = self.catalog(&namespace)?;
        let resolver = CapabilityResolver::new(catalog, criteria.marker.id);
        let mut candidates: Vec<Arc<TypeDescriptor>> = catalog
            .iter()
            .filter(|descriptor| descriptor.kind() == TypeKind::Class)
            .filter(|descriptor| {
                NamespaceConventions::contains(&namespace, &descriptor.type_info().module_path)
            })
            .filter(|descriptor| resolver.carries_type(descriptor.type_info()))
            .cloned()
            .collect();
        candidates.sort_by(|a, b| a.type_info().path.cmp(&b.type_info().path));

        if candidates.is_empty() {
            warn!("命名空间 '{}' 下未发现任何组件", namespace);
        }
        for candidate in &candidates {
            debug!("发现组件: {}", candidate.type_info().path);
        }
        Ok(candidates)
    }

    fn introspector(&self) -> &dyn TypeIntrospector {
        match self.catalog.get() {
            Some(catalog) => catalog,
            None => &*EMPTY_CATALOG,
        }
    }

    fn name(&self) -> &str {
        "CatalogDiscovery"
    }
}
