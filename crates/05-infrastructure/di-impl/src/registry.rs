//! 组件注册表实现

use di_abstractions::BeanLookup;
use infrastructure_common::{Bean, DependencyError, NamingConventions, RegisteredBean, TypeInfo};
use std::collections::HashMap;
use tracing::debug;

/// 组件注册表
///
/// 以组件名称为键保存单例，并记录创建顺序
#[derive(Debug, Default)]
pub struct BeanRegistryImpl {
    beans: HashMap<String, RegisteredBean>,
    order: Vec<String>,
}

impl BeanRegistryImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以组件名称注册实例，名称已被占用时失败
    pub fn register(&mut self, type_info: &TypeInfo, instance: Bean) -> Result<(), DependencyError> {
        let name = NamingConventions::canonical_name(type_info);
        if let Some(existing) = self.beans.get(&name) {
            return Err(DependencyError::BeanNameConflict {
                name,
                existing: existing.type_info().path.clone(),
                incoming: type_info.path.clone(),
            });
        }

        debug!("注册组件: {} -> {}", name, type_info.path);
        self.order.push(name.clone());
        self.beans
            .insert(name, RegisteredBean::new(type_info.clone(), instance));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.beans.clear();
        self.order.clear();
    }
}

impl BeanLookup for BeanRegistryImpl {
    fn lookup_by_name(&self, name: &str) -> Option<&RegisteredBean> {
        self.beans.get(name)
    }

    fn bean_names(&self) -> Vec<String> {
        self.order.clone()
    }
}
