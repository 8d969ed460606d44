//! 组件发现抽象接口
//!
//! 提供组件自动发现的能力

use infrastructure_common::{
    Component, ComponentError, NamespaceConventions, TypeDescriptor, TypeInfo, TypeIntrospector,
};
use std::sync::Arc;

/// 组件发现器 trait
///
/// 在命名空间下枚举携带标记的类型
pub trait ComponentDiscovery: Send + Sync {
    /// 发现组件
    fn discover(&self, criteria: &DiscoveryCriteria) -> Result<Vec<Arc<TypeDescriptor>>, ComponentError>;

    /// 类型内省，用于查找命名空间之外的参数类型
    fn introspector(&self) -> &dyn TypeIntrospector;

    /// 获取发现器名称
    fn name(&self) -> &str;
}

/// 发现条件
#[derive(Debug, Clone)]
pub struct DiscoveryCriteria {
    /// 根命名空间（已规范化）
    pub namespace: String,
    /// 能力标记
    pub marker: TypeInfo,
}

impl DiscoveryCriteria {
    /// 创建新的发现条件，标记为 [`Component`]
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: NamespaceConventions::normalize(namespace),
            marker: TypeInfo::of::<Component>(),
        }
    }

    /// 设置能力标记
    pub fn with_marker<M: ?Sized + 'static>(mut self) -> Self {
        self.marker = TypeInfo::of::<M>();
        self
    }
}
