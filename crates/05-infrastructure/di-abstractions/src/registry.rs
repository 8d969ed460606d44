//! 组件注册表抽象接口

use infrastructure_common::{NamingConventions, RegisteredBean, TypeInfo};

/// 组件注册表查询 trait
///
/// 初始化完成后只读
pub trait BeanLookup {
    /// 按组件名称查找
    fn lookup_by_name(&self, name: &str) -> Option<&RegisteredBean>;

    /// 已注册的组件名称（按创建顺序）
    fn bean_names(&self) -> Vec<String>;

    /// 按类型查找
    fn lookup_by_type(&self, type_info: &TypeInfo) -> Option<&RegisteredBean> {
        self.lookup_by_name(&NamingConventions::canonical_name(type_info))
            .filter(|bean| bean.type_info().id == type_info.id)
    }

    /// 检查组件是否已注册
    fn contains_bean(&self, name: &str) -> bool {
        self.lookup_by_name(name).is_some()
    }
}
