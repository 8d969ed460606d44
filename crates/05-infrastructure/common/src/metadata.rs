//! 元数据定义
//!
//! 提供类型的身份信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 简单类型名称（不含模块路径与泛型参数）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub path: String,
    /// 模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let path = std::any::type_name::<T>();
        Self {
            name: simple_name(path).to_string(),
            id: TypeId::of::<T>(),
            path: path.to_string(),
            module_path: module_path(path).to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 检查是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// 去掉泛型参数后的类型路径
fn base_path(path: &str) -> &str {
    match path.find('<') {
        Some(index) => &path[..index],
        None => path,
    }
}

/// 提取简单类型名称
///
/// `app::repo::Cache<app::Key>` -> `Cache`
pub fn simple_name(path: &str) -> &str {
    let base = base_path(path);
    base.rsplit("::").next().unwrap_or(base)
}

/// 提取模块路径
///
/// `app::repo::Cache<app::Key>` -> `app::repo`
pub fn module_path(path: &str) -> &str {
    let base = base_path(path);
    match base.rfind("::") {
        Some(index) => &base[..index],
        None => "",
    }
}

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    /// 可实例化的类型
    #[default]
    Class,
    /// 仅用作注解的标记类型
    Annotation,
}
