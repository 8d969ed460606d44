//! 约定规范定义
//!
//! 组件命名与命名空间的约定

use crate::metadata::{simple_name, TypeInfo};

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 从类型信息提取组件名称（注册表键）
    pub fn canonical_name(type_info: &TypeInfo) -> String {
        Self::lcfirst(&type_info.name)
    }

    /// 从完整类型路径提取组件名称
    pub fn canonical_name_of_path(path: &str) -> String {
        Self::lcfirst(simple_name(path))
    }

    /// 首字母小写
    pub fn lcfirst(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// 命名空间约定规范
#[derive(Debug)]
pub struct NamespaceConventions;

impl NamespaceConventions {
    /// 规范化命名空间
    ///
    /// 接受 `.` 或 `::` 分隔，去掉首尾空白和多余的分隔符
    pub fn normalize(namespace: &str) -> String {
        namespace
            .trim()
            .replace('.', "::")
            .trim_matches(':')
            .to_string()
    }

    /// 验证规范化后的命名空间，返回第一个非法片段
    pub fn invalid_segment(namespace: &str) -> Option<&str> {
        if namespace.is_empty() {
            return None;
        }
        namespace
            .split("::")
            .find(|segment| !Self::is_identifier(segment))
    }

    /// 检查模块路径是否位于命名空间内
    pub fn contains(namespace: &str, module_path: &str) -> bool {
        if namespace.is_empty() {
            return true;
        }
        match module_path.strip_prefix(namespace) {
            Some("") => true,
            Some(rest) => rest.starts_with("::"),
            None => false,
        }
    }

    fn is_identifier(segment: &str) -> bool {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first == '_' || first.is_alphabetic() => {
                chars.all(|c| c == '_' || c.is_alphanumeric())
            }
            _ => false,
        }
    }
}
