//! 解析上下文
//!
//! 记录正在构建的类型，用于检测循环依赖

use infrastructure_common::{DependencyError, TypeInfo};

/// 解析上下文
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环依赖
    pub resolution_chain: Vec<TypeInfo>,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加类型到解析链
    ///
    /// 类型已在解析链中时返回循环依赖错误，错误中列出从首次出现到重复出现的类型
    pub fn push_type(&mut self, type_info: &TypeInfo) -> Result<(), DependencyError> {
        if let Some(start) = self
            .resolution_chain
            .iter()
            .position(|entry| entry.id == type_info.id)
        {
            let cycle = self.resolution_chain[start..]
                .iter()
                .chain(std::iter::once(type_info))
                .map(|entry| entry.name.clone())
                .collect();
            return Err(DependencyError::CyclicDependency { cycle });
        }
        self.resolution_chain.push(type_info.clone());
        Ok(())
    }

    /// 从解析链中移除类型
    pub fn pop_type(&mut self) {
        self.resolution_chain.pop();
    }

    /// 检查类型是否正在解析
    pub fn is_resolving(&self, type_info: &TypeInfo) -> bool {
        self.resolution_chain.iter().any(|entry| entry.id == type_info.id)
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}
