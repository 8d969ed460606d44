//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 类型擦除的错误，构造函数失败时使用
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 被放弃的构造函数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedConstructor {
    /// 构造函数名称
    pub constructor: String,
    /// 不具备组件能力的参数类型
    pub non_component_parameters: Vec<String>,
}

impl fmt::Display for RejectedConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.constructor,
            self.non_component_parameters.join(", ")
        )
    }
}

fn describe_rejected(rejected: &[RejectedConstructor]) -> String {
    if rejected.is_empty() {
        return "未声明任何构造函数".to_string();
    }
    rejected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 组件发现错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("组件发现失败: {namespace}, 原因: {message}")]
    DiscoveryError { namespace: String, message: String },

    #[error("类型重复声明: {type_name}")]
    DuplicateDescriptor { type_name: String },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(message: impl Into<String>) -> Self {
        Self::ScanError {
            message: message.into(),
        }
    }

    /// 创建发现错误
    pub fn discovery_error(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DiscoveryError {
            namespace: namespace.into(),
            message: message.into(),
        }
    }
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("{type_name} 没有可用的构造函数: {}", describe_rejected(.rejected))]
    NoUsableConstructor {
        type_name: String,
        rejected: Vec<RejectedConstructor>,
    },

    #[error("检测到循环依赖: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("组件创建失败: {type_name}::{constructor}, 原因: {source}")]
    InstantiationError {
        type_name: String,
        constructor: String,
        #[source]
        source: BoxError,
    },

    #[error("组件未注册: {name}")]
    BeanNotFound { name: String },

    #[error("组件类型不匹配: {name}, 期望 {expected}, 实际 {actual}")]
    BeanTypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("组件名称冲突: {name} 已由 {existing} 占用, 无法注册 {incoming}")]
    BeanNameConflict {
        name: String,
        existing: String,
        incoming: String,
    },

    #[error("容器尚未初始化")]
    ContainerNotInitialized,
}

impl DependencyError {
    /// 参与循环的类型（仅 `CyclicDependency`）
    pub fn cycle_members(&self) -> &[String] {
        match self {
            Self::CyclicDependency { cycle } => cycle,
            _ => &[],
        }
    }
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载失败: {source}")]
    LoadError {
        #[source]
        source: BoxError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

fn describe_errors(errors: &[DependencyError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 容器错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("组件发现失败: {0}")]
    DiscoveryFailure(#[from] ComponentError),

    #[error("依赖注入错误: {0}")]
    Dependency(#[from] DependencyError),

    #[error("容器初始化失败, 共 {} 个错误: {}", .errors.len(), describe_errors(.errors))]
    Multiple { errors: Vec<DependencyError> },

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl ContainerError {
    /// 展开为依赖错误列表
    pub fn dependency_errors(&self) -> Vec<&DependencyError> {
        match self {
            Self::Dependency(error) => vec![error],
            Self::Multiple { errors } => errors.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// 结果类型别名
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ContainerResult<T> = Result<T, ContainerError>;
