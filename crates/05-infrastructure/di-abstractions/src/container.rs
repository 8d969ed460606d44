//! 容器配置与统计
//!
//! 应用上下文的行为开关和运行统计

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

/// 重复初始化策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinitPolicy {
    /// 已初始化时忽略再次调用
    #[default]
    Ignore,
    /// 丢弃已有组件并重新构建
    Rebuild,
}

/// 错误处理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// 遇到第一个错误即停止
    #[default]
    FailFast,
    /// 收集所有候选组件的错误
    CollectAll,
}

/// 容器配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 重复初始化策略
    pub reinit_policy: ReinitPolicy,
    /// 错误处理模式
    pub error_mode: ErrorMode,
}

impl ContainerConfig {
    pub fn with_reinit_policy(mut self, policy: ReinitPolicy) -> Self {
        self.reinit_policy = policy;
        self
    }

    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default)]
pub struct ContainerStats {
    /// 最近一次发现的候选组件数量
    pub discovered_components: usize,
    /// 已注册组件数量（含命名空间外的依赖）
    pub registered_beans: usize,
    /// 成功初始化次数
    pub init_count: usize,
    /// 最近一次初始化耗时
    pub last_init_duration: Option<Duration>,
    /// 最近一次初始化完成时间
    pub initialized_at: Option<DateTime<Utc>>,
}

impl ContainerStats {
    /// 记录一次成功的初始化
    pub fn record_init(&mut self, discovered: usize, registered: usize, duration: Duration) {
        self.discovered_components = discovered;
        self.registered_beans = registered;
        self.init_count += 1;
        self.last_init_duration = Some(duration);
        self.initialized_at = Some(Utc::now());
    }
}
