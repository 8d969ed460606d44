//! 容器配置加载
//!
//! 依次读取配置文件和 `IOC_` 前缀的环境变量，后者覆盖前者。
//!
//! ```toml
//! reinit_policy = "rebuild"
//! error_mode = "collect_all"
//! ```

use di_abstractions::ContainerConfig;
use infrastructure_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 默认配置文件（不含扩展名）
pub const DEFAULT_CONFIG_FILE: &str = "config/ioc";

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "IOC";

/// 容器配置加载器
#[derive(Debug, Clone)]
pub struct ContainerConfigLoader {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ContainerConfigLoader {
    fn default() -> Self {
        Self {
            file: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

impl ContainerConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从默认位置加载（`config/ioc.*` 可选）
    pub fn load() -> Result<ContainerConfig, ConfigError> {
        Self::new().build()
    }

    /// 从指定的 TOML 文件加载，文件必须存在
    pub fn from_file(path: impl AsRef<Path>) -> Result<ContainerConfig, ConfigError> {
        Self::new().with_file(path).build()
    }

    /// 指定配置文件
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 指定环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 构建配置
    pub fn build(&self) -> Result<ContainerConfig, ConfigError> {
        let mut builder = config::Config::builder();
        builder = match &self.file {
            Some(path) => {
                debug!("加载容器配置文件: {}", path.display());
                builder.add_source(
                    config::File::from(path.as_path()).format(config::FileFormat::Toml),
                )
            }
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| {
                error!("容器配置构建失败: {}", e);
                ConfigError::LoadError {
                    source: Box::new(e),
                }
            })?;

        settings.try_deserialize::<ContainerConfig>().map_err(|e| {
            error!("容器配置无效: {}", e);
            ConfigError::ValidationError {
                message: e.to_string(),
            }
        })
    }
}
