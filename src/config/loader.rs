use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PARLANCE_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（从低到高）：
    /// 1. 开发环境默认值
    /// 2. ./parlance.toml
    /// 3. PARLANCE_ 前缀环境变量（`__` 分隔层级，如 PARLANCE_SEARCH__TIMEOUT_SECS）
    /// 4. SERPAPI_KEY
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(
                Env::raw()
                    .only(&["SERPAPI_KEY"])
                    .map(|_| "search.api_key".into()),
            )
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.search.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if config.history.page_limit == 0 {
            return Err(ConfigValidationError::InvalidPageLimit);
        }

        match config.history.backend.as_str() {
            "memory" => {}
            "surrealdb" => {
                if config.database.url.is_empty() {
                    return Err(ConfigValidationError::MissingDatabaseUrl);
                }
            }
            other => return Err(ConfigValidationError::UnknownBackend(other.to_string())),
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("搜索超时无效，必须大于 0")]
    InvalidTimeout,

    #[error("历史记录分页上限无效，必须大于 0")]
    InvalidPageLimit,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("未知的历史记录存储后端: {0}")]
    UnknownBackend(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("parlance.toml")
}
