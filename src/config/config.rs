use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SurrealDB 连接地址（mem://、rocksdb://path、ws://host:port）
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过登录）
    pub username: String,
    /// 密码
    pub password: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

/// 网页搜索配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// SerpApi 搜索地址
    pub endpoint: String,
    /// API 密钥
    pub api_key: String,
    /// 搜索引擎
    pub engine: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

/// 聊天记录配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistoryConfig {
    /// 存储后端: "memory" 或 "surrealdb"
    pub backend: String,
    /// 浏览/过滤查询的结果上限
    pub page_limit: usize,
    /// 最近记录接口返回条数
    pub recent_limit: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 网页搜索配置
    pub search: SearchConfig,
    /// 聊天记录配置
    pub history: HistoryConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "mem://".into(),
                namespace: "parlance".into(),
                database: "chat".into(),
                username: String::new(),
                password: String::new(),
            },
            search: SearchConfig {
                endpoint: "https://serpapi.com/search".into(),
                api_key: String::new(),
                engine: "google".into(),
                timeout_secs: 10,
            },
            history: HistoryConfig {
                backend: "memory".into(),
                page_limit: 100,
                recent_limit: 10,
            },
            logging: LoggingConfig {
                level: "info".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "parlance".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.server.host = "0.0.0.0".into();
        config.database.url = "rocksdb://./data/chat.db".into();
        config.history.backend = "surrealdb".into();
        config.logging.structured = true;
        config.logging.log_dir = Some(PathBuf::from("./logs"));
        config.environment = "production".into();
        config
    }
}
