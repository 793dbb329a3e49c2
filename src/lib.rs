//! Parlance - 单轮对话消息路由服务
//!
//! 对任意输入文本在三种回复策略中选出一种：链接搜索、网页问答或意图识别
//! 加固定回复，并把每次问答写入聊天记录。

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod models;
pub mod observability;
pub mod oracle;
pub mod router;
pub mod storage;
