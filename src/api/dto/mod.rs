//! 数据传输对象模块
//!
//! 定义 API 请求和响应格式。

pub mod chat_dto;
pub mod history_dto;

pub use chat_dto::*;
pub use history_dto::*;
