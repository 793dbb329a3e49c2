//! 数据模型模块

pub mod chat_record;

pub use chat_record::{ChatRecord, HistoryQuery};
