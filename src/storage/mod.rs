//! 存储层模块
//!
//! 提供聊天记录持久化服务，支持内存存储和 SurrealDB。

pub mod factory;
pub mod memory;
pub mod repository;

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

#[cfg(feature = "surrealdb")]
pub mod surreal_repository;

pub use factory::create_history_repository;
pub use memory::MemoryHistoryRepository;
pub use repository::ChatHistoryRepository;
