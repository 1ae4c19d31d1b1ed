//! # 产品目录 REST API
//!
//! 基于 Axum 的内存产品目录服务：
//! - 列表（分类过滤、分页）、单个查询、分类统计
//! - 创建、整体更新、删除
//! - `x-api-key` 共享密钥认证和统一的 `{ "message": ... }` 错误响应

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use crate::core::error::CoreError;
