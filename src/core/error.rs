//! 核心错误处理模块
//!
//! 所有处理器和中间件转发的错误都在这里统一转换为 `{ "message": ... }`
//! 响应体和对应的 HTTP 状态码。

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::response::MessageBody;

/// 服务端未提供错误信息时的兜底文案
pub const FALLBACK_MESSAGE: &str = "Something went wrong on the server.";

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 按 id 查找的资源不存在
    #[error("{0}")]
    NotFound(String),
    /// 请求体字段缺失或类型不正确
    #[error("{0}")]
    Validation(String),
    /// 请求体不是合法的 JSON
    #[error("{0}")]
    MalformedBody(String),
    /// 请求体超过长度限制
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("Unauthorized. API key is missing or invalid.")]
    Unauthorized,
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CoreError::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Validation(_) | CoreError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            CoreError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = FALLBACK_MESSAGE.to_string();
        }

        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self, "请求处理失败");
        } else {
            warn!(status = status.as_u16(), error = ?self, "请求被拒绝");
        }

        (status, Json(MessageBody::new(message))).into_response()
    }
}

/// 处理器 panic 时的兜底响应，挂在 `CatchPanicLayer` 上
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "未知 panic".to_string()
    };

    error!(detail = %detail, "处理器发生 panic");
    CoreError::internal(FALLBACK_MESSAGE).into_response()
}
