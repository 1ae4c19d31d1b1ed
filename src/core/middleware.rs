//! 核心中间件模块
//!
//! 请求依次经过：日志 -> API Key 认证 -> 路由处理器。

use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::SecondsFormat;
use tracing::info;

use super::error::CoreError;

/// 认证请求头名称
pub const API_KEY_HEADER: &str = "x-api-key";

/// 共享密钥
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        *self.0 == *candidate
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let timestamp = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    info!("[{}] {} {}", timestamp, method, uri);

    let response = next.run(req).await;

    info!(
        "{} {} - {} - {}ms",
        method,
        uri.path(),
        response.status(),
        start.elapsed().as_millis()
    );

    response
}

/// API Key 认证中间件，校验失败时直接返回 401，不再进入后续处理
pub async fn api_key_middleware(
    State(api_key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(key) if api_key.matches(key) => Ok(next.run(req).await),
        _ => Err(CoreError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_matches_exactly() {
        let key = ApiKey::new("secret123");
        assert!(key.matches("secret123"));
        assert!(!key.matches("secret1234"));
        assert!(!key.matches("SECRET123"));
        assert!(!key.matches(""));
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("secret123");
        assert!(!format!("{:?}", key).contains("secret123"));
    }
}
