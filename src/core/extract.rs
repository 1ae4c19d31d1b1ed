//! 请求解析：JSON 请求体、查询参数、路径参数。
//!
//! 解析失败统一转换为 `CoreError`，保证错误响应始终是 `{ "message": ... }`。

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::CoreError;

/// JSON 请求体。
///
/// 非 JSON 的 Content-Type 或空请求体都解析为空对象，交给后续的字段校验处理；
/// 只有格式错误的 JSON 会在这里直接失败。
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl JsonBody {
    pub fn parse(headers: &HeaderMap, bytes: &[u8]) -> Result<Self, CoreError> {
        if !is_json_content_type(headers) || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(Value::Object(Map::new())));
        }

        serde_json::from_slice(bytes)
            .map(JsonBody)
            .map_err(|e| CoreError::MalformedBody(format!("Malformed JSON body: {}", e)))
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                CoreError::PayloadTooLarge(e.body_text())
            } else {
                CoreError::MalformedBody(e.body_text())
            }
        })?;

        Self::parse(&headers, &bytes)
    }
}

/// 查询参数
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| CoreError::validation(e.body_text()))?;

        Ok(QueryParams(value))
    }
}

/// 路径参数
#[derive(Debug, Clone)]
pub struct PathParam<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                // 路由定义与参数类型不匹配属于服务端错误
                if e.status().is_server_error() {
                    CoreError::internal(e.body_text())
                } else {
                    CoreError::validation(e.body_text())
                }
            })?;

        Ok(PathParam(value))
    }
}
