//! 应用层：状态与路由

pub mod product;

use axum::{
    http::{Method, Uri},
    middleware,
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::core::{
    error::{panic_response, CoreError},
    middleware::{api_key_middleware, request_logging_middleware, ApiKey},
};
use product::{handler, ProductService, ProductStore};

pub const WELCOME_TEXT: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

/// 应用状态，启动时构建一次后注入每个处理器
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub api_key: ApiKey,
}

impl AppState {
    /// 使用初始数据构建
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_store(ProductStore::seeded(), api_key)
    }

    pub fn with_store(store: ProductStore, api_key: impl Into<String>) -> Self {
        Self {
            products: ProductService::new(store),
            api_key: ApiKey::new(api_key.into()),
        }
    }
}

async fn welcome() -> &'static str {
    WELCOME_TEXT
}

async fn route_not_found(method: Method, uri: Uri) -> CoreError {
    CoreError::not_found(format!("Cannot {} {}", method, uri.path()))
}

/// 构建路由。中间件从外到内：panic 兜底 -> trace -> 日志 -> 认证
pub fn router(state: AppState) -> Router {
    // 路径存在但方法不匹配时同样按未知路由处理
    Router::new()
        .route("/", get(welcome).fallback(route_not_found))
        .route(
            "/api/products",
            get(handler::list_products)
                .post(handler::create_product)
                .fallback(route_not_found),
        )
        .route(
            "/api/products/stats",
            get(handler::product_stats).fallback(route_not_found),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            state.api_key.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
