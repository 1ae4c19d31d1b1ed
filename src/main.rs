use anyhow::Context;
use product_catalog::{
    infrastructure::{
        config::{find_config_file, load_config},
        logger::Logger,
    },
    router, AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = find_config_file();
    let config = load_config(config_path).context("加载配置失败")?;

    Logger::init(&config.logging.level);

    match config_path {
        Some(path) => info!("从配置文件加载: {}", path),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let state = AppState::new(config.auth.api_key.clone());
    info!("✅ 已初始化 {} 个示例产品", state.products.count()?);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 Server is running on http://localhost:{}", config.http.port);
    info!("📖 API 端点:");
    info!("   GET    /                    - 欢迎信息");
    info!("   GET    /api/products        - 产品列表 (category, page, limit)");
    info!("   GET    /api/products/stats  - 分类统计");
    info!("   GET    /api/products/:id    - 获取产品");
    info!("   POST   /api/products        - 创建产品");
    info!("   PUT    /api/products/:id    - 更新产品");
    info!("   DELETE /api/products/:id    - 删除产品");

    axum::serve(listener, router(state))
        .await
        .context("服务器运行失败")?;

    Ok(())
}
