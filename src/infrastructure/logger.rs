//! 日志基础设施

use tracing_subscriber::{fmt, EnvFilter};

pub struct Logger;

impl Logger {
    /// 初始化全局 subscriber，`RUST_LOG` 优先于传入的级别。
    /// 重复初始化（例如测试中）会被忽略。
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }
}
