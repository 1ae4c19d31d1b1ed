//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 统一的消息响应体，错误响应固定使用这个结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
