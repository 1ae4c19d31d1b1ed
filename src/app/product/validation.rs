//! 产品请求体校验
//!
//! 两级校验：先做宽松的字段存在性检查，再做严格的类型检查并得到强类型字段。

use serde_json::Value;
use validator::Validate;

use super::model::ProductFields;
use crate::core::error::CoreError;

pub const INVALID_SHAPE_MESSAGE: &str = "Invalid or missing product fields.";

/// 必须为真值的字段
const TRUTHY_FIELDS: [&str; 3] = ["name", "description", "category"];
/// 只要求出现的字段（`0`、`false` 都算已提供）
const PRESENT_FIELDS: [&str; 2] = ["price", "inStock"];

/// JavaScript 意义上的真值判断
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 宽松的存在性检查，失败时使用调用方给出的提示信息
pub fn validate_required_presence(body: &Value, message: &str) -> Result<(), CoreError> {
    let truthy = TRUTHY_FIELDS
        .iter()
        .all(|field| body.get(field).is_some_and(is_truthy));
    let present = PRESENT_FIELDS.iter().all(|field| body.get(field).is_some());

    if truthy && present {
        Ok(())
    } else {
        Err(CoreError::validation(message))
    }
}

/// 严格的类型检查
pub fn validate_product_shape(body: &Value) -> Result<ProductFields, CoreError> {
    let fields: ProductFields = serde_json::from_value(body.clone())
        .map_err(|_| CoreError::validation(INVALID_SHAPE_MESSAGE))?;

    fields
        .validate()
        .map_err(|_| CoreError::validation(INVALID_SHAPE_MESSAGE))?;

    Ok(fields)
}
