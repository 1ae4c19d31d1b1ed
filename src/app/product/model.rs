//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

/// 产品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 保留原始 JSON 数字形式，整数价格序列化后仍是整数
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// 产品的可变字段，创建和更新时整体写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn new(id: impl Into<String>, fields: ProductFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            category: fields.category,
            in_stock: fields.in_stock,
        }
    }

    /// 用新字段整体覆盖，id 保持不变
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.category = fields.category;
        self.in_stock = fields.in_stock;
    }

    /// 分类比较键（小写）
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }
}

/// 列表查询参数，数值保留为字符串以便统一校验
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// 分页列表响应
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub page: usize,
    pub limit: usize,
    pub total_results: usize,
    pub products: Vec<Product>,
}

/// 删除响应
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedProduct {
    pub message: String,
    pub product: Product,
}

impl DeletedProduct {
    pub fn new(product: Product) -> Self {
        Self {
            message: "Product deleted".to_string(),
            product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_uses_camel_case_on_the_wire() {
        let product = Product {
            id: "1".into(),
            name: "Laptop".into(),
            description: "High-performance laptop".into(),
            price: Number::from(1200),
            category: "electronics".into(),
            in_stock: true,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["inStock"], json!(true));
        assert_eq!(value["price"], json!(1200));
        assert!(value.get("in_stock").is_none());
    }

    #[test]
    fn test_apply_preserves_id() {
        let mut product = Product::new(
            "abc",
            ProductFields {
                name: "Old".into(),
                description: "Old desc".into(),
                price: Number::from(1),
                category: "Misc".into(),
                in_stock: false,
            },
        );

        product.apply(ProductFields {
            name: "New".into(),
            description: "New desc".into(),
            price: Number::from(2),
            category: "Garden".into(),
            in_stock: true,
        });

        assert_eq!(product.id, "abc");
        assert_eq!(product.name, "New");
        assert_eq!(product.category_key(), "garden");
        assert!(product.in_stock);
    }
}
