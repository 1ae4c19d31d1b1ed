//! 内存产品存储
//!
//! 按插入顺序保存的产品列表，所有操作都是线性扫描，没有二级索引。

use std::collections::BTreeMap;

use serde_json::Number;

use super::model::{Product, ProductFields};

#[derive(Debug, Default, Clone)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 带三条初始数据的存储
    pub fn seeded() -> Self {
        let seed = [
            (
                "1",
                "Laptop",
                "High-performance laptop with 16GB RAM",
                1200,
                "electronics",
                true,
            ),
            (
                "2",
                "Smartphone",
                "Latest model with 128GB storage",
                800,
                "electronics",
                true,
            ),
            (
                "3",
                "Coffee Maker",
                "Programmable coffee maker with timer",
                50,
                "kitchen",
                false,
            ),
        ];

        let products = seed
            .into_iter()
            .map(|(id, name, description, price, category, in_stock)| {
                Product::new(
                    id,
                    ProductFields {
                        name: name.to_string(),
                        description: description.to_string(),
                        price: Number::from(price),
                        category: category.to_string(),
                        in_stock,
                    },
                )
            })
            .collect();

        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// 按分类过滤（不区分大小写）
    pub fn filter_by_category(&self, category: &str) -> Vec<&Product> {
        let key = category.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category_key() == key)
            .collect()
    }

    /// 追加到末尾；id 已存在时拒绝并返回 false
    pub fn insert(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.products.push(product);
        true
    }

    pub fn replace(&mut self, id: &str, fields: ProductFields) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.apply(fields);
        Some(product.clone())
    }

    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// 各分类（小写）下的产品数量
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for product in &self.products {
            *counts.entry(product.category_key()).or_insert(0) += 1;
        }
        counts
    }
}
