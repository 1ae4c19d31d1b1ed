//! 产品业务服务

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, info};
use uuid::Uuid;

use super::{
    model::{Product, ProductPage, ProductQuery},
    store::ProductStore,
    validation::{validate_product_shape, validate_required_presence},
};
use crate::core::error::CoreError;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

const NOT_FOUND_MESSAGE: &str = "Product not found";
const CREATE_REQUIRED_MESSAGE: &str = "All product fields are required";
const UPDATE_REQUIRED_MESSAGE: &str = "All product fields are required for update";

/// 产品服务，持有进程内唯一的存储。
///
/// 每个操作在一次加锁内完成，对其他请求而言是原子的。
#[derive(Clone)]
pub struct ProductService {
    store: Arc<Mutex<ProductStore>>,
}

/// 解析正整数查询参数，缺省或空字符串时使用默认值
fn parse_positive(raw: Option<&str>, name: &str, default: usize) -> Result<usize, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                CoreError::validation(format!("Query parameter '{}' must be a positive integer", name))
            }),
    }
}

impl ProductService {
    pub fn new(store: ProductStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProductStore>, CoreError> {
        self.store
            .lock()
            .map_err(|_| CoreError::internal("产品存储锁已损坏"))
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.len())
    }

    /// 过滤并分页
    pub fn list(&self, query: &ProductQuery) -> Result<ProductPage, CoreError> {
        let page = parse_positive(query.page.as_deref(), "page", DEFAULT_PAGE)?;
        let limit = parse_positive(query.limit.as_deref(), "limit", DEFAULT_LIMIT)?;

        let store = self.lock()?;
        let filtered: Vec<&Product> = match query.category.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => store.filter_by_category(category),
            None => store.list().iter().collect(),
        };

        let total_results = filtered.len();
        let start = (page - 1).saturating_mul(limit).min(total_results);
        let end = start.saturating_add(limit).min(total_results);
        let products = filtered[start..end].iter().map(|p| (*p).clone()).collect();

        Ok(ProductPage {
            page,
            limit,
            total_results,
            products,
        })
    }

    pub fn get(&self, id: &str) -> Result<Product, CoreError> {
        self.lock()?
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(NOT_FOUND_MESSAGE))
    }

    pub fn stats(&self) -> Result<BTreeMap<String, usize>, CoreError> {
        let store = self.lock()?;
        debug!(products = store.len(), "统计产品分类");
        Ok(store.category_counts())
    }

    pub fn create(&self, body: &serde_json::Value) -> Result<Product, CoreError> {
        validate_required_presence(body, CREATE_REQUIRED_MESSAGE)?;
        let fields = validate_product_shape(body)?;

        let product = Product::new(Uuid::new_v4().to_string(), fields);
        if !self.lock()?.insert(product.clone()) {
            return Err(CoreError::internal(format!("产品 id 冲突: {}", product.id)));
        }

        info!(id = %product.id, "产品已创建");
        Ok(product)
    }

    pub fn update(&self, id: &str, body: &serde_json::Value) -> Result<Product, CoreError> {
        let mut store = self.lock()?;
        if !store.contains(id) {
            return Err(CoreError::not_found(NOT_FOUND_MESSAGE));
        }

        validate_required_presence(body, UPDATE_REQUIRED_MESSAGE)?;
        let fields = validate_product_shape(body)?;

        let product = store
            .replace(id, fields)
            .ok_or_else(|| CoreError::not_found(NOT_FOUND_MESSAGE))?;

        info!(id = %product.id, "产品已更新");
        Ok(product)
    }

    pub fn delete(&self, id: &str) -> Result<Product, CoreError> {
        let product = self
            .lock()?
            .remove(id)
            .ok_or_else(|| CoreError::not_found(NOT_FOUND_MESSAGE))?;

        info!(id = %product.id, "产品已删除");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> ProductService {
        ProductService::new(ProductStore::seeded())
    }

    fn query(category: Option<&str>, page: Option<&str>, limit: Option<&str>) -> ProductQuery {
        ProductQuery {
            category: category.map(String::from),
            page: page.map(String::from),
            limit: limit.map(String::from),
        }
    }

    fn body() -> serde_json::Value {
        json!({
            "name": "Desk Lamp",
            "description": "LED lamp",
            "price": 35,
            "category": "Home",
            "inStock": true
        })
    }

    #[test]
    fn test_list_defaults() {
        let page = service().list(&ProductQuery::default()).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 5);
        assert_eq!(page.total_results, 3);
        assert_eq!(page.products.len(), 3);
    }

    #[test]
    fn test_list_paginates() {
        let svc = service();

        let page = svc.list(&query(None, Some("2"), Some("2"))).unwrap();
        assert_eq!(page.total_results, 3);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].id, "3");

        let page = svc.list(&query(None, Some("3"), Some("2"))).unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total_results, 3);
    }

    #[test]
    fn test_list_filters_before_paginating() {
        let page = service()
            .list(&query(Some("Electronics"), Some("1"), Some("1")))
            .unwrap();
        assert_eq!(page.total_results, 2);
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].id, "1");
    }

    #[test]
    fn test_list_empty_category_means_no_filter() {
        let page = service().list(&query(Some(""), None, None)).unwrap();
        assert_eq!(page.total_results, 3);
    }

    #[test]
    fn test_list_rejects_non_positive_paging() {
        let svc = service();
        for (page, limit) in [("0", "5"), ("1", "0"), ("abc", "5"), ("1", "-2")] {
            let err = svc.list(&query(None, Some(page), Some(limit))).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{} {}", page, limit);
        }
    }

    #[test]
    fn test_list_huge_page_is_empty() {
        let huge = usize::MAX.to_string();
        let page = service()
            .list(&query(None, Some(huge.as_str()), Some("5")))
            .unwrap();
        assert!(page.products.is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = service().stats().unwrap();
        assert_eq!(stats.get("electronics"), Some(&2));
        assert_eq!(stats.get("kitchen"), Some(&1));
    }

    #[test]
    fn test_create_then_get() {
        let svc = service();
        let created = svc.create(&body()).unwrap();

        assert!(!["1", "2", "3"].contains(&created.id.as_str()));
        assert_eq!(svc.count().unwrap(), 4);
        assert_eq!(svc.get(&created.id).unwrap(), created);
    }

    #[test]
    fn test_create_missing_field_leaves_store_unchanged() {
        let svc = service();
        let mut incomplete = body();
        incomplete.as_object_mut().unwrap().remove("category");

        let err = svc.create(&incomplete).unwrap_err();
        assert_eq!(err.to_string(), CREATE_REQUIRED_MESSAGE);
        assert_eq!(svc.count().unwrap(), 3);
    }

    #[test]
    fn test_update_unknown_id_is_not_found_before_validation() {
        let err = service().update("nope", &json!({})).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_update_requires_all_fields() {
        let svc = service();
        let err = svc.update("1", &json!({ "name": "Only name" })).unwrap_err();
        assert_eq!(err.to_string(), UPDATE_REQUIRED_MESSAGE);
        assert_eq!(svc.get("1").unwrap().name, "Laptop");
    }

    #[test]
    fn test_update_overwrites_fields() {
        let svc = service();
        let updated = svc.update("3", &body()).unwrap();
        assert_eq!(updated.id, "3");
        assert_eq!(updated.name, "Desk Lamp");
        assert_eq!(svc.get("3").unwrap(), updated);
    }

    #[test]
    fn test_delete_twice() {
        let svc = service();
        assert_eq!(svc.delete("1").unwrap().name, "Laptop");
        assert_eq!(svc.count().unwrap(), 2);
        assert!(matches!(svc.delete("1"), Err(CoreError::NotFound(_))));
    }
}
