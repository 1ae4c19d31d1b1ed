//! 产品管理

pub mod handler;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

pub use model::{Product, ProductFields};
pub use service::ProductService;
pub use store::ProductStore;
