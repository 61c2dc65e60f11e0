//! Catalog data: domain values, remote client, local cache and the
//! repository that combines them.

pub mod cache;
pub mod client;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod model;
pub mod repository;

pub use cache::{CacheStore, FileCacheStore, MemoryCacheStore};
pub use client::{CatalogClient, HttpCatalogClient};
pub use error::CatalogError;
pub use mapper::{CatalogMapper, DetailRecord, PageRecord};
pub use model::{CatalogItem, ItemDetail, Page, PageToken, Stat};
pub use repository::CatalogRepository;
