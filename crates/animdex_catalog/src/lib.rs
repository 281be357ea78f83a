//! Animdex Catalog
//!
//! This crate owns the data side of the animation showcase:
//!
//! - **Catalog Model**: categories → groups → animations, immutable once built
//! - **Registry**: static category/group definitions authored alongside the animations
//! - **Builder**: turns a registry into a validated catalog, one group per technology
//! - **Cache & Service**: a shared, atomically replaceable catalog with explicit refresh
//! - **Variants**: pairs the Framer and CSS renditions of a group by their base id
//!
//! # Example
//!
//! ```rust
//! use animdex_catalog::{CatalogService, Registry};
//!
//! let service = CatalogService::new(Registry::builtin());
//!
//! let first = service.load_animations().unwrap();
//! let again = service.load_animations().unwrap();
//! assert!(std::sync::Arc::ptr_eq(&first, &again));
//!
//! let fresh = service.refresh_catalog().unwrap();
//! assert!(!std::sync::Arc::ptr_eq(&first, &fresh));
//! assert_eq!(first.group_count(), fresh.group_count());
//! ```

pub mod builder;
pub mod builtin;
pub mod cache;
pub mod error;
pub mod model;
pub mod registry;
pub mod service;
pub mod variants;

pub use builder::build_catalog;
pub use cache::CatalogCache;
pub use error::{CatalogBuildError, CatalogError, Result};
pub use model::{Animation, Catalog, Category, Group, Tech};
pub use registry::{AnimationMeta, CategoryDef, GroupDef, GroupMeta, Registry};
pub use service::{CatalogService, NewAnimation};
pub use variants::{
    build_group_variants, check_group_variants, counterpart_for_mode, infer_tech,
    pick_group_id_for_mode, resolve_group_alias, strip_tech_suffix, strip_tech_title_suffix,
    CodeMode, GroupVariants,
};
