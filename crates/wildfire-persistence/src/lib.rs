//! # Wildfire Persistence Library
//!
//! Storage abstraction for the wildfire hotspot tracking system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Registry / Service Layer                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              FireStore (session acquisition)                 │
//! │        StoreSession (reads) / UnitOfWork (writes)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │   Repository traits per entity (hotspots, regions, actions)  │
//! │        MemoryStore: hash maps behind one RwLock              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every registry operation runs against exactly one session, which makes a
//! multi-entity update (hotspot status + region risk + action creation)
//! atomic and never partially visible. The referential layout is three
//! tables with hotspot → region and action → hotspot identifier references.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod repository;

pub use error::{Result, StoreError};
pub use repository::{
    ActionRepository, FireStore, HotspotRepository, MemoryStore, RegionRepository, StoreSession,
    UnitOfWork,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
