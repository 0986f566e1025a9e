//! # Repository Module
//!
//! Abstract repository traits plus the in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{
    ActionRepository, FireStore, HotspotRepository, RegionRepository, StoreSession, UnitOfWork,
};
