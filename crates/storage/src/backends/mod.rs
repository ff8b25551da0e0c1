//! Concrete storage engine implementations.
//!
//! - [`RedbEngine`] - file-backed, the default for stores
//! - [`MemoryEngine`] - in-process, for tests and ephemeral stores

mod memory;
mod redb;

pub use self::memory::MemoryEngine;
pub use self::redb::RedbEngine;
