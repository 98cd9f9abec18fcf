//! Source implementations for fetching branch exports

pub mod rdb;
pub mod snapshot;

pub use rdb::RdbSource;
pub use snapshot::SnapshotSource;
