//! Evidence locker infrastructure

pub mod local_locker;

pub use local_locker::{IndexEntry, LocalLocker};
