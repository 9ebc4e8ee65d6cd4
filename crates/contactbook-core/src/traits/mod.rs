//! Core traits defined in `contactbook-core` and implemented by other crates.

pub mod cache;
pub mod clock;
pub mod storage;

pub use cache::CacheProvider;
pub use clock::{Clock, FixedClock, SystemClock};
pub use storage::StorageProvider;
