//! Infrastructure layer.

pub mod cache;
pub mod upstream;

pub use self::{cache::Cached, upstream::Upstream};
#[cfg(feature = "dummyjson")]
pub use self::upstream::{dummyjson, DummyJson};
