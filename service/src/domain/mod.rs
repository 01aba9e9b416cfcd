//! Domain entities.

pub mod user;

pub use self::user::{User, Users};
