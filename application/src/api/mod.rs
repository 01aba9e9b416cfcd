//! REST API definitions.

pub mod users;
