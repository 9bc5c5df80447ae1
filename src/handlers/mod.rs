//! HTTP handlers: table browsing and per-table CRUD.

pub mod browse;
pub mod crud;
pub use browse::*;
