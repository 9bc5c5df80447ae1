pub mod browse;
pub mod common;
pub mod crud;

pub use browse::browse_routes;
pub use common::common_routes;
pub use crud::crud_routes;
