//! CrudService: single-statement CRUD using the safe SQL builder.

mod crud;
mod validation;
pub use crud::{CrudService, TablePage};
pub use validation::{FieldError, FormValidator, FormValues};
