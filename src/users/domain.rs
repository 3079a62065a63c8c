pub mod model;

pub use model::{is_valid_email, User};
