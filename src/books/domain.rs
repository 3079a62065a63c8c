pub mod model;
pub mod rating;

pub use model::{Book, BookKind};
pub use rating::Rating;
