pub mod service;

use crate::books::domain::Book;
use crate::core::library::LibraryResult;
use crate::users::domain::User;

pub trait CatalogService {
    // factories; the returned book is not shelved until a user reads it
    fn create_book(&mut self, title: &str, isbn: &str, price: f64) -> LibraryResult<Book>;
    fn create_novel(&mut self, title: &str, author: &str, isbn: &str, price: f64) -> LibraryResult<Book>;
    fn create_non_fiction(&mut self, title: &str, subject: &str, level: &str, isbn: &str, price: f64) -> LibraryResult<Book>;
    fn discard_book(&mut self, book: Book) -> LibraryResult<()>;

    fn add_user(&mut self, name: &str, email: &str, user_books: Option<&[Book]>) -> LibraryResult<()>;
    fn add_book_to_user(&mut self, book: &Book, email: &str, rating: Option<i64>) -> LibraryResult<()>;
    fn change_user_email(&mut self, email: &str, address: &str) -> LibraryResult<()>;

    fn get_most_read_book(&self) -> Option<&Book>;
    fn highest_rated_book(&self) -> Option<&Book>;
    fn most_positive_user(&self) -> Option<&User>;
    fn get_n_most_read_books(&self, n: usize) -> Vec<(&Book, u32)>;
    fn get_n_most_prolific_readers(&self, n: usize) -> Vec<&User>;
    fn get_n_most_expensive_books(&self, n: usize) -> Vec<(f64, &Book)>;
    fn get_worth_of_user(&self, email: &str) -> LibraryResult<String>;
}
