use std::collections::HashMap;
use uuid::Uuid;
use crate::books::domain::Book;
use crate::core::library::{LibraryError, LibraryResult};

// IsbnRegistry tracks the ISBNs of every live book built by one catalog, along
// with the registration of the book holding each of them.
#[derive(Debug, Default, Clone)]
pub struct IsbnRegistry {
    isbns: HashMap<String, Uuid>,
}

impl IsbnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // claims the book's isbn, failing if a live book already holds it
    pub fn register(&mut self, book: &Book) -> LibraryResult<()> {
        if self.isbns.contains_key(book.isbn()) {
            return Err(LibraryError::duplicate_key(
                format!("A book already exists with ISBN {}", book.isbn()).as_str()));
        }
        self.isbns.insert(book.isbn().to_string(), book.registration());
        Ok(())
    }

    /// True only for the book registered under its ISBN (or a clone of it),
    /// not for another book that happens to share the ISBN.
    pub fn holds(&self, book: &Book) -> bool {
        self.isbns.get(book.isbn()) == Some(&book.registration())
    }

    pub fn release(&mut self, book: &Book) -> bool {
        if !self.holds(book) {
            return false;
        }
        self.isbns.remove(book.isbn()).is_some()
    }

    pub fn contains(&self, isbn: &str) -> bool {
        self.isbns.contains_key(isbn)
    }
}
