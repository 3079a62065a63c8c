use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::{error, info, warn};
use crate::books::domain::{Book, BookKind, Rating};
use crate::books::registry::IsbnRegistry;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Configuration, Identifiable};
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::gateway::memory::publisher::MemoryPublisher;
use crate::users::domain::User;

const EVENT_GROUP: &str = "catalog";

// ShelfEntry is a book that at least one user has read, with its read count.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfEntry {
    pub book: Book,
    pub reads: u32,
}

// Catalog owns every user and every shelved book. Both collections keep
// insertion order, which is what ties are broken by.
pub struct Catalog {
    config: Configuration,
    registry: IsbnRegistry,
    users: Vec<User>,
    user_index: HashMap<String, usize>,
    shelf: Vec<ShelfEntry>,
    shelf_index: HashMap<String, usize>,
    events_publisher: Box<dyn EventPublisher>,
}

impl Catalog {
    pub fn new(config: &Configuration, events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            registry: IsbnRegistry::new(),
            users: vec![],
            user_index: HashMap::new(),
            shelf: vec![],
            shelf_index: HashMap::new(),
            events_publisher,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn registry(&self) -> &IsbnRegistry {
        &self.registry
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.user_index.get(email).map(|&ndx| &self.users[ndx])
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The shelved copy of a book. Its ratings are the ones updated by
    /// `add_book_to_user`.
    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.shelf_entry(isbn).map(|entry| &entry.book)
    }

    pub fn read_count(&self, isbn: &str) -> Option<u32> {
        self.shelf_entry(isbn).map(|entry| entry.reads)
    }

    pub fn books(&self) -> &[ShelfEntry] {
        &self.shelf
    }

    pub fn events(&self) -> &[DomainEvent] {
        self.events_publisher.events()
    }

    fn shelf_entry(&self, isbn: &str) -> Option<&ShelfEntry> {
        self.shelf_index.get(isbn).map(|&ndx| &self.shelf[ndx])
    }

    fn metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.config.branch_id.to_string())])
    }

    fn register_book(&mut self, title: &str, isbn: &str, price: f64, kind: BookKind) -> LibraryResult<Book> {
        let book = Book::new(title, isbn, price, kind);
        self.registry.register(&book).map_err(|err| {
            error!(isbn, "{}", err);
            err
        })?;
        Ok(book)
    }

    // returns the index of the shelf entry for the book, shelving a copy first if needed
    fn shelve(&mut self, book: &Book) -> usize {
        if let Some(&ndx) = self.shelf_index.get(book.isbn()) {
            return ndx;
        }
        let ndx = self.shelf.len();
        self.shelf.push(ShelfEntry { book: book.clone(), reads: 0 });
        self.shelf_index.insert(book.isbn().to_string(), ndx);
        ndx
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(&Configuration::default(), Box::new(MemoryPublisher::new()))
    }
}

impl CatalogService for Catalog {
    fn create_book(&mut self, title: &str, isbn: &str, price: f64) -> LibraryResult<Book> {
        self.register_book(title, isbn, price, BookKind::Generic)
    }

    fn create_novel(&mut self, title: &str, author: &str, isbn: &str, price: f64) -> LibraryResult<Book> {
        self.register_book(title, isbn, price, BookKind::Fiction { author: author.to_string() })
    }

    fn create_non_fiction(&mut self, title: &str, subject: &str, level: &str, isbn: &str, price: f64) -> LibraryResult<Book> {
        self.register_book(title, isbn, price, BookKind::NonFiction {
            subject: subject.to_string(),
            level: level.to_string(),
        })
    }

    fn discard_book(&mut self, book: Book) -> LibraryResult<()> {
        let isbn = book.id();
        if !self.registry.holds(&book) {
            warn!(isbn = isbn.as_str(), "No registered book with that ISBN");
            return Err(LibraryError::not_found(
                format!("No registered book with ISBN {}", isbn).as_str()));
        }
        if self.shelf_index.contains_key(&isbn) {
            warn!(isbn = isbn.as_str(), "Cannot discard a book that has been read");
            return Err(LibraryError::validation(
                format!("Book {} is on the shelf", isbn).as_str(), Some("shelved".to_string())));
        }
        self.registry.release(&book);
        let event = DomainEvent::deleted("books", EVENT_GROUP, &isbn, &self.metadata(), &book)?;
        self.events_publisher.publish(&event)
    }

    fn add_user(&mut self, name: &str, email: &str, user_books: Option<&[Book]>) -> LibraryResult<()> {
        if self.user_index.contains_key(email) {
            error!(email, "That user already exists.");
            return Err(LibraryError::duplicate_key(
                format!("User with e-mail {} already exists", email).as_str()));
        }
        let user = User::new(name, email).map_err(|err| {
            error!(email, "{}", err);
            err
        })?;
        let event = DomainEvent::added("users", EVENT_GROUP, email, &self.metadata(), &user)?;
        self.user_index.insert(email.to_string(), self.users.len());
        self.users.push(user);
        self.events_publisher.publish(&event)?;
        info!(email, "added user {}", name);

        if let Some(books) = user_books {
            for book in books {
                self.add_book_to_user(book, email, None)?;
            }
        }
        Ok(())
    }

    fn add_book_to_user(&mut self, book: &Book, email: &str, rating: Option<i64>) -> LibraryResult<()> {
        let user_ndx = match self.user_index.get(email) {
            Some(&ndx) => ndx,
            None => {
                error!(email, "No user with e-mail {}!", email);
                return Err(LibraryError::not_found(
                    format!("No user with e-mail {}", email).as_str()));
            }
        };
        // a stale copy of a discarded book or a book from another catalog
        if !self.registry.holds(book) {
            error!(email, isbn = book.isbn(), "No live book with ISBN {} in this catalog", book.isbn());
            return Err(LibraryError::not_found(
                format!("No live book with ISBN {} in this catalog", book.isbn()).as_str()));
        }
        let rating = match rating.map(Rating::try_from) {
            Some(Ok(rating)) => Some(rating),
            Some(Err(err)) => {
                warn!(email, isbn = book.isbn(), "{}", err);
                None
            }
            None => None,
        };
        let event = DomainEvent::updated("users", EVENT_GROUP, email, &self.metadata(), &(book.isbn(), rating))?;

        self.users[user_ndx].read_book(book, rating);
        let shelf_ndx = self.shelve(book);
        let entry = &mut self.shelf[shelf_ndx];
        if let Some(rating) = rating {
            entry.book.rate(rating);
        }
        entry.reads += 1;
        self.events_publisher.publish(&event)
    }

    fn change_user_email(&mut self, email: &str, address: &str) -> LibraryResult<()> {
        let user_ndx = match self.user_index.get(email) {
            Some(&ndx) => ndx,
            None => {
                error!(email, "No user with e-mail {}!", email);
                return Err(LibraryError::not_found(
                    format!("No user with e-mail {}", email).as_str()));
            }
        };
        if email != address && self.user_index.contains_key(address) {
            error!(email = address, "That user already exists.");
            return Err(LibraryError::duplicate_key(
                format!("User with e-mail {} already exists", address).as_str()));
        }
        let event = DomainEvent::updated("users", EVENT_GROUP, email, &self.metadata(), &address)?;
        self.users[user_ndx].change_email(address).map_err(|err| {
            error!(email = address, "{}", err);
            err
        })?;
        self.user_index.remove(email);
        self.user_index.insert(address.to_string(), user_ndx);
        self.events_publisher.publish(&event)
    }

    fn get_most_read_book(&self) -> Option<&Book> {
        let mut most_read: Option<&ShelfEntry> = None;
        for entry in &self.shelf {
            if most_read.map_or(true, |best| entry.reads > best.reads) {
                most_read = Some(entry);
            }
        }
        most_read.map(|entry| &entry.book)
    }

    fn highest_rated_book(&self) -> Option<&Book> {
        let mut highest: Option<(&Book, f64)> = None;
        for entry in &self.shelf {
            if let Some(rating) = entry.book.average_rating() {
                if highest.map_or(true, |(_, best)| rating > best) {
                    highest = Some((&entry.book, rating));
                }
            }
        }
        highest.map(|(book, _)| book)
    }

    fn most_positive_user(&self) -> Option<&User> {
        let mut positive: Option<(&User, f64)> = None;
        for user in &self.users {
            // users without a single rating have no average to compare
            if let Ok(rating) = user.average_rating() {
                if positive.map_or(true, |(_, best)| rating > best) {
                    positive = Some((user, rating));
                }
            }
        }
        positive.map(|(user, _)| user)
    }

    fn get_n_most_read_books(&self, n: usize) -> Vec<(&Book, u32)> {
        let mut books: Vec<(&Book, u32)> = self.shelf.iter().map(|entry| (&entry.book, entry.reads)).collect();
        books.sort_by(|a, b| b.1.cmp(&a.1));
        books.truncate(n);
        books
    }

    fn get_n_most_prolific_readers(&self, n: usize) -> Vec<&User> {
        let mut readers: Vec<&User> = self.users.iter().collect();
        readers.sort_by(|a, b| b.books_read().cmp(&a.books_read()));
        readers.truncate(n);
        readers
    }

    fn get_n_most_expensive_books(&self, n: usize) -> Vec<(f64, &Book)> {
        let mut books: Vec<(f64, &Book)> = self.shelf.iter().map(|entry| (entry.book.price(), &entry.book)).collect();
        books.sort_by(|a, b| b.0.total_cmp(&a.0));
        books.truncate(n);
        books
    }

    fn get_worth_of_user(&self, email: &str) -> LibraryResult<String> {
        let user = self.user(email).ok_or_else(|| {
            error!(email, "No user with e-mail {}!", email);
            LibraryError::not_found(format!("No user with e-mail {}", email).as_str())
        })?;
        let total: f64 = user.books().keys()
            .filter_map(|isbn| self.book(isbn))
            .map(Book::price)
            .fold(0.0, |total, price| total + price);
        Ok(format!("Total price of books owned by user {}: {}{:.2}", email, self.config.currency_symbol, total))
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.users.len() == other.users.len()
            && self.shelf.len() == other.shelf.len()
            && self.users.iter().all(|user| other.user(user.email()) == Some(user))
            && self.shelf.iter().all(|entry| other.shelf_entry(entry.book.isbn()) == Some(entry))
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("users", &self.users)
            .field("shelf", &self.shelf)
            .field("events_count", &self.events_publisher.events().len())
            .finish()
    }
}

impl Display for Catalog {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Users: ")?;
        for user in &self.users {
            writeln!(f, "{}", user)?;
        }
        write!(f, "\nBooks: ")?;
        for entry in &self.shelf {
            write!(f, "\n{}: {}", entry.book, entry.reads)?;
        }
        Ok(())
    }
}
