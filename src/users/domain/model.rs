use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::info;
use crate::books::domain::{Book, Rating};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

lazy_static! {
    // Loose on purpose: an "@" followed somewhere by one of the accepted suffixes.
    static ref EMAIL_FORMAT: Regex = Regex::new(r"@.*\.(com|edu|org)").expect("valid e-mail pattern");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}

fn check_email(email: &str) -> LibraryResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(LibraryError::validation(
            format!("Invalid e-mail address format: {}", email).as_str(),
            Some("email_format".to_string())))
    }
}

// User abstracts a reader and the books they have read, keyed by ISBN.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    name: String,
    email: String,
    books: HashMap<String, Option<Rating>>,
}

impl User {
    pub fn new(name: &str, email: &str) -> LibraryResult<Self> {
        check_email(email)?;
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            books: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn books(&self) -> &HashMap<String, Option<Rating>> {
        &self.books
    }

    pub fn books_read(&self) -> usize {
        self.books.len()
    }

    /// Returns `Some(rating)` when the user has read the book.
    pub fn rating_for(&self, isbn: &str) -> Option<Option<Rating>> {
        self.books.get(isbn).copied()
    }

    pub fn change_email(&mut self, address: &str) -> LibraryResult<()> {
        check_email(address)?;
        self.email = address.to_string();
        info!(email = address, "E-mail address updated.");
        Ok(())
    }

    // re-reading a book replaces the previous rating
    pub fn read_book(&mut self, book: &Book, rating: Option<Rating>) {
        self.books.insert(book.isbn().to_string(), rating);
    }

    /// Mean of the ratings this user gave; books read without a rating are
    /// ignored.
    ///
    /// # Errors
    ///
    /// `LibraryError::EmptyAggregate` when the user has not rated any book.
    pub fn average_rating(&self) -> LibraryResult<f64> {
        let rated: Vec<f64> = self.books.values().flatten().map(|r| f64::from(*r)).collect();
        if rated.is_empty() {
            return Err(LibraryError::empty_aggregate(
                format!("User {} has not rated any book", self.email).as_str()));
        }
        Ok(rated.iter().sum::<f64>() / rated.len() as f64)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.email == other.email
    }
}

impl Identifiable for User {
    fn id(&self) -> String {
        self.email.to_string()
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "User {}, e-mail: {}, books read: {}", self.name, self.email, self.books.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::{Book, BookKind, Rating};
    use crate::core::library::LibraryError;
    use crate::users::domain::model::{is_valid_email, User};

    fn rating(value: i64) -> Option<Rating> {
        Some(Rating::try_from(value).expect("valid rating"))
    }

    #[test]
    fn test_should_build_user() {
        let user = User::new("Alan Turing", "alan@turing.com").expect("should build user");
        assert_eq!("Alan Turing", user.name());
        assert_eq!("alan@turing.com", user.email());
        assert_eq!(0, user.books_read());
    }

    #[test]
    fn test_should_accept_valid_emails() {
        for email in ["alice@test.com", "david@computation.org", "marvin@mit.edu", "a@b.com.au", "x.y@sub.domain.org"] {
            assert!(is_valid_email(email), "{}", email);
            assert!(User::new("name", email).is_ok(), "{}", email);
        }
    }

    #[test]
    fn test_should_reject_invalid_emails() {
        for email in ["alice", "alice.com", "alice@test.net", "", "alice@test", "a.com@test"] {
            assert!(!is_valid_email(email), "{}", email);
            assert!(matches!(User::new("name", email), Err(LibraryError::Validation { .. })), "{}", email);
        }
    }

    #[test]
    fn test_should_change_email() {
        let mut user = User::new("Alan Turing", "alan@turing.com").expect("should build user");
        user.change_email("alan@bletchley.org").expect("should change email");
        assert_eq!("alan@bletchley.org", user.email());
    }

    #[test]
    fn test_should_validate_replacement_email() {
        let mut user = User::new("Alan Turing", "alan@turing.com").expect("should build user");
        assert!(matches!(user.change_email("alan"), Err(LibraryError::Validation { .. })));
        assert_eq!("alan@turing.com", user.email());
    }

    #[test]
    fn test_should_read_and_rerate_book() {
        let book = Book::new("Society of Mind", "12345678", 15.99, BookKind::Generic);
        let mut user = User::new("Marvin Minsky", "marvin@mit.edu").expect("should build user");
        user.read_book(&book, None);
        assert_eq!(Some(None), user.rating_for("12345678"));
        user.read_book(&book, rating(3));
        assert_eq!(Some(rating(3)), user.rating_for("12345678"));
        assert_eq!(1, user.books_read());
        assert_eq!(None, user.rating_for("unknown"));
    }

    #[test]
    fn test_should_average_rated_books_only() {
        let first = Book::new("Society of Mind", "1", 15.99, BookKind::Generic);
        let second = Book::new("Alice In Wonderland", "2", 7.99, BookKind::Generic);
        let third = Book::new("The Diamond Age", "3", 12.99, BookKind::Generic);
        let mut user = User::new("Marvin Minsky", "marvin@mit.edu").expect("should build user");
        user.read_book(&first, rating(4));
        user.read_book(&second, rating(1));
        user.read_book(&third, None);
        assert_eq!(Ok(2.5), user.average_rating());
    }

    #[test]
    fn test_should_fail_average_without_ratings() {
        let book = Book::new("Society of Mind", "1", 15.99, BookKind::Generic);
        let mut user = User::new("Marvin Minsky", "marvin@mit.edu").expect("should build user");
        assert!(matches!(user.average_rating(), Err(LibraryError::EmptyAggregate { .. })));
        user.read_book(&book, None);
        assert!(matches!(user.average_rating(), Err(LibraryError::EmptyAggregate { .. })));
    }

    #[test]
    fn test_should_compare_by_name_and_email() {
        let book = Book::new("Society of Mind", "1", 15.99, BookKind::Generic);
        let user = User::new("Marvin Minsky", "marvin@mit.edu").expect("should build user");
        let mut same = User::new("Marvin Minsky", "marvin@mit.edu").expect("should build user");
        same.read_book(&book, None);
        assert_eq!(user, same);
        assert_ne!(user, User::new("Marvin", "marvin@mit.edu").expect("should build user"));
    }

    #[test]
    fn test_should_format_user() {
        let book = Book::new("Society of Mind", "1", 15.99, BookKind::Generic);
        let mut user = User::new("Marvin Minsky", "marvin@mit.edu").expect("should build user");
        user.read_book(&book, None);
        assert_eq!("User Marvin Minsky, e-mail: marvin@mit.edu, books read: 1", user.to_string());
    }
}
