use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use crate::books::domain::rating::Rating;
use crate::core::domain::Identifiable;

// BookKind carries the variant specific part of a catalog entry.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum BookKind {
    Generic,
    Fiction {
        author: String,
    },
    NonFiction {
        subject: String,
        level: String,
    },
}

// Book abstracts a catalog entry identified by its ISBN. Books are only built
// through the catalog factories so that ISBNs stay unique.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    title: String,
    isbn: String,
    price: f64,
    ratings: Vec<Rating>,
    kind: BookKind,
    // identifies this book (and its clones) in the registry of the catalog that built it
    #[serde(skip)]
    registration: Uuid,
}

impl Book {
    pub(crate) fn new(title: &str, isbn: &str, price: f64, kind: BookKind) -> Self {
        Self {
            title: title.to_string(),
            isbn: isbn.to_string(),
            price,
            ratings: vec![],
            kind,
            registration: Uuid::new_v4(),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn kind(&self) -> &BookKind {
        &self.kind
    }

    pub fn author(&self) -> Option<&str> {
        match &self.kind {
            BookKind::Fiction { author } => Some(author.as_str()),
            _ => None,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        match &self.kind {
            BookKind::NonFiction { subject, .. } => Some(subject.as_str()),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<&str> {
        match &self.kind {
            BookKind::NonFiction { level, .. } => Some(level.as_str()),
            _ => None,
        }
    }

    pub(crate) fn registration(&self) -> Uuid {
        self.registration
    }

    /// Changes the ISBN in place. The new value is not checked against the
    /// ISBN registry, so a catalog no longer accepts the renamed book.
    pub fn set_isbn(&mut self, isbn: &str) {
        self.isbn = isbn.to_string();
        info!("Updated ISBN for {}", self.title);
    }

    /// Records the rating if it lies within `Rating::MIN..=Rating::MAX`.
    /// Anything else is reported and dropped; returns whether it was kept.
    ///
    /// Only this copy is rated. Once a book is on a catalog shelf, ratings
    /// that should count go through `CatalogService::add_book_to_user`.
    pub fn add_rating(&mut self, rating: i64) -> bool {
        match Rating::try_from(rating) {
            Ok(rating) => {
                self.rate(rating);
                true
            }
            Err(err) => {
                warn!(isbn = self.isbn.as_str(), "{}", err);
                false
            }
        }
    }

    pub(crate) fn rate(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Mean of all ratings, `None` when the book was never rated.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: f64 = self.ratings.iter().map(|r| f64::from(*r)).sum();
        Some(sum / self.ratings.len() as f64)
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.isbn == other.isbn && self.price == other.price
    }
}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.isbn.hash(state);
    }
}

impl Identifiable for Book {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.kind {
            BookKind::Generic => write!(f, "{}", self.title),
            BookKind::Fiction { author } => write!(f, "{} by {}", self.title, author),
            BookKind::NonFiction { subject, level } => {
                write!(f, "{}, a {} manual on {}", self.title, level, subject)
            }
        }
    }
}
