//! Data models for Blurb
//!
//! Defines the persisted entities: Book (with its owned notes and
//! highlights), User, and the static Language reference type. All entities
//! serialize to camelCase JSON to stay compatible with the on-device data
//! layout.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book summary available in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier
    pub id: String,
    /// Display title (base language)
    pub title: String,
    /// Author name
    pub author: String,
    /// Short description
    pub description: String,
    /// The condensed summary text
    pub summary: String,
    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Source PDF URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    /// Audio narration URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Language codes this book is available in
    pub languages: Vec<String>,
    /// Sparse per-language overrides of the display fields
    pub translations: BTreeMap<String, BookTranslation>,
    /// Purchase price; `None` means not listed for sale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Whether the user has purchased this book
    pub is_purchased: bool,
    /// Whether this book is on the user's personal shelf
    pub is_in_library: bool,
    /// When this book was created
    pub created_at: DateTime<Utc>,
    /// When this book was last updated
    pub updated_at: DateTime<Utc>,
    /// Id of the writer who submitted this book, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer_id: Option<String>,
    /// Notes taken on this book, in creation order
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Highlights made in this book, in creation order
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

impl Book {
    /// Create a new book with the given title and author
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            author: author.into(),
            description: String::new(),
            summary: String::new(),
            cover_image: None,
            pdf_url: None,
            audio_url: None,
            languages: vec!["en".to_string()],
            translations: BTreeMap::new(),
            price: None,
            is_purchased: false,
            is_in_library: false,
            created_at: now,
            updated_at: now,
            writer_id: None,
            notes: Vec::new(),
            highlights: Vec::new(),
        }
    }

    /// Build a book from a partial draft, filling defaults for missing fields
    ///
    /// A book created this way is always immediately owned by its creator:
    /// both `is_purchased` and `is_in_library` are forced to `true`.
    pub fn from_draft(draft: BookDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title.unwrap_or_else(|| "Untitled".to_string()),
            author: draft
                .author
                .unwrap_or_else(|| "Unknown Author".to_string()),
            description: draft.description.unwrap_or_default(),
            summary: draft.summary.unwrap_or_default(),
            cover_image: draft.cover_image,
            pdf_url: draft.pdf_url,
            audio_url: draft.audio_url,
            languages: draft.languages.unwrap_or_else(|| vec!["en".to_string()]),
            translations: draft.translations.unwrap_or_default(),
            price: Some(draft.price.unwrap_or(0.0)),
            is_purchased: true,
            is_in_library: true,
            created_at: now,
            updated_at: now,
            writer_id: draft.writer_id,
            notes: Vec::new(),
            highlights: Vec::new(),
        }
    }

    /// Get the translation bundle for a language code, if one exists
    pub fn translation(&self, code: &str) -> Option<&BookTranslation> {
        self.translations.get(code)
    }

    /// Title in the given language, falling back to the base title
    pub fn display_title(&self, code: &str) -> &str {
        self.translation(code).map_or(&self.title, |t| &t.title)
    }

    /// Description in the given language, falling back to the base field
    pub fn display_description(&self, code: &str) -> &str {
        self.translation(code)
            .map_or(&self.description, |t| &t.description)
    }

    /// Summary in the given language, falling back to the base field
    pub fn display_summary(&self, code: &str) -> &str {
        self.translation(code).map_or(&self.summary, |t| &t.summary)
    }

    /// Mark this book as purchased and shelved
    ///
    /// Returns `true` if anything changed. Both flags always flip together.
    pub fn mark_purchased(&mut self) -> bool {
        if self.is_purchased && self.is_in_library {
            return false;
        }
        self.is_purchased = true;
        self.is_in_library = true;
        self.updated_at = Utc::now();
        true
    }
}

/// Per-language override bundle for a book's display fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookTranslation {
    pub title: String,
    pub description: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl BookTranslation {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            summary: summary.into(),
            pdf_url: None,
            audio_url: None,
        }
    }
}

/// Partial book input for [`crate::store::RecordStore::add_book_to_library`]
///
/// Every field is optional; unsupplied fields take the defaults documented
/// on [`Book::from_draft`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub cover_image: Option<String>,
    pub pdf_url: Option<String>,
    pub audio_url: Option<String>,
    pub languages: Option<Vec<String>>,
    pub translations: Option<BTreeMap<String, BookTranslation>>,
    pub price: Option<f64>,
    pub writer_id: Option<String>,
}

/// A free-text note attached to a book
///
/// Notes are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: String,
    /// Id of the book this note belongs to
    pub book_id: String,
    /// The note text
    pub content: String,
    /// Page the note refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Finer-grained locator within the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// When this note was created
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note on the given book
    pub fn new(book_id: impl Into<String>, content: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.into(),
            content: content.into(),
            page,
            position: None,
            created_at: Utc::now(),
        }
    }
}

/// A highlighted passage in a book
///
/// Highlights are immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Unique identifier
    pub id: String,
    /// Id of the book this highlight belongs to
    pub book_id: String,
    /// The highlighted text
    pub text: String,
    /// Page the highlight refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Finer-grained locator within the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Color tag, free-form (e.g. "yellow", "#ffeb3b")
    pub color: String,
    /// When this highlight was created
    pub created_at: DateTime<Utc>,
}

impl Highlight {
    /// Create a new highlight on the given book
    pub fn new(
        book_id: impl Into<String>,
        text: impl Into<String>,
        color: impl Into<String>,
        page: Option<u32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.into(),
            text: text.into(),
            page,
            position: None,
            color: color.into(),
            created_at: Utc::now(),
        }
    }
}

/// Account kind controlling which affordances a consumer shows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Reader,
    Writer,
}

/// Subscription plan kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Monthly,
    Yearly,
}

/// A subscription record
///
/// Carried as a data shape only; nothing in the store enforces it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SubscriptionType,
    pub is_active: bool,
    pub expires_at: DateTime<Utc>,
}

/// The single per-installation user profile
///
/// `purchased_books` and `personal_library` are derived caches of the
/// corresponding flags on each [`Book`]; the book flags are authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    pub purchased_books: Vec<String>,
    pub personal_library: Vec<String>,
}

impl User {
    /// The fixed default profile created lazily on first access
    pub fn default_reader() -> Self {
        Self {
            id: "1".to_string(),
            email: "user@example.com".to_string(),
            name: "Demo User".to_string(),
            user_type: UserType::Reader,
            subscription: None,
            purchased_books: vec!["3".to_string()],
            personal_library: vec!["3".to_string()],
        }
    }
}

/// Static language reference data, compiled into the application
///
/// Never persisted, so it only needs to serialize outward.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new() {
        let book = Book::new("Deep Work", "Cal Newport");
        assert_eq!(book.title, "Deep Work");
        assert_eq!(book.author, "Cal Newport");
        assert_eq!(book.languages, vec!["en"]);
        assert!(!book.is_purchased);
        assert!(!book.is_in_library);
        assert!(book.notes.is_empty());
        assert!(book.highlights.is_empty());
    }

    #[test]
    fn test_from_draft_defaults() {
        let book = Book::from_draft(BookDraft::default());
        assert_eq!(book.title, "Untitled");
        assert_eq!(book.author, "Unknown Author");
        assert_eq!(book.description, "");
        assert_eq!(book.summary, "");
        assert_eq!(book.languages, vec!["en"]);
        assert!(book.translations.is_empty());
        assert_eq!(book.price, Some(0.0));
        assert!(book.is_purchased);
        assert!(book.is_in_library);
        assert!(!book.id.is_empty());
    }

    #[test]
    fn test_from_draft_echoes_supplied_fields() {
        let draft = BookDraft {
            title: Some("Atomic Habits".to_string()),
            author: Some("James Clear".to_string()),
            summary: Some("Small habits compound.".to_string()),
            price: Some(12.5),
            writer_id: Some("w-42".to_string()),
            ..Default::default()
        };
        let book = Book::from_draft(draft);
        assert_eq!(book.title, "Atomic Habits");
        assert_eq!(book.author, "James Clear");
        assert_eq!(book.summary, "Small habits compound.");
        assert_eq!(book.price, Some(12.5));
        assert_eq!(book.writer_id.as_deref(), Some("w-42"));
        // Ownership flags are forced regardless of the draft.
        assert!(book.is_purchased);
        assert!(book.is_in_library);
    }

    #[test]
    fn test_from_draft_unique_ids() {
        let a = Book::from_draft(BookDraft::default());
        let b = Book::from_draft(BookDraft::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display_fields_fall_back_to_base() {
        let mut book = Book::new("Deep Work", "Cal Newport");
        book.description = "Focus in a distracted world.".to_string();
        book.summary = "Work deeply.".to_string();
        book.translations.insert(
            "es".to_string(),
            BookTranslation::new("Trabajo Profundo", "Concentración.", "Trabaja a fondo."),
        );

        assert_eq!(book.display_title("es"), "Trabajo Profundo");
        assert_eq!(book.display_summary("es"), "Trabaja a fondo.");
        // No French entry: base fields win.
        assert_eq!(book.display_title("fr"), "Deep Work");
        assert_eq!(book.display_description("fr"), "Focus in a distracted world.");
    }

    #[test]
    fn test_mark_purchased_flips_both_flags_once() {
        let mut book = Book::new("Deep Work", "Cal Newport");
        assert!(book.mark_purchased());
        assert!(book.is_purchased);
        assert!(book.is_in_library);
        // Second call is a no-op.
        assert!(!book.mark_purchased());
    }

    #[test]
    fn test_note_new() {
        let note = Note::new("b-1", "remember this", Some(12));
        assert_eq!(note.book_id, "b-1");
        assert_eq!(note.content, "remember this");
        assert_eq!(note.page, Some(12));
        assert!(note.position.is_none());
        assert!(!note.id.is_empty());
    }

    #[test]
    fn test_highlight_new() {
        let hl = Highlight::new("b-1", "a striking passage", "yellow", None);
        assert_eq!(hl.book_id, "b-1");
        assert_eq!(hl.text, "a striking passage");
        assert_eq!(hl.color, "yellow");
        assert!(hl.page.is_none());
    }

    #[test]
    fn test_default_reader() {
        let user = User::default_reader();
        assert_eq!(user.user_type, UserType::Reader);
        assert_eq!(user.purchased_books, vec!["3"]);
        assert_eq!(user.personal_library, vec!["3"]);
        assert!(user.subscription.is_none());
    }

    #[test]
    fn test_book_json_layout() {
        let mut book = Book::new("Deep Work", "Cal Newport");
        book.notes.push(Note::new(&book.id, "note", None));
        let json = serde_json::to_value(&book).unwrap();

        // Persisted layout is camelCase.
        assert!(json.get("isPurchased").is_some());
        assert!(json.get("isInLibrary").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["notes"][0].get("bookId").is_some());
        // Absent optionals are omitted entirely.
        assert!(json.get("writerId").is_none());
        assert!(json.get("coverImage").is_none());
    }

    #[test]
    fn test_book_round_trip() {
        let mut book = Book::new("Deep Work", "Cal Newport");
        book.price = Some(19.99);
        book.highlights
            .push(Highlight::new(&book.id, "passage", "blue", Some(3)));
        let json = serde_json::to_string(&book).unwrap();
        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, back);
    }

    #[test]
    fn test_user_type_wire_format() {
        assert_eq!(serde_json::to_string(&UserType::Reader).unwrap(), "\"reader\"");
        assert_eq!(serde_json::to_string(&UserType::Writer).unwrap(), "\"writer\"");
        let parsed: UserType = serde_json::from_str("\"writer\"").unwrap();
        assert_eq!(parsed, UserType::Writer);
    }

    #[test]
    fn test_user_round_trip_with_subscription() {
        let mut user = User::default_reader();
        user.subscription = Some(Subscription {
            id: "s-1".to_string(),
            kind: SubscriptionType::Yearly,
            is_active: true,
            expires_at: Utc::now(),
        });
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"type\":\"reader\""));
        assert!(json.contains("\"yearly\""));
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }
}
