//! Record store
//!
//! The `RecordStore` owns all persisted entities (books with their notes
//! and highlights, plus the single user profile) and is the only component
//! that touches the persistence medium. It is constructed once at process
//! start and handed by reference to every consumer.
//!
//! ## Consistency
//!
//! Every mutation is a read-full-collection, mutate-in-memory,
//! write-full-collection cycle. An internal async mutex serializes those
//! cycles, so two concurrent mutating calls can never lose each other's
//! effect; reads issued between mutations observe the latest completed
//! write (read-your-writes within the process).
//!
//! ## Usage
//!
//! ```ignore
//! let store = RecordStore::open()?;
//!
//! let books = store.load_books().await?;
//! store.purchase_book(&books[0].id).await?;
//! let note = store.add_note(&books[0].id, "worth rereading", Some(12)).await?;
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Book, BookDraft, Highlight, Language, Note, User, UserType};
use crate::seed;
use crate::storage::{FileMedium, StorageMedium, StoreError, StoreResult};

/// Key holding the full book collection (JSON array of `Book`)
const BOOKS_KEY: &str = "books";
/// Key holding the single user profile (JSON `User`)
const USER_KEY: &str = "currentUser";

/// Durable, process-local store for the book collection and user profile
pub struct RecordStore {
    /// The persistence medium; any `get`/`set` implementation works
    medium: Arc<dyn StorageMedium>,
    /// Serializes all read-modify-write cycles
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Create a store over the given medium
    pub fn new(medium: Arc<dyn StorageMedium>) -> Self {
        Self {
            medium,
            write_lock: Mutex::new(()),
        }
    }

    /// Open a file-backed store using the default configuration
    pub fn open() -> anyhow::Result<Self> {
        let config = Config::load()?;
        Ok(Self::open_with_config(&config))
    }

    /// Open a file-backed store rooted at the configured data directory
    pub fn open_with_config(config: &Config) -> Self {
        Self::new(Arc::new(FileMedium::new(&config.data_dir)))
    }

    // ==================== Book Operations ====================

    /// Load the full book collection
    ///
    /// First-ever load on empty storage writes the built-in seed catalog
    /// and returns it.
    pub async fn load_books(&self) -> StoreResult<Vec<Book>> {
        let _guard = self.write_lock.lock().await;
        self.load_books_locked().await
    }

    /// Replace the persisted collection wholesale
    pub async fn save_books(&self, books: &[Book]) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_books(books).await
    }

    /// Look up a book by id
    ///
    /// Returns `Ok(None)` when no book has that id; storage failures are
    /// surfaced as errors, never conflated with not-found.
    pub async fn get_book_by_id(&self, id: &str) -> StoreResult<Option<Book>> {
        let books = self.load_books().await?;
        Ok(books.into_iter().find(|book| book.id == id))
    }

    /// Add a book to the personal library from a partial draft
    ///
    /// The new book gets a fresh random id and is immediately owned:
    /// `is_purchased` and `is_in_library` are both forced to `true`.
    pub async fn add_book_to_library(&self, draft: BookDraft) -> StoreResult<Book> {
        let _guard = self.write_lock.lock().await;
        let mut books = self.load_books_locked().await?;

        let book = Book::from_draft(draft);
        debug!(book_id = %book.id, title = %book.title, "adding book to personal library");
        books.push(book.clone());
        self.write_books(&books).await?;
        self.refresh_user_shelves(&books).await;

        Ok(book)
    }

    /// Purchase a book, placing it in the personal library as well
    ///
    /// Returns `Ok(false)` when the id is unknown, leaving the collection
    /// untouched. Idempotent: purchasing an already-purchased book is a
    /// no-op success. Both flags persist together or not at all.
    pub async fn purchase_book(&self, id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut books = self.load_books_locked().await?;

        let Some(book) = books.iter_mut().find(|book| book.id == id) else {
            return Ok(false);
        };

        if book.mark_purchased() {
            debug!(book_id = %id, "purchasing book");
            self.write_books(&books).await?;
            self.refresh_user_shelves(&books).await;
        }
        Ok(true)
    }

    // ==================== Note & Highlight Operations ====================

    /// Append a note to a book
    ///
    /// Fails with [`StoreError::BookNotFound`] when the id is unknown and
    /// [`StoreError::Validation`] when the content is empty; in both cases
    /// the collection is left unchanged.
    pub async fn add_note(
        &self,
        book_id: &str,
        content: &str,
        page: Option<u32>,
    ) -> StoreResult<Note> {
        if content.trim().is_empty() {
            return Err(StoreError::Validation("note content is empty".to_string()));
        }

        let _guard = self.write_lock.lock().await;
        let mut books = self.load_books_locked().await?;

        let book = books
            .iter_mut()
            .find(|book| book.id == book_id)
            .ok_or_else(|| StoreError::BookNotFound {
                id: book_id.to_string(),
            })?;

        let note = Note::new(book_id, content, page);
        debug!(book_id = %book_id, note_id = %note.id, "adding note");
        book.notes.push(note.clone());
        self.write_books(&books).await?;

        Ok(note)
    }

    /// Append a highlight to a book
    ///
    /// Same contract as [`Self::add_note`], validating the highlighted text.
    pub async fn add_highlight(
        &self,
        book_id: &str,
        text: &str,
        color: &str,
        page: Option<u32>,
    ) -> StoreResult<Highlight> {
        if text.trim().is_empty() {
            return Err(StoreError::Validation(
                "highlight text is empty".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut books = self.load_books_locked().await?;

        let book = books
            .iter_mut()
            .find(|book| book.id == book_id)
            .ok_or_else(|| StoreError::BookNotFound {
                id: book_id.to_string(),
            })?;

        let highlight = Highlight::new(book_id, text, color, page);
        debug!(book_id = %book_id, highlight_id = %highlight.id, "adding highlight");
        book.highlights.push(highlight.clone());
        self.write_books(&books).await?;

        Ok(highlight)
    }

    // ==================== Derived Views ====================

    /// Books on the personal shelf (`is_in_library`)
    pub async fn personal_library(&self) -> StoreResult<Vec<Book>> {
        let books = self.load_books().await?;
        Ok(books.into_iter().filter(|book| book.is_in_library).collect())
    }

    /// Books the user has purchased (`is_purchased`)
    pub async fn purchased_books(&self) -> StoreResult<Vec<Book>> {
        let books = self.load_books().await?;
        Ok(books.into_iter().filter(|book| book.is_purchased).collect())
    }

    /// Books submitted by a given writer
    pub async fn books_by_writer(&self, writer_id: &str) -> StoreResult<Vec<Book>> {
        let books = self.load_books().await?;
        Ok(books
            .into_iter()
            .filter(|book| book.writer_id.as_deref() == Some(writer_id))
            .collect())
    }

    /// The fixed language reference list; no I/O
    pub fn available_languages(&self) -> &'static [Language] {
        seed::AVAILABLE_LANGUAGES
    }

    // ==================== User Operations ====================

    /// The single per-installation user profile
    ///
    /// Created lazily with fixed reader defaults on first access. The
    /// returned record's shelf lists are re-derived from the book flags
    /// whenever the collection is readable; the flags are authoritative.
    pub async fn current_user(&self) -> StoreResult<User> {
        let _guard = self.write_lock.lock().await;
        let mut user = match self.read_user().await? {
            Some(user) => user,
            None => {
                let user = User::default_reader();
                debug!(user_id = %user.id, "creating default user profile");
                self.write_user(&user).await?;
                user
            }
        };

        match self.read_books().await {
            Ok(Some(books)) => apply_shelves(&mut user, &books),
            // Books never loaded yet; the stored lists already match the seed.
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not re-derive user shelves"),
        }

        Ok(user)
    }

    /// Change the account kind (reader or writer)
    ///
    /// Creates the default profile first if none exists yet.
    pub async fn update_user_type(&self, user_type: UserType) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut user = match self.read_user().await? {
            Some(user) => user,
            None => User::default_reader(),
        };

        debug!(?user_type, "updating user type");
        user.user_type = user_type;
        self.write_user(&user).await
    }

    // ==================== Internal ====================

    /// Load the collection while already holding the write lock
    async fn load_books_locked(&self) -> StoreResult<Vec<Book>> {
        if let Some(books) = self.read_books().await? {
            return Ok(books);
        }

        let books = seed::seed_books();
        warn!(count = books.len(), "books key absent, seeding sample catalog");
        self.write_books(&books).await?;
        Ok(books)
    }

    async fn read_books(&self) -> StoreResult<Option<Vec<Book>>> {
        let Some(blob) = self
            .medium
            .get(BOOKS_KEY)
            .await
            .map_err(StoreError::unavailable)?
        else {
            return Ok(None);
        };

        let books = serde_json::from_str(&blob).map_err(|source| StoreError::Corrupt {
            key: BOOKS_KEY.to_string(),
            source,
        })?;
        Ok(Some(books))
    }

    async fn write_books(&self, books: &[Book]) -> StoreResult<()> {
        let blob = serde_json::to_string(books).map_err(|source| StoreError::Corrupt {
            key: BOOKS_KEY.to_string(),
            source,
        })?;
        self.medium
            .set(BOOKS_KEY, &blob)
            .await
            .map_err(StoreError::write)
    }

    async fn read_user(&self) -> StoreResult<Option<User>> {
        let Some(blob) = self
            .medium
            .get(USER_KEY)
            .await
            .map_err(StoreError::unavailable)?
        else {
            return Ok(None);
        };

        let user = serde_json::from_str(&blob).map_err(|source| StoreError::Corrupt {
            key: USER_KEY.to_string(),
            source,
        })?;
        Ok(Some(user))
    }

    async fn write_user(&self, user: &User) -> StoreResult<()> {
        let blob = serde_json::to_string(user).map_err(|source| StoreError::Corrupt {
            key: USER_KEY.to_string(),
            source,
        })?;
        self.medium
            .set(USER_KEY, &blob)
            .await
            .map_err(StoreError::write)
    }

    /// Refresh the user's derived shelf lists after a book mutation
    ///
    /// The lists are a cache of the authoritative book flags; a failure
    /// here is logged and swallowed rather than failing the book write
    /// that already succeeded.
    async fn refresh_user_shelves(&self, books: &[Book]) {
        let user = match self.read_user().await {
            Ok(Some(user)) => user,
            // No profile yet; it will be derived fresh on first access.
            Ok(None) => return,
            Err(err) => {
                warn!(error = %err, "could not read user profile to refresh shelves");
                return;
            }
        };

        let mut updated = user.clone();
        apply_shelves(&mut updated, books);
        if updated == user {
            return;
        }

        if let Err(err) = self.write_user(&updated).await {
            warn!(error = %err, "could not persist refreshed user shelves");
        }
    }
}

/// Overwrite a user's shelf lists with the ones derived from book flags
fn apply_shelves(user: &mut User, books: &[Book]) {
    user.purchased_books = books
        .iter()
        .filter(|book| book.is_purchased)
        .map(|book| book.id.clone())
        .collect();
    user.personal_library = books
        .iter()
        .filter(|book| book.is_in_library)
        .map(|book| book.id.clone())
        .collect();
}
