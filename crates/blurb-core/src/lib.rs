//! Blurb Core Library
//!
//! This crate provides the data layer for Blurb, an application for
//! browsing, purchasing, and reading condensed book summaries with
//! multilingual translations, personal notes, and highlights.
//!
//! # Architecture
//!
//! - **RecordStore**: the single owner of all persisted state. Every
//!   consumer (screens, dashboards) goes through its operations.
//! - **StorageMedium**: the key-value persistence contract the store runs
//!   against; file-backed in production, in-memory for tests.
//!
//! State lives in two JSON blobs: the full book collection under the
//! `"books"` key and the single user profile under `"currentUser"`.
//!
//! # Quick Start
//!
//! ```text
//! let store = RecordStore::open()?;
//!
//! // Browse the catalog (seeded on first run)
//! let books = store.load_books().await?;
//!
//! // Buy a book and annotate it
//! store.purchase_book(&books[0].id).await?;
//! store.add_note(&books[0].id, "worth rereading", Some(12)).await?;
//! ```
//!
//! # Modules
//!
//! - `store`: the record store (main entry point)
//! - `models`: Book, Note, Highlight, User, and Language types
//! - `storage`: persistence medium contract and typed errors
//! - `seed`: built-in sample catalog and language reference data
//! - `config`: application configuration

pub mod config;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{
    Book, BookDraft, BookTranslation, Highlight, Language, Note, Subscription, SubscriptionType,
    User, UserType,
};
pub use seed::AVAILABLE_LANGUAGES;
pub use storage::{FileMedium, MediumError, MemoryMedium, StorageMedium, StoreError, StoreResult};
pub use store::RecordStore;
