//! Data models for GameShelf

pub mod library;
pub mod user;

// Re-export commonly used types
pub use library::{GameStatus, LibraryEntry, LibraryEntryUpdate, NewLibraryEntry, SaveEntry};
pub use user::{User, UserClaims};
