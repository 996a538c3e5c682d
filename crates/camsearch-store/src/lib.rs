//! camsearch store: in-memory directory snapshots + SQLite camera table.

pub mod index;
pub mod schema;
pub mod sqlite;

pub use index::{DirectoryIndex, DirectorySnapshot};
pub use sqlite::CameraStore;
