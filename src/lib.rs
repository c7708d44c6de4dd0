pub mod command;
pub mod deck;
pub mod error;
pub mod file_io;
pub mod logger;
pub mod models;
pub mod session;

// Re-exports for convenience
pub use command::Command;
pub use deck::Deck;
pub use error::{Error, Result};
pub use file_io::{read_snapshot, write_log, write_snapshot};
pub use logger::SessionLog;
pub use models::{AskResult, Flashcard, Snapshot};
pub use session::{Session, SessionConfig};
