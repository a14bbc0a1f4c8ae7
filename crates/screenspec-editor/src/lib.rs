//! Tree mutation and undo/redo engine for screenspec documents.
//!
//! An [`EditorSession`] owns one screen and applies edits synchronously, one
//! at a time. Every accepted edit first pushes a full snapshot of the screen
//! onto a bounded history, so undo and redo are plain snapshot swaps.
//!
//! Invalid requests (removing the root, editing a locked node, moving a node
//! into its own subtree) leave the document untouched and come back as
//! [`EditOutcome::Rejected`] with the reason. Interactive callers can ignore
//! the outcome.

mod history;
mod ids;
mod session;

pub use history::{History, HISTORY_LIMIT};
pub use ids::{fresh_id, reassign_ids, sanitize_id};
pub use session::{EditOutcome, EditorSession, Rejection};
