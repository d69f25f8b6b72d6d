pub mod commands;

pub use commands::{apply_edits, save_profile, ProfileEdits};
