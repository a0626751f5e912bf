//! daybook: an encrypted personal diary engine.
//!
//! One file per entry, AES-encrypted, with a background-threaded entry
//! store, a debounced autosave, a searchable index, and a synchronization
//! core that keeps the current entry and its dirty state coherent. Front
//! ends (the CLI here, a GUI elsewhere) drive the engine through its command
//! methods and read results off its notification channel.

pub mod cli;
pub mod engine;
pub mod io;
pub mod model;
