pub mod autosave;
pub mod core;
pub mod highlight;
pub mod index;
pub mod notice;

pub use autosave::AutosaveTimer;
pub use self::core::{Engine, Mode};
pub use highlight::{apply_highlight, word_count};
pub use index::EntryIndex;
pub use notice::Notice;
