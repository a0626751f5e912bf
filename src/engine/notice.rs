/// User-facing notifications emitted by the engine.
///
/// The engine renders nothing. Whatever front end drives it receives these
/// over the channel handed out at construction and displays them however it
/// likes (status bar, dialog, stderr).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Transient status line ("Saved January 15, 2024").
    Status(String),
    /// A failed operation the user should see.
    Error { title: String, message: String },
    /// Word count of the entry open in the editor.
    WordCount(usize),
}
