//! The synchronization core: owns the current entry and the dirty flag, and
//! orders select/load/edit/save/delete/create against background I/O.
//!
//! All state lives on the thread that owns the `Engine`. Background jobs
//! only report back through the runner's channel; their results are applied
//! in `tick`/`flush_io`, never from the job thread.

use std::sync::mpsc;
use std::time::Duration;

use crate::engine::autosave::AutosaveTimer;
use crate::engine::highlight::{apply_highlight, word_count};
use crate::engine::index::EntryIndex;
use crate::engine::notice::Notice;
use crate::io::runner::{Outcome, Runner};
use crate::io::store::{EntryStore, StoreError};
use crate::model::config::DiaryConfig;
use crate::model::entry::Entry;

/// What the current entry is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing selected.
    Empty,
    /// Current entry shown read-only.
    Viewing,
    /// Current entry open in the editor; may be dirty.
    Editing,
}

/// The coordinating context for one diary.
///
/// Consumers call the command methods below and pump `tick` from their event
/// loop; results and failures come back on the notice channel.
pub struct Engine {
    store: EntryStore,
    index: EntryIndex,
    runner: Runner,
    autosave: AutosaveTimer,
    mode: Mode,
    current: Option<Entry>,
    /// Mirror of the editor widget's live content, updated by `notify_edit`.
    editor: String,
    dirty: bool,
    search_term: String,
    notice_tx: mpsc::Sender<Notice>,
}

impl Engine {
    /// Open the store and issue the initial directory listing. The returned
    /// receiver carries status/error/word-count notifications for display.
    pub fn open(config: &DiaryConfig) -> Result<(Engine, mpsc::Receiver<Notice>), StoreError> {
        let store = EntryStore::open(&config.storage.data_dir)?;
        let (notice_tx, notice_rx) = mpsc::channel();
        let mut engine = Engine {
            store,
            index: EntryIndex::new(),
            runner: Runner::new(),
            autosave: AutosaveTimer::new(Duration::from_millis(config.autosave.quiet_ms)),
            mode: Mode::Empty,
            current: None,
            editor: String::new(),
            dirty: false,
            search_term: String::new(),
            notice_tx,
        };
        engine.refresh();
        Ok((engine, notice_rx))
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.id())
    }

    /// The live content last reported by the editor.
    pub fn editor_content(&self) -> &str {
        &self.editor
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Entries matching the current search term, newest first.
    pub fn list_entries(&self) -> Vec<Entry> {
        self.index.filtered(&self.search_term)
    }

    /// Read-mode rendering of the current entry: the live content with
    /// search-term highlighting applied. None when nothing is selected.
    pub fn render_content(&self) -> Option<String> {
        self.current.as_ref()?;
        Some(apply_highlight(&self.editor, &self.search_term))
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Issue an asynchronous re-listing of the storage directory.
    pub fn refresh(&mut self) {
        let store = self.store.clone();
        self.runner
            .spawn(move || Outcome::Listed { result: store.list() });
    }

    /// Make the entry with this id current. Unsaved edits to the outgoing
    /// entry are flushed before the incoming load is issued, so the load can
    /// never race ahead of a stale write. Returns false for an id the index
    /// does not know.
    pub fn select(&mut self, id: &str) -> bool {
        self.select_inner(id, false)
    }

    fn select_inner(&mut self, id: &str, edit_on_load: bool) -> bool {
        let Some(entry) = self.index.get(id).cloned() else {
            return false;
        };
        if self.dirty {
            self.flush_current();
        } else {
            self.autosave.cancel();
        }
        self.current = Some(entry.clone());
        let store = self.store.clone();
        self.runner.spawn(move || {
            let result = store.load(&entry);
            Outcome::Loaded {
                entry,
                result,
                edit_on_load,
            }
        });
        true
    }

    /// Create an empty entry, put it at the top of the index, and open it in
    /// edit mode (entered when its load completes).
    pub fn create_entry(&mut self) -> Result<String, StoreError> {
        let entry = self.store.create()?;
        let id = entry.id().to_string();
        self.index.insert_front(entry);
        self.select_inner(&id, true);
        self.status("Created new entry.");
        Ok(id)
    }

    /// Delete an entry by id; the caller has already confirmed. Deleting the
    /// current entry empties the view. Unknown ids are a no-op.
    pub fn delete_entry(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(entry) = self.index.get(id).cloned() else {
            return Ok(());
        };
        if let Err(e) = self.store.delete(&entry) {
            self.error("Delete Error", "Could not delete file.");
            return Err(e);
        }
        self.index.remove(id);
        if self.current_id() == Some(id) {
            self.current = None;
            self.editor.clear();
            self.dirty = false;
            self.autosave.cancel();
            self.mode = Mode::Empty;
        }
        self.status("Deleted entry.");
        Ok(())
    }

    /// Record the search term. List filtering and render highlighting read
    /// it live, so nothing is recomputed eagerly.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    /// The editor widget reports its full content after a keystroke.
    /// Ignored outside edit mode.
    pub fn notify_edit(&mut self, content: &str) {
        if self.mode != Mode::Editing {
            return;
        }
        self.editor = content.to_string();
        self.dirty = true;
        self.autosave.reset();
        self.status("Editing...");
        self.word_count_notice();
    }

    pub fn enter_edit_mode(&mut self) {
        if self.mode == Mode::Viewing {
            self.mode = Mode::Editing;
        }
    }

    /// Leave edit mode, flushing unsaved edits first so the read-mode
    /// rendering reflects what was just typed.
    pub fn exit_edit_mode(&mut self) {
        if self.mode != Mode::Editing {
            return;
        }
        if self.dirty {
            self.flush_current();
        }
        self.mode = Mode::Viewing;
    }

    // -----------------------------------------------------------------------
    // Host loop
    // -----------------------------------------------------------------------

    /// Apply finished background work, then fire the autosave if its quiet
    /// period has elapsed and there is still something unsaved.
    pub fn tick(&mut self) {
        while let Some(outcome) = self.runner.try_recv() {
            self.apply(outcome);
        }
        if self.autosave.fire_due() && self.dirty && self.current.is_some() {
            self.save_current();
        }
    }

    /// Block until every in-flight operation has completed and been applied.
    pub fn flush_io(&mut self) {
        while let Some(outcome) = self.runner.recv() {
            self.apply(outcome);
        }
    }

    /// Final flush on the way out: save unsaved edits, then drain the runner.
    pub fn shutdown(&mut self) {
        self.autosave.cancel();
        if self.dirty && self.current.is_some() {
            self.save_current();
        }
        self.flush_io();
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Immediate save of the outgoing content. Cancels the pending autosave
    /// fire first so the two saves cannot race each other.
    fn flush_current(&mut self) {
        self.autosave.cancel();
        if self.current.is_some() {
            self.save_current();
        }
    }

    fn save_current(&mut self) {
        let Some(entry) = self.current.clone() else {
            return;
        };
        let content = self.editor.clone();
        let store = self.store.clone();
        self.runner.spawn(move || {
            let result = store.save(&entry, &content);
            Outcome::Saved {
                entry,
                content,
                result,
            }
        });
    }

    /// The single place where background results mutate engine state.
    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Listed { result } => match result {
                Ok(entries) => {
                    self.index.rebuild(entries);
                    self.status("Entry list refreshed.");
                }
                Err(_) => self.error("List Error", "Could not read the data directory."),
            },
            Outcome::Loaded {
                entry,
                result,
                edit_on_load,
            } => {
                // Stale: the selection moved on while the load ran.
                if self.current_id() != Some(entry.id()) {
                    return;
                }
                match result {
                    Ok(content) => {
                        self.editor = content;
                        self.dirty = false;
                        self.mode = if edit_on_load {
                            Mode::Editing
                        } else {
                            Mode::Viewing
                        };
                        self.status(&format!("Loaded {}", entry.title()));
                        self.word_count_notice();
                    }
                    Err(_) => self.error("Read Error", "Could not load entry."),
                }
            }
            Outcome::Saved {
                entry,
                content,
                result,
            } => match result {
                Ok(()) => {
                    // Clear dirty only if nothing changed while the save was
                    // in flight; otherwise the flag stays set and a later
                    // autosave fire re-saves the newer content.
                    if self.current_id() == Some(entry.id()) && self.editor == content {
                        self.dirty = false;
                        self.status(&format!("Saved {}", entry.title()));
                    }
                }
                Err(_) => {
                    self.status("Save Failed!");
                    self.error("Save Error", "Could not save entry.");
                }
            },
        }
    }

    fn status(&self, message: &str) {
        let _ = self.notice_tx.send(Notice::Status(message.to_string()));
    }

    fn error(&self, title: &str, message: &str) {
        let _ = self.notice_tx.send(Notice::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn word_count_notice(&self) {
        let _ = self
            .notice_tx
            .send(Notice::WordCount(word_count(&self.editor)));
    }
}
