use crate::model::entry::Entry;

/// In-memory cache of the storage directory, newest first.
///
/// The index never watches the filesystem. It is rebuilt wholesale from a
/// directory listing and patched explicitly after create/delete.
#[derive(Debug, Default)]
pub struct EntryIndex {
    entries: Vec<Entry>,
}

impl EntryIndex {
    pub fn new() -> EntryIndex {
        EntryIndex {
            entries: Vec::new(),
        }
    }

    /// Replace the whole list with a fresh directory listing, newest first.
    pub fn rebuild(&mut self, mut entries: Vec<Entry>) {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.entries = entries;
    }

    /// Put a just-created entry at the top.
    pub fn insert_front(&mut self, entry: Entry) {
        self.entries.insert(0, entry);
    }

    /// Drop an entry by id. Unknown ids are fine.
    pub fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.id() != id);
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Read-through filtered view: a case-insensitive substring match of the
    /// term against each entry's display title. An empty term matches
    /// everything. Recomputed on every read so it always reflects the
    /// current term and index contents.
    pub fn filtered(&self, term: &str) -> Vec<Entry> {
        if term.is_empty() {
            return self.entries.clone();
        }
        let needle = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.title().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
