//! Size-bounded, FIFO-evicting history sequences.

/// Maximum retained command lines.
pub const COMMAND_HISTORY_CAP: usize = 50;
/// Maximum retained transcript entries.
pub const OUTPUT_HISTORY_CAP: usize = 100;
/// Payload schema version for the persisted command-line snapshot.
pub const COMMAND_HISTORY_SCHEMA_VERSION: u32 = 1;
/// Payload schema version for the persisted transcript snapshot.
pub const OUTPUT_HISTORY_SCHEMA_VERSION: u32 = 1;

/// Append-only, size-capped sequence.
///
/// Insertion order is display order. When an append exceeds the cap, the
/// oldest entries are dropped from the front until the sequence is back at
/// the cap; the newest entries always survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedLog<T> {
    entries: Vec<T>,
    cap: usize,
}

impl<T> BoundedLog<T> {
    /// Creates an empty log with the given capacity.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap,
        }
    }

    /// Rebuilds a log from restored entries, keeping only the last `cap`.
    pub fn from_entries(cap: usize, mut entries: Vec<T>) -> Self {
        if entries.len() > cap {
            let overflow = entries.len() - cap;
            entries.drain(0..overflow);
        }
        Self { entries, cap }
    }

    /// Appends an entry, evicting from the front past the cap.
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
        if self.entries.len() > self.cap {
            let overflow = self.entries.len() - self.cap;
            self.entries.drain(0..overflow);
        }
    }

    /// Removes the most recent entry matching `predicate`, if any.
    pub fn remove_last_matching(&mut self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.entries.iter().rposition(predicate)?;
        Some(self.entries.remove(index))
    }

    /// Empties the sequence.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl<T: Clone> BoundedLog<T> {
    /// Clones the retained entries out, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn push_past_cap_drops_oldest_first() {
        let mut log = BoundedLog::new(3);
        for n in 1..=5 {
            log.push(n);
        }
        assert_eq!(log.entries(), &[3, 4, 5]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn relative_order_is_preserved_after_eviction() {
        let mut log = BoundedLog::new(50);
        for n in 0..80 {
            log.push(n);
        }
        let expected: Vec<i32> = (30..80).collect();
        assert_eq!(log.to_vec(), expected);
    }

    #[test]
    fn from_entries_truncates_to_the_last_cap() {
        let restored: Vec<u32> = (0..10).collect();
        let log = BoundedLog::from_entries(4, restored);
        assert_eq!(log.entries(), &[6, 7, 8, 9]);
    }

    #[test]
    fn remove_last_matching_takes_the_newest_match() {
        let mut log = BoundedLog::new(10);
        log.push("a");
        log.push("b");
        log.push("a");
        assert_eq!(log.remove_last_matching(|e| *e == "a"), Some("a"));
        assert_eq!(log.entries(), &["a", "b"]);
        assert_eq!(log.remove_last_matching(|e| *e == "z"), None);
    }

    #[test]
    fn clear_empties_without_touching_cap() {
        let mut log = BoundedLog::new(2);
        log.push(1);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.cap(), 2);
    }
}
