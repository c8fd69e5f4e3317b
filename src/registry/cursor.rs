use crate::registry::record::CrawlRecord;
use crate::registry::store::Registry;

/// A position in the registry's insertion-ordered key sequence
///
/// The cursor owns the index; the registry owns the records. Because records
/// are never removed, an index that was valid stays valid as the registry
/// grows, and stepping wraps circularly at both ends. On an empty registry
/// every operation is a no-op and `current` is `None`.
#[derive(Debug, Default)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active record, if any
    pub fn current<'a>(&self, registry: &'a Registry) -> Option<&'a CrawlRecord> {
        registry.key_at(self.index).and_then(|key| registry.get(key))
    }

    /// Returns the active record mutably, if any
    pub fn current_mut<'a>(&self, registry: &'a mut Registry) -> Option<&'a mut CrawlRecord> {
        let key = registry.key_at(self.index)?.to_string();
        registry.get_mut(&key)
    }

    /// Returns the active canonical key, if any
    pub fn current_key<'a>(&self, registry: &'a Registry) -> Option<&'a str> {
        registry.key_at(self.index)
    }

    /// Steps forward in insertion order, wrapping to the first key after the
    /// last
    pub fn advance(&mut self, registry: &Registry) {
        if registry.is_empty() {
            return;
        }
        self.index = (self.index + 1) % registry.len();
    }

    /// Steps backward in insertion order, wrapping to the last key before
    /// the first
    pub fn retreat(&mut self, registry: &Registry) {
        if registry.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            registry.len() - 1
        } else {
            self.index - 1
        };
    }

    /// Jumps directly to a key, reporting whether it was found
    ///
    /// On a miss the cursor keeps its previous position.
    pub fn jump_to(&mut self, registry: &Registry, key: &str) -> bool {
        match registry.index_of(key) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}
