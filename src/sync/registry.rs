use indexmap::IndexMap;

/// Identity of one rendered control. Never reused within a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u64);

/// What was last written to an activity's control.
///
/// A fresh entry caches nothing, so the first reconciliation pass always
/// writes both label and active state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub control: ControlId,
    pub label: Option<String>,
    pub active: Option<bool>,
}

impl Entry {
    pub fn new(control: ControlId) -> Self {
        Self {
            control,
            label: None,
            active: None,
        }
    }
}

/// Activity name to live control, in insertion order.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, Entry>,
    next_control: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a control id that has not been used by this registry.
    pub fn allocate_control(&mut self) -> ControlId {
        let id = ControlId(self.next_control);
        self.next_control += 1;
        id
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: Entry) -> Option<Entry> {
        self.entries.insert(name.into(), entry)
    }

    /// Removes an entry while keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        self.entries.shift_remove(name)
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_ids_are_never_reused() {
        let mut registry = Registry::new();
        let first = registry.allocate_control();
        registry.insert("Reading", Entry::new(first));
        registry.remove("Reading");
        let second = registry.allocate_control();
        assert_ne!(first, second);
    }

    #[test]
    fn removal_keeps_insertion_order() {
        let mut registry = Registry::new();
        for name in ["a", "b", "c", "d"] {
            let id = registry.allocate_control();
            registry.insert(name, Entry::new(id));
        }
        registry.remove("b");
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["a", "c", "d"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn fresh_entry_caches_nothing() {
        let mut registry = Registry::new();
        let id = registry.allocate_control();
        registry.insert("Reading", Entry::new(id));
        let entry = registry.get("Reading").unwrap();
        assert_eq!(entry.label, None);
        assert_eq!(entry.active, None);
        assert!(registry.get("Coding").is_none());
    }
}
