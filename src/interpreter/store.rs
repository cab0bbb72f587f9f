use crate::interpreter::value::core::Value;

/// Variables every fresh interpreter starts with.
///
/// The word operators hold operator symbols, so `a and b` resolves to
/// `a && b` before reduction.
const DEFAULTS: &[(&str, &str)] = &[("and", "&&"),
                                    ("false", "0"),
                                    ("is", "=="),
                                    ("not", "!"),
                                    ("or", "||"),
                                    ("true", "1"),
                                    ("xor", "^")];

/// An ordered collection of named values.
///
/// Entries are kept sorted by name so every lookup is a binary search. Names
/// are unique; inserting an existing name replaces its value.
///
/// # Example
/// ```
/// use cll::interpreter::{store::Store, value::core::Value};
///
/// let mut store = Store::default();
/// store.insert(Value::named("b", "2"));
/// store.insert(Value::named("a", "1"));
/// store.insert(Value::named("b", "3"));
///
/// assert_eq!(store.names(), ["a", "b"]);
/// assert_eq!(store.get("b").map(Value::text), Some("3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    entries: Vec<Value>,
}

impl Store {
    /// A store holding the default variables.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut store = Self::default();
        for (name, text) in DEFAULTS {
            store.insert(Value::named(name, text));
        }
        store
    }

    fn search(&self, name: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|entry| entry.name().cmp(name))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.search(name).ok().map(|i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.search(name).is_ok()
    }

    /// Inserts `value` under its own name, replacing any previous entry.
    ///
    /// Anonymous values are ignored.
    pub fn insert(&mut self, value: Value) {
        if value.name().is_empty() {
            return;
        }
        match self.search(value.name()) {
            Ok(i) => self.entries[i] = value,
            Err(i) => self.entries.insert(i, value),
        }
    }

    /// Removes and returns the entry called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.search(name).ok().map(|i| self.entries.remove(i))
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Value) -> bool) {
        self.entries.retain(keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(Value::name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Value> for Store {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut store = Self::default();
        for value in iter {
            store.insert(value);
        }
        store
    }
}
