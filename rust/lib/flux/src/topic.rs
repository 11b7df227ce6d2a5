use std::sync::RwLock;

/// One parsed level of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Level {
    Exact(String),
    /// `+`: exactly one level.
    One,
    /// `#`: everything that remains, including nothing.
    Rest,
}

/// A `/`-separated path pattern with MQTT-style wildcards.
///
/// `#` is only meaningful as the last level; anything after it is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    levels: Vec<Level>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        let mut levels = Vec::new();
        for part in raw.split('/') {
            match part {
                "+" => levels.push(Level::One),
                "#" => {
                    levels.push(Level::Rest);
                    break;
                }
                exact => levels.push(Level::Exact(exact.to_string())),
            }
        }
        Self {
            raw: raw.to_string(),
            levels,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether a concrete path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = path.split('/');
        for level in &self.levels {
            match level {
                Level::Rest => return true,
                Level::One => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Level::Exact(expected) => {
                    if parts.next() != Some(expected.as_str()) {
                        return false;
                    }
                }
            }
        }
        parts.next().is_none()
    }
}

/// Thread-safe registry of pattern → value entries.
///
/// Matching returns values in registration order, which is also the
/// order handlers and subscribers are invoked in.
pub struct Subscriptions<T> {
    entries: RwLock<Vec<(Pattern, T)>>,
}

impl<T: Clone> Subscriptions<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(&self, pattern: &str, value: T) {
        let mut entries = self.entries.write().unwrap();
        entries.push((Pattern::parse(pattern), value));
    }

    /// All values whose pattern matches `path`.
    pub fn matching(&self, path: &str) -> Vec<T> {
        let entries = self.entries.read().unwrap();
        entries
            .iter()
            .filter(|(pattern, _)| pattern.matches(path))
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Remove values registered under exactly `pattern` for which
    /// `predicate` holds. Returns `true` if anything was removed.
    pub fn remove<F>(&self, pattern: &str, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|(p, value)| !(p.as_str() == pattern && predicate(value)));
        entries.len() < before
    }

    /// Whether any value is registered under exactly `pattern`.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        let entries = self.entries.read().unwrap();
        entries.iter().any(|(p, _)| p.as_str() == pattern)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for Subscriptions<T> {
    fn default() -> Self {
        Self::new()
    }
}
