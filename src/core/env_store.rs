// src/core/env_store.rs
//
// The process environment behind a small key-value interface, so the loader
// and the FSM can run against an in-memory store in tests instead of
// mutating real process state.

use std::collections::HashMap;

/// A mutable string key-value store with env-style semantics: setting an
/// existing key overwrites it.
pub trait EnvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);

    /// Splits a variable's value into a trimmed list.
    ///
    /// - Unset key or empty value: `None`.
    /// - Empty delimiter set: a singleton list holding the trimmed value
    ///   (`None` if it trims to nothing).
    /// - Otherwise the value is split on every occurrence of *any* character
    ///   in `delimiters` (character-class semantics, not substring match),
    ///   each token is trimmed, and empty tokens are dropped. If every token
    ///   trims away the result is `None`, never an empty `Some`.
    fn get_list(&self, key: &str, delimiters: &str) -> Option<Vec<String>> {
        let raw = self.get(key)?;
        if raw.is_empty() {
            return None;
        }

        if delimiters.is_empty() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            return Some(vec![trimmed.to_string()]);
        }

        let items: Vec<String> = raw
            .split(|c: char| delimiters.contains(c))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();

        if items.is_empty() { None } else { Some(items) }
    }
}

/// The real process environment.
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: the program is single-threaded and fully synchronous; no
        // other thread can be reading the environment concurrently.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

/// A HashMap-backed store for tests and batch invocations.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding, handy in tests.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}
