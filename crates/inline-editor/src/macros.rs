//! Macro value lookup behind a trait.
//!
//! Tokenizers that understand `${NAME}` placeholders consult a
//! [`MacroProvider`] to decide whether a placeholder currently resolves to an
//! empty value (which downgrades the surrounding tokens to a suppressed,
//! dimmed rendering). Value-change notifications are delivered by the embedder
//! calling [`EditorSurface::macros_changed`](crate::EditorSurface::macros_changed)
//! on affected fields; a flag computed against a snapshot that has since
//! changed simply survives until the next re-tokenize.

use std::collections::BTreeMap;

/// Provider of macro values for `${NAME}` placeholders.
pub trait MacroProvider {
    /// Whether `name` currently resolves to an empty (or missing) value.
    fn is_empty(&self, name: &str) -> bool;

    /// The current value of `name`, if defined.
    fn value(&self, name: &str) -> Option<String>;
}

/// A fixed in-memory macro table for tests and simple embeddings.
#[derive(Debug, Clone, Default)]
pub struct StaticMacros {
    values: BTreeMap<String, String>,
}

impl StaticMacros {
    /// Create an empty macro table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a macro value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Remove a macro definition.
    pub fn unset(&mut self, name: &str) {
        self.values.remove(name);
    }
}

/// Providers behind interior mutability stay providers; the single-threaded
/// event model makes `RefCell` the natural way to share one table between
/// several fields.
impl<P: MacroProvider> MacroProvider for std::cell::RefCell<P> {
    fn is_empty(&self, name: &str) -> bool {
        self.borrow().is_empty(name)
    }

    fn value(&self, name: &str) -> Option<String> {
        self.borrow().value(name)
    }
}

impl MacroProvider for StaticMacros {
    fn is_empty(&self, name: &str) -> bool {
        self.values.get(name).map_or(true, |value| value.is_empty())
    }

    fn value(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_macros_lookup() {
        let mut macros = StaticMacros::new();
        macros.set("TOKEN", "abc123");
        macros.set("BLANK", "");

        assert!(!macros.is_empty("TOKEN"));
        assert!(macros.is_empty("BLANK"));
        assert!(macros.is_empty("UNDEFINED"));
        assert_eq!(macros.value("TOKEN").as_deref(), Some("abc123"));
        assert_eq!(macros.value("UNDEFINED"), None);
    }
}
