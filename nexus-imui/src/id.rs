//! Scope-aware widget identifiers.
//!
//! An `Id` is an FNV-1a hash of a name seeded with the id at the top of the
//! scope stack, so the same label under different parents (or different loop
//! iterations, when the caller pushes a per-item key) resolves differently,
//! while the same label in the same scope resolves identically every frame.

use crate::error::{StackKind, UiError, contract_violation};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Opaque widget identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u64);

impl Id {
    /// Resolve `name` in the root scope, as a window title at top level would.
    pub fn of(name: &str) -> Self {
        Self::hash_bytes(FNV_OFFSET_BASIS, name.as_bytes())
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    fn hash_bytes(seed: u64, bytes: &[u8]) -> Self {
        let mut hash = seed;
        for byte in bytes {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }
}

/// The identifier scope stack plus the most recently resolved id.
#[derive(Debug, Default)]
pub struct IdStack {
    stack: Vec<Id>,
    last: Option<Id>,
}

impl IdStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `name` under the current scope and remember it as the last id.
    pub fn resolve(&mut self, name: &str) -> Id {
        self.resolve_bytes(name.as_bytes())
    }

    pub fn resolve_bytes(&mut self, bytes: &[u8]) -> Id {
        let seed = self.stack.last().map_or(FNV_OFFSET_BASIS, |id| id.0);
        let id = Id::hash_bytes(seed, bytes);
        self.last = Some(id);
        id
    }

    /// Same as `resolve` but leaves `last` untouched.
    pub fn peek(&self, name: &str) -> Id {
        let seed = self.stack.last().map_or(FNV_OFFSET_BASIS, |id| id.0);
        Id::hash_bytes(seed, name.as_bytes())
    }

    pub fn push(&mut self, id: Id) {
        self.stack.push(id);
    }

    /// Resolve `name` and open a scope for it.
    pub fn push_name(&mut self, name: &str) -> Id {
        let id = self.resolve(name);
        self.stack.push(id);
        id
    }

    /// Open a scope keyed by an integer, typically a loop index.
    pub fn push_index(&mut self, index: u64) -> Id {
        let id = self.resolve_bytes(&index.to_le_bytes());
        self.stack.push(id);
        id
    }

    pub fn pop(&mut self) -> Id {
        match self.stack.pop() {
            Some(id) => id,
            None => contract_violation(UiError::StackUnderflow(StackKind::Id)),
        }
    }

    pub fn last(&self) -> Option<Id> {
        self.last
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn same_name_same_scope_is_stable() {
        let mut ids = IdStack::new();
        ids.push_name("window");
        let a = ids.resolve("OK");
        let b = ids.resolve("OK");
        assert_eq!(a, b);
        assert_eq!(ids.last(), Some(b));
    }

    #[test]
    fn root_scope_matches_id_of() {
        let mut ids = IdStack::new();
        assert_eq!(ids.resolve("Settings"), Id::of("Settings"));
        assert_eq!(ids.peek("Settings"), Id::of("Settings"));
    }

    #[test]
    fn scope_changes_the_id() {
        let mut ids = IdStack::new();
        ids.push_name("left");
        let left = ids.resolve("OK");
        ids.pop();
        ids.push_name("right");
        let right = ids.resolve("OK");
        ids.pop();
        assert_ne!(left, right);
        assert_ne!(left, Id::of("OK"));
    }

    #[test]
    fn index_scopes_disambiguate_loop_bodies() {
        let mut ids = IdStack::new();
        let mut seen = HashSet::new();
        for i in 0..256u64 {
            ids.push_index(i);
            seen.insert(ids.resolve("Delete"));
            ids.pop();
        }
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn sampled_names_do_not_collide() {
        let mut ids = IdStack::new();
        ids.push_name("track list");
        let mut seen = HashSet::new();
        for i in 0..2000 {
            assert!(seen.insert(ids.resolve(&format!("item {i}"))));
        }
    }

    #[test]
    fn peek_does_not_touch_last() {
        let mut ids = IdStack::new();
        let a = ids.resolve("a");
        ids.peek("b");
        assert_eq!(ids.last(), Some(a));
    }

    #[test]
    #[should_panic(expected = "id stack underflow")]
    fn pop_on_empty_stack_is_fatal() {
        IdStack::new().pop();
    }
}
