//! Effect catalog
//!
//! Ordered, name-addressed registry of effects. Built once at startup and
//! never changed afterwards. The name index is shared (read-only) with
//! request handles so they can resolve names without touching the effects.

use std::collections::HashMap;
use std::sync::Arc;

use super::traits::Effect;

/// Catalog construction errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Effect '{0}' is already registered")]
    DuplicateName(String),
    #[error("Effect name must not be empty")]
    EmptyName,
}

/// Read-only name index: registration order plus name -> index lookup
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Exact, case-sensitive lookup
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// All names in registration order
    pub fn names(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Registry of playable effects
#[derive(Default)]
pub struct EffectCatalog {
    /// Effect strategies, same order as `index.names`
    effects: Vec<Box<dyn Effect>>,
    /// Shared name index
    index: Arc<CatalogIndex>,
}

impl EffectCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect under `name`
    ///
    /// The effect is reset once so it starts from a valid state.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        mut effect: Box<dyn Effect>,
    ) -> Result<(), CatalogError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.index.lookup.contains_key(&name) {
            return Err(CatalogError::DuplicateName(name));
        }

        // Copy-on-write: an index already handed out keeps its own snapshot.
        let index = Arc::make_mut(&mut self.index);
        index.lookup.insert(name.clone(), self.effects.len());
        index.names.push(name);

        effect.reset();
        self.effects.push(effect);
        Ok(())
    }

    /// Register an effect under its own `Effect::name()`
    pub fn register_effect(&mut self, effect: Box<dyn Effect>) -> Result<(), CatalogError> {
        let name = effect.name().to_string();
        self.register(name, effect)
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.index.lookup(name)
    }

    /// All names in registration order
    pub fn names(&self) -> Vec<String> {
        self.index.names()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.index.name(index)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Effect> {
        self.effects.get(index).map(|e| e.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Effect + 'static)> {
        self.effects.get_mut(index).map(|e| e.as_mut())
    }

    /// Shared handle to the name index
    pub fn index(&self) -> Arc<CatalogIndex> {
        Arc::clone(&self.index)
    }
}
