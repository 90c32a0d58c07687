//! Name registry for looking objects up by their unique name.

use crate::error::{UiError, UiResult};
use crate::object::ObjectId;
use anchorage_core::alloc::HashMap;

/// Bidirectional mapping between object names and handles.
///
/// Names are unique among live objects. Anchors that target a name are
/// resolved through this registry at bind time.
#[derive(Debug, Default)]
pub struct NameRegistry {
    name_to_id: HashMap<String, ObjectId>,
    id_to_name: HashMap<ObjectId, String>,
}

impl NameRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `id`. Fails if another object already uses it.
    pub fn register(&mut self, name: &str, id: ObjectId) -> UiResult<()> {
        match self.name_to_id.get(name) {
            Some(existing) if *existing != id => Err(UiError::DuplicateName(name.to_string())),
            _ => {
                self.name_to_id.insert(name.to_string(), id);
                self.id_to_name.insert(id, name.to_string());
                Ok(())
            }
        }
    }

    /// Get the object carrying `name`.
    pub fn get(&self, name: &str) -> Option<ObjectId> {
        self.name_to_id.get(name).copied()
    }

    /// Get the name of an object.
    pub fn name_of(&self, id: ObjectId) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Remove the mapping for an object, returning its name.
    pub fn unregister(&mut self, id: ObjectId) -> Option<String> {
        let name = self.id_to_name.remove(&id)?;
        self.name_to_id.remove(&name);
        Some(name)
    }

    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ObjectId)> + '_ {
        self.name_to_id.iter().map(|(name, &id)| (name.as_str(), id))
    }
}
