//! Registry of named marker sets with a single active set

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::markers::error::RegistryError;
use crate::markers::json::{marker_set_from_json, marker_set_to_json};
use crate::markers::paths::PathAliaser;
use crate::markers::types::MarkerSet;

/// Holds every marker set of a session plus the name of the active one.
///
/// Set names are unique and sets keep their insertion order. The active name
/// may point at a set that no longer exists; lookups then simply miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerRegistry {
    active_set: String,
    sets: Vec<MarkerSet>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active set, empty when there is none
    pub fn active_set_name(&self) -> &str {
        &self.active_set
    }

    pub fn sets(&self) -> &[MarkerSet] {
        &self.sets
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&MarkerSet> {
        self.sets.iter().find(|set| set.is_named(name))
    }

    pub fn active(&self) -> Option<&MarkerSet> {
        self.find(&self.active_set)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sets.iter().position(|set| set.is_named(name))
    }

    pub fn clear(&mut self) {
        self.active_set.clear();
        self.sets.clear();
    }

    /// Switches the active set if a set with `name` exists; otherwise does nothing.
    pub fn set_active_by_name(&mut self, name: &str) {
        if self.position(name).is_some() {
            self.active_set = name.to_string();
        } else {
            debug!("Ignoring switch to unknown marker set '{}'", name);
        }
    }

    /// Inserts or replaces `set` and makes it active.
    ///
    /// A replaced set keeps its position; a new name is appended.
    pub fn set_active_markers(&mut self, set: MarkerSet) {
        self.active_set = set.name.clone();

        match self.position(&set.name) {
            Some(index) => self.sets[index] = set,
            None => self.sets.push(set),
        }
    }

    /// Removes the active set. The last remaining set, if any, becomes active.
    pub fn clear_active_markers(&mut self) {
        if let Some(index) = self.position(&self.active_set) {
            self.sets.remove(index);
        }
        self.active_set.clear();

        if let Some(last) = self.sets.last() {
            self.active_set = last.name.clone();
        }
    }

    /// Replaces the whole registry with the contents of `doc`.
    ///
    /// Returns an error, leaving the registry untouched, when `active_set` or
    /// `sets` cannot be read. Individual sets that fail to decode are logged
    /// and skipped.
    pub fn read_from_json(
        &mut self,
        doc: &Value,
        aliases: &dyn PathAliaser,
    ) -> Result<(), RegistryError> {
        let object = doc.as_object().ok_or(RegistryError::NotAnObject)?;

        let active_set = object
            .get("active_set")
            .ok_or(RegistryError::MissingField("active_set"))?
            .as_str()
            .ok_or(RegistryError::InvalidField {
                field: "active_set",
                expected: "a string",
            })?;

        let sets_json = object
            .get("sets")
            .ok_or(RegistryError::MissingField("sets"))?
            .as_array()
            .ok_or(RegistryError::InvalidField {
                field: "sets",
                expected: "an array",
            })?;

        let mut sets: Vec<MarkerSet> = Vec::with_capacity(sets_json.len());
        for set_json in sets_json {
            let set = match marker_set_from_json(set_json, aliases) {
                Ok(set) => set,
                Err(e) => {
                    warn!("Skipping marker set: {}", e);
                    continue;
                }
            };

            if sets.iter().any(|existing| existing.is_named(&set.name)) {
                warn!("Skipping duplicate marker set '{}'", set.name);
                continue;
            }
            sets.push(set);
        }

        debug!(
            "Loaded {} marker sets (active: '{}')",
            sets.len(),
            active_set
        );

        self.active_set = active_set.to_string();
        self.sets = sets;

        Ok(())
    }

    /// Full serialization of the registry
    pub fn as_json(&self, aliases: &dyn PathAliaser) -> Value {
        let sets: Vec<Value> = self
            .sets
            .iter()
            .map(|set| marker_set_to_json(set, aliases))
            .collect();

        json!({
            "active_set": self.active_set,
            "sets": sets,
        })
    }

    /// Client view: all set names plus the contents of the active set.
    ///
    /// Both fields are null unless the active name resolves to a set.
    pub fn state_as_json(&self, aliases: &dyn PathAliaser) -> Value {
        let Some(active) = self.active() else {
            return json!({ "names": null, "markers": null });
        };

        let names: Vec<&str> = self.sets.iter().map(|set| set.name.as_str()).collect();

        json!({
            "names": names,
            "markers": marker_set_to_json(active, aliases),
        })
    }
}
