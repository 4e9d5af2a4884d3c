//! Session-scoped owner of the marker registry

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::markers::{MarkerRegistry, MarkerSet, PathAliaser};
use crate::session::notifier::{AutoSelect, ClientEvent, Notifier};
use crate::session::store::MarkerStore;

/// Ties the registry to one session: loaded at start, saved at clean
/// shutdown, and announced to the client after every external change.
pub struct MarkersModule<N: Notifier> {
    registry: MarkerRegistry,
    notifier: N,
    store: MarkerStore,
    aliases: Box<dyn PathAliaser>,
}

impl<N: Notifier> MarkersModule<N> {
    /// Creates a module with an empty registry
    pub fn new(notifier: N, store: MarkerStore, aliases: Box<dyn PathAliaser>) -> Self {
        Self {
            registry: MarkerRegistry::new(),
            notifier,
            store,
            aliases,
        }
    }

    /// Creates a module and restores whatever the previous session persisted
    pub fn start(notifier: N, store: MarkerStore, aliases: Box<dyn PathAliaser>) -> Self {
        let mut module = Self::new(notifier, store, aliases);
        module.load();
        module
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut MarkerRegistry {
        &mut self.registry
    }

    pub fn aliases(&self) -> &dyn PathAliaser {
        self.aliases.as_ref()
    }

    /// Replaces the registry with the persisted state, if any.
    ///
    /// Never fails: unreadable or malformed state leaves the registry as it was.
    pub fn load(&mut self) {
        let doc = match self.store.load() {
            Ok(Some(doc)) => doc,
            Ok(None) => return,
            Err(e) => {
                warn!("Ignoring persisted markers: {}", e);
                return;
            }
        };

        if let Err(e) = self.registry.read_from_json(&doc, self.aliases.as_ref()) {
            error!("Failed to restore markers from {:?}: {}", self.store.path(), e);
            return;
        }

        info!(
            "Restored {} marker sets from {:?}",
            self.registry.sets().len(),
            self.store.path()
        );
    }

    /// Persists the registry when the session ended normally.
    pub fn shutdown(self, terminated_normally: bool) {
        if !terminated_normally {
            debug!("Session terminated abnormally, not persisting markers");
            return;
        }

        let doc = self.registry.as_json(self.aliases.as_ref());
        if let Err(e) = self.store.save(&doc) {
            error!("{}", e);
        }
    }

    pub fn state_as_json(&self) -> Value {
        self.registry.state_as_json(self.aliases.as_ref())
    }

    /// Entry point for producers of diagnostics: upserts `set`, makes it
    /// active, and notifies the client.
    pub fn show_markers(&mut self, set: MarkerSet, auto_select: AutoSelect) {
        debug!(
            "Showing {} markers for set '{}'",
            set.markers.len(),
            set.name
        );
        self.registry.set_active_markers(set);
        self.fire_markers_changed(auto_select);
    }

    pub(crate) fn fire_markers_changed(&self, auto_select: AutoSelect) {
        let event = ClientEvent::markers_changed(self.state_as_json(), auto_select);
        self.notifier.notify(event);
    }
}
