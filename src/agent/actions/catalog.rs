use super::base::Capability;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Source of truth for all known capabilities, independent of any single
/// run.
///
/// Constructed explicitly at startup and passed by reference to whatever
/// builds a registry from it — no component reads ambient global state.
/// Must be fully populated before the first registry reads it; read-only
/// thereafter.
#[derive(Default)]
pub struct CapabilityCatalog {
    capabilities: IndexMap<String, Arc<dyn Capability>>,
    by_tag: HashMap<String, Vec<String>>,
}

impl CapabilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability. Re-registering a name replaces the entry in
    /// place; the original catalog position is kept.
    pub fn register(&mut self, capability: Arc<dyn Capability>) {
        let name = capability.name().to_string();
        if self.capabilities.contains_key(&name) {
            warn!("capability catalog: overwriting duplicate capability '{}'", name);
        }
        for tag in capability.tags() {
            let names = self.by_tag.entry(tag).or_default();
            if !names.contains(&name) {
                names.push(name.clone());
            }
        }
        self.capabilities.insert(name, capability);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.capabilities.get(name).cloned()
    }

    /// Iterate capabilities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Capability>)> {
        self.capabilities.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names of capabilities carrying the given tag, in registration order.
    pub fn names_for_tag(&self, tag: &str) -> &[String] {
        self.by_tag.get(tag).map_or(&[], Vec::as_slice)
    }

    /// The designated terminal capability, if one is registered. The first
    /// terminal-flagged entry wins when several exist.
    pub fn terminal(&self) -> Option<Arc<dyn Capability>> {
        self.capabilities
            .values()
            .find(|capability| capability.terminal())
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
