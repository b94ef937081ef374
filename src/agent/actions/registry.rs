use super::base::Action;
use super::catalog::CapabilityCatalog;
use crate::errors::OxiagentError;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Optional restrictions applied when building a registry from a catalog.
#[derive(Debug, Clone, Default)]
pub struct RegistryFilter {
    /// Only capabilities with these names are admitted.
    pub names: Option<Vec<String>>,
    /// Only capabilities carrying at least one of these tags are admitted.
    pub tags: Option<Vec<String>>,
}

/// Mapping from name to [`Action`], iteration order = insertion order.
///
/// Built once per run and read-only while the loop executes.
#[derive(Default)]
pub struct ActionRegistry {
    actions: IndexMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by name. An overwritten entry keeps its original
    /// position, so the order tool declarations are presented to the model
    /// is stable across re-registration.
    pub fn register(&mut self, action: Action) {
        let name = action.name().to_string();
        if self.actions.contains_key(&name) {
            warn!("action registry: overwriting duplicate action '{}'", name);
        }
        self.actions.insert(name, action);
    }

    pub fn get_action(&self, name: &str) -> Option<Action> {
        self.actions.get(name).cloned()
    }

    /// All registered actions in registry order.
    pub fn get_actions(&self) -> Vec<Action> {
        self.actions.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Build a registry from a catalog, admitting capabilities that pass the
    /// filter. The designated terminal capability is always left out here;
    /// it must be added back with [`register_terminal`](Self::register_terminal)
    /// so the loop's guaranteed termination path is an explicit setup step.
    pub fn from_catalog(catalog: &CapabilityCatalog, filter: &RegistryFilter) -> Self {
        // Resolve the tag filter through the catalog's tag index once.
        let tag_matched: Option<HashSet<&str>> = filter.tags.as_ref().map(|tags| {
            tags.iter()
                .flat_map(|tag| catalog.names_for_tag(tag))
                .map(String::as_str)
                .collect()
        });

        let mut registry = Self::new();
        for (name, capability) in catalog.iter() {
            if capability.terminal() {
                continue;
            }
            if let Some(names) = &filter.names
                && !names.iter().any(|n| n == name)
            {
                debug!("registry filter excluded capability '{}' by name", name);
                continue;
            }
            if let Some(matched) = &tag_matched
                && !matched.contains(name)
            {
                debug!("registry filter excluded capability '{}' by tag", name);
                continue;
            }
            registry.register(Action::new(capability.clone()));
        }
        registry
    }

    /// Register the catalog's designated terminal capability. Fails if the
    /// catalog has none — a run must not start without its only guaranteed
    /// termination path.
    pub fn register_terminal(
        &mut self,
        catalog: &CapabilityCatalog,
    ) -> Result<(), OxiagentError> {
        let capability = catalog.terminal().ok_or_else(|| {
            OxiagentError::Setup("no terminal capability registered in catalog".to_string())
        })?;
        self.register(Action::new(capability));
        Ok(())
    }
}
