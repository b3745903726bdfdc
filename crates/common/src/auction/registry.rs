use std::sync::Arc;

use super::provider::BidderAdapter;

/// In-memory registry of bidder adapters discovered from settings.
#[derive(Clone, Default)]
pub struct BidderRegistry {
    adapters: Vec<Arc<dyn BidderAdapter>>,
}

impl BidderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an adapter. Adapters whose code or aliases are already taken are
    /// rejected so lookups stay unambiguous.
    pub fn register(&mut self, adapter: Arc<dyn BidderAdapter>) -> bool {
        let taken = std::iter::once(adapter.code())
            .chain(adapter.aliases().iter().copied())
            .find(|name| self.get(name).is_some());

        if let Some(name) = taken {
            log::warn!(
                "Bidder '{}' not registered: name '{}' already in use",
                adapter.code(),
                name
            );
            return false;
        }

        log::debug!("Registered bidder '{}'", adapter.code());
        self.adapters.push(adapter);
        true
    }

    /// Resolve a bidder by code or alias.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn BidderAdapter>> {
        self.adapters
            .iter()
            .find(|adapter| adapter.code() == name || adapter.aliases().contains(&name))
            .cloned()
    }

    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|adapter| adapter.code()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
