//! Expand state storage and the per-section capability gate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::model::SectionDataProvider;

/// Per-section expand/collapse flags.
///
/// Entries are created lazily on the first toggle of a section; a section
/// with no entry is collapsed. The store performs no capability validation;
/// callers check [`CapabilityGate::can_expand`] first.
#[derive(Default)]
pub struct ExpandStateStore {
    flags: RwLock<HashMap<usize, bool>>,
}

impl ExpandStateStore {
    /// Creates an empty store; every section reports collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the section is expanded. Defaults to `false` if the
    /// section was never toggled.
    pub fn is_expanded(&self, section: usize) -> bool {
        self.flags.read().get(&section).copied().unwrap_or(false)
    }

    /// Sets the section's expand flag (idempotent upsert).
    pub fn set_expanded(&self, section: usize, expanded: bool) {
        self.flags.write().insert(section, expanded);
    }

    /// The sections currently flagged expanded, in ascending order.
    pub fn expanded_sections(&self) -> Vec<usize> {
        let mut sections: Vec<usize> = self
            .flags
            .read()
            .iter()
            .filter(|&(_, &expanded)| expanded)
            .map(|(&section, _)| section)
            .collect();
        sections.sort_unstable();
        sections
    }

    /// Forgets every flag; all sections report collapsed again.
    pub fn reset(&self) {
        self.flags.write().clear();
    }
}

/// Per-section expand capability decision.
///
/// Delegates to the host provider's optional `can_expand_section` member and
/// falls back to a configurable global default when the provider leaves the
/// decision open or is gone. The provider is consulted fresh on every call:
/// host state may change between calls, so nothing is cached.
pub struct CapabilityGate {
    provider: RwLock<Option<Weak<dyn SectionDataProvider>>>,
    default_expandable: AtomicBool,
}

impl CapabilityGate {
    /// Creates a gate with the given global default.
    pub fn new(default_expandable: bool) -> Self {
        Self {
            provider: RwLock::new(None),
            default_expandable: AtomicBool::new(default_expandable),
        }
    }

    /// Points the gate at a host provider, held weakly.
    pub fn set_provider(&self, provider: Option<&Arc<dyn SectionDataProvider>>) {
        *self.provider.write() = provider.map(Arc::downgrade);
    }

    /// The global default applied when the provider has no per-section answer.
    pub fn default_expandable(&self) -> bool {
        self.default_expandable.load(Ordering::SeqCst)
    }

    /// Sets the global default.
    pub fn set_default_expandable(&self, default_expandable: bool) {
        self.default_expandable
            .store(default_expandable, Ordering::SeqCst);
    }

    /// Decides whether the section may expand at all.
    pub fn can_expand(&self, section: usize) -> bool {
        let provider = self.provider.read().as_ref().and_then(Weak::upgrade);
        provider
            .and_then(|p| p.can_expand_section(section))
            .unwrap_or_else(|| self.default_expandable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RowIndex, SectionCell};
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_store_defaults_to_collapsed() {
        let store = ExpandStateStore::new();
        assert!(!store.is_expanded(0));
        assert!(!store.is_expanded(42));
        assert!(store.expanded_sections().is_empty());
    }

    #[test]
    fn test_store_upsert_and_reset() {
        let store = ExpandStateStore::new();
        store.set_expanded(2, true);
        store.set_expanded(0, true);
        store.set_expanded(1, false);
        store.set_expanded(2, true); // idempotent

        assert!(store.is_expanded(2));
        assert!(!store.is_expanded(1));
        assert_eq!(store.expanded_sections(), vec![0, 2]);

        store.reset();
        assert!(!store.is_expanded(2));
        assert!(store.expanded_sections().is_empty());
    }

    /// Provider whose capability answer can be changed between calls.
    struct FlippingProvider {
        answer: AtomicBool,
        implemented: bool,
    }

    impl SectionDataProvider for FlippingProvider {
        fn row_count(&self, _section: usize) -> usize {
            0
        }
        fn cell_for(&self, _index: RowIndex) -> Option<Arc<dyn SectionCell>> {
            None
        }
        fn can_expand_section(&self, _section: usize) -> Option<bool> {
            self.implemented
                .then(|| self.answer.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn test_gate_uses_default_without_provider() {
        let gate = CapabilityGate::new(true);
        assert!(gate.can_expand(0));

        gate.set_default_expandable(false);
        assert!(!gate.can_expand(0));
    }

    #[test]
    fn test_gate_uses_default_when_provider_declines() {
        let provider: Arc<dyn SectionDataProvider> = Arc::new(FlippingProvider {
            answer: AtomicBool::new(false),
            implemented: false,
        });
        let gate = CapabilityGate::new(true);
        gate.set_provider(Some(&provider));

        // Capability member "not implemented" falls back to the default.
        assert!(gate.can_expand(3));
    }

    #[test]
    fn test_gate_provider_overrides_default() {
        let provider = Arc::new(FlippingProvider {
            answer: AtomicBool::new(false),
            implemented: true,
        });
        let as_provider: Arc<dyn SectionDataProvider> = provider.clone();
        let gate = CapabilityGate::new(true);
        gate.set_provider(Some(&as_provider));

        assert!(!gate.can_expand(0));

        // Evaluated fresh on every call: a changed host answer is seen
        // immediately.
        provider.answer.store(true, Ordering::SeqCst);
        assert!(gate.can_expand(0));
    }

    #[test]
    fn test_gate_dead_provider_falls_back_to_default() {
        let gate = CapabilityGate::new(false);
        {
            let provider: Arc<dyn SectionDataProvider> = Arc::new(FlippingProvider {
                answer: AtomicBool::new(true),
                implemented: true,
            });
            gate.set_provider(Some(&provider));
            assert!(gate.can_expand(0));
        }
        // Host released its provider; the gate silently degrades.
        assert!(!gate.can_expand(0));
    }
}
