//! Expandable sections controller.
//!
//! This module provides [`ExpandableList`], a controller that adds
//! expand/collapse behavior to a sectioned list view without changing how the
//! host implements its data provider. The controller substitutes itself as
//! the effective [`SectionDataProvider`] and [`SectionInteractionObserver`]
//! seen by the underlying view, answers the queries that depend on expand
//! state, and forwards everything else, unmodified, to the original host
//! objects, which it holds weakly.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use concertina::UiTaskQueue;
//! use concertina::widget::{ExpandableList, RowAnimation};
//!
//! let tasks = Arc::new(UiTaskQueue::new());
//! let widget = ExpandableList::new(tasks)
//!     .with_expand_animation(RowAnimation::SlideVertical);
//!
//! widget.set_data_provider(Some(&provider));
//! widget.set_interaction_observer(Some(&observer));
//! widget.set_view_host(Some(&view));
//!
//! // Install the widget as the view's provider/observer.
//! let effective = Arc::new(widget);
//! view.set_data_provider(effective.clone());
//! view.set_interaction_observer(effective.clone());
//!
//! // React to completed transitions.
//! effective.signals().expanded.connect(|&section| {
//!     println!("section {section} expanded");
//! });
//! ```

use std::sync::{Arc, Weak};

use concertina_core::{Signal, UiTaskQueue};
use parking_lot::RwLock;

use crate::model::{
    ExpandPhase, ExpandTransition, RowIndex, SectionCell, SectionDataProvider,
    SectionInteractionObserver,
};

use super::animation::RowAnimation;
use super::expand_state::{CapabilityGate, ExpandStateStore};
use super::host::{BatchCompletion, RowBatch, RowEdit, SectionViewHost};

/// Signals emitted by [`ExpandableList`] when transitions complete.
///
/// Both fire at the `Did*` phase, after the animated batch update has
/// finished. The argument is the section index.
pub struct ExpansionSignals {
    /// Emitted when a section finished expanding.
    pub expanded: Signal<usize>,
    /// Emitted when a section finished collapsing.
    pub collapsed: Signal<usize>,
}

impl Default for ExpansionSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpansionSignals {
    /// Creates a new set of expansion signals.
    pub fn new() -> Self {
        Self {
            expanded: Signal::new(),
            collapsed: Signal::new(),
        }
    }
}

/// A controller that adds expand/collapse sections to a list view.
///
/// Each expandable section's first row acts as a header that toggles the
/// visibility of the remaining rows. The controller:
///
/// - keeps per-section expand flags (collapsed by default)
/// - decides per-section expandability through the host's optional
///   capability member, with a configurable global default
/// - drives the host view's animated insert/delete batches on toggle
/// - delivers will/did lifecycle phases to the visible header cell and the
///   host observer
/// - forwards every non-intercepted provider/observer call to the weakly
///   held host objects
///
/// All host references are non-owning; a released host object silently turns
/// the corresponding calls into no-ops.
///
/// # Signals
///
/// - `expanded(usize)`: a section finished expanding
/// - `collapsed(usize)`: a section finished collapsing
pub struct ExpandableList {
    /// Per-section expand flags, shared with deferred reuse corrections.
    state: Arc<ExpandStateStore>,

    /// Per-section expandability decision.
    gate: CapabilityGate,

    /// The host's original data provider.
    provider: RwLock<Option<Weak<dyn SectionDataProvider>>>,

    /// The host's original interaction observer.
    observer: RwLock<Option<Weak<dyn SectionInteractionObserver>>>,

    /// The view the widget is installed into.
    view: RwLock<Option<Weak<dyn SectionViewHost>>>,

    /// Next-tick deferral queue of the host's UI loop.
    tasks: Arc<UiTaskQueue>,

    /// Animation for inserted body rows.
    expand_animation: RwLock<RowAnimation>,

    /// Animation for deleted body rows.
    collapse_animation: RwLock<RowAnimation>,

    /// Transition-completion signals.
    signals: Arc<ExpansionSignals>,
}

impl ExpandableList {
    /// Creates a detached controller.
    ///
    /// Sections default to expandable, both animations default to
    /// [`RowAnimation::Fade`]. Attach host objects with
    /// [`set_data_provider`](Self::set_data_provider),
    /// [`set_interaction_observer`](Self::set_interaction_observer) and
    /// [`set_view_host`](Self::set_view_host).
    pub fn new(tasks: Arc<UiTaskQueue>) -> Self {
        Self {
            state: Arc::new(ExpandStateStore::new()),
            gate: CapabilityGate::new(true),
            provider: RwLock::new(None),
            observer: RwLock::new(None),
            view: RwLock::new(None),
            tasks,
            expand_animation: RwLock::new(RowAnimation::default()),
            collapse_animation: RwLock::new(RowAnimation::default()),
            signals: Arc::new(ExpansionSignals::new()),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Sets the global default expandability using builder pattern.
    pub fn with_default_expandable(self, default_expandable: bool) -> Self {
        self.gate.set_default_expandable(default_expandable);
        self
    }

    /// Sets the expand animation using builder pattern.
    pub fn with_expand_animation(self, animation: RowAnimation) -> Self {
        self.set_expand_animation(animation);
        self
    }

    /// Sets the collapse animation using builder pattern.
    pub fn with_collapse_animation(self, animation: RowAnimation) -> Self {
        self.set_collapse_animation(animation);
        self
    }

    /// The global default applied when the provider has no per-section
    /// capability answer.
    pub fn default_expandable(&self) -> bool {
        self.gate.default_expandable()
    }

    /// Sets the global default expandability.
    pub fn set_default_expandable(&self, default_expandable: bool) {
        self.gate.set_default_expandable(default_expandable);
    }

    /// The animation applied to inserted body rows.
    pub fn expand_animation(&self) -> RowAnimation {
        *self.expand_animation.read()
    }

    /// Sets the animation applied to inserted body rows.
    pub fn set_expand_animation(&self, animation: RowAnimation) {
        *self.expand_animation.write() = animation;
    }

    /// The animation applied to deleted body rows.
    pub fn collapse_animation(&self) -> RowAnimation {
        *self.collapse_animation.read()
    }

    /// Sets the animation applied to deleted body rows.
    pub fn set_collapse_animation(&self, animation: RowAnimation) {
        *self.collapse_animation.write() = animation;
    }

    /// The signals emitted when transitions complete.
    pub fn signals(&self) -> &ExpansionSignals {
        &self.signals
    }

    // =========================================================================
    // Host Attachment
    // =========================================================================

    /// Points the widget at the host's data provider, held weakly.
    ///
    /// Replacing the provider resets all expand state: section indices from
    /// a previous provider must not leak into the new one.
    pub fn set_data_provider(&self, provider: Option<&Arc<dyn SectionDataProvider>>) {
        *self.provider.write() = provider.map(Arc::downgrade);
        self.gate.set_provider(provider);
        self.state.reset();
    }

    /// Points the widget at the host's interaction observer, held weakly.
    pub fn set_interaction_observer(&self, observer: Option<&Arc<dyn SectionInteractionObserver>>) {
        *self.observer.write() = observer.map(Arc::downgrade);
    }

    /// Points the widget at the view it is installed into, held weakly.
    pub fn set_view_host(&self, view: Option<&Arc<dyn SectionViewHost>>) {
        *self.view.write() = view.map(Arc::downgrade);
    }

    fn host_provider(&self) -> Option<Arc<dyn SectionDataProvider>> {
        self.provider.read().as_ref().and_then(Weak::upgrade)
    }

    fn host_observer(&self) -> Option<Arc<dyn SectionInteractionObserver>> {
        self.observer.read().as_ref().and_then(Weak::upgrade)
    }

    fn view_host(&self) -> Option<Arc<dyn SectionViewHost>> {
        self.view.read().as_ref().and_then(Weak::upgrade)
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Returns whether the section is currently expanded.
    pub fn is_expanded(&self, section: usize) -> bool {
        self.state.is_expanded(section)
    }

    /// Returns whether the section may expand at all.
    pub fn can_expand(&self, section: usize) -> bool {
        self.gate.can_expand(section)
    }

    /// Expands the section's body rows.
    ///
    /// A no-op if the section cannot expand or is already expanded.
    pub fn expand(&self, section: usize) {
        self.transition(section, ExpandTransition::Expand);
    }

    /// Collapses the section's body rows.
    ///
    /// A no-op if the section cannot expand or is already collapsed.
    pub fn collapse(&self, section: usize) {
        self.transition(section, ExpandTransition::Collapse);
    }

    /// Collapses the section if expanded, otherwise expands it.
    pub fn toggle(&self, section: usize) {
        if self.is_expanded(section) {
            self.collapse(section);
        } else {
            self.expand(section);
        }
    }

    /// Expands every expandable section of the attached provider.
    pub fn expand_all(&self) {
        let Some(provider) = self.host_provider() else {
            return;
        };
        for section in 0..provider.section_count() {
            self.expand(section);
        }
    }

    /// Collapses every currently expanded section.
    pub fn collapse_all(&self) {
        for section in self.state.expanded_sections() {
            self.collapse(section);
        }
    }

    /// Runs one expand/collapse transition.
    fn transition(&self, section: usize, transition: ExpandTransition) {
        if !self.gate.can_expand(section) {
            tracing::trace!(
                target: "concertina::widget::expandable",
                section,
                "section cannot expand, ignoring transition"
            );
            return;
        }

        let target = transition.is_expand();
        if self.state.is_expanded(section) == target {
            // Already in the requested state.
            return;
        }

        // The store reflects the new state before the view is touched, so
        // row-count queries during the animation see the post-toggle truth.
        self.state.set_expanded(section, target);

        let view = self.view_host();
        let observer = self.host_observer();
        deliver_phase(
            view.as_ref(),
            observer.as_ref(),
            &self.signals,
            section,
            transition.will_phase(),
        );

        let Some(view) = view else {
            // No attached view: nothing to animate, complete in place.
            deliver_phase(None, observer.as_ref(), &self.signals, section, transition.did_phase());
            return;
        };

        view.set_header_interactive(section, false);

        let full_count = self
            .host_provider()
            .map_or(0, |provider| provider.row_count(section));
        if full_count <= 1 {
            // Only the header (or nothing) to show: no rows to animate.
            deliver_phase(
                Some(&view),
                observer.as_ref(),
                &self.signals,
                section,
                transition.did_phase(),
            );
            view.set_header_interactive(section, true);
            return;
        }

        let (edit, animation) = match transition {
            ExpandTransition::Expand => (RowEdit::Insert, self.expand_animation()),
            ExpandTransition::Collapse => (RowEdit::Delete, self.collapse_animation()),
        };
        let batch = RowBatch {
            section,
            edit,
            rows: 1..full_count,
            animation,
        };

        let completion = {
            let view = Arc::downgrade(&view);
            let observer = self.observer.read().clone();
            let signals = Arc::clone(&self.signals);
            let did_phase = transition.did_phase();
            BatchCompletion::new(move || {
                let view = view.upgrade();
                let observer = observer.as_ref().and_then(Weak::upgrade);
                deliver_phase(view.as_ref(), observer.as_ref(), &signals, section, did_phase);
                if let Some(view) = view {
                    view.set_header_interactive(section, true);
                }
            })
        };

        view.apply_row_batch(batch, completion);
    }
}

/// Delivers one transition phase to the section's visible header cell, then
/// the host observer, then the completion signals.
fn deliver_phase(
    view: Option<&Arc<dyn SectionViewHost>>,
    observer: Option<&Arc<dyn SectionInteractionObserver>>,
    signals: &ExpansionSignals,
    section: usize,
    phase: ExpandPhase,
) {
    if let Some(view) = view
        && let Some(cell) = view.visible_header(section)
        && let Some(lifecycle) = cell.expand_lifecycle()
    {
        lifecycle.on_expand_phase(phase, false);
    }

    if let Some(observer) = observer {
        observer.on_expand_state_changed(section, phase);
    }

    match phase {
        ExpandPhase::DidExpand => signals.expanded.emit(section),
        ExpandPhase::DidCollapse => signals.collapsed.emit(section),
        _ => {}
    }
}

// =============================================================================
// Effective provider: query interception + forwarding
// =============================================================================

impl SectionDataProvider for ExpandableList {
    fn section_count(&self) -> usize {
        self.host_provider().map_or(0, |p| p.section_count())
    }

    fn row_count(&self, section: usize) -> usize {
        let Some(provider) = self.host_provider() else {
            return 0;
        };
        let full_count = provider.row_count(section);
        if !self.gate.can_expand(section) || full_count == 0 {
            return full_count;
        }
        if self.state.is_expanded(section) {
            full_count
        } else {
            // Only the header row is visible while collapsed.
            1
        }
    }

    fn cell_for(&self, index: RowIndex) -> Option<Arc<dyn SectionCell>> {
        let provider = self.host_provider()?;
        if !index.is_header() || !self.gate.can_expand(index.section()) {
            return provider.cell_for(index);
        }

        let cell = provider.expandable_header_cell(index.section())?;
        if cell.is_recycled() && cell.expand_lifecycle().is_some() {
            // The cell may still show the expand affordance of its previous
            // binding. Replay the current steady-state phases on the next
            // tick, once the in-flight bind/layout pass has finished.
            let state = Arc::clone(&self.state);
            let recycled = Arc::clone(&cell);
            let section = index.section();
            self.tasks.post(move || {
                if let Some(lifecycle) = recycled.expand_lifecycle() {
                    let (will, did) = ExpandPhase::steady_pair(state.is_expanded(section));
                    lifecycle.on_expand_phase(will, true);
                    lifecycle.on_expand_phase(did, true);
                }
            });
        }
        Some(cell)
    }

    fn can_expand_section(&self, section: usize) -> Option<bool> {
        self.host_provider()
            .and_then(|p| p.can_expand_section(section))
    }

    fn expandable_header_cell(&self, section: usize) -> Option<Arc<dyn SectionCell>> {
        self.host_provider()
            .and_then(|p| p.expandable_header_cell(section))
    }
}

// =============================================================================
// Effective observer: selection interception + forwarding
// =============================================================================

impl SectionInteractionObserver for ExpandableList {
    fn on_row_selected(&self, index: RowIndex) {
        // The host's own tap handling always runs first.
        if let Some(observer) = self.host_observer() {
            observer.on_row_selected(index);
        }

        if index.is_header() && self.gate.can_expand(index.section()) {
            self.toggle(index.section());
        }
    }

    fn on_expand_state_changed(&self, section: usize, phase: ExpandPhase) {
        if let Some(observer) = self.host_observer() {
            observer.on_expand_state_changed(section, phase);
        }
    }
}

static_assertions::assert_impl_all!(ExpandableList: Send, Sync);
