//! Application state and transitions.
//!
//! AppState is the root state type: the conversation, the layout engine and
//! everything the shell needs to animate between depth positions.

use crate::model::{ItemKey, Section};
use crate::source::demo::demo_message;
use crate::source::{ChatMessage, Conversation, StackChange};
use crate::view_state::layout::LayoutPass;
use crate::view_state::reconciler::{ExitingItem, LayoutChange, UpdateReconciler};
use crate::view_state::transform::{exit_transform, VisualTransform};
use crate::view_state::{
    DepthPosition, DepthStackLayout, ItemSet, LayoutParams, ScrollPosition, UiMode,
    ViewportDimensions,
};
use tracing::debug;

/// Fraction of the remaining distance covered per animation tick.
const EASING: f64 = 0.35;

/// Distance below which the depth snaps onto its target.
const SETTLE_DISTANCE: f64 = 0.5;

/// Exit animation progress added per tick.
const EXIT_STEP: f64 = 0.25;

/// A removed item still being animated out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitAnimation {
    pub item: ExitingItem,
    /// 0 when removed, 1 when gone.
    pub progress: f64,
}

/// Application state.
///
/// # Pass order
///
/// [`AppState::layout_pass`] consumes the reconciler flags first, rebuilds
/// the range cache if they ask for it, reads the conversation once through
/// [`ItemSet::from_source`] and only then computes transforms. Mutations
/// between passes only record changes.
#[derive(Debug, Clone)]
pub struct AppState {
    conversation: Conversation,
    layout: DepthStackLayout,
    reconciler: UpdateReconciler,

    /// Depth currently drawn. Eases toward `target` on every tick.
    depth: DepthPosition,

    /// Where the view is heading.
    target: ScrollPosition,

    /// Output of the most recent pass.
    last_pass: Option<LayoutPass>,

    exiting: Vec<ExitAnimation>,

    /// Counter for messages created from the keyboard.
    next_message: usize,
}

impl AppState {
    /// Create state resting on the newest item.
    pub fn new(conversation: Conversation, params: LayoutParams) -> Self {
        let mut state = Self {
            next_message: conversation.len(),
            conversation,
            layout: DepthStackLayout::new(params),
            reconciler: UpdateReconciler::new(),
            depth: DepthPosition::ZERO,
            target: ScrollPosition::Newest,
            last_pass: None,
            exiting: Vec::new(),
        };
        state.layout_pass();
        state.depth = state.target.resolve(&state.layout);
        state.layout_pass();
        state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn layout(&self) -> &DepthStackLayout {
        &self.layout
    }

    pub fn depth(&self) -> DepthPosition {
        self.depth
    }

    pub fn target(&self) -> &ScrollPosition {
        &self.target
    }

    /// Depth the view is heading to.
    pub fn target_depth(&self) -> DepthPosition {
        self.target.resolve(&self.layout)
    }

    pub fn ui_mode(&self) -> UiMode {
        self.layout.params().ui_mode()
    }

    pub fn last_pass(&self) -> Option<&LayoutPass> {
        self.last_pass.as_ref()
    }

    pub fn exiting(&self) -> &[ExitAnimation] {
        &self.exiting
    }

    /// Focused item of a section in the last pass.
    pub fn focused_key(&self, section: Section) -> Option<ItemKey> {
        let id = self.last_pass.as_ref()?.focused_item(section)?;
        Some(ItemKey::new(section, id.clone()))
    }

    /// Scrollable extent for the current conversation and viewport.
    pub fn content_extent(&self) -> f64 {
        self.layout
            .content_extent(&ItemSet::from_source(&self.conversation))
    }

    fn record(&mut self, change: LayoutChange) {
        self.reconciler
            .record(&change, self.depth, &self.layout, self.last_pass.as_ref());
    }

    // ===== Conversation changes =====

    /// Forward a change notification from the conversation.
    pub fn apply_change(&mut self, change: StackChange) {
        self.record(change.into());
    }

    pub fn insert_message(&mut self, message: ChatMessage) {
        let change = self.conversation.insert(message);
        self.apply_change(change);
    }

    /// Remove a message. Returns false when the key is unknown.
    pub fn remove_message(&mut self, key: &ItemKey) -> bool {
        match self.conversation.remove(key) {
            Some(change) => {
                self.apply_change(change);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self, messages: Vec<ChatMessage>) {
        let change = self.conversation.reset(messages);
        self.next_message = self.conversation.len();
        self.exiting.clear();
        self.apply_change(change);
    }

    /// Next keyboard-created message for a section, after everything else.
    pub fn compose_message(&mut self, section: Section) -> ChatMessage {
        let n = self.next_message;
        self.next_message += 1;
        demo_message(n, section, self.conversation.next_sort_value())
    }

    // ===== View changes =====

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.layout
            .set_viewport(ViewportDimensions::new(width, height));
        self.record(LayoutChange::Resized);
    }

    pub fn set_ui_mode(&mut self, mode: UiMode) {
        self.layout.set_ui_mode(mode);
        self.record(LayoutChange::ModeChanged);
    }

    pub fn toggle_ui_mode(&mut self) {
        self.set_ui_mode(self.ui_mode().toggled());
    }

    /// Head toward a new position; the depth follows on later ticks.
    pub fn scroll_to(&mut self, target: ScrollPosition) {
        self.target = target;
        self.record(LayoutChange::Scrolled);
    }

    /// Place the depth directly, without animation.
    pub fn jump_to(&mut self, target: ScrollPosition) {
        self.scroll_to(target);
        self.depth = self.target_depth();
    }

    // ===== Passes =====

    /// Run one layout pass and return its output.
    pub fn layout_pass(&mut self) -> &LayoutPass {
        let flags = self.reconciler.take_flags();
        if flags.should_recalculate_ranges {
            self.layout.invalidate();
        }

        let items = ItemSet::from_source(&self.conversation);
        if !self.layout.is_cached() {
            self.layout.rebuild(&items);
        }

        if let Some(key) = flags.advance_target {
            if !self.target.follows_newest() {
                debug!(item = %key, "advancing to inserted item");
                self.target = ScrollPosition::AtItem(key);
            }
        }

        self.exiting.extend(
            self.reconciler
                .take_exiting()
                .into_iter()
                .map(|item| ExitAnimation { item, progress: 0.0 }),
        );

        let pass = self.layout.compute_layout(self.depth, &items);
        self.last_pass.insert(pass)
    }

    /// Advance animations by one frame.
    ///
    /// Returns true while anything is still moving.
    pub fn tick(&mut self) -> bool {
        let target = self.target_depth().get();
        let current = self.depth.get();
        let remaining = target - current;

        let moving = remaining.abs() > SETTLE_DISTANCE;
        self.depth = if moving {
            DepthPosition::new(current + remaining * EASING)
        } else {
            DepthPosition::new(target)
        };
        if moving || remaining != 0.0 {
            self.record(LayoutChange::Scrolled);
        }

        for exit in &mut self.exiting {
            exit.progress += EXIT_STEP;
        }
        self.exiting.retain(|exit| exit.progress < 1.0);

        moving || !self.exiting.is_empty()
    }

    /// Transforms of items animating out, at their current progress.
    pub fn exit_transforms(&self) -> Vec<(&ItemKey, VisualTransform)> {
        self.exiting
            .iter()
            .map(|exit| (&exit.item.key, exit_transform(&exit.item.from, exit.progress)))
            .collect()
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
