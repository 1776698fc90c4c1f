use std::cmp::Ordering;

use crate::action::Action;
use crate::foundation::core::TimeOffset;
use crate::foundation::error::JaoResult;
use crate::layer::context::LayerContext;

/// One action bound to the offset at which it becomes eligible.
///
/// Ordered by `(when, seq)`: ascending offset, ties resolved by insertion order.
#[derive(Clone, Debug)]
pub struct EventAction {
    action: Box<dyn Action>,
    when: TimeOffset,
    seq: usize,
}

impl EventAction {
    pub(crate) fn new(action: Box<dyn Action>, when: TimeOffset, seq: usize) -> Self {
        Self { action, when, seq }
    }

    /// Trigger offset.
    pub fn when(&self) -> TimeOffset {
        self.when
    }

    /// Insertion sequence within the owning scheduler.
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// `(when, seq)` ordering key.
    pub fn sort_key(&self) -> (TimeOffset, usize) {
        (self.when, self.seq)
    }

    /// Bound action.
    pub fn action(&self) -> &dyn Action {
        self.action.as_ref()
    }

    /// Bound action, mutably.
    pub fn action_mut(&mut self) -> &mut dyn Action {
        self.action.as_mut()
    }

    pub fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        self.action.run(ctx)
    }

    pub fn is_done(&self) -> bool {
        self.action.is_done()
    }

    pub fn reset(&mut self) {
        self.action.reset();
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.action.set_loop(looping);
    }

    pub fn is_loop(&self) -> bool {
        self.action.is_loop()
    }
}

impl PartialEq for EventAction {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for EventAction {}

impl PartialOrd for EventAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventAction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
