use std::collections::VecDeque;

use crate::action::Action;
use crate::event::action::EventAction;
use crate::foundation::core::TimeOffset;
use crate::foundation::error::JaoResult;
use crate::layer::context::LayerContext;

/// Stable handle of an action inside one [`EventScheduler`] (its arena index).
///
/// Handles survive cloning: the clone of action `id` has the same `id` in the cloned scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub usize);

/// Pool/running/done state machine of one named event.
///
/// Every action lives in the `all` arena. `pool` holds actions not yet triggered, `running`
/// actions triggered but not done. Done actions remain only in `all` until [`reset`].
///
/// [`reset`]: EventScheduler::reset
#[derive(Clone, Debug, Default)]
pub struct EventScheduler {
    all: Vec<EventAction>,
    pool: VecDeque<ActionId>,
    running: Vec<ActionId>,
    sorted: bool,
    has_started: bool,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `action` triggering at `when`; it starts in the pool.
    pub fn add_action(&mut self, action: Box<dyn Action>, when: impl Into<TimeOffset>) -> ActionId {
        let id = ActionId(self.all.len());
        self.all.push(EventAction::new(action, when.into(), id.0));
        self.pool.push_back(id);
        self.sorted = false;
        id
    }

    /// Append a batch of `(action, when)` pairs in order.
    pub fn add_actions<I, T>(&mut self, actions: I)
    where
        I: IntoIterator<Item = (Box<dyn Action>, T)>,
        T: Into<TimeOffset>,
    {
        for (action, when) in actions {
            self.add_action(action, when);
        }
    }

    /// Promote every pooled action due at `elapsed_ms` and return the running set.
    ///
    /// Newly promoted actions are appended in `(when, seq)` order. Marks the scheduler as
    /// started, so [`is_done`](Self::is_done) can become true afterwards.
    pub fn get_running_items(&mut self, elapsed_ms: u64) -> &[ActionId] {
        self.has_started = true;
        if !self.sorted {
            let all = &self.all;
            self.pool
                .make_contiguous()
                .sort_by_key(|id| all[id.0].sort_key());
            self.sorted = true;
        }

        while let Some(&id) = self.pool.front() {
            let when = self.all[id.0].when();
            if !when.is_due(elapsed_ms) {
                break;
            }
            self.pool.pop_front();
            self.running.push(id);
            tracing::trace!(action = id.0, when = when.as_millis(), elapsed_ms, "action triggered");
        }
        &self.running
    }

    /// Run every running action in order, stopping at the first failure.
    pub fn run_running(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        for id in &self.running {
            self.all[id.0].run(ctx)?;
        }
        Ok(())
    }

    /// Promote due actions and run the running set.
    pub fn tick(&mut self, elapsed_ms: u64, ctx: &mut LayerContext) -> JaoResult<()> {
        self.get_running_items(elapsed_ms);
        self.run_running(ctx)
    }

    /// Drop finished actions from the running set.
    pub fn clean_done(&mut self) {
        let all = &self.all;
        self.running.retain(|id| {
            let done = all[id.0].is_done();
            if done {
                tracing::trace!(action = id.0, "action done");
            }
            !done
        });
    }

    /// Started, nothing pooled and nothing running.
    pub fn is_done(&self) -> bool {
        self.has_started && self.pool.is_empty() && self.running.is_empty()
    }

    /// Propagate the loop flag to every action.
    pub fn set_loop(&mut self, looping: bool) {
        for ea in &mut self.all {
            ea.set_loop(looping);
        }
    }

    /// Return every action to the pool in authored order and reset it.
    pub fn reset(&mut self) {
        self.pool = (0..self.all.len()).map(ActionId).collect();
        self.running.clear();
        self.sorted = false;
        self.has_started = false;
        for ea in &mut self.all {
            ea.reset();
        }
    }

    pub fn action(&self, id: ActionId) -> Option<&EventAction> {
        self.all.get(id.0)
    }

    pub fn action_mut(&mut self, id: ActionId) -> Option<&mut EventAction> {
        self.all.get_mut(id.0)
    }

    /// Every action in authored order, regardless of state.
    pub fn all_actions(&self) -> &[EventAction] {
        &self.all
    }

    /// Actions not yet triggered, front first.
    pub fn pool(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.pool.iter().copied()
    }

    /// Triggered actions that are not done yet.
    pub fn running(&self) -> &[ActionId] {
        &self.running
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/event/scheduler.rs"]
mod tests;
