//! Plugin capabilities and their registry.
//!
//! Two capability shapes exist and neither extends the other:
//!
//! - [`Initializer`]: one-shot setup of a layer's parameters.
//! - [`Action`]: repeatable, time-triggered behavior with done/loop state.

pub(crate) mod registry;
pub(crate) mod std_lib;

use std::fmt;

use crate::foundation::error::JaoResult;
use crate::layer::context::LayerContext;
use crate::model::ActionModel;

/// Time-triggered behavior unit owned by an [`crate::EventScheduler`].
pub trait Action: Send + fmt::Debug {
    /// Execute one tick against the layer.
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()>;

    /// Configure from a package descriptor. Called before `reset`.
    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        let _ = model;
        Ok(())
    }

    /// Return to begin-of-event state.
    fn reset(&mut self);

    /// Whether the action has finished and can leave the running set.
    fn is_done(&self) -> bool;

    /// Enable or disable looping.
    fn set_loop(&mut self, looping: bool);

    /// Current loop flag.
    fn is_loop(&self) -> bool;

    /// Deep copy used when cloning a live animation.
    fn box_clone(&self) -> Box<dyn Action>;
}

impl Clone for Box<dyn Action> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// One-shot behavior unit that prepares layer parameters.
pub trait Initializer: Send + fmt::Debug {
    /// Apply to the layer. Runs on every layer (re)initialization.
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()>;

    /// Configure from a package descriptor.
    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        let _ = model;
        Ok(())
    }

    /// Deep copy used when cloning a live animation.
    fn box_clone(&self) -> Box<dyn Initializer>;
}

impl Clone for Box<dyn Initializer> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
