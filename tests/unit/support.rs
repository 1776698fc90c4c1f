//! Test doubles shared by the unit tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::action::{Action, Initializer};
use crate::foundation::error::{JaoError, JaoResult};
use crate::layer::context::LayerContext;
use crate::model::{ActionModel, DataTypeModel};
use crate::render::Renderer;
use crate::extract::Extractor;

/// Runs from its trigger time until `elapsed > when + duration`.
#[derive(Clone, Debug, Default)]
pub(crate) struct PulseAction {
    pub(crate) when: u64,
    pub(crate) duration: u64,
    pub(crate) runs: u32,
    done: bool,
    looping: bool,
}

impl PulseAction {
    pub(crate) fn new(when: u64, duration: u64) -> Self {
        Self {
            when,
            duration,
            ..Self::default()
        }
    }
}

impl Action for PulseAction {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        self.runs += 1;
        if !self.looping && ctx.elapsed() > self.when + self.duration {
            self.done = true;
        }
        Ok(())
    }

    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        if let Some(d) = model.attr("duration") {
            self.duration = d
                .parse()
                .map_err(|_| JaoError::validation(format!("bad duration '{d}'")))?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.done = false;
        self.runs = 0;
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn is_loop(&self) -> bool {
        self.looping
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Reports itself finished as soon as a model is loaded; only `reset` clears that.
#[derive(Clone, Debug, Default)]
pub(crate) struct PrimedAction {
    pub(crate) runs: u32,
    done: bool,
}

impl Action for PrimedAction {
    fn run(&mut self, _ctx: &mut LayerContext) -> JaoResult<()> {
        self.runs += 1;
        Ok(())
    }

    fn load_model(&mut self, _model: &ActionModel) -> JaoResult<()> {
        self.done = true;
        self.runs = 1;
        Ok(())
    }

    fn reset(&mut self) {
        self.done = false;
        self.runs = 0;
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_loop(&mut self, _looping: bool) {}

    fn is_loop(&self) -> bool {
        false
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Appends its tag to the `trace` parameter and completes after one run.
#[derive(Clone, Debug, Default)]
pub(crate) struct TagAction {
    pub(crate) tag: String,
    done: bool,
    looping: bool,
}

impl TagAction {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }
}

impl Action for TagAction {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        let params = ctx.parameters_mut();
        let trace = format!("{}{}", params.get_as_string("trace"), self.tag);
        params.insert("trace", trace);
        self.done = !self.looping;
        Ok(())
    }

    fn reset(&mut self) {
        self.done = false;
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn is_loop(&self) -> bool {
        self.looping
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Always fails when run.
#[derive(Clone, Debug, Default)]
pub(crate) struct FailingAction;

impl Action for FailingAction {
    fn run(&mut self, _ctx: &mut LayerContext) -> JaoResult<()> {
        Err(JaoError::action("boom"))
    }

    fn reset(&mut self) {}

    fn is_done(&self) -> bool {
        false
    }

    fn set_loop(&mut self, _looping: bool) {}

    fn is_loop(&self) -> bool {
        false
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Increments the `inits` parameter and a shared counter on every run.
#[derive(Clone, Debug, Default)]
pub(crate) struct CountingInitializer {
    pub(crate) calls: Arc<AtomicUsize>,
}

impl CountingInitializer {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Initializer for CountingInitializer {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let params = ctx.parameters_mut();
        let n = params.get_as_int("inits");
        params.insert("inits", n + 1);
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Initializer> {
        Box::new(self.clone())
    }
}

/// Counts frames and remembers the elapsed time of each.
#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) data_type: Option<DataTypeModel>,
    pub(crate) frames: Vec<u64>,
}

impl Renderer for RecordingRenderer {
    fn set_data_type(&mut self, data_type: &DataTypeModel, _extractor: Option<&dyn Extractor>) -> JaoResult<()> {
        self.data_type = Some(data_type.clone());
        Ok(())
    }

    fn render(&mut self, ctx: &LayerContext) -> JaoResult<()> {
        self.frames.push(ctx.elapsed());
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Renderer> {
        Box::new(self.clone())
    }
}
