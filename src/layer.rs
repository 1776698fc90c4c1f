//! Layers: independently scheduled tracks of an animation.

pub(crate) mod context;
pub(crate) mod params;

use std::{collections::HashMap, sync::Arc};

use crate::action::Initializer;
use crate::assets::SharedAssetCache;
use crate::event::EventScheduler;
use crate::extract::Extractor;
use crate::foundation::core::FrameInfo;
use crate::foundation::error::{JaoError, JaoResult};
use crate::model::DataTypeModel;
use crate::render::Renderer;

pub use context::LayerContext;
pub use params::{LayerParameters, ParamValue};

/// Event that becomes current as soon as it is added.
pub const DEFAULT_EVENT: &str = "default";

/// One track: named events, initializers, a parameter bag and a renderer.
///
/// At most one event is current; [`Layer::render`] ticks only that one.
#[derive(Clone, Debug)]
pub struct Layer {
    events: HashMap<String, EventScheduler>,
    initializers: Vec<Box<dyn Initializer>>,
    current: Option<String>,
    context: LayerContext,
    renderer: Box<dyn Renderer>,
}

impl Layer {
    /// Empty layer drawing through `renderer`.
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            events: HashMap::new(),
            initializers: Vec::new(),
            current: None,
            context: LayerContext::default(),
            renderer,
        }
    }

    /// Layer whose renderer has accepted `data_type`.
    pub fn with_data_type(
        mut renderer: Box<dyn Renderer>,
        data_type: DataTypeModel,
        extractor: Option<&dyn Extractor>,
    ) -> JaoResult<Self> {
        renderer.set_data_type(&data_type, extractor)?;
        let mut layer = Self::new(renderer);
        layer.context = LayerContext::new(data_type);
        Ok(layer)
    }

    /// Run every initializer against this layer, in registration order.
    pub fn initialize(&mut self) -> JaoResult<()> {
        for init in &mut self.initializers {
            init.run(&mut self.context)?;
        }
        Ok(())
    }

    /// Append one initializer and re-run all of them.
    pub fn add_initializer(&mut self, init: Box<dyn Initializer>) -> JaoResult<()> {
        self.initializers.push(init);
        self.initialize()
    }

    /// Append a batch of initializers and re-run all of them.
    pub fn add_initializers(
        &mut self,
        inits: impl IntoIterator<Item = Box<dyn Initializer>>,
    ) -> JaoResult<()> {
        self.initializers.extend(inits);
        self.initialize()
    }

    /// Add (or replace) event `name`; adding `default` makes it current.
    pub fn add_event(&mut self, name: impl Into<String>, event: EventScheduler) {
        let name = name.into();
        if self.events.contains_key(&name) {
            tracing::warn!(event = %name, "replacing existing event");
        }
        if name == DEFAULT_EVENT {
            self.current = Some(name.clone());
        }
        self.events.insert(name, event);
    }

    /// Merge `events` into the event table.
    pub fn add_events(&mut self, events: impl IntoIterator<Item = (String, EventScheduler)>) {
        for (name, event) in events {
            self.add_event(name, event);
        }
    }

    /// Make `name` current. An unknown name clears the current event; returns whether it exists.
    pub fn set_event(&mut self, name: &str) -> bool {
        if self.events.contains_key(name) {
            tracing::debug!(event = name, "switched event");
            self.current = Some(name.to_string());
            true
        } else {
            tracing::debug!(event = name, "unknown event, layer idles");
            self.current = None;
            false
        }
    }

    /// [`set_event`](Self::set_event), then restart the newly selected event.
    pub fn set_event_and_reset(&mut self, name: &str) -> bool {
        let found = self.set_event(name);
        if let Some(event) = self.current_event_mut() {
            event.reset();
        }
        found
    }

    pub fn clear_event(&mut self) {
        self.current = None;
    }

    pub fn has_event(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    /// Event `name`, or [`JaoError::EventNotFound`].
    pub fn event(&self, name: &str) -> JaoResult<&EventScheduler> {
        self.events
            .get(name)
            .ok_or_else(|| JaoError::EventNotFound(name.to_string()))
    }

    pub fn event_mut(&mut self, name: &str) -> JaoResult<&mut EventScheduler> {
        self.events
            .get_mut(name)
            .ok_or_else(|| JaoError::EventNotFound(name.to_string()))
    }

    pub fn current_event(&self) -> Option<&EventScheduler> {
        self.current.as_deref().and_then(|n| self.events.get(n))
    }

    pub fn current_event_mut(&mut self) -> Option<&mut EventScheduler> {
        self.current.as_deref().and_then(|n| self.events.get_mut(n))
    }

    pub fn current_event_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Event names in sorted order.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.events.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// One tick of the current event at `elapsed_ms`: promote, run, draw, clean up.
    ///
    /// No-op without a current event.
    pub fn render(&mut self, elapsed_ms: u64) -> JaoResult<()> {
        let Some(event) = self.current.as_deref().and_then(|n| self.events.get_mut(n)) else {
            return Ok(());
        };
        self.context.set_elapsed(elapsed_ms);
        event.tick(elapsed_ms, &mut self.context)?;
        self.renderer.render(&self.context)?;
        event.clean_done();
        Ok(())
    }

    /// True without a current event, else whether the current event is done.
    pub fn is_done(&self) -> bool {
        self.current_event().is_none_or(EventScheduler::is_done)
    }

    /// Re-run initializers and reset every event.
    pub fn reset(&mut self) -> JaoResult<()> {
        self.initialize()?;
        for event in self.events.values_mut() {
            event.reset();
        }
        Ok(())
    }

    /// Propagate the loop flag to every event.
    pub fn set_loop(&mut self, looping: bool) {
        for event in self.events.values_mut() {
            event.set_loop(looping);
        }
    }

    pub fn parameters(&self) -> &LayerParameters {
        self.context.parameters()
    }

    pub fn parameters_mut(&mut self) -> &mut LayerParameters {
        self.context.parameters_mut()
    }

    pub fn context(&self) -> &LayerContext {
        &self.context
    }

    pub fn data_type(&self) -> &DataTypeModel {
        self.context.data_type()
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = renderer;
    }

    pub(crate) fn set_frame(&mut self, frame: FrameInfo) {
        self.context.set_frame(frame);
    }

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f32) {
        self.context.set_scale_factor(scale_factor);
    }

    pub(crate) fn attach(&mut self, assets: SharedAssetCache, extractor: Option<Arc<dyn Extractor>>) {
        self.context.attach(assets, extractor);
    }
}

#[cfg(test)]
#[path = "../tests/unit/layer.rs"]
mod tests;
