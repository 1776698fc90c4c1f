use std::sync::Arc;

use crate::assets::SharedAssetCache;
use crate::extract::Extractor;
use crate::foundation::core::FrameInfo;
use crate::foundation::error::JaoResult;
use crate::layer::Layer;
use crate::time::clock::{Clock, StandardClock};

/// Top-level container: ordered layers sharing one clock.
///
/// Cloning yields a fully independent instance (own clock, parameters and action state) that
/// still shares the read-only package and the asset cache, so clones can be driven from
/// different threads.
#[derive(Clone, Debug)]
pub struct Animation {
    layers: Vec<Layer>,
    clock: Box<dyn Clock>,
    elapsed: u64,
    scale_factor: f32,
    extractor: Option<Arc<dyn Extractor>>,
    assets: SharedAssetCache,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation {
    /// Empty animation on a wall clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(StandardClock::new()))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            layers: Vec::new(),
            clock,
            elapsed: 0,
            scale_factor: 1.0,
            extractor: None,
            assets: SharedAssetCache::new(),
        }
    }

    /// Append a layer on top of the existing ones.
    pub fn add_layer(&mut self, mut layer: Layer) {
        layer.attach(self.assets.clone(), self.extractor.clone());
        layer.set_scale_factor(self.scale_factor);
        self.layers.push(layer);
    }

    pub fn add_layers(&mut self, layers: impl IntoIterator<Item = Layer>) {
        for layer in layers {
            self.add_layer(layer);
        }
    }

    /// Advance the clock and tick every layer in order.
    pub fn render(&mut self) -> JaoResult<()> {
        self.elapsed = self.clock.now();
        let frame = self.frame_info();
        for layer in &mut self.layers {
            layer.set_frame(frame);
            layer.render(self.elapsed)?;
        }
        Ok(())
    }

    /// Whether every layer is done.
    pub fn is_done(&self) -> bool {
        self.layers.iter().all(Layer::is_done)
    }

    /// Ask every action to stop looping so the animation can wind down.
    pub fn prepare_to_finish(&mut self) {
        tracing::debug!(elapsed_ms = self.elapsed, "preparing to finish");
        for layer in &mut self.layers {
            layer.set_loop(false);
        }
    }

    /// Switch every layer to event `name`; layers without it go idle.
    pub fn set_event(&mut self, name: &str) {
        for layer in &mut self.layers {
            layer.set_event(name);
        }
    }

    /// Reset every layer and the clock.
    pub fn reset(&mut self) -> JaoResult<()> {
        for layer in &mut self.layers {
            layer.reset()?;
        }
        self.clock.reset();
        self.elapsed = 0;
        Ok(())
    }

    pub fn set_loop(&mut self, looping: bool) {
        for layer in &mut self.layers {
            layer.set_loop(looping);
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
        for layer in &mut self.layers {
            layer.set_scale_factor(scale_factor);
        }
    }

    /// Elapsed milliseconds at the last [`render`](Self::render).
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn last_frame_time(&self) -> u64 {
        self.clock.last_frame_time()
    }

    pub fn last_frame_delta(&self) -> u64 {
        self.clock.last_frame_delta()
    }

    /// Timing snapshot published to layers.
    pub fn frame_info(&self) -> FrameInfo {
        FrameInfo {
            elapsed_ms: self.elapsed,
            scale_factor: self.scale_factor,
            last_frame_time_ms: self.clock.last_frame_time(),
            last_frame_delta_ms: self.clock.last_frame_delta(),
        }
    }

    /// Replace the clock; elapsed time restarts from the new clock's next reading.
    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = clock;
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn extractor(&self) -> Option<&Arc<dyn Extractor>> {
        self.extractor.as_ref()
    }

    /// Attach the package this animation was loaded from; existing layers see it too.
    pub fn set_extractor(&mut self, extractor: Option<Arc<dyn Extractor>>) {
        self.extractor = extractor;
        for layer in &mut self.layers {
            layer.attach(self.assets.clone(), self.extractor.clone());
        }
    }

    pub fn assets(&self) -> &SharedAssetCache {
        &self.assets
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }
}

#[cfg(test)]
#[path = "../tests/unit/animation.rs"]
mod tests;
