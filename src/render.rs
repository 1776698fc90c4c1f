use std::fmt;

use crate::extract::Extractor;
use crate::foundation::error::{JaoError, JaoResult};
use crate::layer::context::LayerContext;
use crate::model::DataTypeModel;

/// Sink that draws one layer per tick. Pixel output is up to the host.
pub trait Renderer: Send + fmt::Debug {
    /// Accept the layer's data type; called once when the layer is built.
    fn set_data_type(
        &mut self,
        data_type: &DataTypeModel,
        extractor: Option<&dyn Extractor>,
    ) -> JaoResult<()> {
        let _ = (data_type, extractor);
        Ok(())
    }

    /// Draw the layer after its running actions have been executed.
    fn render(&mut self, ctx: &LayerContext) -> JaoResult<()>;

    fn box_clone(&self) -> Box<dyn Renderer>;
}

impl Clone for Box<dyn Renderer> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Creates one renderer per parsed layer.
pub trait RendererFactory {
    fn create(&self) -> JaoResult<Box<dyn Renderer>>;
}

impl<F> RendererFactory for F
where
    F: Fn() -> JaoResult<Box<dyn Renderer>>,
{
    fn create(&self) -> JaoResult<Box<dyn Renderer>> {
        self()
    }
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl NullRenderer {
    /// Factory producing [`NullRenderer`]s.
    pub fn factory() -> impl RendererFactory {
        || -> JaoResult<Box<dyn Renderer>> { Ok(Box::new(NullRenderer)) }
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, _ctx: &LayerContext) -> JaoResult<()> {
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Renderer> {
        Box::new(*self)
    }
}

/// Renderer that logs each frame's parameter bag at `debug` level.
///
/// The last snapshot is kept as JSON so hosts and tests can inspect what would be drawn.
#[derive(Clone, Debug, Default)]
pub struct TraceRenderer {
    kind: String,
    frames: u64,
    last: Option<serde_json::Value>,
}

impl TraceRenderer {
    /// Factory producing [`TraceRenderer`]s.
    pub fn factory() -> impl RendererFactory {
        || -> JaoResult<Box<dyn Renderer>> { Ok(Box::new(TraceRenderer::default())) }
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Parameter bag of the last frame.
    pub fn last_snapshot(&self) -> Option<&serde_json::Value> {
        self.last.as_ref()
    }
}

impl Renderer for TraceRenderer {
    fn set_data_type(
        &mut self,
        data_type: &DataTypeModel,
        _extractor: Option<&dyn Extractor>,
    ) -> JaoResult<()> {
        self.kind = data_type.kind.clone();
        Ok(())
    }

    fn render(&mut self, ctx: &LayerContext) -> JaoResult<()> {
        let snapshot = serde_json::to_value(ctx.parameters())
            .map_err(|e| JaoError::renderer(format!("cannot snapshot parameters: {e}")))?;
        self.frames += 1;
        tracing::debug!(
            kind = %self.kind,
            elapsed_ms = ctx.elapsed(),
            frame = self.frames,
            params = %snapshot,
            "frame"
        );
        self.last = Some(snapshot);
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Renderer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
#[path = "../tests/unit/render.rs"]
mod tests;
