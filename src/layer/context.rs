use std::sync::Arc;

use crate::assets::SharedAssetCache;
use crate::extract::Extractor;
use crate::foundation::core::FrameInfo;
use crate::layer::params::LayerParameters;
use crate::model::DataTypeModel;

/// Mutable state of one layer that actions, initializers and renderers operate on.
///
/// Holds the parameter bag plus read-only views of the owning animation: the latest frame
/// timing snapshot, the layer's data type, the package extractor and the shared asset cache.
#[derive(Clone, Debug, Default)]
pub struct LayerContext {
    parameters: LayerParameters,
    frame: FrameInfo,
    data_type: DataTypeModel,
    extractor: Option<Arc<dyn Extractor>>,
    assets: SharedAssetCache,
}

impl LayerContext {
    /// Context for a layer drawing `data_type`.
    pub fn new(data_type: DataTypeModel) -> Self {
        Self {
            data_type,
            ..Self::default()
        }
    }

    /// Parameter bag.
    pub fn parameters(&self) -> &LayerParameters {
        &self.parameters
    }

    /// Mutable parameter bag.
    pub fn parameters_mut(&mut self) -> &mut LayerParameters {
        &mut self.parameters
    }

    /// Latest frame timing snapshot.
    pub fn frame(&self) -> FrameInfo {
        self.frame
    }

    /// Elapsed milliseconds of the current tick.
    pub fn elapsed(&self) -> u64 {
        self.frame.elapsed_ms
    }

    /// Scale factor of the owning animation.
    pub fn scale_factor(&self) -> f32 {
        self.frame.scale_factor
    }

    /// Time of the last clock read.
    pub fn last_frame_time(&self) -> u64 {
        self.frame.last_frame_time_ms
    }

    /// Milliseconds between the last two clock reads.
    pub fn last_frame_delta(&self) -> u64 {
        self.frame.last_frame_delta_ms
    }

    /// Renderer data type of this layer.
    pub fn data_type(&self) -> &DataTypeModel {
        &self.data_type
    }

    /// Package the layer was loaded from, if any.
    pub fn extractor(&self) -> Option<&dyn Extractor> {
        self.extractor.as_deref()
    }

    /// Asset cache shared with every clone of the owning animation.
    pub fn assets(&self) -> &SharedAssetCache {
        &self.assets
    }

    pub(crate) fn set_frame(&mut self, frame: FrameInfo) {
        self.frame = frame;
    }

    pub(crate) fn set_elapsed(&mut self, elapsed_ms: u64) {
        self.frame.elapsed_ms = elapsed_ms;
    }

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f32) {
        self.frame.scale_factor = scale_factor;
    }

    pub(crate) fn attach(&mut self, assets: SharedAssetCache, extractor: Option<Arc<dyn Extractor>>) {
        self.assets = assets;
        self.extractor = extractor;
    }
}
