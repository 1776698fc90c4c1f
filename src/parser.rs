//! Builds live animations from package manifests.

use std::{path::Path, sync::Arc};

use crate::action::Initializer;
use crate::action::registry::ActionRegistry;
use crate::animation::Animation;
use crate::event::EventScheduler;
use crate::extract::{Extractor, open_package};
use crate::foundation::error::JaoResult;
use crate::layer::Layer;
use crate::model::{EventModel, JaoModel, LayerModel};
use crate::render::RendererFactory;
use crate::time::expr::parse_optional_time_expr;

/// Parse manifest JSON into an [`Animation`].
#[tracing::instrument(skip_all, fields(json_len = json.len()))]
pub fn parse_package(
    json: &str,
    registry: &ActionRegistry,
    renderers: &dyn RendererFactory,
    extractor: Option<Arc<dyn Extractor>>,
) -> JaoResult<Animation> {
    let model = JaoModel::from_json(json)?;
    parse_model(&model, registry, renderers, extractor)
}

/// Resolve every descriptor of `model` against `registry`.
///
/// Layers keep document order. Each layer runs its initializers once here; the reserved
/// `initialize` event never becomes a schedulable event.
#[tracing::instrument(skip_all, fields(layers = model.layers.len()))]
pub fn parse_model(
    model: &JaoModel,
    registry: &ActionRegistry,
    renderers: &dyn RendererFactory,
    extractor: Option<Arc<dyn Extractor>>,
) -> JaoResult<Animation> {
    let mut animation = Animation::new();
    animation.set_extractor(extractor.clone());

    for (idx, layer_model) in model.layers.iter().enumerate() {
        let layer = parse_layer(layer_model, registry, renderers, extractor.as_deref())?;
        tracing::debug!(
            layer = idx,
            kind = %layer_model.data_type.kind,
            events = ?layer.event_names(),
            "parsed layer"
        );
        animation.add_layer(layer);
    }
    Ok(animation)
}

/// Open the package at `path` (folder, `.zip` or `.jao`) and parse its manifest.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_package(
    path: impl AsRef<Path>,
    registry: &ActionRegistry,
    renderers: &dyn RendererFactory,
) -> JaoResult<Animation> {
    let extractor = open_package(path.as_ref())?;
    let json = extractor.json().to_string();
    parse_package(&json, registry, renderers, Some(extractor))
}

fn parse_layer(
    model: &LayerModel,
    registry: &ActionRegistry,
    renderers: &dyn RendererFactory,
    extractor: Option<&dyn Extractor>,
) -> JaoResult<Layer> {
    let renderer = renderers.create()?;
    let mut layer = Layer::with_data_type(renderer, model.data_type.clone(), extractor)?;

    if let Some(init_event) = model.events.iter().find(|e| e.is_initialize()) {
        let inits = parse_initializers(init_event, registry)?;
        layer.add_initializers(inits)?;
    }

    for event in model.events.iter().filter(|e| !e.is_initialize()) {
        let scheduler = parse_event(event, registry)?;
        layer.add_event(event.name.clone(), scheduler);
    }
    Ok(layer)
}

fn parse_initializers(
    event: &EventModel,
    registry: &ActionRegistry,
) -> JaoResult<Vec<Box<dyn Initializer>>> {
    event
        .actions
        .iter()
        .map(|a| registry.get_initializer(&a.library, &a.name, Some(a)))
        .collect()
}

fn parse_event(event: &EventModel, registry: &ActionRegistry) -> JaoResult<EventScheduler> {
    let mut scheduler = EventScheduler::new();
    for a in &event.actions {
        let when = parse_optional_time_expr(a.when.as_deref())?;
        let action = registry.get_action(&a.library, &a.name, Some(a))?;
        scheduler.add_action(action, when);
    }
    Ok(scheduler)
}

#[cfg(test)]
#[path = "../tests/unit/parser.rs"]
mod tests;
