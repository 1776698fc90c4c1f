//! jao: time-triggered layered animation engine.
//!
//! A package (`jao.json` plus data files, as a folder or zip archive) describes layers made of
//! named events. Each event holds actions bound to time offsets; per tick the engine promotes
//! due actions, runs them, hands the layer to a renderer and retires finished actions.
//!
//! Entry points:
//!
//! - [`load_package`] / [`parse_package`] build an [`Animation`] from a package
//! - [`Animation::render`] advances one tick
//! - [`play`] drives an animation on a deterministic clock
#![forbid(unsafe_code)]

mod action;
mod animation;
mod assets;
mod event;
mod extract;
mod foundation;
mod layer;
mod model;
mod parser;
mod playback;
mod render;
mod time;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;

pub use action::registry::{ActionFactory, ActionLibrary, ActionRegistry, InitializerFactory};
pub use action::std_lib::{
    HoldAction, STD_LIBRARY, SetAction, SetInitializer, StdLibrary, TweenAction, coerce_param,
};
pub use action::{Action, Initializer};
pub use animation::Animation;
pub use assets::SharedAssetCache;
pub use event::{ActionId, EventAction, EventScheduler};
pub use extract::{
    Extractor, FolderExtractor, MANIFEST_NAME, ZipExtractor, normalize_entry_path, open_package,
};
pub use foundation::core::{FrameInfo, TimeOffset};
pub use foundation::error::{JaoError, JaoResult, LookupKind};
pub use layer::{DEFAULT_EVENT, Layer, LayerContext, LayerParameters, ParamValue};
pub use model::{ActionModel, DataTypeModel, EventModel, INITIALIZE_EVENT, JaoModel, LayerModel};
pub use parser::{load_package, parse_model, parse_package};
pub use playback::{PlaybackOpts, PlaybackStats, play};
pub use render::{NullRenderer, Renderer, RendererFactory, TraceRenderer};
pub use time::clock::{Clock, ManualClock, ManualTime, StandardClock};
pub use time::expr::{parse_optional_time_expr, parse_time_expr, seconds};
