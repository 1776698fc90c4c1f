//! Built-in `jao.std` library: parameter setters and simple timed behaviors.

use std::collections::BTreeMap;

use crate::action::registry::{ActionLibrary, ActionRegistry};
use crate::action::{Action, Initializer};
use crate::foundation::error::{JaoError, JaoResult};
use crate::layer::context::LayerContext;
use crate::layer::params::{LayerParameters, ParamValue};
use crate::model::ActionModel;
use crate::time::expr::{parse_optional_time_expr, parse_time_expr};

/// Library id of the built-in actions.
pub const STD_LIBRARY: &str = "jao.std";

/// Key the shorthand `attribute` is stored under by `Set`.
const SHORTHAND_KEY: &str = "value";

/// Installs `Set` (initializer and action), `Hold` and `Tween`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdLibrary;

impl ActionLibrary for StdLibrary {
    fn id(&self) -> &str {
        STD_LIBRARY
    }

    fn register(&self, registry: &mut ActionRegistry) {
        registry
            .register_initializer_type::<SetInitializer>(STD_LIBRARY, "Set")
            .register_action_type::<SetAction>(STD_LIBRARY, "Set")
            .register_action_type::<HoldAction>(STD_LIBRARY, "Hold")
            .register_action_type::<TweenAction>(STD_LIBRARY, "Tween");
    }
}

/// Coerce a raw attribute string into the most specific parameter value.
pub fn coerce_param(raw: &str) -> ParamValue {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return ParamValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return ParamValue::Bool(false);
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return ParamValue::Long(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => ParamValue::Double(v),
        _ => ParamValue::Str(raw.to_string()),
    }
}

fn assignments(model: &ActionModel) -> BTreeMap<String, ParamValue> {
    let mut out: BTreeMap<String, ParamValue> = model
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), coerce_param(v)))
        .collect();
    if let Some(v) = &model.attribute {
        out.insert(SHORTHAND_KEY.to_string(), coerce_param(v));
    }
    out
}

fn apply(params: &mut LayerParameters, values: &BTreeMap<String, ParamValue>) {
    for (k, v) in values {
        params.insert(k.clone(), v.clone());
    }
}

fn parse_f64(model: &ActionModel, key: &str) -> JaoResult<f64> {
    let raw = model
        .attr(key)
        .ok_or_else(|| JaoError::validation(format!("{}: missing attribute '{key}'", model.name)))?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| JaoError::validation(format!("{}: '{key}' is not a number: '{raw}'", model.name)))
}

/// Writes its attributes into the parameter bag once per layer initialization.
#[derive(Clone, Debug, Default)]
pub struct SetInitializer {
    values: BTreeMap<String, ParamValue>,
}

impl Initializer for SetInitializer {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        apply(ctx.parameters_mut(), &self.values);
        Ok(())
    }

    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        self.values = assignments(model);
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Initializer> {
        Box::new(self.clone())
    }
}

/// Writes its attributes into the parameter bag when triggered.
#[derive(Clone, Debug, Default)]
pub struct SetAction {
    values: BTreeMap<String, ParamValue>,
    done: bool,
    looping: bool,
}

impl Action for SetAction {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        apply(ctx.parameters_mut(), &self.values);
        self.done = !self.looping;
        Ok(())
    }

    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        self.values = assignments(model);
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

/// Keeps the event alive for `duration` after its trigger time.
#[derive(Clone, Debug, Default)]
pub struct HoldAction {
    when: u64,
    duration: u64,
    done: bool,
    looping: bool,
}

impl Action for HoldAction {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        if !self.looping && ctx.elapsed() > self.when.saturating_add(self.duration) {
            self.done = true;
        }
        Ok(())
    }

    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        self.when = parse_optional_time_expr(model.when.as_deref())?.as_millis();
        let duration = model.attr("duration").or(model.attribute.as_deref());
        self.duration = parse_optional_time_expr(duration)?.as_millis();
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

/// Linear interpolation of one numeric parameter over `duration`.
#[derive(Clone, Debug, Default)]
pub struct TweenAction {
    param: String,
    from: f64,
    to: f64,
    when: u64,
    duration: u64,
    done: bool,
    looping: bool,
}

impl TweenAction {
    fn value_at(&self, elapsed_ms: u64) -> (f64, bool) {
        let mut t = elapsed_ms.saturating_sub(self.when);
        if self.duration == 0 {
            return (self.to, true);
        }
        if self.looping {
            t %= self.duration;
        }
        let finished = t >= self.duration;
        let progress = (t as f64 / self.duration as f64).min(1.0);
        (self.from + (self.to - self.from) * progress, finished)
    }
}

impl Action for TweenAction {
    fn run(&mut self, ctx: &mut LayerContext) -> JaoResult<()> {
        let (value, finished) = self.value_at(ctx.elapsed());
        ctx.parameters_mut().insert(self.param.clone(), value);
        if finished && !self.looping {
            self.done = true;
        }
        Ok(())
    }

    fn load_model(&mut self, model: &ActionModel) -> JaoResult<()> {
        self.param = model
            .attr("param")
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| JaoError::validation(format!("{}: missing attribute 'param'", model.name)))?
            .to_string();
        self.from = parse_f64(model, "from")?;
        self.to = parse_f64(model, "to")?;
        self.when = parse_optional_time_expr(model.when.as_deref())?.as_millis();
        self.duration = match model.attr("duration") {
            Some(expr) => parse_time_expr(expr)?.as_millis(),
            None => 0,
        };
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

#[cfg(test)]
#[path = "../../tests/unit/action/std_lib.rs"]
mod tests;
