use std::collections::BTreeMap;

use crate::foundation::error::{JaoError, JaoResult};

/// Reserved event name holding one-shot initializers.
pub const INITIALIZE_EVENT: &str = "initialize";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Root of a package manifest (`jao.json`).
///
/// The model is pure data: [`crate::parse_model`] resolves every descriptor against an
/// [`crate::ActionRegistry`] to build a live [`crate::Animation`].
pub struct JaoModel {
    /// Layers in composition order.
    #[serde(default)]
    pub layers: Vec<LayerModel>,
}

impl JaoModel {
    /// Deserialize a manifest from JSON text.
    pub fn from_json(json: &str) -> JaoResult<Self> {
        serde_json::from_str(json).map_err(|e| JaoError::serde(e.to_string()))
    }

    /// Serialize the manifest to pretty JSON.
    pub fn to_json_pretty(&self) -> JaoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| JaoError::serde(e.to_string()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One layer: a renderer data type plus named events.
pub struct LayerModel {
    /// Descriptor handed to the renderer once at layer construction.
    #[serde(default)]
    pub data_type: DataTypeModel,
    /// Named events, including the reserved `initialize` event.
    #[serde(default)]
    pub events: Vec<EventModel>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Renderer-facing description of what a layer draws.
pub struct DataTypeModel {
    /// Renderer-defined type tag (for example `image` or `text`).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Raw renderer attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named list of action descriptors.
pub struct EventModel {
    /// Event name; `initialize` and `default` are reserved.
    pub name: String,
    /// Action (or initializer) descriptors in authoring order.
    #[serde(default)]
    pub actions: Vec<ActionModel>,
}

impl EventModel {
    /// Whether this is the reserved initializer event (case-insensitive).
    pub fn is_initialize(&self) -> bool {
        self.name.eq_ignore_ascii_case(INITIALIZE_EVENT)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Descriptor of one action or initializer.
pub struct ActionModel {
    /// Registry namespace.
    pub library: String,
    /// Lookup key within the library.
    pub name: String,
    /// Trigger time expression (actions only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// Single shorthand value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Raw parameter bag; coercion is up to the plugin.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ActionModel {
    /// Descriptor for `library`/`name` with no parameters.
    pub fn new(library: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the `when` expression.
    pub fn with_when(mut self, when: impl Into<String>) -> Self {
        self.when = Some(when.into());
        self
    }

    /// Set the shorthand attribute.
    pub fn with_attribute(mut self, value: impl Into<String>) -> Self {
        self.attribute = Some(value.into());
        self
    }

    /// Add one entry to the attribute bag.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Raw attribute lookup.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
