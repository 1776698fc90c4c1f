use std::collections::BTreeMap;

/// Tagged value stored in a [`LayerParameters`] bag.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Text value.
    Str(String),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Flag.
    Bool(bool),
}

impl ParamValue {
    fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(f64::from(v)),
            Self::Long(v) => Some(v as f64),
            Self::Float(v) => Some(f64::from(v)),
            Self::Double(v) => Some(v),
            Self::Str(_) | Self::Bool(_) => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(i64::from(v)),
            Self::Long(v) => Some(v),
            Self::Float(v) => Some(v as i64),
            Self::Double(v) => Some(v as i64),
            Self::Str(_) | Self::Bool(_) => None,
        }
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// String-keyed heterogeneous parameter bag shared by a layer's actions and its renderer.
///
/// Typed getters are soft: a missing key yields the documented default, numeric variants
/// convert into each other, and any other mismatch also yields the default.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct LayerParameters {
    values: BTreeMap<String, ParamValue>,
}

impl LayerParameters {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Text value, `""` by default.
    pub fn get_as_string(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(ParamValue::Str(s)) => s.as_str(),
            _ => "",
        }
    }

    /// 32-bit integer, `0` by default.
    pub fn get_as_int(&self, key: &str) -> i32 {
        self.values
            .get(key)
            .and_then(ParamValue::as_i64)
            .map_or(0, |v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }

    /// 64-bit integer, `0` by default.
    pub fn get_as_long(&self, key: &str) -> i64 {
        self.values.get(key).and_then(ParamValue::as_i64).unwrap_or(0)
    }

    /// 32-bit float, `0.0` by default.
    pub fn get_as_float(&self, key: &str) -> f32 {
        self.values
            .get(key)
            .and_then(ParamValue::as_f64)
            .map_or(0.0, |v| v as f32)
    }

    /// 64-bit float, `0.0` by default.
    pub fn get_as_double(&self, key: &str) -> f64 {
        self.values.get(key).and_then(ParamValue::as_f64).unwrap_or(0.0)
    }

    /// Flag, `false` by default.
    pub fn get_as_bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(ParamValue::Bool(true)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/params.rs"]
mod tests;
