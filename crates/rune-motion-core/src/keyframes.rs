//! Keyframe descriptions and their `@keyframes` serialization.
//!
//! A [`KeyframeDescription`] is an ordered list of steps. Each step pairs a
//! comma-separated list of percentage offsets with an ordered property map:
//!
//! ```ignore
//! let pulse = KeyframeDescription::new()
//!     .frame("0,100", [("opacity", "1")])
//!     .frame("50", [("opacity", "0")]);
//! ```
//!
//! Property names are logical and translated when the rule is written:
//! camelCase becomes kebab-case, `easing` becomes
//! `animation-timing-function`, and `transform*`, `perspective*`,
//! `transition*` and `animation*` receive the vendor style prefix.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MotionError, Result};
use crate::vendor::VendorPrefix;

/// Translated property names starting with one of these get the vendor prefix.
const VENDOR_PREFIXED: [&str; 4] = ["transform", "perspective", "transition", "animation"];

/// One step of a keyframe description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyframeStep {
    /// Comma-separated percentages, e.g. `"0, 50,100"`. `%` suffixes are tolerated.
    pub offsets: String,
    /// Logical property name → CSS value, in declaration order.
    pub properties: Vec<(String, String)>,
}

impl KeyframeStep {
    /// Validated, trimmed offsets of this step.
    pub fn offsets(&self) -> Result<Vec<&str>> {
        self.offsets.split(',').map(parse_offset).collect()
    }
}

/// Ordered keyframe steps defining an animation's visual stages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct KeyframeDescription {
    steps: Vec<KeyframeStep>,
}

impl KeyframeDescription {
    /// Empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn frame<I, K, V>(mut self, offsets: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.steps.push(KeyframeStep {
            offsets: offsets.to_string(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        });
        self
    }

    /// Steps in declaration order.
    pub fn steps(&self) -> &[KeyframeStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Parse a JSON object such as `{"0,100": {"opacity": 1}, "50": {"opacity": 0}}`.
    ///
    /// Key order is preserved. Offsets are validated; property values must be
    /// strings or numbers.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Like [`from_json_str`](Self::from_json_str) for an already parsed value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(MotionError::InvalidKeyframes(format!(
                "expected an object of keyframe steps, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serialize into a single `@keyframes` rule named `identifier`.
    ///
    /// Offsets that fail validation are skipped with a warning; the rest of
    /// the rule is still written.
    pub fn to_css(&self, identifier: &str, prefix: &VendorPrefix) -> String {
        let mut css = format!("@{}keyframes {}{{", prefix.style_prefix, identifier);

        for step in &self.steps {
            let mut block = String::from("{");
            for (name, value) in &step.properties {
                block.push_str(&translate_property(name, prefix));
                block.push(':');
                block.push_str(value);
                block.push(';');
            }
            block.push('}');

            for raw in step.offsets.split(',') {
                match parse_offset(raw) {
                    Ok(offset) => {
                        css.push_str(offset);
                        css.push('%');
                        css.push_str(&block);
                    }
                    Err(err) => {
                        tracing::warn!(identifier, offset = raw, error = %err, "skipping keyframe offset");
                    }
                }
            }
        }

        css.push('}');
        css
    }
}

impl TryFrom<Map<String, Value>> for KeyframeDescription {
    type Error = MotionError;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut steps = Vec::with_capacity(map.len());
        for (offsets, body) in map {
            for raw in offsets.split(',') {
                parse_offset(raw)?;
            }
            let Value::Object(props) = body else {
                return Err(MotionError::InvalidKeyframes(format!(
                    "step '{offsets}' must be an object of properties, found {}",
                    json_kind(&body)
                )));
            };

            let mut properties = Vec::with_capacity(props.len());
            for (name, value) in props {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    other => {
                        return Err(MotionError::InvalidKeyframes(format!(
                            "property '{name}' in step '{offsets}' must be a string or number, found {}",
                            json_kind(&other)
                        )));
                    }
                };
                properties.push((name, value));
            }
            steps.push(KeyframeStep {
                offsets,
                properties,
            });
        }
        Ok(Self { steps })
    }
}

impl From<KeyframeDescription> for Map<String, Value> {
    fn from(description: KeyframeDescription) -> Self {
        description
            .steps
            .into_iter()
            .map(|step| {
                let props = step
                    .properties
                    .into_iter()
                    .map(|(name, value)| (name, Value::String(value)))
                    .collect::<Map<_, _>>();
                (step.offsets, Value::Object(props))
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate a single offset token, returning it without whitespace or `%`.
pub fn parse_offset(raw: &str) -> Result<&str> {
    let offset = raw.trim().trim_end_matches('%').trim();
    match offset.parse::<f64>() {
        Ok(value) if (0.0..=100.0).contains(&value) => Ok(offset),
        _ => Err(MotionError::InvalidOffset(raw.trim().to_string())),
    }
}

/// Translate a logical property name into the engine property name.
pub fn translate_property(name: &str, prefix: &VendorPrefix) -> String {
    let mut kebab = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(ch.to_ascii_lowercase());
        } else {
            kebab.push(ch);
        }
    }

    let translated = if kebab == "easing" {
        "animation-timing-function".to_string()
    } else {
        kebab.replace("easing", "animation-timing")
    };

    if VENDOR_PREFIXED
        .iter()
        .any(|candidate| translated.starts_with(candidate))
    {
        prefix.property(&translated)
    } else {
        translated
    }
}
