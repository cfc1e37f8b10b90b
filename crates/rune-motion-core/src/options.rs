//! Per-instance animation options.
//!
//! These map one-to-one onto the engine's `animation-*` style properties
//! plus the auto-play flag and three lifecycle callbacks. Every field has a
//! default, so options can be deserialized from partial JSON:
//!
//! ```json
//! { "animationName": "fadeIn", "duration": 500, "iteration": "infinite" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use rune_config::DefaultsConfig;

use crate::error::MotionError;

/// Nullary lifecycle callback.
pub type Callback = Rc<dyn Fn()>;

/// A duration or delay.
///
/// Whole milliseconds are written as `<n>ms`. Strings pass through verbatim
/// (`"1.5s"`), except purely numeric strings which are treated as
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssTime {
    Millis(u64),
    Raw(String),
}

impl CssTime {
    pub fn to_css(&self) -> String {
        match self {
            Self::Millis(ms) => format!("{ms}ms"),
            Self::Raw(raw) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => {
                format!("{raw}ms")
            }
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<u64> for CssTime {
    fn from(ms: u64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for CssTime {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// How many times an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IterationRepr", into = "IterationRepr")]
pub enum IterationCount {
    /// A positive number of iterations.
    Count(u32),
    /// Repeat forever.
    Infinite,
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::Count(1)
    }
}

impl IterationCount {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Infinite => f.write_str("infinite"),
        }
    }
}

impl FromStr for IterationCount {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("infinite") {
            return Ok(Self::Infinite);
        }
        match s.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self::Count(n)),
            _ => Err(MotionError::InvalidIteration(s.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum IterationRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<IterationRepr> for IterationCount {
    type Error = MotionError;

    fn try_from(repr: IterationRepr) -> Result<Self, Self::Error> {
        match repr {
            IterationRepr::Count(0) => Err(MotionError::InvalidIteration("0".to_string())),
            IterationRepr::Count(n) => Ok(Self::Count(n)),
            IterationRepr::Keyword(word) => word.parse(),
        }
    }
}

impl From<IterationCount> for IterationRepr {
    fn from(count: IterationCount) -> Self {
        match count {
            IterationCount::Count(n) => Self::Count(n),
            IterationCount::Infinite => Self::Keyword("infinite".to_string()),
        }
    }
}

/// Direction of animation playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationDirection {
    /// Play forward each iteration.
    #[default]
    Normal,
    /// Alternate between forward and backward.
    Alternate,
    /// Alternate, starting with backward.
    AlternateReverse,
}

impl AnimationDirection {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Alternate => "alternate",
            Self::AlternateReverse => "alternate-reverse",
        }
    }
}

/// What values apply before and after the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationFillMode {
    /// Don't apply any values outside the animation.
    #[default]
    None,
    /// Retain the final keyframe values after the animation ends.
    Forwards,
    /// Apply the first keyframe values during the delay.
    Backwards,
    /// Both forwards and backwards.
    Both,
}

impl AnimationFillMode {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Forwards => "forwards",
            Self::Backwards => "backwards",
            Self::Both => "both",
        }
    }
}

/// Options bound to one animation instance.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationOptions {
    /// Logical name passed to the keyframe registry.
    pub animation_name: String,
    pub duration: CssTime,
    /// animation-timing-function
    pub easing: String,
    pub delay: CssTime,
    pub iteration: IterationCount,
    pub direction: AnimationDirection,
    pub fill_mode: AnimationFillMode,
    /// Play immediately after construction.
    pub auto_play: bool,
    #[serde(skip)]
    pub on_animation_start: Option<Callback>,
    #[serde(skip)]
    pub on_animation_iteration: Option<Callback>,
    #[serde(skip)]
    pub on_animation_end: Option<Callback>,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            animation_name: String::new(),
            duration: CssTime::Millis(1000),
            easing: "ease".to_string(),
            delay: CssTime::Millis(0),
            iteration: IterationCount::default(),
            direction: AnimationDirection::default(),
            fill_mode: AnimationFillMode::default(),
            auto_play: true,
            on_animation_start: None,
            on_animation_iteration: None,
            on_animation_end: None,
        }
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("animation_name", &self.animation_name)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("delay", &self.delay)
            .field("iteration", &self.iteration)
            .field("direction", &self.direction)
            .field("fill_mode", &self.fill_mode)
            .field("auto_play", &self.auto_play)
            .field("on_animation_start", &self.on_animation_start.is_some())
            .field("on_animation_iteration", &self.on_animation_iteration.is_some())
            .field("on_animation_end", &self.on_animation_end.is_some())
            .finish()
    }
}

impl AnimationOptions {
    /// Options for a logical animation name with every other field defaulted.
    pub fn new(animation_name: impl Into<String>) -> Self {
        Self {
            animation_name: animation_name.into(),
            ..Default::default()
        }
    }

    /// Options seeded from the `[defaults]` configuration section.
    pub fn from_defaults(animation_name: impl Into<String>, defaults: &DefaultsConfig) -> Self {
        Self {
            animation_name: animation_name.into(),
            duration: CssTime::Millis(defaults.duration_ms),
            easing: defaults.easing.clone(),
            delay: CssTime::Millis(defaults.delay_ms),
            auto_play: defaults.auto_play,
            ..Default::default()
        }
    }

    /// Parse options from JSON. Callbacks are always unset.
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn duration(mut self, duration: impl Into<CssTime>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn delay(mut self, delay: impl Into<CssTime>) -> Self {
        self.delay = delay.into();
        self
    }

    pub fn iteration(mut self, iteration: IterationCount) -> Self {
        self.iteration = iteration;
        self
    }

    pub fn direction(mut self, direction: AnimationDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn fill_mode(mut self, fill_mode: AnimationFillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    pub fn on_start(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_animation_start = Some(Rc::new(callback));
        self
    }

    pub fn on_iteration(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_animation_iteration = Some(Rc::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_animation_end = Some(Rc::new(callback));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnimationOptions::default();
        assert_eq!(options.animation_name, "");
        assert_eq!(options.duration.to_css(), "1000ms");
        assert_eq!(options.easing, "ease");
        assert_eq!(options.delay.to_css(), "0ms");
        assert_eq!(options.iteration, IterationCount::Count(1));
        assert_eq!(options.direction, AnimationDirection::Normal);
        assert_eq!(options.fill_mode, AnimationFillMode::None);
        assert!(options.auto_play);
        assert!(options.on_animation_start.is_none());
    }

    #[test]
    fn test_css_time() {
        assert_eq!(CssTime::Millis(250).to_css(), "250ms");
        assert_eq!(CssTime::from("1.5s").to_css(), "1.5s");
        assert_eq!(CssTime::from("300").to_css(), "300ms");
        assert_eq!(CssTime::from("").to_css(), "");
    }

    #[test]
    fn test_iteration_parsing() {
        assert_eq!("3".parse::<IterationCount>().unwrap(), IterationCount::Count(3));
        assert_eq!(
            "infinite".parse::<IterationCount>().unwrap(),
            IterationCount::Infinite
        );
        assert!(matches!(
            "0".parse::<IterationCount>(),
            Err(MotionError::InvalidIteration(_))
        ));
        assert!(matches!(
            "forever".parse::<IterationCount>(),
            Err(MotionError::InvalidIteration(_))
        ));
        assert_eq!(IterationCount::Infinite.to_string(), "infinite");
        assert_eq!(IterationCount::Count(2).to_string(), "2");
    }

    #[test]
    fn test_from_json() {
        let options = AnimationOptions::from_json_str(
            r#"{
                "animationName": "fadeIn",
                "duration": 500,
                "delay": "0.2s",
                "iteration": "infinite",
                "direction": "alternate-reverse",
                "fillMode": "forwards",
                "autoPlay": false
            }"#,
        )
        .unwrap();

        assert_eq!(options.animation_name, "fadeIn");
        assert_eq!(options.duration, CssTime::Millis(500));
        assert_eq!(options.delay.to_css(), "0.2s");
        assert!(options.iteration.is_infinite());
        assert_eq!(options.direction.as_css(), "alternate-reverse");
        assert_eq!(options.fill_mode.as_css(), "forwards");
        assert!(!options.auto_play);
        assert_eq!(options.easing, "ease");
    }

    #[test]
    fn test_from_json_rejects_zero_iterations() {
        assert!(AnimationOptions::from_json_str(r#"{"iteration": 0}"#).is_err());
    }

    #[test]
    fn test_from_defaults() {
        let defaults = DefaultsConfig {
            duration_ms: 300,
            easing: "linear".to_string(),
            delay_ms: 50,
            auto_play: false,
        };
        let options = AnimationOptions::from_defaults("spin", &defaults);
        assert_eq!(options.animation_name, "spin");
        assert_eq!(options.duration.to_css(), "300ms");
        assert_eq!(options.delay.to_css(), "50ms");
        assert_eq!(options.easing, "linear");
        assert!(!options.auto_play);
    }

    #[test]
    fn test_builder_and_debug() {
        let options = AnimationOptions::new("shake")
            .duration("2s")
            .iteration(IterationCount::Count(3))
            .on_end(|| {});
        let debug = format!("{options:?}");
        assert!(debug.contains("shake"));
        assert!(debug.contains("on_animation_end: true"));
        assert!(debug.contains("on_animation_start: false"));
    }
}
