//! Capability interface onto the host rendering engine.
//!
//! The registry and controllers never talk to a concrete engine. Everything
//! they need (inline styles, stylesheet injection, lifecycle listeners and a
//! cooperative timer) goes through the [`Document`] trait, so a browser
//! binding, a native renderer or the in-memory
//! [`HeadlessDocument`](crate::headless::HeadlessDocument) can all host them.
//!
//! All methods take `&self`: hosts are single-threaded and use interior
//! mutability. Implementations must not hold internal borrows while invoking
//! listener handlers or timer tasks, since those re-enter the document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle to an element owned by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// Handle returned by [`Document::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Handle returned by [`Document::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Animation lifecycle notifications emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleKind {
    /// The animation started (after its delay).
    Start,
    /// One iteration completed and another begins.
    Iteration,
    /// The final iteration completed.
    End,
}

impl LifecycleKind {
    /// Every lifecycle kind, in listener registration order.
    pub const ALL: [LifecycleKind; 3] = [Self::Start, Self::Iteration, Self::End];

    fn suffix(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Iteration => "Iteration",
            Self::End => "End",
        }
    }

    /// Engine event name for this kind.
    ///
    /// With a vendor namespace the name is `<namespace>Animation<Kind>`
    /// (`webkitAnimationStart`); without one it is the standard lowercase
    /// name (`animationstart`).
    pub fn event_name(self, namespace: Option<&str>) -> String {
        match namespace {
            Some(ns) => format!("{ns}Animation{}", self.suffix()),
            None => format!("animation{}", self.suffix().to_ascii_lowercase()),
        }
    }

    /// Inverse of [`event_name`](Self::event_name) for any namespace.
    pub fn from_event_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| lower.ends_with(&format!("animation{}", kind.suffix().to_ascii_lowercase())))
    }
}

/// A lifecycle notification as delivered to a listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Which lifecycle transition this is.
    pub kind: LifecycleKind,
    /// Element whose animation produced the event. Differs from the element
    /// the listener is attached to when the event bubbled from a descendant.
    pub target: ElementId,
    /// Engine event name the listener was registered under.
    pub event_name: String,
}

/// Listener invoked for lifecycle events.
pub type ListenerFn = Rc<dyn Fn(&LifecycleEvent)>;

/// Deferred work run by the host event loop.
pub type TaskFn = Box<dyn FnOnce()>;

/// Minimal rendering-engine surface used by the motion core.
pub trait Document {
    /// Set an inline style property. An empty value removes the property.
    fn set_style(&self, element: ElementId, property: &str, value: &str);

    /// Current inline value of a style property.
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Whether a (possibly vendor-prefixed) style property is recognized,
    /// probed the way an engine would on a throwaway element.
    fn supports_style_property(&self, property: &str) -> bool;

    /// Append a style element with `css` to the document head, or to the
    /// document root when there is no head.
    fn inject_stylesheet(&self, css: &str);

    /// Attach a listener for `event_name` on `element`.
    fn add_listener(&self, element: ElementId, event_name: &str, handler: ListenerFn)
    -> ListenerId;

    /// Detach a listener. Unknown ids are ignored.
    fn remove_listener(&self, element: ElementId, listener: ListenerId);

    /// Run `task` once after `delay` on the host event loop.
    fn schedule(&self, delay: Duration, task: TaskFn) -> TimerId;

    /// Cancel a scheduled task. Fired or unknown timers are ignored.
    fn cancel(&self, timer: TimerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_with_namespace() {
        assert_eq!(
            LifecycleKind::Start.event_name(Some("webkit")),
            "webkitAnimationStart"
        );
        assert_eq!(
            LifecycleKind::Iteration.event_name(Some("O")),
            "OAnimationIteration"
        );
        assert_eq!(LifecycleKind::End.event_name(Some("moz")), "mozAnimationEnd");
    }

    #[test]
    fn test_event_names_unprefixed() {
        assert_eq!(LifecycleKind::Start.event_name(None), "animationstart");
        assert_eq!(LifecycleKind::Iteration.event_name(None), "animationiteration");
        assert_eq!(LifecycleKind::End.event_name(None), "animationend");
    }

    #[test]
    fn test_from_event_name() {
        for kind in LifecycleKind::ALL {
            assert_eq!(
                LifecycleKind::from_event_name(&kind.event_name(Some("webkit"))),
                Some(kind)
            );
            assert_eq!(LifecycleKind::from_event_name(&kind.event_name(None)), Some(kind));
        }
        assert_eq!(LifecycleKind::from_event_name("click"), None);
    }

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId(7).to_string(), "element#7");
    }
}
