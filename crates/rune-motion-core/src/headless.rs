//! In-memory [`Document`] implementation.
//!
//! `HeadlessDocument` keeps an element tree with inline styles, the injected
//! stylesheets, a listener table and a manually advanced clock. It performs
//! no timing of its own: lifecycle events are produced with
//! [`dispatch`](HeadlessDocument::dispatch), and scheduled tasks run when the
//! clock is moved with [`advance`](HeadlessDocument::advance).
//!
//! Events bubble from the target to its ancestors, so a listener on a parent
//! also sees lifecycle events of its children, exactly as engines deliver
//! them.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use crate::document::{
    Document, ElementId, LifecycleEvent, LifecycleKind, ListenerFn, ListenerId, TaskFn, TimerId,
};

/// Where an injected stylesheet ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylesheetLocation {
    /// Appended to the document head.
    Head,
    /// Appended to the document root because there is no head.
    Root,
}

/// A style element appended by [`Document::inject_stylesheet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedStylesheet {
    pub css: String,
    pub location: StylesheetLocation,
}

#[derive(Debug, Default)]
struct ElementNode {
    parent: Option<ElementId>,
    styles: BTreeMap<String, String>,
}

struct ListenerEntry {
    id: ListenerId,
    element: ElementId,
    event_name: String,
    handler: ListenerFn,
}

struct PendingTask {
    due: Duration,
    task: TaskFn,
}

#[derive(Default)]
struct Inner {
    next_element: u64,
    next_listener: u64,
    next_timer: u64,
    has_head: bool,
    elements: HashMap<ElementId, ElementNode>,
    supported_properties: HashSet<String>,
    stylesheets: Vec<InjectedStylesheet>,
    listeners: Vec<ListenerEntry>,
    timers: BTreeMap<TimerId, PendingTask>,
    now: Duration,
}

/// Single-threaded in-memory document.
pub struct HeadlessDocument {
    inner: RefCell<Inner>,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    /// Empty document with a head element and no vendor-prefixed properties.
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(Inner {
                has_head: true,
                ..Default::default()
            }),
        }
    }

    /// Mark a style property as recognized by the engine (used for vendor probing).
    pub fn with_supported_property(self, property: &str) -> Self {
        self.inner
            .borrow_mut()
            .supported_properties
            .insert(property.to_string());
        self
    }

    /// Remove the head element; stylesheets then go to the document root.
    pub fn without_head(self) -> Self {
        self.inner.borrow_mut().has_head = false;
        self
    }

    /// Create an element, optionally as a child of `parent`.
    pub fn create_element(&self, parent: Option<ElementId>) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        inner.next_element += 1;
        let id = ElementId(inner.next_element);
        inner.elements.insert(
            id,
            ElementNode {
                parent,
                styles: BTreeMap::new(),
            },
        );
        id
    }

    /// Parent of an element, if any.
    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .and_then(|node| node.parent)
    }

    /// All inline styles of an element, sorted by property name.
    pub fn styles(&self, element: ElementId) -> BTreeMap<String, String> {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .map(|node| node.styles.clone())
            .unwrap_or_default()
    }

    /// Injected stylesheets in insertion order.
    pub fn stylesheets(&self) -> Vec<InjectedStylesheet> {
        self.inner.borrow().stylesheets.clone()
    }

    /// All injected CSS joined by newlines.
    pub fn stylesheet_text(&self) -> String {
        self.inner
            .borrow()
            .stylesheets
            .iter()
            .map(|sheet| sheet.css.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of listeners attached to an element.
    pub fn listener_count(&self, element: ElementId) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.element == element)
            .count()
    }

    /// Current time of the manual clock.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of scheduled tasks that have not run or been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Deliver `event_name` with `target` as origin, bubbling up through the
    /// target's ancestors. Returns the number of handlers invoked.
    ///
    /// Names that are not animation lifecycle events are ignored.
    pub fn dispatch(&self, target: ElementId, event_name: &str) -> usize {
        let Some(kind) = LifecycleKind::from_event_name(event_name) else {
            return 0;
        };

        let handlers: Vec<ListenerFn> = {
            let inner = self.inner.borrow();
            let mut path = Vec::new();
            let mut current = Some(target);
            while let Some(element) = current {
                path.push(element);
                current = inner.elements.get(&element).and_then(|node| node.parent);
            }
            path.iter()
                .flat_map(|element| {
                    inner
                        .listeners
                        .iter()
                        .filter(move |entry| {
                            entry.element == *element && entry.event_name == event_name
                        })
                        .map(|entry| entry.handler.clone())
                })
                .collect()
        };

        let event = LifecycleEvent {
            kind,
            target,
            event_name: event_name.to_string(),
        };
        for handler in &handlers {
            handler(&event);
        }
        handlers.len()
    }

    /// Move the clock forward, running every task that becomes due in
    /// deadline order (ties in scheduling order).
    pub fn advance(&self, delta: Duration) {
        let deadline = {
            let mut inner = self.inner.borrow_mut();
            inner.now += delta;
            inner.now
        };

        loop {
            let task = {
                let mut inner = self.inner.borrow_mut();
                let next = inner
                    .timers
                    .iter()
                    .filter(|(_, pending)| pending.due <= deadline)
                    .min_by_key(|(id, pending)| (pending.due, **id))
                    .map(|(id, _)| *id);
                next.and_then(|id| inner.timers.remove(&id))
            };
            match task {
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
    }
}

impl Document for HeadlessDocument {
    fn set_style(&self, element: ElementId, property: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let node = inner.elements.entry(element).or_default();
        if value.is_empty() {
            node.styles.remove(property);
        } else {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .and_then(|node| node.styles.get(property).cloned())
    }

    fn supports_style_property(&self, property: &str) -> bool {
        self.inner.borrow().supported_properties.contains(property)
    }

    fn inject_stylesheet(&self, css: &str) {
        let mut inner = self.inner.borrow_mut();
        let location = if inner.has_head {
            StylesheetLocation::Head
        } else {
            StylesheetLocation::Root
        };
        inner.stylesheets.push(InjectedStylesheet {
            css: css.to_string(),
            location,
        });
    }

    fn add_listener(
        &self,
        element: ElementId,
        event_name: &str,
        handler: ListenerFn,
    ) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        inner.listeners.push(ListenerEntry {
            id,
            element,
            event_name: event_name.to_string(),
            handler,
        });
        id
    }

    fn remove_listener(&self, element: ElementId, listener: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|entry| !(entry.element == element && entry.id == listener));
    }

    fn schedule(&self, delay: Duration, task: TaskFn) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_timer += 1;
        let id = TimerId(inner.next_timer);
        let due = inner.now + delay;
        inner.timers.insert(id, PendingTask { due, task });
        id
    }

    fn cancel(&self, timer: TimerId) {
        self.inner.borrow_mut().timers.remove(&timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_styles_set_and_clear() {
        let doc = HeadlessDocument::new();
        let el = doc.create_element(None);

        doc.set_style(el, "animation-name", "spin");
        assert_eq!(doc.style(el, "animation-name").as_deref(), Some("spin"));

        doc.set_style(el, "animation-name", "");
        assert_eq!(doc.style(el, "animation-name"), None);
        assert!(doc.styles(el).is_empty());
    }

    #[test]
    fn test_stylesheet_location() {
        let doc = HeadlessDocument::new();
        doc.inject_stylesheet("@keyframes a{}");
        assert_eq!(doc.stylesheets()[0].location, StylesheetLocation::Head);

        let headless = HeadlessDocument::new().without_head();
        headless.inject_stylesheet("@keyframes b{}");
        assert_eq!(headless.stylesheets()[0].location, StylesheetLocation::Root);
        assert_eq!(headless.stylesheet_text(), "@keyframes b{}");
    }

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let doc = HeadlessDocument::new();
        let parent = doc.create_element(None);
        let child = doc.create_element(Some(parent));
        assert_eq!(doc.parent(child), Some(parent));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        doc.add_listener(
            parent,
            "animationend",
            Rc::new(move |event: &LifecycleEvent| sink.borrow_mut().push(event.target)),
        );

        assert_eq!(doc.dispatch(child, "animationend"), 1);
        assert_eq!(doc.dispatch(parent, "animationend"), 1);
        assert_eq!(doc.dispatch(parent, "animationstart"), 0);
        assert_eq!(*seen.borrow(), vec![child, parent]);
    }

    #[test]
    fn test_remove_listener() {
        let doc = HeadlessDocument::new();
        let el = doc.create_element(None);
        let id = doc.add_listener(el, "animationstart", Rc::new(|_: &LifecycleEvent| {}));
        assert_eq!(doc.listener_count(el), 1);

        doc.remove_listener(el, id);
        assert_eq!(doc.listener_count(el), 0);
        assert_eq!(doc.dispatch(el, "animationstart"), 0);
    }

    #[test]
    fn test_timers_run_in_order_and_cancel() {
        let doc = HeadlessDocument::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        doc.schedule(Duration::from_millis(30), Box::new(move || l.borrow_mut().push("late")));
        let l = log.clone();
        doc.schedule(Duration::from_millis(10), Box::new(move || l.borrow_mut().push("early")));
        let l = log.clone();
        let cancelled = doc.schedule(
            Duration::from_millis(20),
            Box::new(move || l.borrow_mut().push("cancelled")),
        );
        doc.cancel(cancelled);
        assert_eq!(doc.pending_timers(), 2);

        doc.advance(Duration::from_millis(15));
        assert_eq!(*log.borrow(), vec!["early"]);

        doc.advance(Duration::from_millis(15));
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(doc.pending_timers(), 0);
        assert_eq!(doc.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_task_may_reenter_document() {
        let doc = Rc::new(HeadlessDocument::new());
        let el = doc.create_element(None);
        let fired = Rc::new(Cell::new(false));

        let d = doc.clone();
        let f = fired.clone();
        doc.schedule(
            Duration::from_millis(5),
            Box::new(move || {
                d.set_style(el, "opacity", "0");
                f.set(true);
            }),
        );
        doc.advance(Duration::from_millis(5));

        assert!(fired.get());
        assert_eq!(doc.style(el, "opacity").as_deref(), Some("0"));
    }
}
