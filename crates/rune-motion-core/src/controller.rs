//! Per-element animation controllers.
//!
//! An [`Animation`] binds [`AnimationOptions`] to one element. Construction
//! writes the `animation-*` style properties, attaches lifecycle listeners and
//! optionally starts playback. Afterwards the instance is driven with
//! [`play`](Animation::play), [`stop`](Animation::stop),
//! [`revoke`](Animation::revoke) and [`replay`](Animation::replay):
//!
//! ```text
//!            play                 stop
//!   Idle ──────────▶ Playing ◀──────────▶ Paused
//!    ▲                  │        play        │
//!    └──── revoke ──────┴────────────────────┘
//! ```
//!
//! Lifecycle events bubble, so listeners ignore every event whose target is
//! not the bound element. Dropping an `Animation` leaves its listeners
//! attached (they become inert); call [`dispose`](Animation::dispose) to
//! detach them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::EffectCatalog;
use crate::document::{Document, ElementId, LifecycleEvent, LifecycleKind, ListenerId, TimerId};
use crate::options::{AnimationOptions, Callback};
use crate::registry::KeyframeRegistry;
use crate::vendor::VendorPrefix;

/// Delay between the revoke and the play of a replay. The engine coalesces
/// style changes made in the same turn, so the name must stay cleared for a
/// moment to be seen as a fresh start.
pub const REPLAY_DELAY: Duration = Duration::from_millis(50);

/// Observable playback state of an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No animation name applied.
    Idle,
    /// Animation name applied, play-state running.
    Playing,
    /// Animation name applied, play-state paused.
    Paused,
}

/// Factory for animation instances sharing one keyframe registry.
#[derive(Clone)]
pub struct AnimationController {
    registry: Rc<KeyframeRegistry>,
}

impl AnimationController {
    pub fn new(registry: Rc<KeyframeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Rc<KeyframeRegistry> {
        &self.registry
    }

    /// Bind `options` to `element`.
    ///
    /// Preset names that are not defined yet are registered from the
    /// [`EffectCatalog`]. Missing options are a usage error: it is logged and
    /// `None` is returned.
    pub fn apply_animation(
        &self,
        element: ElementId,
        options: Option<AnimationOptions>,
    ) -> Option<Animation> {
        let Some(options) = options else {
            tracing::error!(%element, "options are required for apply_animation");
            return None;
        };

        let name = options.animation_name.as_str();
        if !self.registry.is_defined(name) {
            if let Some(keyframes) = EffectCatalog::get(name) {
                self.registry.define(name, &keyframes);
            }
        }

        Some(Animation::new(self.registry.clone(), element, options))
    }
}

struct PlaybackData {
    element: ElementId,
    options: AnimationOptions,
    playing: bool,
    applied: bool,
    iteration_count: u32,
    listeners: Vec<ListenerId>,
    pending_replay: Option<TimerId>,
}

struct AnimationShared {
    registry: Rc<KeyframeRegistry>,
    document: Rc<dyn Document>,
    prefix: VendorPrefix,
    data: RefCell<PlaybackData>,
}

impl AnimationShared {
    fn element(&self) -> ElementId {
        self.data.borrow().element
    }

    fn set_style(&self, property: &str, value: &str) {
        self.document
            .set_style(self.element(), &self.prefix.property(property), value);
    }

    fn cancel_pending_replay(&self) {
        let pending = self.data.borrow_mut().pending_replay.take();
        if let Some(timer) = pending {
            tracing::trace!(element = %self.element(), "cancelling pending replay");
            self.document.cancel(timer);
        }
    }

    fn play(&self) {
        self.cancel_pending_replay();

        let identifier = {
            let mut data = self.data.borrow_mut();
            data.playing = true;
            data.applied = true;
            let identifier = self.registry.resolve(&data.options.animation_name);
            if identifier.is_none() {
                tracing::debug!(
                    element = %data.element,
                    name = %data.options.animation_name,
                    "animation name is not defined; applying an empty animation-name"
                );
            }
            identifier
        };

        self.set_style("animation-name", identifier.as_deref().unwrap_or(""));
        self.set_style("animation-play-state", "running");
    }

    fn stop(&self) {
        self.cancel_pending_replay();
        self.data.borrow_mut().playing = false;
        self.set_style("animation-play-state", "paused");
    }

    fn revoke(&self) {
        self.cancel_pending_replay();
        {
            let mut data = self.data.borrow_mut();
            data.iteration_count = 0;
            data.playing = false;
            data.applied = false;
        }
        self.set_style("animation-name", "");
    }

    fn handle_lifecycle(&self, event: &LifecycleEvent) {
        let callback: Option<Callback> = {
            let mut data = self.data.borrow_mut();
            if event.target != data.element {
                return;
            }
            match event.kind {
                LifecycleKind::Start => data.options.on_animation_start.clone(),
                LifecycleKind::Iteration => {
                    data.iteration_count += 1;
                    data.options.on_animation_iteration.clone()
                }
                LifecycleKind::End => data.options.on_animation_end.clone(),
            }
        };

        // Invoked with no borrow held: callbacks may drive this instance.
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Playback controller bound to one element.
///
/// Cloning yields another handle to the same instance.
#[derive(Clone)]
pub struct Animation {
    shared: Rc<AnimationShared>,
}

impl Animation {
    /// Construct without consulting the preset catalog.
    ///
    /// Prefer [`AnimationController::apply_animation`], which auto-registers
    /// presets.
    pub fn new(
        registry: Rc<KeyframeRegistry>,
        element: ElementId,
        options: AnimationOptions,
    ) -> Self {
        let document = registry.document().clone();
        let prefix = registry.vendor_prefix().clone();
        let auto_play = options.auto_play;

        let shared = Rc::new(AnimationShared {
            registry,
            document,
            prefix,
            data: RefCell::new(PlaybackData {
                element,
                options,
                playing: false,
                applied: false,
                iteration_count: 0,
                listeners: Vec::new(),
                pending_replay: None,
            }),
        });

        let animation = Self { shared };
        animation.apply_initial_styles();
        animation.attach();

        if auto_play {
            animation.play();
        }
        animation
    }

    fn apply_initial_styles(&self) {
        let styles = {
            let data = self.shared.data.borrow();
            let options = &data.options;
            [
                ("animation-duration", options.duration.to_css()),
                ("animation-timing-function", options.easing.clone()),
                ("animation-delay", options.delay.to_css()),
                ("animation-direction", options.direction.as_css().to_string()),
                ("animation-fill-mode", options.fill_mode.as_css().to_string()),
                (
                    "animation-play-state",
                    if options.auto_play { "running" } else { "paused" }.to_string(),
                ),
                ("animation-iteration-count", options.iteration.to_string()),
            ]
        };
        for (property, value) in &styles {
            self.shared.set_style(property, value);
        }
    }

    fn attach(&self) {
        let element = self.element();
        let listeners: Vec<ListenerId> = LifecycleKind::ALL
            .into_iter()
            .map(|kind| {
                let weak: Weak<AnimationShared> = Rc::downgrade(&self.shared);
                self.shared.document.add_listener(
                    element,
                    &self.shared.prefix.event_name(kind),
                    Rc::new(move |event: &LifecycleEvent| {
                        if let Some(shared) = weak.upgrade() {
                            shared.handle_lifecycle(event);
                        }
                    }),
                )
            })
            .collect();
        self.shared.data.borrow_mut().listeners = listeners;
    }

    /// Apply the registered animation name and set play-state to running.
    ///
    /// An undefined name applies an empty animation-name. A finite animation
    /// that already ended does not restart, because the engine ignores an
    /// unchanged name; use [`replay`](Self::replay) for that.
    pub fn play(&self) {
        self.shared.play();
    }

    /// Pause. Keeps the animation name and iteration count; no end callback fires.
    pub fn stop(&self) {
        self.shared.stop();
    }

    /// Remove the animation entirely and reset the iteration count.
    pub fn revoke(&self) {
        self.shared.revoke();
    }

    /// Revoke now and play again after [`REPLAY_DELAY`].
    ///
    /// The pending play is cancelled by any later `play`, `stop`, `revoke`,
    /// `replay` or `dispose` on this instance.
    pub fn replay(&self) {
        self.shared.revoke();

        let weak = Rc::downgrade(&self.shared);
        let timer = self.shared.document.schedule(
            REPLAY_DELAY,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.data.borrow_mut().pending_replay = None;
                    shared.play();
                }
            }),
        );
        self.shared.data.borrow_mut().pending_replay = Some(timer);
    }

    /// Detach lifecycle listeners and cancel a pending replay.
    ///
    /// Styles are left as they are. Transport methods keep working, but no
    /// further callbacks fire and the iteration count stops advancing.
    pub fn dispose(&self) {
        self.shared.cancel_pending_replay();
        let (element, listeners) = {
            let mut data = self.shared.data.borrow_mut();
            (data.element, std::mem::take(&mut data.listeners))
        };
        for listener in listeners {
            self.shared.document.remove_listener(element, listener);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.shared.data.borrow().playing
    }

    /// Completed iterations since construction or the last revoke.
    pub fn iteration_count(&self) -> u32 {
        self.shared.data.borrow().iteration_count
    }

    pub fn state(&self) -> PlaybackState {
        let data = self.shared.data.borrow();
        match (data.applied, data.playing) {
            (_, true) => PlaybackState::Playing,
            (true, false) => PlaybackState::Paused,
            (false, false) => PlaybackState::Idle,
        }
    }

    /// Whether a replay is waiting for its delay to elapse.
    pub fn has_pending_replay(&self) -> bool {
        self.shared.data.borrow().pending_replay.is_some()
    }

    pub fn element(&self) -> ElementId {
        self.shared.element()
    }

    /// Options this instance was constructed with.
    pub fn options(&self) -> AnimationOptions {
        self.shared.data.borrow().options.clone()
    }
}
