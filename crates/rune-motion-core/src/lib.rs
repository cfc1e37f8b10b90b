//! Keyframe transitions for elements of a rendered document.
//!
//! This crate provides:
//! - **Keyframe Registry**: logical animation names → unique `@keyframes` rules
//!   injected into the document, one per name
//! - **Effect Catalog**: built-in preset effects registered on first use
//! - **Animation Controllers**: per-element play / stop / revoke / replay with
//!   iteration counting and lifecycle callbacks
//! - **Vendor Prefixes**: one-time detection of prefixed animation properties
//!   and events
//!
//! # Architecture
//!
//! ```text
//! AnimationController
//!   ├── KeyframeRegistry ── VendorPrefixResolver
//!   │     └── EffectCatalog (presets)
//!   └── Animation (per element)
//!         └── Document (styles, listeners, timers)
//! ```
//!
//! The rendering engine is reached only through the [`Document`] trait;
//! [`HeadlessDocument`] implements it in memory.

pub mod catalog;
pub mod controller;
pub mod document;
pub mod error;
pub mod headless;
pub mod keyframes;
pub mod options;
pub mod registry;
pub mod vendor;

pub use catalog::EffectCatalog;
pub use controller::{Animation, AnimationController, PlaybackState, REPLAY_DELAY};
pub use document::{
    Document, ElementId, LifecycleEvent, LifecycleKind, ListenerFn, ListenerId, TaskFn, TimerId,
};
pub use error::{MotionError, Result};
pub use headless::{HeadlessDocument, InjectedStylesheet, StylesheetLocation};
pub use keyframes::{KeyframeDescription, KeyframeStep};
pub use options::{
    AnimationDirection, AnimationFillMode, AnimationOptions, Callback, CssTime, IterationCount,
};
pub use registry::KeyframeRegistry;
pub use vendor::{VendorPrefix, VendorPrefixResolver};
