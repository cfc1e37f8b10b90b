//! Vendor prefix detection for animation properties and events.
//!
//! Engines that shipped CSS animations behind a vendor prefix expect
//! `-webkit-animation-name` and `webkitAnimationEnd` instead of the standard
//! names. Detection probes the document once; the result is cached for the
//! lifetime of the resolver.

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::document::{Document, LifecycleKind};

/// Resolved style prefix and event namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VendorPrefix {
    /// Prepended to animation style properties (`-webkit-`, or empty).
    pub style_prefix: String,
    /// Prepended to lifecycle event names (`webkit`), or `None` for the
    /// standard lowercase event names.
    pub event_namespace: Option<String>,
}

struct VendorCandidate {
    namespace: &'static str,
    probe: &'static str,
}

/// Probed in order; the first recognized property wins.
const CANDIDATES: [VendorCandidate; 3] = [
    VendorCandidate {
        namespace: "webkit",
        probe: "webkitAnimation",
    },
    VendorCandidate {
        namespace: "moz",
        probe: "Animation",
    },
    VendorCandidate {
        namespace: "O",
        probe: "oAnimation",
    },
];

impl VendorPrefix {
    /// No prefix, standard event names.
    pub fn unprefixed() -> Self {
        Self::default()
    }

    /// Prefix for a vendor namespace such as `webkit`, `moz` or `O`.
    /// An empty namespace yields [`unprefixed`](Self::unprefixed).
    pub fn from_namespace(namespace: &str) -> Self {
        let namespace = namespace.trim();
        if namespace.is_empty() {
            return Self::unprefixed();
        }
        Self {
            style_prefix: format!("-{}-", namespace.to_ascii_lowercase()),
            event_namespace: Some(namespace.to_string()),
        }
    }

    /// Whether any vendor prefix is in effect.
    pub fn is_prefixed(&self) -> bool {
        !self.style_prefix.is_empty()
    }

    /// Prefixed style property name, e.g. `animation-name` → `-webkit-animation-name`.
    pub fn property(&self, name: &str) -> String {
        format!("{}{}", self.style_prefix, name)
    }

    /// Engine event name for a lifecycle kind under this namespace.
    pub fn event_name(&self, kind: LifecycleKind) -> String {
        kind.event_name(self.event_namespace.as_deref())
    }
}

/// Detects, once, which vendor namespace the document requires.
#[derive(Debug, Default)]
pub struct VendorPrefixResolver {
    forced: Option<VendorPrefix>,
    resolved: OnceCell<VendorPrefix>,
}

impl VendorPrefixResolver {
    /// Resolver that probes the document on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that skips probing and always answers `prefix`.
    pub fn with_override(prefix: VendorPrefix) -> Self {
        Self {
            forced: Some(prefix),
            resolved: OnceCell::new(),
        }
    }

    /// Resolve the prefix, probing `document` only on the first call.
    ///
    /// Unsupported environments resolve to [`VendorPrefix::unprefixed`].
    pub fn resolve(&self, document: &dyn Document) -> &VendorPrefix {
        self.resolved.get_or_init(|| {
            let prefix = match &self.forced {
                Some(prefix) => prefix.clone(),
                None => probe(document),
            };
            tracing::debug!(
                style_prefix = %prefix.style_prefix,
                event_namespace = ?prefix.event_namespace,
                "resolved animation vendor prefix"
            );
            prefix
        })
    }

    /// The cached prefix, if resolution already happened.
    pub fn cached(&self) -> Option<&VendorPrefix> {
        self.resolved.get()
    }
}

fn probe(document: &dyn Document) -> VendorPrefix {
    CANDIDATES
        .iter()
        .find(|candidate| document.supports_style_property(candidate.probe))
        .map(|candidate| VendorPrefix::from_namespace(candidate.namespace))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDocument;

    #[test]
    fn test_unsupported_environment_is_unprefixed() {
        let doc = HeadlessDocument::new();
        let resolver = VendorPrefixResolver::new();

        let prefix = resolver.resolve(&doc);
        assert_eq!(prefix, &VendorPrefix::unprefixed());
        assert!(!prefix.is_prefixed());
        assert_eq!(prefix.event_name(LifecycleKind::End), "animationend");
    }

    #[test]
    fn test_webkit_detected() {
        let doc = HeadlessDocument::new().with_supported_property("webkitAnimation");
        let prefix = VendorPrefixResolver::new().resolve(&doc).clone();

        assert_eq!(prefix.style_prefix, "-webkit-");
        assert_eq!(prefix.event_namespace.as_deref(), Some("webkit"));
        assert_eq!(prefix.property("animation-name"), "-webkit-animation-name");
        assert_eq!(prefix.event_name(LifecycleKind::Start), "webkitAnimationStart");
    }

    #[test]
    fn test_first_candidate_wins() {
        let doc = HeadlessDocument::new()
            .with_supported_property("oAnimation")
            .with_supported_property("webkitAnimation");
        let prefix = VendorPrefixResolver::new().resolve(&doc).clone();
        assert_eq!(prefix.style_prefix, "-webkit-");

        let doc = HeadlessDocument::new()
            .with_supported_property("oAnimation")
            .with_supported_property("Animation");
        let prefix = VendorPrefixResolver::new().resolve(&doc).clone();
        assert_eq!(prefix.style_prefix, "-moz-");
        assert_eq!(prefix.event_namespace.as_deref(), Some("moz"));
    }

    #[test]
    fn test_opera_namespace() {
        let doc = HeadlessDocument::new().with_supported_property("oAnimation");
        let prefix = VendorPrefixResolver::new().resolve(&doc).clone();
        assert_eq!(prefix.style_prefix, "-o-");
        assert_eq!(prefix.event_name(LifecycleKind::Iteration), "OAnimationIteration");
    }

    #[test]
    fn test_resolution_is_memoized() {
        let webkit = HeadlessDocument::new().with_supported_property("webkitAnimation");
        let plain = HeadlessDocument::new();
        let resolver = VendorPrefixResolver::new();
        assert!(resolver.cached().is_none());

        assert_eq!(resolver.resolve(&webkit).style_prefix, "-webkit-");
        // A different environment no longer matters once resolved.
        assert_eq!(resolver.resolve(&plain).style_prefix, "-webkit-");
        assert!(resolver.cached().is_some());
    }

    #[test]
    fn test_override_skips_probing() {
        let doc = HeadlessDocument::new().with_supported_property("webkitAnimation");
        let resolver = VendorPrefixResolver::with_override(VendorPrefix::unprefixed());
        assert_eq!(resolver.resolve(&doc), &VendorPrefix::unprefixed());
    }

    #[test]
    fn test_from_namespace() {
        assert_eq!(VendorPrefix::from_namespace(""), VendorPrefix::unprefixed());
        assert_eq!(VendorPrefix::from_namespace("moz").style_prefix, "-moz-");
        assert_eq!(VendorPrefix::from_namespace("O").style_prefix, "-o-");
    }
}
