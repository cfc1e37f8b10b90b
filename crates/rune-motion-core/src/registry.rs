//! Keyframe registry: logical animation names → generated `@keyframes` identifiers.
//!
//! The registry is append-only. The first [`define`](KeyframeRegistry::define)
//! for a logical name generates an identifier, writes the serialized rule into
//! the document and records the mapping; later definitions under the same
//! name are ignored, so callers pick distinct names for distinct animations.
//!
//! A registry is an explicit object rather than a global. Hosts create one per
//! document, keep it for the document's lifetime and hand it to every
//! [`AnimationController`](crate::controller::AnimationController).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rune_config::MotionConfig;

use crate::document::Document;
use crate::keyframes::KeyframeDescription;
use crate::vendor::{VendorPrefix, VendorPrefixResolver};

pub use rune_config::DEFAULT_ID_PREFIX;

/// Alphabet for the random identifier component. Lowercase ASCII only, so
/// identifiers stay valid CSS custom idents.
const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

const RANDOM_LEN: usize = 6;

/// Maps logical animation names to engine-level keyframe identifiers.
pub struct KeyframeRegistry {
    document: Rc<dyn Document>,
    vendor: VendorPrefixResolver,
    id_prefix: String,
    counter: Cell<u64>,
    definitions: RefCell<HashMap<String, String>>,
}

impl KeyframeRegistry {
    /// Registry that probes `document` for its vendor prefix on first use.
    pub fn new(document: Rc<dyn Document>) -> Self {
        Self {
            document,
            vendor: VendorPrefixResolver::new(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            counter: Cell::new(0),
            definitions: RefCell::new(HashMap::new()),
        }
    }

    /// Registry configured from `[registry]` and `[vendor]`.
    pub fn from_config(document: Rc<dyn Document>, config: &MotionConfig) -> Self {
        let mut registry = Self::new(document).with_id_prefix(&config.registry.id_prefix);
        if let Some(namespace) = &config.vendor.force_prefix {
            registry = registry.with_vendor_override(VendorPrefix::from_namespace(namespace));
        }
        registry
    }

    /// Use `prefix` for generated identifiers. Empty prefixes are ignored.
    pub fn with_id_prefix(mut self, prefix: &str) -> Self {
        if !prefix.is_empty() {
            self.id_prefix = prefix.to_string();
        }
        self
    }

    /// Skip vendor probing and use `prefix`.
    pub fn with_vendor_override(mut self, prefix: VendorPrefix) -> Self {
        self.vendor = VendorPrefixResolver::with_override(prefix);
        self
    }

    /// Document the registry writes rules into.
    pub fn document(&self) -> &Rc<dyn Document> {
        &self.document
    }

    /// Vendor prefix of the document, resolved once.
    pub fn vendor_prefix(&self) -> &VendorPrefix {
        self.vendor.resolve(self.document.as_ref())
    }

    /// Register `keyframes` under `logical_name`.
    ///
    /// No-op when the name is already defined: the first definition wins and
    /// its rule is left untouched.
    pub fn define(&self, logical_name: &str, keyframes: &KeyframeDescription) {
        if self.is_defined(logical_name) {
            tracing::debug!(name = logical_name, "keyframes already defined; ignoring redefinition");
            return;
        }

        let identifier = self.generate_identifier();
        let css = keyframes.to_css(&identifier, self.vendor_prefix());
        self.document.inject_stylesheet(&css);

        tracing::debug!(
            name = logical_name,
            identifier = %identifier,
            steps = keyframes.len(),
            "defined keyframes"
        );
        self.definitions
            .borrow_mut()
            .insert(logical_name.to_string(), identifier);
    }

    /// Generated identifier for `logical_name`, or `None` if not defined yet.
    pub fn resolve(&self, logical_name: &str) -> Option<String> {
        self.definitions.borrow().get(logical_name).cloned()
    }

    pub fn is_defined(&self, logical_name: &str) -> bool {
        self.definitions.borrow().contains_key(logical_name)
    }

    /// Number of defined logical names.
    pub fn len(&self) -> usize {
        self.definitions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.borrow().is_empty()
    }

    /// Defined logical names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// `<prefix><millis base36>-<counter>-<random>`
    ///
    /// The counter alone makes identifiers unique within this registry; the
    /// time and random parts keep them apart across registries and reloads.
    fn generate_identifier(&self) -> String {
        let sequence = self.counter.get() + 1;
        self.counter.set(sequence);

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let random = nanoid::nanoid!(RANDOM_LEN, &ID_ALPHABET);

        format!(
            "{}{}-{}-{}",
            self.id_prefix,
            to_base36(millis),
            sequence,
            random
        )
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ID_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessDocument, StylesheetLocation};

    fn setup() -> (Rc<HeadlessDocument>, KeyframeRegistry) {
        let doc = Rc::new(HeadlessDocument::new());
        let registry = KeyframeRegistry::new(doc.clone());
        (doc, registry)
    }

    fn pulse() -> KeyframeDescription {
        KeyframeDescription::new()
            .frame("0,100", [("opacity", "1")])
            .frame("50", [("opacity", "0")])
    }

    #[test]
    fn test_define_and_resolve() {
        let (doc, registry) = setup();
        assert!(registry.resolve("pulse").is_none());

        registry.define("pulse", &pulse());
        let id = registry.resolve("pulse").unwrap();

        assert!(!id.is_empty());
        assert_ne!(id, "pulse");
        assert!(id.starts_with(DEFAULT_ID_PREFIX));
        assert_eq!(registry.resolve("pulse"), Some(id.clone()));

        let sheets = doc.stylesheets();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].location, StylesheetLocation::Head);
        assert_eq!(
            sheets[0].css,
            format!("@keyframes {id}{{0%{{opacity:1;}}100%{{opacity:1;}}50%{{opacity:0;}}}}")
        );
    }

    #[test]
    fn test_redefinition_is_ignored() {
        let (doc, registry) = setup();
        registry.define("pulse", &pulse());
        let first = registry.resolve("pulse").unwrap();

        registry.define(
            "pulse",
            &KeyframeDescription::new().frame("0", [("transform", "none")]),
        );

        assert_eq!(registry.resolve("pulse"), Some(first));
        assert_eq!(doc.stylesheets().len(), 1);
        assert!(!doc.stylesheet_text().contains("transform"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_identifiers_are_unique() {
        let (_doc, registry) = setup();
        for i in 0..50 {
            registry.define(&format!("anim-{i}"), &pulse());
        }
        let mut ids: Vec<String> = registry
            .names()
            .iter()
            .filter_map(|name| registry.resolve(name))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_identifier_shape() {
        let (_doc, registry) = setup();
        registry.define("a", &pulse());
        let id = registry.resolve("a").unwrap();
        let body = id.strip_prefix(DEFAULT_ID_PREFIX).unwrap();
        let parts: Vec<&str> = body.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], "1");
        assert_eq!(parts[2].len(), RANDOM_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_uses_vendor_prefix() {
        let doc = Rc::new(HeadlessDocument::new().with_supported_property("webkitAnimation"));
        let registry = KeyframeRegistry::new(doc.clone());
        registry.define(
            "spin",
            &KeyframeDescription::new().frame("100", [("transform", "rotate(1turn)")]),
        );

        assert!(doc.stylesheet_text().starts_with("@-webkit-keyframes "));
        assert!(doc.stylesheet_text().contains("-webkit-transform:rotate(1turn);"));
        assert_eq!(registry.vendor_prefix().style_prefix, "-webkit-");
    }

    #[test]
    fn test_injects_into_root_without_head() {
        let doc = Rc::new(HeadlessDocument::new().without_head());
        let registry = KeyframeRegistry::new(doc.clone());
        registry.define("pulse", &pulse());
        assert_eq!(doc.stylesheets()[0].location, StylesheetLocation::Root);
    }

    #[test]
    fn test_from_config() {
        let doc = Rc::new(HeadlessDocument::new().with_supported_property("webkitAnimation"));
        let mut config = MotionConfig::default();
        config.registry.id_prefix = "app-".to_string();
        config.vendor.force_prefix = Some(String::new());

        let registry = KeyframeRegistry::from_config(doc.clone(), &config);
        registry.define("pulse", &pulse());

        assert!(registry.resolve("pulse").unwrap().starts_with("app-"));
        assert!(doc.stylesheet_text().starts_with("@keyframes app-"));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
