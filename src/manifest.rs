//! The keep_variables manifest: the client-held serialization of
//! named widget identities that is embedded in every full page and
//! resubmitted with every action POST.

use std::collections::BTreeMap;

use kstring::KString;
use serde::{Serialize, Deserialize};

use crate::widget::WidgetRef;

/// The form field carrying the manifest in an action POST.
pub const KEEP_VARIABLES_FIELD: &str = "keep_variables";
/// The form field naming the action to dispatch.
pub const ACTION_FIELD: &str = "action";
/// CSRF protection token field; never forwarded as an action argument.
pub const CSRF_TOKEN_FIELD: &str = "csrf_token";
/// Set directly on the page state instead of being passed as an
/// argument.
pub const IDENTIFIER_FIELD: &str = "identifier";

/// Structural page attribute names; these can never be kept slots.
pub const RESERVED_SLOT_NAMES: &[&str] = &[
    "items", "modals", "nav", "container", "base_object", "current_user", "user",
];

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid keep_variables JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0:?} is a structural name and cannot be a kept slot")]
    ReservedName(KString),
    #[error("duplicate kept slot {0:?}")]
    DuplicateName(KString),
}

/// Mapping from kept slot name to widget identity. Serialized as
/// `{name: {"id": .., "class_name": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(BTreeMap<KString, WidgetRef>);

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, widget_ref: WidgetRef)
                  -> Result<(), ManifestError> {
        if RESERVED_SLOT_NAMES.contains(&name) {
            return Err(ManifestError::ReservedName(KString::from_ref(name)));
        }
        if self.0.contains_key(name) {
            return Err(ManifestError::DuplicateName(KString::from_ref(name)));
        }
        self.0.insert(KString::from_ref(name), widget_ref);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&WidgetRef> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KString, &WidgetRef)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a client-submitted manifest. Structural names are
    /// rejected here so that rehydration can never clobber the
    /// page's own attributes.
    pub fn from_json(s: &str) -> Result<Self, ManifestError> {
        let m: Self = serde_json::from_str(s)?;
        for name in m.0.keys() {
            if RESERVED_SLOT_NAMES.contains(&name.as_str()) {
                return Err(ManifestError::ReservedName(name.clone()));
            }
        }
        Ok(m)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect(
            "a map of plain strings always serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wref(id: &str, class_name: &str) -> WidgetRef {
        WidgetRef {
            id: KString::from_ref(id),
            class_name: KString::from_ref(class_name),
        }
    }

    #[test]
    fn t_json_shape() {
        let mut m = Manifest::new();
        m.insert("container", wref("c1", "Container")).unwrap();
        assert_eq!(m.to_json(),
                   "{\"container\":{\"id\":\"c1\",\"class_name\":\"Container\"}}");
    }

    #[test]
    fn t_roundtrip() {
        let mut m = Manifest::new();
        m.insert("rating", wref("r1", "StarRating")).unwrap();
        m.insert("notes", wref("n1", "Collection")).unwrap();
        let m2 = Manifest::from_json(&m.to_json()).unwrap();
        assert_eq!(m, m2);
        assert_eq!(m2.get("rating"), Some(&wref("r1", "StarRating")));
        assert_eq!(m2.get("notes"), Some(&wref("n1", "Collection")));
    }

    #[test]
    fn t_reserved_names_rejected() {
        let mut m = Manifest::new();
        assert!(matches!(m.insert("items", wref("x", "Collection")),
                         Err(ManifestError::ReservedName(_))));
        // ... also on the parse side, against crafted client input:
        let crafted = "{\"nav\":{\"id\":\"n\",\"class_name\":\"NavBar\"}}";
        assert!(matches!(Manifest::from_json(crafted),
                         Err(ManifestError::ReservedName(_))));
    }

    #[test]
    fn t_duplicate_rejected() {
        let mut m = Manifest::new();
        m.insert("rating", wref("r1", "StarRating")).unwrap();
        assert!(matches!(m.insert("rating", wref("r2", "StarRating")),
                         Err(ManifestError::DuplicateName(_))));
    }

    #[test]
    fn t_malformed_json_is_a_parse_error() {
        assert!(matches!(Manifest::from_json("{not json"),
                         Err(ManifestError::Parse(_))));
        assert!(matches!(Manifest::from_json("{\"a\": 42}"),
                         Err(ManifestError::Parse(_))));
    }
}
