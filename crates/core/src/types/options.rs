//! Option sets: the variant attributes chosen when a product goes in the cart.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Selected option values keyed by option name (e.g. `size` → `M`).
///
/// Keys are kept sorted, so two sets built in different insertion orders
/// compare equal. An empty set is its own equality class: it equals another
/// empty set (or an absent one, see [`OptionSet::from_optional`]) but never a
/// populated set.
///
/// ```
/// use fakestore_core::OptionSet;
///
/// let a = OptionSet::from_iter([("size", "M"), ("color", "Red")]);
/// let b = OptionSet::from_iter([("color", "Red"), ("size", "M")]);
/// assert_eq!(a, b);
/// assert_ne!(a, OptionSet::new());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, String>);

impl OptionSet {
    /// An empty option set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Treat an absent option set the same as an empty one.
    #[must_use]
    pub fn from_optional(options: Option<Self>) -> Self {
        options.unwrap_or_default()
    }

    /// Set an option, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up the selected value for an option name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Human-readable summary such as `Color: Red, Size: M`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}: {value}", capitalize(name)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// `null` and a missing field both mean "no options".
impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Option::<BTreeMap<String, String>>::deserialize(deserializer)?;
        Ok(Self(map.unwrap_or_default()))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
