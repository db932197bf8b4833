//! Per-view variant selection.

use crate::catalog::{VariantDimension, VariantOption, Variants};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Chosen option id per dimension, keyed by lower-cased dimension key.
///
/// Lives for one product view and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    selected: BTreeMap<String, String>,
}

impl SelectionState {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Option id chosen for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.selected.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Replace the entry for `key`. The option id is not validated.
    pub fn select(&mut self, key: &str, option_id: impl Into<String>) {
        self.selected.insert(key.to_lowercase(), option_id.into());
    }

    /// Builder form of [`select`](Self::select).
    pub fn with(mut self, key: &str, option_id: impl Into<String>) -> Self {
        self.select(key, option_id);
        self
    }

    /// Drop the entry for `key`.
    pub fn clear(&mut self, key: &str) -> Option<String> {
        self.selected.remove(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Entries ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selected.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of the underlying map, e.g. for a cart line.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.selected.clone()
    }
}

impl FromIterator<(String, String)> for SelectionState {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut state = SelectionState::new();
        for (key, option_id) in iter {
            state.select(&key, option_id);
        }
        state
    }
}

/// Default selection: the first available option of each dimension, in
/// catalog order. Dimensions with no available option get no entry.
pub fn initialize_selection(variants: &Variants) -> SelectionState {
    variants
        .iter()
        .filter_map(|(key, dimension)| {
            dimension
                .first_available()
                .map(|option| (key.to_lowercase(), option.id.clone()))
        })
        .collect()
}

/// Copy of `state` with `key` set to `option_id`; all other entries are
/// kept as they are.
pub fn set_selection(state: &SelectionState, key: &str, option_id: &str) -> SelectionState {
    state.clone().with(key, option_id)
}

/// The option selected for one dimension, if the entry names an option
/// that exists. A stale entry is logged and treated as no selection.
pub(crate) fn selected_option<'a>(
    key: &str,
    dimension: &'a VariantDimension,
    selection: &SelectionState,
) -> Option<&'a VariantOption> {
    let option_id = selection.get(key)?;
    let option = dimension.option(option_id);
    if option.is_none() {
        debug!(dimension = key, option_id, "selected option not in catalog, ignoring");
    }
    option
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{VariantDimension, VariantOption};

    fn variants() -> Variants {
        let mut variants = Variants::new();
        variants.insert(
            "Color".to_string(),
            VariantDimension::new("Color")
                .with_option(VariantOption::new("olive", "Olive").unavailable())
                .with_option(VariantOption::new("black", "Black"))
                .with_option(VariantOption::new("navy", "Navy")),
        );
        variants.insert(
            "size".to_string(),
            VariantDimension::new("Size").with_option(VariantOption::new("one", "One Size")),
        );
        variants.insert(
            "fit".to_string(),
            VariantDimension::new("Fit").with_option(VariantOption::new("slim", "Slim").unavailable()),
        );
        variants.insert("finish".to_string(), VariantDimension::new("Finish"));
        variants
    }

    #[test]
    fn test_initialize_picks_first_available() {
        let state = initialize_selection(&variants());
        assert_eq!(state.get("color"), Some("black"));
        assert_eq!(state.get("size"), Some("one"));
        assert_eq!(state.get("fit"), None);
        assert_eq!(state.get("finish"), None);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_initialize_is_deterministic() {
        assert_eq!(initialize_selection(&variants()), initialize_selection(&variants()));
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let state = initialize_selection(&variants());
        assert_eq!(state.get("COLOR"), Some("black"));
        let keys: Vec<_> = state.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["color", "size"]);
    }

    #[test]
    fn test_set_selection_replaces_only_one_entry() {
        let state = initialize_selection(&variants());
        let next = set_selection(&state, "Color", "navy");
        assert_eq!(next.get("color"), Some("navy"));
        assert_eq!(next.get("size"), Some("one"));
        // Original untouched
        assert_eq!(state.get("color"), Some("black"));
    }

    #[test]
    fn test_set_selection_accepts_unknown_ids() {
        let state = set_selection(&SelectionState::new(), "color", "chartreuse");
        assert_eq!(state.get("color"), Some("chartreuse"));
    }

    #[test]
    fn test_selected_option_ignores_stale_entry() {
        let variants = variants();
        let color = &variants["Color"];
        let state = SelectionState::new().with("color", "chartreuse");
        assert!(selected_option("Color", color, &state).is_none());

        let state = SelectionState::new().with("color", "navy");
        assert_eq!(selected_option("Color", color, &state).unwrap().value, "Navy");
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let state = SelectionState::new().with("Color", "black");
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({ "color": "black" })
        );
    }
}
