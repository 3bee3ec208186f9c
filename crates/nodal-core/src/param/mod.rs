//! Construction-time parameters of a node type.
//!
//! A node type declares an ordered set of [`Parameters`]. When a node is
//! created, every supplied argument is checked by its parameter and every
//! absent one takes the parameter's default.

mod choice;
mod range;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use self::choice::ChoiceParameter;
pub use self::range::RangeParameter;

/// A typed, validated construction-time setting.
///
/// Implementations must keep [`Parameter::check`] pure: it is called once
/// per supplied argument and never for defaults.
pub trait Parameter: fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn desc(&self) -> &str;

    /// Value used when the argument is absent. Defaults are not checked.
    fn default_value(&self) -> &Value;

    /// Returns whether `value` is acceptable for this parameter.
    fn check(&self, value: &Value) -> bool;

    /// Converts a textual argument into a document value.
    fn parse(&self, text: &str) -> Value {
        Value::String(text.to_owned())
    }
}

/// Ordered mapping from argument key to parameter definition.
#[derive(Debug, Clone, Default)]
pub struct Parameters {
    entries: Vec<(String, Arc<dyn Parameter>)>,
}

impl Parameters {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the updated set.
    pub fn with(mut self, key: impl Into<String>, parameter: impl Parameter + 'static) -> Self {
        self.insert(key, Arc::new(parameter));
        self
    }

    /// Inserts a parameter. An existing key keeps its position and is replaced.
    pub fn insert(&mut self, key: impl Into<String>, parameter: Arc<dyn Parameter>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = parameter,
            None => self.entries.push((key, parameter)),
        }
    }

    /// Looks up a parameter by key.
    pub fn get(&self, key: &str) -> Option<&dyn Parameter> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, parameter)| parameter.as_ref())
    }

    /// Returns whether a parameter is declared under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over `(key, parameter)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Parameter)> {
        self.entries
            .iter()
            .map(|(key, parameter)| (key.as_str(), parameter.as_ref()))
    }

    /// Iterates over the keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Returns the number of declared parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> Parameters {
        Parameters::new()
            .with("value", RangeParameter::new("Value", "The constant", 1.0))
            .with(
                "operator_name",
                ChoiceParameter::new("Operator", "The operator", "add", ["add", "sub"]),
            )
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let parameters = parameters();
        let keys = parameters.keys().collect::<Vec<_>>();
        assert_eq!(keys, ["value", "operator_name"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut parameters = parameters();
        parameters.insert(
            "value",
            Arc::new(RangeParameter::new("Value", "Replaced", 2.0)),
        );
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.keys().next(), Some("value"));
        assert_eq!(parameters.get("value").map(|p| p.desc()), Some("Replaced"));
    }

    #[test]
    fn test_default_parse_keeps_text() {
        let parameters = parameters();
        let choice = parameters.get("operator_name").unwrap();
        assert_eq!(choice.parse("sub"), Value::from("sub"));
        assert!(!parameters.contains_key("missing"));
    }
}
