use serde_json::Value;

use super::Parameter;

/// A parameter whose value must be one of an enumerated list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceParameter {
    name: String,
    desc: String,
    default: Value,
    choices: Vec<Value>,
}

impl ChoiceParameter {
    /// Creates a choice parameter.
    pub fn new<I, C>(
        name: impl Into<String>,
        desc: impl Into<String>,
        default: impl Into<Value>,
        choices: I,
    ) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Value>,
    {
        Self {
            name: name.into(),
            desc: desc.into(),
            default: default.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the accepted values.
    pub fn choices(&self) -> &[Value] {
        &self.choices
    }
}

impl Parameter for ChoiceParameter {
    fn name(&self) -> &str {
        &self.name
    }

    fn desc(&self) -> &str {
        &self.desc
    }

    fn default_value(&self) -> &Value {
        &self.default
    }

    fn check(&self, value: &Value) -> bool {
        self.choices.contains(value)
    }

    fn parse(&self, text: &str) -> Value {
        // Non-string choices are matched by their rendered form.
        self.choices
            .iter()
            .find(|choice| match choice {
                Value::String(choice) => choice == text,
                other => other.to_string() == text,
            })
            .cloned()
            .unwrap_or_else(|| Value::String(text.to_owned()))
    }
}
