use serde_json::Value;

use super::Parameter;

/// A numeric parameter bounded by an optional inclusive `[min, max]` range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeParameter {
    name: String,
    desc: String,
    default: Value,
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeParameter {
    /// Creates an unbounded numeric parameter.
    pub fn new(name: impl Into<String>, desc: impl Into<String>, default: f64) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            default: Value::from(default),
            min: None,
            max: None,
        }
    }

    /// Sets the inclusive lower bound.
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Returns the lower bound, if any.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Returns the upper bound, if any.
    pub fn max(&self) -> Option<f64> {
        self.max
    }
}

impl Parameter for RangeParameter {
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
        let Some(number) = value.as_f64() else {
            return false;
        };
        if number.is_nan() {
            return false;
        }
        self.min.is_none_or(|min| number >= min) && self.max.is_none_or(|max| number <= max)
    }

    fn parse(&self, text: &str) -> Value {
        let text = text.trim();
        if let Ok(integer) = text.parse::<i64>() {
            return Value::from(integer);
        }
        match text.parse::<f64>() {
            Ok(number) if number.is_finite() => Value::from(number),
            _ => Value::String(text.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_accepts_any_number() {
        let parameter = RangeParameter::new("Value", "", 1.0);
        assert!(parameter.check(&Value::from(-1e9)));
        assert!(parameter.check(&Value::from(5)));
        assert!(!parameter.check(&Value::from("5")));
        assert!(!parameter.check(&Value::Null));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let parameter = RangeParameter::new("Ratio", "", 0.5).with_min(0.0).with_max(1.0);
        assert!(parameter.check(&Value::from(0.0)));
        assert!(parameter.check(&Value::from(1.0)));
        assert!(parameter.check(parameter.default_value()));
        assert!(!parameter.check(&Value::from(-0.1)));
        assert!(!parameter.check(&Value::from(1.5)));
    }

    #[test]
    fn test_parse() {
        let parameter = RangeParameter::new("Value", "", 1.0);
        assert_eq!(parameter.parse("5"), Value::from(5));
        assert_eq!(parameter.parse(" 2.5 "), Value::from(2.5));
        assert_eq!(parameter.parse("five"), Value::from("five"));
    }
}
