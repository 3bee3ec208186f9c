//! Engine configuration.

use derive_builder::Builder;

/// Configuration for the evaluation engine.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Check edge symmetry and pin arity before scheduling.
    #[builder(default = "true")]
    pub validate_edges: bool,

    /// Largest graph the engine will evaluate.
    #[builder(setter(into, strip_option), default)]
    pub max_nodes: Option<usize>,
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(Some(0)) = self.max_nodes {
            return Err("max_nodes must be at least 1".into());
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_edges: true,
            max_nodes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let config = EngineConfigBuilder::default().build().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_builder_rejects_zero_max_nodes() {
        assert!(EngineConfigBuilder::default().max_nodes(0usize).build().is_err());
        let config = EngineConfigBuilder::default()
            .max_nodes(8usize)
            .validate_edges(false)
            .build()
            .unwrap();
        assert_eq!(config.max_nodes, Some(8));
        assert!(!config.validate_edges);
    }
}
