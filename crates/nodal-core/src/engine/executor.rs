//! Graph evaluation engine.

use super::schedule::{incoming_edges, topological_order};
use super::{EngineConfig, ValueTable};
use crate::TRACING_TARGET_ENGINE;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::{Node, NodeId, PinRef};
use crate::provider::NodeProvider;

/// The graph evaluation engine.
///
/// A run orders the whole graph first, so a cycle fails before any node
/// executes. Nodes then execute one at a time; the first failure aborts the
/// run and no partial values are returned.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct Evaluation<V> {
    order: Vec<NodeId>,
    values: ValueTable<V>,
}

impl<V> Evaluation<V> {
    /// Returns the order in which nodes executed.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Returns every produced output value.
    pub fn values(&self) -> &ValueTable<V> {
        &self.values
    }

    /// Returns the value of one output pin.
    pub fn value(&self, node: &str, pin: &str) -> Option<&V> {
        self.values.get(&PinRef::new(node, pin))
    }

    /// Consumes the evaluation, returning the value table.
    pub fn into_values(self) -> ValueTable<V> {
        self.values
    }
}

impl Engine {
    /// Creates a new engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_ENGINE,
            validate_edges = config.validate_edges,
            max_nodes = config.max_nodes,
            "Engine initialized"
        );

        Self { config }
    }

    /// Creates a new engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the execution order of a graph without running it.
    pub fn order(&self, graph: &Graph) -> Result<Vec<NodeId>> {
        topological_order(graph)
    }

    /// Evaluates every node of `graph` in dependency order.
    ///
    /// Each node's operator receives one value per incoming edge, grouped by
    /// input pin in declaration order, and must return one value per output
    /// pin.
    pub fn evaluate<V, P>(&self, provider: &P, graph: &Graph) -> Result<Evaluation<V>>
    where
        V: Clone,
        P: NodeProvider<V> + ?Sized,
    {
        let result = self.run(provider, graph);
        if let Err(error) = &result {
            tracing::warn!(
                target: TRACING_TARGET_ENGINE,
                kind = error.kind_str(),
                node = error.node().map(NodeId::as_str),
                error = %error,
                "Evaluation aborted"
            );
        }
        result
    }

    fn run<V, P>(&self, provider: &P, graph: &Graph) -> Result<Evaluation<V>>
    where
        V: Clone,
        P: NodeProvider<V> + ?Sized,
    {
        if let Some(limit) = self.config.max_nodes {
            if graph.len() > limit {
                return Err(Error::graph_too_large(graph.len(), limit));
            }
        }
        if self.config.validate_edges {
            graph.validate()?;
        }

        let order = topological_order(graph)?;

        tracing::info!(
            target: TRACING_TARGET_ENGINE,
            node_count = order.len(),
            "Starting graph evaluation"
        );

        let mut values = ValueTable::new();
        for node_id in &order {
            let node = graph.node(node_id.as_str())?;
            self.execute_node(provider, graph, node, &mut values)?;
        }

        tracing::info!(
            target: TRACING_TARGET_ENGINE,
            node_count = order.len(),
            value_count = values.len(),
            "Graph evaluation completed"
        );

        Ok(Evaluation { order, values })
    }

    fn execute_node<V, P>(
        &self,
        provider: &P,
        graph: &Graph,
        node: &Node,
        values: &mut ValueTable<V>,
    ) -> Result<()>
    where
        V: Clone,
        P: NodeProvider<V> + ?Sized,
    {
        let node_type = provider
            .node_type(node.kind())
            .map_err(|error| error.with_node(node.id()))?;

        let mut inputs = Vec::new();
        for pin in node.inputs() {
            for peer in incoming_edges(graph, pin) {
                let value = values
                    .get(peer)
                    .cloned()
                    .ok_or_else(|| Error::missing_value(node.id(), peer))?;
                inputs.push(value);
            }
        }

        tracing::debug!(
            target: TRACING_TARGET_ENGINE,
            node_id = %node.id(),
            kind = node.kind(),
            inputs = inputs.len(),
            "Executing node"
        );

        let outputs = node_type
            .operator()
            .compute(node, inputs)
            .map_err(|error| match error.node {
                Some(_) => error,
                None => error.with_node(node.id()),
            })?;

        let expected = node.outputs().count();
        if outputs.len() != expected {
            return Err(Error::node_failed(format!(
                "node {} produced {} values for {expected} output pins",
                node.id(),
                outputs.len()
            ))
            .with_node(node.id()));
        }

        for (pin, value) in node.outputs().zip(outputs) {
            values.insert(node.pin_ref(pin.pin_id()), value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfigBuilder;
    use crate::error::ErrorKind;
    use crate::node::{Arguments, Pin};
    use crate::node_type::NodeType;
    use crate::param::RangeParameter;
    use crate::registry::NodeRegistry;
    use serde_json::Value;

    fn registry() -> NodeRegistry<f64> {
        let number = NodeType::<f64>::builder()
            .id("Number")
            .name("Number")
            .parameter("value", RangeParameter::new("Value", "", 0.0))
            .pin(Pin::output("out", "float").with_multi_connect(true))
            .compute(|node, _| {
                let value = node.argument("value").and_then(Value::as_f64);
                Ok(vec![value.unwrap_or(0.0)])
            })
            .build()
            .unwrap();
        let sum = NodeType::<f64>::builder()
            .id("Sum")
            .name("Sum")
            .pin(Pin::input("first", "float"))
            .pin(Pin::input("rest", "float").with_multi_connect(true))
            .pin(Pin::output("out", "float").with_multi_connect(true))
            .compute(|_, inputs| Ok(vec![inputs.iter().sum()]))
            .build()
            .unwrap();
        let first = NodeType::<f64>::builder()
            .id("First")
            .name("First")
            .pin(Pin::input("in", "float").with_multi_connect(true))
            .pin(Pin::output("out", "float"))
            .compute(|_, inputs| Ok(inputs.into_iter().take(1).collect()))
            .build()
            .unwrap();
        let broken = NodeType::<f64>::builder()
            .id("Broken")
            .name("Broken")
            .pin(Pin::output("out", "float"))
            .compute(|_, _| Err(Error::node_failed("boom")))
            .build()
            .unwrap();
        NodeRegistry::new()
            .with(number)
            .and_then(|r| r.with(sum))
            .and_then(|r| r.with(first))
            .and_then(|r| r.with(broken))
            .unwrap()
    }

    fn number(registry: &NodeRegistry<f64>, id: &str, value: f64) -> Node {
        let mut arguments = Arguments::new();
        arguments.insert("value".into(), Value::from(value));
        registry.create("Number", id, arguments).unwrap()
    }

    fn connect(registry: &NodeRegistry<f64>, graph: &mut Graph, source: &str, destination: &str) {
        let source = source.parse::<PinRef>().unwrap();
        let destination = destination.parse::<PinRef>().unwrap();
        registry.connect(graph, &source, &destination).unwrap();
    }

    #[test]
    fn test_multi_input_values_in_edge_order() {
        let registry = registry();
        let mut graph = Graph::new();
        graph.insert(number(&registry, "n1", 1.0)).unwrap();
        graph.insert(number(&registry, "n2", 2.0)).unwrap();
        graph.insert(number(&registry, "n3", 4.0)).unwrap();
        graph.insert(registry.create("First", "f", Arguments::new()).unwrap()).unwrap();
        graph.insert(registry.create("Sum", "s", Arguments::new()).unwrap()).unwrap();
        connect(&registry, &mut graph, "n3.out", "f.in");
        connect(&registry, &mut graph, "n1.out", "f.in");
        connect(&registry, &mut graph, "n2.out", "s.first");
        connect(&registry, &mut graph, "n1.out", "s.rest");
        connect(&registry, &mut graph, "n3.out", "s.rest");

        let evaluation = Engine::with_defaults().evaluate(&registry, &graph).unwrap();
        assert_eq!(evaluation.value("f", "out"), Some(&4.0));
        assert_eq!(evaluation.value("s", "out"), Some(&7.0));
        assert_eq!(evaluation.order().len(), 5);
    }

    #[test]
    fn test_cycle_executes_nothing() {
        let registry = registry();
        let mut graph = Graph::new();
        graph.insert(registry.create("Sum", "a", Arguments::new()).unwrap()).unwrap();
        graph.insert(registry.create("Sum", "b", Arguments::new()).unwrap()).unwrap();
        connect(&registry, &mut graph, "a.out", "b.first");
        connect(&registry, &mut graph, "b.out", "a.first");

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::GraphCycle);
    }

    #[test]
    fn test_missing_value_for_dangling_edge() {
        let registry = registry();
        let mut graph = Graph::new();
        let node = registry
            .node_type("First")
            .unwrap()
            .load_json(serde_json::json!({
                "node_id": "f",
                "pins": { "in": ["gone|out"], "out": [] }
            }))
            .unwrap();
        graph.insert(node).unwrap();

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingValue);
        assert_eq!(error.node().map(NodeId::as_str), Some("f"));
        assert!(error.to_string().contains("gone.out"));
    }

    #[test]
    fn test_node_failure_is_attributed() {
        let registry = registry();
        let mut graph = Graph::new();
        graph.insert(registry.create("Broken", "x", Arguments::new()).unwrap()).unwrap();

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NodeFailed);
        assert_eq!(error.node().map(NodeId::as_str), Some("x"));
    }

    #[test]
    fn test_output_count_mismatch() {
        let registry = registry();
        let mut graph = Graph::new();
        // First emits nothing when it has no inputs.
        graph.insert(registry.create("First", "f", Arguments::new()).unwrap()).unwrap();

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NodeFailed);
    }

    #[test]
    fn test_max_nodes() {
        let registry = registry();
        let mut graph = Graph::new();
        graph.insert(number(&registry, "n1", 1.0)).unwrap();
        graph.insert(number(&registry, "n2", 2.0)).unwrap();

        let config = EngineConfigBuilder::default().max_nodes(1usize).build().unwrap();
        let error = Engine::new(config)
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::GraphTooLarge);
    }

    #[test]
    fn test_validate_edges_rejects_corrupt_graph() {
        let registry = registry();
        let mut graph = Graph::new();
        graph.insert(number(&registry, "n1", 1.0)).unwrap();
        let node = registry
            .node_type("First")
            .unwrap()
            .load_json(serde_json::json!({
                "node_id": "f",
                "pins": { "in": ["n1|out"], "out": [] }
            }))
            .unwrap();
        graph.insert(node).unwrap();

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InconsistentEdge);

        let config = EngineConfigBuilder::default()
            .validate_edges(false)
            .build()
            .unwrap();
        let evaluation = Engine::new(config).evaluate(&registry, &graph).unwrap();
        assert_eq!(evaluation.value("f", "out"), Some(&1.0));
    }
}
