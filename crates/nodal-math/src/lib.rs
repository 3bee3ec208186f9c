#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod binop;
mod constant;
mod printer;

#[doc(hidden)]
pub mod prelude;

use nodal_core::Result;
use nodal_core::registry::NodeRegistry;

pub use crate::binop::{BINOP, BinaryOp, binop};
pub use crate::constant::{CONSTANT, constant};
pub use crate::printer::{
    LineSink, PRINTER, printer, printer_with, stderr_sink, stdout_sink,
};

/// Tracing target for arithmetic node computations.
pub const TRACING_TARGET_MATH: &str = "nodal_math";

/// Category shared by every kind in this crate.
pub const CATEGORY: &str = "math";

/// Type tag of every pin in this crate.
pub const FLOAT: &str = "float";

/// Registers `Constant`, `Printer` and `Binop` into `registry`.
///
/// Printer nodes write to standard output.
pub fn register(registry: &mut NodeRegistry<f64>) -> Result<()> {
    register_with(registry, stdout_sink())
}

/// Registers the arithmetic kinds with printers writing to `sink`.
pub fn register_with(registry: &mut NodeRegistry<f64>, sink: LineSink) -> Result<()> {
    registry.register(constant()?)?;
    registry.register(printer_with(sink)?)?;
    registry.register(binop()?)?;
    Ok(())
}

/// Builds a registry holding only the arithmetic kinds.
pub fn registry() -> Result<NodeRegistry<f64>> {
    registry_with(stdout_sink())
}

/// Builds a registry of the arithmetic kinds with printers writing to `sink`.
pub fn registry_with(sink: LineSink) -> Result<NodeRegistry<f64>> {
    let mut registry = NodeRegistry::new();
    register_with(&mut registry, sink)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use nodal_core::prelude::*;
    use serde_json::{Value, json};

    use super::*;

    fn arguments(pairs: &[(&str, Value)]) -> Arguments {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn connect(
        registry: &NodeRegistry<f64>,
        graph: &mut Graph,
        source: &str,
        destination: &str,
    ) -> Result<()> {
        let source = source.parse::<PinRef>()?;
        let destination = destination.parse::<PinRef>()?;
        registry.connect(graph, &source, &destination)
    }

    /// `v1 = 5`, `v2 = 7`, `a1 = v1 + v2`, `s1 = v1 - v2`.
    fn arithmetic(registry: &NodeRegistry<f64>) -> Graph {
        let mut graph = Graph::new();
        let nodes = [
            (CONSTANT, "v1", arguments(&[("value", json!(5))])),
            (CONSTANT, "v2", arguments(&[("value", json!(7))])),
            (BINOP, "a1", arguments(&[("operator_name", json!("add"))])),
            (BINOP, "s1", arguments(&[("operator_name", json!("sub"))])),
        ];
        for (kind, id, arguments) in nodes {
            graph.insert(registry.create(kind, id, arguments).unwrap()).unwrap();
        }
        for (source, destination) in [
            ("v1.out", "a1.a"),
            ("v2.out", "a1.b"),
            ("v1.out", "s1.a"),
            ("v2.out", "s1.b"),
        ] {
            connect(registry, &mut graph, source, destination).unwrap();
        }
        graph
    }

    fn position(order: &[NodeId], id: &str) -> usize {
        order.iter().position(|node| node == id).unwrap()
    }

    #[test]
    fn test_add_and_sub() {
        let registry = registry().unwrap();
        let graph = arithmetic(&registry);
        let evaluation = Engine::with_defaults().evaluate(&registry, &graph).unwrap();

        let order = evaluation.order();
        assert!(position(order, "v1") < position(order, "a1"));
        assert!(position(order, "v2") < position(order, "a1"));
        assert!(position(order, "v1") < position(order, "s1"));
        assert_eq!(order.len(), 4);
        assert_eq!(evaluation.value("a1", "out"), Some(&12.0));
        assert_eq!(evaluation.value("s1", "out"), Some(&-2.0));
    }

    /// A registry whose printer records lines instead of writing them.
    fn capturing_registry() -> (NodeRegistry<f64>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let sink: LineSink = Arc::new(move |line: &str| {
            captured.lock().unwrap().push(line.to_owned());
        });

        (registry_with(sink).unwrap(), lines)
    }

    #[test]
    fn test_printer_receives_values_in_edge_order() {
        let (registry, lines) = capturing_registry();
        let mut graph = arithmetic(&registry);
        graph
            .insert(registry.create(PRINTER, "p1", Arguments::new()).unwrap())
            .unwrap();
        connect(&registry, &mut graph, "a1.out", "p1.in").unwrap();
        connect(&registry, &mut graph, "s1.out", "p1.in").unwrap();

        let evaluation = Engine::with_defaults().evaluate(&registry, &graph).unwrap();
        assert_eq!(evaluation.order().last().map(NodeId::as_str), Some("p1"));
        assert_eq!(*lines.lock().unwrap(), ["12 -2"]);
    }

    #[test]
    fn test_every_kind_round_trips() {
        let registry = registry().unwrap();
        for node_type in registry.node_types() {
            let node = node_type.create("n1", Arguments::new()).unwrap();
            let document = node.to_json().unwrap();
            assert_eq!(node_type.load_json(document).unwrap(), node, "{}", node_type.id());
        }
    }

    #[test]
    fn test_node_types_listing() {
        let registry = registry().unwrap();
        let ids = registry
            .node_types()
            .into_iter()
            .map(NodeType::id)
            .collect::<Vec<_>>();
        assert_eq!(ids, [BINOP, CONSTANT, PRINTER]);
    }

    #[test]
    fn test_incompatible_connections() {
        let registry = registry().unwrap();
        let mut graph = arithmetic(&registry);
        let attempts = [("a1.a", "s1.b"), ("v1.out", "v2.out"), ("a1.a", "v1.out")];
        for (source, destination) in attempts {
            let error = connect(&registry, &mut graph, source, destination).unwrap_err();
            let kind = error.kind();
            assert_eq!(kind, ErrorKind::IncompatibleConnection, "{source} -> {destination}");
        }
    }

    #[test]
    fn test_connection_limit_keeps_existing_edge() {
        let registry = registry().unwrap();
        let mut graph = arithmetic(&registry);
        let before = graph.pin(&PinRef::new("a1", "a")).unwrap().targets().to_vec();

        let error = connect(&registry, &mut graph, "v2.out", "a1.a").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ConnectionLimitExceeded);
        assert_eq!(graph.pin(&PinRef::new("a1", "a")).unwrap().targets(), before.as_slice());
        assert_eq!(
            graph.pin(&PinRef::new("v2", "out")).unwrap().targets(),
            &[PinRef::new("a1", "b"), PinRef::new("s1", "b")]
        );
    }

    #[test]
    fn test_disconnect_removes_exactly_one_edge() {
        let registry = registry().unwrap();
        let mut graph = arithmetic(&registry);
        let (source, destination) = (PinRef::new("v1", "out"), PinRef::new("a1", "a"));
        registry.disconnect(&mut graph, &source, &destination).unwrap();

        assert_eq!(graph.pin(&source).unwrap().targets(), &[PinRef::new("s1", "a")]);
        assert!(!graph.pin(&destination).unwrap().is_connected());
        assert_eq!(graph.pin(&PinRef::new("a1", "b")).unwrap().targets().len(), 1);
    }

    #[test]
    fn test_cycle_executes_no_node() {
        let (registry, lines) = capturing_registry();
        let mut graph = Graph::new();
        graph
            .insert(registry.create(PRINTER, "p0", Arguments::new()).unwrap())
            .unwrap();
        for id in ["a", "b"] {
            graph.insert(registry.create(BINOP, id, Arguments::new()).unwrap()).unwrap();
        }
        connect(&registry, &mut graph, "a.out", "b.a").unwrap();
        connect(&registry, &mut graph, "b.out", "a.a").unwrap();

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::GraphCycle);
        // The unconnected printer is ready first; it must not have run.
        assert!(lines.lock().unwrap().is_empty());
    }

    #[test]
    fn test_division_by_zero_fails_node() {
        let registry = registry().unwrap();
        let mut graph = arithmetic(&registry);
        graph
            .insert(
                registry
                    .create(BINOP, "d1", arguments(&[("operator_name", json!("truediv"))]))
                    .unwrap(),
            )
            .unwrap();
        graph
            .insert(
                registry
                    .create(CONSTANT, "z", arguments(&[("value", json!(0))]))
                    .unwrap(),
            )
            .unwrap();
        connect(&registry, &mut graph, "a1.out", "d1.a").unwrap();
        connect(&registry, &mut graph, "z.out", "d1.b").unwrap();

        let error = Engine::with_defaults()
            .evaluate::<f64, _>(&registry, &graph)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NodeFailed);
        assert_eq!(error.node().map(NodeId::as_str), Some("d1"));
    }

    #[test]
    fn test_document_missing_pin_and_extra_key() {
        let registry = registry().unwrap();
        let error = registry
            .load_json(
                BINOP,
                json!({ "node_id": "a1", "pins": { "a": [], "out": [] }, "operator_name": "add" }),
            )
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedGraphDocument);

        let error = registry
            .load_json(
                CONSTANT,
                json!({ "node_id": "v1", "pins": { "out": [] }, "value": 5, "extra": true }),
            )
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedGraphDocument);
    }

    #[test]
    fn test_graph_document_round_trip() {
        let registry = registry().unwrap();
        let graph = arithmetic(&registry);
        let text = graph.to_document().unwrap().to_json_pretty().unwrap();
        let loaded = Graph::from_document(&registry, text.parse().unwrap()).unwrap();
        assert_eq!(loaded, graph);
    }
}
