//! `nodal evaluate`: run a graph and report its outputs.

use std::fmt::Display;
use std::io::Write;

use anyhow::Context;
use nodal_core::prelude::*;

/// Evaluates `graph`, then writes the execution order and every output value.
pub(crate) fn run<V, P>(
    provider: &P,
    engine: &Engine,
    graph: &Graph,
    out: &mut dyn Write,
) -> anyhow::Result<()>
where
    V: Clone + Display,
    P: NodeProvider<V> + ?Sized,
{
    let evaluation = engine
        .evaluate::<V, P>(provider, graph)
        .context("graph evaluation failed")?;

    let order = evaluation
        .order()
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>();
    writeln!(out, "order: {}", order.join(", "))?;

    for id in evaluation.order() {
        let node = graph.node(id.as_str())?;
        for pin in node.outputs() {
            if let Some(value) = evaluation.value(id.as_str(), pin.pin_id()) {
                writeln!(out, "{} = {value}", node.pin_ref(pin.pin_id()))?;
            }
        }
    }
    Ok(())
}
