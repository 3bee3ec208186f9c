//! `nodal inspect`: the nodes of a graph and their edges.

use std::io::Write;

use nodal_core::prelude::*;

use super::table::Table;

/// Renders pins as `{pin: peers, ...}`.
fn describe_pins<'a>(pins: impl Iterator<Item = &'a Pin>) -> String {
    let pins = pins
        .map(|pin| format!("{}: {}", pin.pin_id(), pin.describe_targets()))
        .collect::<Vec<_>>();
    format!("{{{}}}", pins.join(", "))
}

/// Writes one row per node in id order.
pub(crate) fn run<V, P>(provider: &P, graph: &Graph, out: &mut dyn Write) -> anyhow::Result<()>
where
    P: NodeProvider<V> + ?Sized,
{
    let mut table = Table::new(["Node id", "Type name", "Inputs -> Outputs"]);
    for node in graph.nodes() {
        let node_type = provider.node_type(node.kind())?;
        table.push([
            node.id().to_string(),
            node_type.name().to_owned(),
            format!(
                "{} -> {}",
                describe_pins(node.inputs()),
                describe_pins(node.outputs())
            ),
        ]);
    }
    table.write(out)?;
    Ok(())
}
