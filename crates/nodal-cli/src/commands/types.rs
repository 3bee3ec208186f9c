//! `nodal types`: the node kinds a provider offers.

use std::io::Write;

use nodal_core::prelude::*;

use super::table::Table;

/// Writes one row per node kind, sorted by category and id.
pub(crate) fn run<V, P>(provider: &P, out: &mut dyn Write) -> anyhow::Result<()>
where
    P: NodeProvider<V> + ?Sized,
{
    let mut table = Table::new(["Category", "Type id", "Type name", "Parameters"]);
    for node_type in provider.node_types() {
        let parameters = node_type.parameters().keys().collect::<Vec<_>>().join(", ");
        table.push([
            node_type.category().unwrap_or_default().to_owned(),
            node_type.id().to_owned(),
            node_type.name().to_owned(),
            format!("[{parameters}]"),
        ]);
    }
    table.write(out)?;
    Ok(())
}
