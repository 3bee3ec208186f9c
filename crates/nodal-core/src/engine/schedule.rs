//! Dependency ordering of a graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::TRACING_TARGET_ENGINE;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::{Node, NodeId, Pin, PinIo, PinRef};

/// Returns the edges of `pin` that deliver a value into its node.
///
/// Every edge of an input pin is incoming. On an in-out pin, edges whose
/// peer is a pure input pin carry values out of the node and are skipped.
pub(crate) fn incoming_edges<'a>(
    graph: &'a Graph,
    pin: &'a Pin,
) -> impl Iterator<Item = &'a PinRef> + 'a {
    pin.targets().iter().filter(move |peer| match pin.io() {
        PinIo::In => true,
        PinIo::Out => false,
        PinIo::InOut => !matches!(graph.pin(peer), Ok(peer_pin) if peer_pin.io() == PinIo::In),
    })
}

/// Distinct nodes in the graph that feed any input pin of `node`.
fn predecessors<'a>(graph: &'a Graph, node: &'a Node) -> BTreeSet<&'a NodeId> {
    node.inputs()
        .flat_map(|pin| incoming_edges(graph, pin))
        .filter_map(|peer| graph.get(peer.node.as_str()).map(Node::id))
        .collect()
}

/// Computes an execution order in which every node follows all of its
/// predecessors.
///
/// Nodes are released in waves: each wave holds every node whose
/// predecessors have all been released, in ascending id order. Fails with
/// `GraphCycle`, naming a node on the cycle, if nodes remain that can never
/// be released.
pub fn topological_order(graph: &Graph) -> Result<Vec<NodeId>> {
    let mut pending = BTreeMap::new();
    let mut dependents: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
    let mut dependencies = HashMap::new();

    for node in graph.nodes() {
        let before = predecessors(graph, node);
        for &predecessor in &before {
            dependents.entry(predecessor).or_default().push(node.id());
        }
        pending.insert(node.id(), before.len());
        dependencies.insert(node.id(), before);
    }

    let mut ready = pending
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(&id, _)| id)
        .collect::<Vec<_>>();
    let mut order = Vec::with_capacity(graph.len());
    let mut wave = 0usize;

    while !ready.is_empty() {
        ready.sort();
        tracing::trace!(
            target: TRACING_TARGET_ENGINE,
            wave,
            nodes = ready.len(),
            "Nodes ready"
        );

        let mut next = Vec::new();
        for id in ready.drain(..) {
            pending.remove(id);
            order.push(id.clone());
            for &dependent in dependents.get(id).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        next.push(dependent);
                    }
                }
            }
        }
        ready = next;
        wave += 1;
    }

    match pending.keys().next() {
        None => Ok(order),
        Some(&start) => Err(Error::graph_cycle(cycle_member(start, &pending, &dependencies))),
    }
}

/// Walks unreleased predecessors from `start` until a node repeats.
///
/// Every unreleased node has at least one unreleased predecessor, so the
/// walk always closes on a node that lies on a cycle.
fn cycle_member<'a>(
    start: &'a NodeId,
    pending: &BTreeMap<&'a NodeId, usize>,
    dependencies: &HashMap<&'a NodeId, BTreeSet<&'a NodeId>>,
) -> &'a NodeId {
    let mut visited = BTreeSet::new();
    let mut current = start;
    while visited.insert(current) {
        let next = dependencies
            .get(current)
            .and_then(|before| before.iter().find(|id| pending.contains_key(**id)));
        match next {
            Some(&next) => current = next,
            None => break,
        }
    }
    current
}
