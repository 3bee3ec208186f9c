//! The graph container: every node of a session, keyed by id.

use std::collections::{BTreeMap, BTreeSet};

use crate::TRACING_TARGET_GRAPH;
use crate::error::{Error, Result, Side};
use crate::node::{Node, NodeId, Pin, PinRef};

/// The set of nodes of one graph.
///
/// Edges are stored on the pins of both endpoints. Mutations that go through
/// this type keep the two records in sync; [`Graph::validate`] checks a graph
/// that was assembled from documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, keeping whatever edges its pins already record.
    pub fn insert(&mut self, node: Node) -> Result<&Node> {
        let id = node.id().clone();
        if self.nodes.contains_key(&id) {
            return Err(Error::duplicate_node(&id));
        }

        tracing::debug!(
            target: TRACING_TARGET_GRAPH,
            node_id = %id,
            kind = node.kind(),
            "Node inserted"
        );

        Ok(self.nodes.entry(id).or_insert(node))
    }

    /// Removes a node and severs every edge that touches it.
    ///
    /// The returned node has no edges left.
    pub fn remove(&mut self, node_id: &str) -> Result<Node> {
        let mut node = self
            .nodes
            .remove(node_id)
            .ok_or_else(|| Error::unknown_node(node_id))?;

        let id = node.id().clone();
        let mut severed = 0usize;
        for pin in node.pins_mut() {
            let own = PinRef::new(id.clone(), pin.pin_id());
            for peer in pin.take_targets() {
                severed += 1;
                if let Some(peer_pin) = self.pin_mut(&peer) {
                    peer_pin.remove_target(&own);
                }
            }
        }

        tracing::debug!(
            target: TRACING_TARGET_GRAPH,
            node_id = %id,
            severed,
            "Node removed"
        );

        Ok(node)
    }

    /// Looks up a node by id.
    pub fn get(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    /// Looks up a node by id, failing with `UnknownNode`.
    pub fn node(&self, node_id: &str) -> Result<&Node> {
        self.get(node_id)
            .ok_or_else(|| Error::unknown_node(node_id))
    }

    /// Returns whether a node with this id exists.
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Iterates over nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterates over node ids in order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolves a pin reference.
    pub fn pin(&self, pin: &PinRef) -> Result<&Pin> {
        self.node(pin.node.as_str())?
            .pin(&pin.pin)
            .ok_or_else(|| Error::unknown_pin(pin))
    }

    /// Returns the smallest `{prefix}{n}` id (n >= 1) not in use.
    pub fn fresh_id(&self, prefix: &str) -> NodeId {
        let mut n = 1usize;
        loop {
            let candidate = format!("{prefix}{n}");
            if !self.contains(&candidate) {
                return NodeId::new(candidate);
            }
            n += 1;
        }
    }

    /// Checks the edge invariants of every pin.
    ///
    /// A single-connect pin holds at most one edge, and every edge whose peer
    /// pin exists is recorded the same number of times on both ends and runs
    /// from an output to an input of the same type. Edges to nodes or pins
    /// that do not exist are left for evaluation to report.
    pub fn validate(&self) -> Result<()> {
        for node in self.nodes() {
            for pin in node.pins() {
                let own = node.pin_ref(pin.pin_id());
                if !pin.is_multi_connect() && pin.targets().len() > 1 {
                    return Err(Error::inconsistent_edge(
                        &own,
                        format!("holds {} edges but is not multi-connect", pin.targets().len()),
                    ));
                }

                let peers = pin.targets().iter().collect::<BTreeSet<_>>();
                for peer in peers {
                    let Ok(peer_pin) = self.pin(peer) else {
                        continue;
                    };
                    if peer_pin.count_targets(&own) != pin.count_targets(peer) {
                        return Err(Error::inconsistent_edge(
                            &own,
                            format!("edge to {peer} is not recorded on both ends"),
                        ));
                    }
                    if !pin.can_feed(peer_pin) && !peer_pin.can_feed(pin) {
                        return Err(Error::inconsistent_edge(
                            &own,
                            format!("edge to {peer} is not output to input of the same type"),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Records an edge on both pins after checking arity on both sides.
    pub(crate) fn link(&mut self, source: &PinRef, destination: &PinRef) -> Result<()> {
        let source_pin = self.pin(source)?;
        if !source_pin.accepts_connection() {
            return Err(Error::connection_limit_exceeded(Side::Source, source));
        }
        let destination_pin = self.pin(destination)?;
        let same_pin = source == destination;
        if !destination_pin.accepts_connection() || (same_pin && !source_pin.is_multi_connect()) {
            return Err(Error::connection_limit_exceeded(Side::Destination, destination));
        }

        self.pin_mut_or_err(source)?.push_target(destination.clone());
        self.pin_mut_or_err(destination)?.push_target(source.clone());

        tracing::debug!(
            target: TRACING_TARGET_GRAPH,
            source = %source,
            destination = %destination,
            "Pins connected"
        );

        Ok(())
    }

    /// Removes one edge from both pins, failing before any change if either record is absent.
    pub(crate) fn unlink(&mut self, source: &PinRef, destination: &PinRef) -> Result<()> {
        // An edge from a pin to itself is listed twice on that pin.
        let required = if source == destination { 2 } else { 1 };
        let recorded = self.pin(source)?.count_targets(destination) >= required
            && self.pin(destination)?.count_targets(source) >= required;
        if !recorded {
            return Err(Error::edge_not_found(source, destination));
        }

        self.pin_mut_or_err(source)?.remove_target(destination);
        self.pin_mut_or_err(destination)?.remove_target(source);

        tracing::debug!(
            target: TRACING_TARGET_GRAPH,
            source = %source,
            destination = %destination,
            "Pins disconnected"
        );

        Ok(())
    }

    fn pin_mut(&mut self, pin: &PinRef) -> Option<&mut Pin> {
        self.nodes.get_mut(pin.node.as_str())?.pin_mut(&pin.pin)
    }

    fn pin_mut_or_err(&mut self, pin: &PinRef) -> Result<&mut Pin> {
        self.pin_mut(pin).ok_or_else(|| Error::unknown_pin(pin))
    }
}

impl FromIterator<Node> for Graph {
    /// Collects nodes into a graph; a later node replaces an earlier one with the same id.
    fn from_iter<I: IntoIterator<Item = Node>>(nodes: I) -> Self {
        Self {
            nodes: nodes
                .into_iter()
                .map(|node| (node.id().clone(), node))
                .collect(),
        }
    }
}
