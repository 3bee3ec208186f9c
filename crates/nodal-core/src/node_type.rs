//! Node types: the factory and computation behind every node kind.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use derive_builder::Builder;

use crate::document::EDGE_DELIMITER;
use crate::error::{Error, Result};
use crate::node::{Arguments, Node, NodeId, Pin};
use crate::param::{Parameter, Parameters};

/// Argument keys reserved by the node document format.
const RESERVED_KEYS: [&str; 2] = ["node_id", "pins"];

/// The computation of a node kind.
///
/// `inputs` holds one value per input edge, grouped by input pin in pin
/// declaration order and by edge order within a pin. The result must hold
/// exactly one value per output pin, in pin declaration order.
pub trait Operator<V>: Send + Sync {
    /// Computes the node's outputs.
    fn compute(&self, node: &Node, inputs: Vec<V>) -> Result<Vec<V>>;
}

impl<V, F> Operator<V> for F
where
    F: Fn(&Node, Vec<V>) -> Result<Vec<V>> + Send + Sync,
{
    fn compute(&self, node: &Node, inputs: Vec<V>) -> Result<Vec<V>> {
        self(node, inputs)
    }
}

/// A node kind: display metadata, parameters, a pin template and an operator.
///
/// # Examples
///
/// ```
/// use nodal_core::prelude::*;
///
/// let negate = NodeType::<f64>::builder()
///     .id("Negate")
///     .name("Negate")
///     .pin(Pin::input("in", "float"))
///     .pin(Pin::output("out", "float").with_multi_connect(true))
///     .compute(|_, inputs| Ok(inputs.into_iter().map(|v| -v).collect()))
///     .build()
///     .unwrap();
///
/// let node = negate.create("n1", Arguments::new()).unwrap();
/// assert_eq!(node.kind(), "Negate");
/// ```
#[derive(Builder)]
#[builder(
    name = "NodeTypeBuilder",
    pattern = "owned",
    setter(into),
    build_fn(validate = "Self::validate")
)]
pub struct NodeType<V> {
    /// Kind identifier, unique within a registry.
    id: String,
    /// Display name.
    name: String,
    /// Grouping tag.
    #[builder(setter(into, strip_option), default)]
    category: Option<String>,
    /// Construction-time parameters in declaration order.
    #[builder(setter(custom), default)]
    parameters: Parameters,
    /// Pins every new node starts with, in declaration order.
    #[builder(setter(custom), default)]
    pins: Vec<Pin>,
    #[builder(setter(custom))]
    operator: Arc<dyn Operator<V>>,
}

impl<V> NodeTypeBuilder<V> {
    /// Declares a parameter under `key`.
    pub fn parameter(
        mut self,
        key: impl Into<String>,
        parameter: impl Parameter + 'static,
    ) -> Self {
        self.parameters
            .get_or_insert_with(Parameters::new)
            .insert(key, Arc::new(parameter));
        self
    }

    /// Appends a pin to the template.
    pub fn pin(mut self, pin: Pin) -> Self {
        self.pins.get_or_insert_with(Vec::new).push(pin);
        self
    }

    /// Sets the computation.
    pub fn operator(mut self, operator: impl Operator<V> + 'static) -> Self {
        self.operator = Some(Arc::new(operator));
        self
    }

    /// Sets the computation from a closure.
    pub fn compute<F>(self, compute: F) -> Self
    where
        F: Fn(&Node, Vec<V>) -> Result<Vec<V>> + Send + Sync + 'static,
        V: 'static,
    {
        self.operator(compute)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(id) = &self.id {
            if id.is_empty() {
                return Err("node type id must not be empty".into());
            }
        }

        if let Some(pins) = &self.pins {
            let mut seen = HashSet::new();
            for pin in pins {
                let pin_id = pin.pin_id();
                if !seen.insert(pin_id) {
                    return Err(format!("duplicate pin id `{pin_id}`"));
                }
                if pin_id.is_empty() || pin_id.contains(EDGE_DELIMITER) || pin_id.contains('.') {
                    return Err(format!("invalid pin id `{pin_id}`"));
                }
                if pin.is_connected() {
                    return Err(format!("template pin `{pin_id}` has edges"));
                }
            }
        }

        if let Some(parameters) = &self.parameters {
            if let Some(key) = parameters.keys().find(|key| RESERVED_KEYS.contains(key)) {
                return Err(format!("parameter key `{key}` is reserved"));
            }
        }

        Ok(())
    }
}

impl From<NodeTypeBuilderError> for Error {
    fn from(error: NodeTypeBuilderError) -> Self {
        Error::invalid_node_type(error.to_string())
    }
}

impl<V> NodeType<V> {
    /// Returns a builder for a new node type.
    pub fn builder() -> NodeTypeBuilder<V> {
        NodeTypeBuilder::default()
    }

    /// Returns the kind identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the grouping tag, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the declared parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Returns the pin template.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Returns the computation.
    pub fn operator(&self) -> &dyn Operator<V> {
        self.operator.as_ref()
    }

    /// Creates a node of this kind.
    ///
    /// Supplied arguments are validated by their parameter; absent ones take
    /// the parameter default. Keys that match no parameter are rejected.
    pub fn create(&self, node_id: impl Into<NodeId>, arguments: Arguments) -> Result<Node> {
        let mut remaining = arguments;
        let arguments = self.resolve_arguments(&mut remaining)?;
        if !remaining.is_empty() {
            return Err(Error::unknown_parameter(&self.id, remaining.keys()));
        }

        Ok(self.instantiate(node_id.into(), arguments))
    }

    /// Builds a node from already resolved arguments, with unconnected pins.
    pub(crate) fn instantiate(&self, node_id: NodeId, arguments: Arguments) -> Node {
        Node::new(node_id, self.id.clone(), self.pins.clone(), arguments)
    }

    /// Takes every declared parameter out of `supplied`, leaving unknown keys behind.
    pub(crate) fn resolve_arguments(&self, supplied: &mut Arguments) -> Result<Arguments> {
        let mut resolved = Arguments::new();
        for (key, parameter) in self.parameters.iter() {
            let value = match supplied.remove(key) {
                Some(value) if parameter.check(&value) => value,
                Some(value) => return Err(Error::invalid_parameter_value(key, &value)),
                None => parameter.default_value().clone(),
            };
            resolved.insert(key.to_owned(), value);
        }
        Ok(resolved)
    }
}

impl<V> Clone for NodeType<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            parameters: self.parameters.clone(),
            pins: self.pins.clone(),
            operator: Arc::clone(&self.operator),
        }
    }
}

impl<V> fmt::Debug for NodeType<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeType")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("parameters", &self.parameters)
            .field("pins", &self.pins)
            .finish_non_exhaustive()
    }
}
