//! The `Constant` kind: a source emitting its `value` argument.

use nodal_core::prelude::*;
use serde_json::Value;

use crate::{CATEGORY, FLOAT};

/// Kind id of the constant node.
pub const CONSTANT: &str = "Constant";

/// Builds the `Constant` node type.
pub fn constant() -> Result<NodeType<f64>> {
    let node_type = NodeType::<f64>::builder()
        .id(CONSTANT)
        .name("Constant")
        .category(CATEGORY)
        .parameter("value", RangeParameter::new("Value", "", 1.0))
        .pin(Pin::output("out", FLOAT).with_multi_connect(true))
        .compute(|node, _| {
            let value = node
                .argument("value")
                .and_then(Value::as_f64)
                .ok_or_else(|| Error::node_failed("`value` is not a number"))?;
            Ok(vec![value])
        })
        .build()?;
    Ok(node_type)
}
