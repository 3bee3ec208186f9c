//! The `Binop` kind: one arithmetic operator over two inputs.

use nodal_core::prelude::*;
use serde_json::Value;
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use crate::{CATEGORY, FLOAT, TRACING_TARGET_MATH};

/// Kind id of the binary operator node.
pub const BINOP: &str = "Binop";

/// Arithmetic operators selectable through the `operator_name` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, EnumIter, EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`, failing on a zero divisor.
    Truediv,
}

impl BinaryOp {
    /// Applies the operator. Returns `None` for a division by zero.
    pub fn apply(self, a: f64, b: f64) -> Option<f64> {
        match self {
            Self::Add => Some(a + b),
            Self::Sub => Some(a - b),
            Self::Mul => Some(a * b),
            Self::Truediv if b == 0.0 => None,
            Self::Truediv => Some(a / b),
        }
    }
}

struct BinopOperator;

impl Operator<f64> for BinopOperator {
    fn compute(&self, node: &Node, inputs: Vec<f64>) -> Result<Vec<f64>> {
        let name = node
            .argument("operator_name")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let op = name
            .parse::<BinaryOp>()
            .map_err(|_| Error::node_failed(format!("unknown operator `{name}`")))?;

        let &[a, b] = inputs.as_slice() else {
            return Err(Error::node_failed(format!(
                "{op} needs 2 operands, got {}",
                inputs.len()
            )));
        };

        let value = op
            .apply(a, b)
            .ok_or_else(|| Error::node_failed(format!("{op}: division by zero")))?;

        tracing::trace!(
            target: TRACING_TARGET_MATH,
            node_id = %node.id(),
            op = op.as_ref(),
            a,
            b,
            value,
            "Binop applied"
        );
        Ok(vec![value])
    }
}

/// Builds the `Binop` node type.
pub fn binop() -> Result<NodeType<f64>> {
    let choices = BinaryOp::iter().map(|op| op.as_ref().to_owned()).collect::<Vec<_>>();
    let node_type = NodeType::<f64>::builder()
        .id(BINOP)
        .name("Binary Operator")
        .category(CATEGORY)
        .parameter(
            "operator_name",
            ChoiceParameter::new("Operator Name", "", BinaryOp::Add.as_ref(), choices),
        )
        .pin(Pin::input("a", FLOAT))
        .pin(Pin::input("b", FLOAT))
        .pin(Pin::output("out", FLOAT).with_multi_connect(true))
        .operator(BinopOperator)
        .build()?;
    Ok(node_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(BinaryOp::Add.apply(5.0, 7.0), Some(12.0));
        assert_eq!(BinaryOp::Sub.apply(5.0, 7.0), Some(-2.0));
        assert_eq!(BinaryOp::Mul.apply(5.0, 7.0), Some(35.0));
        assert_eq!(BinaryOp::Truediv.apply(7.0, 2.0), Some(3.5));
        assert_eq!(BinaryOp::Truediv.apply(7.0, 0.0), None);
    }

    #[test]
    fn test_operator_names() {
        let names = BinaryOp::iter().map(|op| op.to_string()).collect::<Vec<_>>();
        assert_eq!(names, ["add", "sub", "mul", "truediv"]);
        assert_eq!("truediv".parse::<BinaryOp>().unwrap(), BinaryOp::Truediv);
    }

    #[test]
    fn test_create_validates_operator() {
        let kind = binop().unwrap();
        let mut arguments = Arguments::new();
        arguments.insert("operator_name".into(), Value::from("pow"));
        let error = kind.create("a1", arguments).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParameterValue);
    }

    #[test]
    fn test_compute_requires_two_operands() {
        let kind = binop().unwrap();
        let node = kind.create("a1", Arguments::new()).unwrap();
        let error = kind.operator().compute(&node, vec![1.0]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NodeFailed);
        assert_eq!(kind.operator().compute(&node, vec![1.0, 2.0]).unwrap(), vec![3.0]);
    }
}
