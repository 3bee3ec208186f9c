//! The `Printer` kind: a sink that writes its inputs on one line.

use std::sync::Arc;

use nodal_core::prelude::*;

use crate::{CATEGORY, FLOAT};

/// Kind id of the printer node.
pub const PRINTER: &str = "Printer";

/// Receives each line a printer node renders.
pub type LineSink = Arc<dyn Fn(&str) + Send + Sync>;

/// A sink writing each line to standard output.
pub fn stdout_sink() -> LineSink {
    Arc::new(|line: &str| println!("{line}"))
}

/// A sink writing each line to standard error.
pub fn stderr_sink() -> LineSink {
    Arc::new(|line: &str| eprintln!("{line}"))
}

/// Builds the `Printer` node type, writing to standard output.
pub fn printer() -> Result<NodeType<f64>> {
    printer_with(stdout_sink())
}

/// Builds the `Printer` node type with a custom line sink.
pub fn printer_with(sink: LineSink) -> Result<NodeType<f64>> {
    let node_type = NodeType::<f64>::builder()
        .id(PRINTER)
        .name("Printer")
        .category(CATEGORY)
        .pin(Pin::input("in", FLOAT).with_multi_connect(true))
        .compute(move |_, inputs| {
            let line = inputs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            sink(&line);
            Ok(Vec::new())
        })
        .build()?;
    Ok(node_type)
}
