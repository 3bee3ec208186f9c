//! Prelude module for convenient imports.
//!
//! ```rust
//! use nodal_math::prelude::*;
//! ```

pub use crate::{
    BINOP, BinaryOp, CONSTANT, LineSink, PRINTER, binop, constant, printer, printer_with,
    register, register_with, registry, registry_with, stderr_sink, stdout_sink,
};
