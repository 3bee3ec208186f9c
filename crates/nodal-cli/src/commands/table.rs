//! Column-aligned plain-text tables.

use std::io::{self, Write};

/// A table with `N` columns, padded to the widest cell of each column.
#[derive(Debug, Clone)]
pub(crate) struct Table<const N: usize> {
    header: [&'static str; N],
    rows: Vec<[String; N]>,
}

impl<const N: usize> Table<N> {
    pub fn new(header: [&'static str; N]) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: [String; N]) {
        self.rows.push(row);
    }

    /// Writes the header followed by every row.
    pub fn write(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut widths = self.header.map(|cell| cell.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(out, &widths, self.header.iter().copied())?;
        for row in &self.rows {
            write_row(out, &widths, row.iter().map(String::as_str))?;
        }
        Ok(())
    }
}

fn write_row<'a>(
    out: &mut dyn Write,
    widths: &[usize],
    cells: impl Iterator<Item = &'a str>,
) -> io::Result<()> {
    let line = widths
        .iter()
        .zip(cells)
        .map(|(&width, cell)| format!(" {cell:width$} "))
        .collect::<String>();
    writeln!(out, "{}", line.trim_end())
}
