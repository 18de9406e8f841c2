// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

//! Minimal column aligner for the `table` command: cells are padded to the
//! widest entry in their column, with four spaces between columns and no
//! trailing padding on the last cell of a row.

pub const COLUMNS: usize = 6;

const GUTTER: &str = "    ";

#[derive(Default)]
pub struct Table {
    rows: Vec<[String; COLUMNS]>,
}

impl Table {
    pub fn push(&mut self, row: [String; COLUMNS]) {
        self.rows.push(row);
    }

    /// Renders all rows as aligned lines, in insertion order.
    pub fn render(&self) -> Vec<String> {
        let mut widths = [0usize; COLUMNS];

        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        self.rows
            .iter()
            .map(|row| {
                let mut line = String::new();

                for (column, cell) in row.iter().enumerate() {
                    if column + 1 == COLUMNS {
                        line.push_str(cell);
                    } else {
                        line.push_str(&format!("{cell:<width$}", width = widths[column]));
                        line.push_str(GUTTER);
                    }
                }

                line.truncate(line.trim_end().len());
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; COLUMNS]) -> [String; COLUMNS] {
        cells.map(str::to_owned)
    }

    #[test]
    fn columns_align_to_the_widest_cell() {
        let mut table = Table::default();
        table.push(row(["0", "laptop", "eDP-1", "(0, 0)", "1920x1080", "primary"]));
        table.push(row(["1", "DP-1", "DP-1", "(1920, 0)", "2560x1440", ""]));

        let lines = table.render();
        assert_eq!(
            lines,
            [
                "0    laptop    eDP-1    (0, 0)       1920x1080    primary",
                "1    DP-1      DP-1     (1920, 0)    2560x1440",
            ]
        );
    }

    #[test]
    fn empty_table_renders_nothing() {
        assert!(Table::default().render().is_empty());
    }
}
