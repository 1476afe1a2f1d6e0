//! Table rendering utilities for CLI outputs.
//! Money columns are right-aligned so the decimal points line up.

use unicode_width::UnicodeWidthStr;

#[derive(Clone, Copy)]
pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub width: usize,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Left,
        }
    }

    pub fn right(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    // Padding is computed on display width, so names with wide or accented
    // characters keep the money columns aligned.
    fn cell(value: &str, col: &Column) -> String {
        let fill = " ".repeat(col.width.saturating_sub(UnicodeWidthStr::width(value)));
        match col.align {
            Align::Left => format!("{}{} ", value, fill),
            Align::Right => format!("{}{} ", fill, value),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header (always left-aligned, with a separator line below)
        for col in &self.columns {
            let w = UnicodeWidthStr::width(col.header.as_str());
            out.push_str(&col.header);
            out.push_str(&" ".repeat(col.width.saturating_sub(w)));
            out.push(' ');
        }
        out.push('\n');
        for col in &self.columns {
            out.push_str(&"-".repeat(col.width));
            out.push(' ');
        }
        out.push('\n');

        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let empty = String::new();
                let value = row.get(i).unwrap_or(&empty);
                out.push_str(&Self::cell(value, col));
            }
            out.push('\n');
        }

        out
    }
}
