/// A plain-text table for the console output area
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
        }
    }

    /// Add a row; cells beyond the header count are dropped
    pub fn add_row(&mut self, row: Vec<String>) {
        let row: Vec<String> = row.into_iter().take(self.headers.len()).collect();
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(row);
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&self.headers));
        lines.push(
            self.col_widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.join("\n")
    }

    fn render_row(&self, row: &[String]) -> String {
        self.col_widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }
}
