use std::io::{self, Write};
use std::path::PathBuf;

/// The session's single output region: status text plus the latest chart.
///
/// Commands print into it; the console flushes it after every command.
pub struct OutputArea {
    chart_path: PathBuf,
    lines: Vec<String>,
    chart: Option<Vec<u8>>,
    cleared: bool,
}

impl OutputArea {
    pub fn new(chart_path: PathBuf) -> Self {
        Self {
            chart_path,
            lines: Vec::new(),
            chart: None,
            cleared: false,
        }
    }

    pub fn print(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Drop anything not yet shown, including a pending chart
    pub fn clear(&mut self) {
        self.lines.clear();
        self.chart = None;
        self.cleared = true;
    }

    pub fn show_chart(&mut self, png: Vec<u8>) {
        self.chart = Some(png);
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Write pending text to `out` and the pending chart to the chart path
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if std::mem::take(&mut self.cleared) {
            writeln!(out, "{}", "─".repeat(60))?;
        }
        for line in self.lines.drain(..) {
            writeln!(out, "{}", line)?;
        }
        if let Some(png) = self.chart.take() {
            std::fs::write(&self.chart_path, &png)?;
            writeln!(out, "📈 Chart written to {}", self.chart_path.display())?;
        }
        out.flush()
    }
}
