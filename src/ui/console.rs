//! Text rendering of session output.

use crate::image_loader::Preview;
use crate::state::CategoryView;
use crate::ui::ViewRenderer;
use std::io::Write;

/// Writes every render call as a line of text.
pub struct ConsoleView<W: Write> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            log::error!("Failed to write to console: {}", e);
        }
    }
}

impl<W: Write> ViewRenderer for ConsoleView<W> {
    fn render_preview(&mut self, preview: Option<&Preview>) {
        match preview {
            Some(p) => self.line(&format!("[preview {}x{}]", p.width, p.height)),
            None => self.line("[no image]"),
        }
    }

    fn render_status(&mut self, status: &str) {
        self.line(status);
    }

    fn render_categories(&mut self, categories: &[CategoryView]) {
        let labels: Vec<&str> = categories.iter().map(|c| c.label.as_str()).collect();
        self.line(&labels.join(" | "));
    }

    fn render_warning(&mut self, message: &str) {
        self.line(&format!("WARNING: {}", message));
    }
}
