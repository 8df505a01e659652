//! Colored status lines on stderr.

use std::path::Path;

use console::{Style, Term};

/// Status line printer for the docsnap commands.
pub(crate) struct Output {
    term: Term,
    label: Style,
    heading: Style,
    done: Style,
    empty: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            heading: Style::new().cyan().bold(),
            done: Style::new().green(),
            empty: Style::new().yellow(),
            failure: Style::new().red(),
        }
    }

    /// Print an unstyled line.
    pub(crate) fn line(&self, msg: &str) {
        self.write(msg);
    }

    /// Print a `Label: path` line with a dimmed label.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        self.write(&format!(
            "{} {}",
            self.label.apply_to(format!("{label}:")),
            path.display()
        ));
    }

    /// Print a section heading.
    pub(crate) fn heading(&self, msg: &str) {
        self.write(&self.heading.apply_to(msg).to_string());
    }

    /// Print an indented per-component summary, yellow when it has no pages.
    pub(crate) fn component(&self, summary: &str, empty: bool) {
        let style = if empty { &self.empty } else { &self.done };
        self.write(&format!("  {}", style.apply_to(summary)));
    }

    /// Print a completion message.
    pub(crate) fn success(&self, msg: &str) {
        self.write(&self.done.apply_to(msg).to_string());
    }

    /// Print an error message.
    pub(crate) fn error(&self, msg: &str) {
        self.write(&self.failure.apply_to(msg).to_string());
    }

    // Status output is best effort; a closed stderr must not fail the run.
    fn write(&self, line: &str) {
        let _ = self.term.write_line(line);
    }
}
