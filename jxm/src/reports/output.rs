//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to show using these semantic methods.
/// Implementations decide *how* to render them.
pub trait Output {
    /// Render a heading with an underline.
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn key_value_indented(&mut self, key: &str, value: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render a line the migration inserts.
    fn added_item(&mut self, text: &str);

    /// Render a line the migration replaces.
    fn removed_item(&mut self, text: &str);

    /// Render a warning. Goes to stderr on a terminal.
    fn warning(&mut self, msg: &str);

    /// Render a labelled separator, one per migrated template.
    fn divider(&mut self, label: &str);

    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Width of a divider line, label included.
const DIVIDER_WIDTH: usize = 72;

/// Plain text output on stdout, warnings on stderr.
#[derive(Debug, Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{text}");
        println!("{}", "=".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        println!("  {key}: {value}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn removed_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn divider(&mut self, label: &str) {
        let head = format!("── {label} ");
        let fill = DIVIDER_WIDTH.saturating_sub(head.chars().count()).max(2);
        println!("{head}{}", "─".repeat(fill));
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}
