//! Terminal listing of collected documentation
//!
//! Shows one line per key, with the type part, category and member name
//! highlighted, followed by the text. Diagnostics of the run, if given, are
//! listed after the entries.
//!
//! # Example
//!
//! ```no_run
//! use schema_etch::printer::DocumentationPrinter;
//! use schema_etch::Documentations;
//!
//! let docs = Documentations::new();
//! let printer = DocumentationPrinter::new(&docs, false);
//! println!("{}", printer);
//! ```

use crate::diagnostics::Diagnostic;
use crate::documentations::Documentations;
use crate::key::{DocKey, KeyCategory};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Terminal documentation printer
pub struct DocumentationPrinter<'a> {
    /// Mapping to print
    documentations: &'a Documentations,
    /// Diagnostics listed after the entries
    diagnostics: &'a [Diagnostic],
    /// Whether to use colored output
    use_color: bool,
}

impl<'a> DocumentationPrinter<'a> {
    /// Create a new printer
    pub fn new(documentations: &'a Documentations, use_color: bool) -> Self {
        Self {
            documentations,
            diagnostics: &[],
            use_color,
        }
    }

    /// Also list the diagnostics of the run
    pub fn with_diagnostics(mut self, diagnostics: &'a [Diagnostic]) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Print to stderr
    pub fn print_to_stderr(&self) {
        let mut stderr = StandardStream::stderr(self.color_choice());
        if let Err(e) = self.write_colored(&mut stderr) {
            eprintln!("Error printing documentation: {}", e);
        }
    }

    fn color_choice(&self) -> ColorChoice {
        if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }

    /// Write the listing to a color-capable writer
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        for (key, text) in self.documentations.iter() {
            self.write_key(w, key)?;
            write!(w, " ")?;
            self.write_gray(w, "=")?;
            writeln!(w, " {}", one_line(text))?;
        }
        self.write_gray(
            w,
            &format!("{} documentation entries\n", self.documentations.len()),
        )?;
        for diagnostic in self.diagnostics {
            diagnostic.write_colored(w)?;
        }
        Ok(())
    }

    fn write_key<W: WriteColor>(&self, w: &mut W, key: &DocKey) -> io::Result<()> {
        let Some(parts) = key.parts() else {
            return write!(w, "{}", key);
        };
        self.write_gray(w, &format!("{{{}}}", parts.namespace))?;
        self.write_bold(w, parts.type_name)?;
        if let Some((category, local)) = parts.member {
            write!(w, "|")?;
            w.set_color(ColorSpec::new().set_fg(Some(category_color(category))))?;
            write!(w, "{}", category)?;
            w.reset()?;
            write!(w, "|")?;
            w.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(w, "{}", local)?;
            w.reset()?;
        }
        Ok(())
    }

    fn write_bold<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_bold(true))?;
        write!(w, "{}", s)?;
        w.reset()
    }

    fn write_gray<W: WriteColor>(&self, w: &mut W, s: &str) -> io::Result<()> {
        w.set_color(ColorSpec::new().set_fg(Some(Color::White)).set_dimmed(true))?;
        write!(w, "{}", s)?;
        w.reset()
    }
}

fn category_color(category: KeyCategory) -> Color {
    match category {
        KeyCategory::Element => Color::Green,
        KeyCategory::Attribute => Color::Yellow,
        KeyCategory::Enumeration => Color::Magenta,
    }
}

/// Collapse line breaks so each entry stays on one line
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Display for DocumentationPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (key, text) in self.documentations.iter() {
            writeln!(f, "{} = {}", key, one_line(text))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Ansi, NoColor};

    fn sample() -> Documentations {
        let a = DocKey::for_type("NS", "a").unwrap();
        let b = a.member(KeyCategory::Element, "b").unwrap();
        vec![
            (a, "some docu\n   about a".to_string()),
            (b, "docu of b".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_display() {
        let docs = sample();
        let printer = DocumentationPrinter::new(&docs, false);
        insta::assert_snapshot!(printer.to_string(), @r###"
        {NS}a = some docu about a
        {NS}a|ELEMENT|b = docu of b
        "###);
    }

    #[test]
    fn test_write_plain() {
        let docs = sample();
        let mut out = NoColor::new(Vec::new());
        DocumentationPrinter::new(&docs, false)
            .write_colored(&mut out)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.starts_with("{NS}a = some docu about a\n"));
        assert!(text.ends_with("2 documentation entries\n"));
    }

    #[test]
    fn test_write_with_diagnostics() {
        let docs = sample();
        let diagnostics = vec![Diagnostic::warning("documentation replaced")
            .at_key("{NS}a|ELEMENT|b")
            .with_code("W001")];
        let mut out = NoColor::new(Vec::new());
        DocumentationPrinter::new(&docs, false)
            .with_diagnostics(&diagnostics)
            .write_colored(&mut out)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.ends_with(
            "2 documentation entries\n{NS}a|ELEMENT|b: warning[W001]: documentation replaced\n"
        ));
    }

    #[test]
    fn test_write_colored() {
        let docs = sample();
        let mut out = Ansi::new(Vec::new());
        DocumentationPrinter::new(&docs, true)
            .write_colored(&mut out)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("ELEMENT"));
    }
}
