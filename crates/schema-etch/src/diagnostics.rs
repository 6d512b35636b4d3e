//! Error types and diagnostics
//!
//! This module provides error handling and diagnostic reporting
//! for documentation collection.

use schema_weld::{IntrospectionError, TypeHandle};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};
use thiserror::Error;

/// Result type for schema-etch operations
pub type EtchResult<T> = Result<T, EtchError>;

/// Main error type for schema-etch
#[derive(Debug, Error)]
pub enum EtchError {
    /// The type graph could not describe a type
    #[error("Introspection failed: {0}")]
    Introspection(#[from] IntrospectionError),

    /// Annotations that cannot be turned into one mapping
    #[error("Structural ambiguity at {key}: {message}")]
    StructuralAmbiguity { key: String, message: String },

    /// A chain of transparent ancestors loops back on itself
    #[error("Unterminated cycle in the ancestors of {handle}")]
    UnterminatedCycle { handle: TypeHandle },

    /// A name that would break the key grammar
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EtchError {
    /// Create a structural ambiguity error
    pub fn ambiguity(key: impl Into<String>, message: impl Into<String>) -> Self {
        EtchError::StructuralAmbiguity {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EtchError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        EtchError::Config(message.into())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the mapping cannot be trusted
    Error,
    /// Warning - collection continues
    Warning,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }

    /// Terminal color of the severity label
    pub fn color(&self) -> Color {
        match self {
            DiagnosticSeverity::Error => Color::Red,
            DiagnosticSeverity::Warning => Color::Yellow,
        }
    }
}

/// Code of the diagnostic raised when a key is written twice with different text
pub const KEY_COLLISION: &str = "W001";

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Documentation key the message is about
    pub key: Option<String>,
    /// Diagnostic code (for categorization)
    pub code: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            key: None,
            code: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Set the documentation key
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Write the diagnostic with the severity highlighted
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        if let Some(key) = &self.key {
            w.set_color(ColorSpec::new().set_dimmed(true))?;
            write!(w, "{}", key)?;
            w.reset()?;
            write!(w, ": ")?;
        }
        w.set_color(ColorSpec::new().set_fg(Some(self.severity.color())).set_bold(true))?;
        write!(w, "{}", self.severity.as_str())?;
        w.reset()?;
        if let Some(code) = &self.code {
            write!(w, "[{}]", code)?;
        }
        writeln!(w, ": {}", self.message)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(key) = &self.key {
            write!(f, "{}: ", key)?;
        }
        write!(f, "{}", self.severity.as_str())?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Collector for diagnostics during one collection run
#[derive(Debug, Default, Clone)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consume the collector
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }
}
