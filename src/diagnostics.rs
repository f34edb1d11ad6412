use std::fmt::{self, Display};

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A non-fatal finding about the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Zero-based chapter index, when the finding is about one chapter.
    pub chapter: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn info(chapter: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            chapter,
            message: message.into(),
        }
    }

    pub fn warning(chapter: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            chapter,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Forwards the diagnostic to the `log` facade.
    pub fn log(&self) {
        match self.severity {
            Severity::Info => log::info!("{self}"),
            Severity::Warning => log::warn!("{self}"),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chapter {
            Some(index) => write!(f, "chapter {}: {}", index + 1, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// A value together with the diagnostics produced while computing it.
#[derive(Clone, Debug)]
pub struct Diagnosed<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Diagnosed<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Maps the value, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Diagnosed<U> {
        Diagnosed::new(f(self.value), self.diagnostics)
    }

    /// Feeds the value into another diagnosed step and concatenates the findings.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Diagnosed<U>) -> Diagnosed<U> {
        let Diagnosed {
            value,
            mut diagnostics,
        } = self;
        let next = f(value);
        diagnostics.extend(next.diagnostics);
        Diagnosed::new(next.value, diagnostics)
    }
}
