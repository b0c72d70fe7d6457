use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub component: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Collects non-fatal findings during a parse. Purely additive: nothing
/// reads it back to make decisions, so recording a diagnostic can never
/// change what a parse returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, component: &'static str, message: impl Into<String>) {
        self.push(component, Severity::Info, message);
    }

    pub fn warn(&mut self, component: &'static str, message: impl Into<String>) {
        self.push(component, Severity::Warning, message);
    }

    pub fn error(&mut self, component: &'static str, message: impl Into<String>) {
        self.push(component, Severity::Error, message);
    }

    fn push(&mut self, component: &'static str, severity: Severity, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            component,
            severity,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
