use serde::Serialize;

/// Severity of a diagnostic emitted during analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagLevel {
    Info,
    Warning,
    Error,
}

/// One structured diagnostic, collected during the analysis pass and returned
/// alongside the graph instead of being printed ad hoc. The CLI decides how to
/// present the list; nothing in the pipeline writes to the terminal directly.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub level: DiagLevel,
    pub message: String,
    /// The file the diagnostic refers to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: DiagLevel::Info,
            message: message.into(),
            file: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: DiagLevel::Warning,
            message: message.into(),
            file: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: DiagLevel::Error,
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Print diagnostics to stderr, keeping stdout clean for serialized payloads.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let prefix = match diag.level {
            DiagLevel::Info => "info",
            DiagLevel::Warning => "warning",
            DiagLevel::Error => "error",
        };
        match &diag.file {
            Some(file) => eprintln!("{}: {}: {}", prefix, file, diag.message),
            None => eprintln!("{}: {}", prefix, diag.message),
        }
    }
}
