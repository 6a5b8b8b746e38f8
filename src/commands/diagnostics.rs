//! `clang-bridge diagnostics FILE`

use std::fmt;
use std::path::{Path, PathBuf};

use clang_bridge::{
    CompilationDatabase, Diagnostic, DiagnosticDisplayOptions, DiagnosticOption,
    DiagnosticSeverity, FileSpan, IndexOptions, Library, Result,
};
use serde::Serialize;
use tracing::instrument;

use super::{SpanDisplay, parse_config, point_span};

#[derive(Debug, Serialize)]
pub struct FixItEntry {
    pub span: Option<FileSpan>,
    pub replacement: String,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticEntry {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub location: Option<FileSpan>,
    /// The diagnostic as the clang driver would print it
    pub formatted: String,
    pub category: Option<String>,
    pub option: Option<DiagnosticOption>,
    pub fix_its: Vec<FixItEntry>,
}

impl DiagnosticEntry {
    fn from_diagnostic(diagnostic: &Diagnostic<'_>, options: DiagnosticDisplayOptions) -> Self {
        Self {
            severity: diagnostic.severity(),
            message: diagnostic.spelling(),
            location: point_span(&diagnostic.location()),
            formatted: diagnostic.format(options),
            category: diagnostic.category_text(),
            option: diagnostic.option(),
            fix_its: diagnostic
                .fix_its()
                .map(|fix_it| FixItEntry {
                    span: fix_it.range.to_file_span(),
                    replacement: fix_it.replacement,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub file: PathBuf,
    pub diagnostics: Vec<DiagnosticEntry>,
}

impl DiagnosticsReport {
    pub fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|entry| entry.severity.is_error())
    }
}

impl fmt::Display for DiagnosticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.diagnostics {
            writeln!(f, "{}", entry.formatted)?;
            for fix_it in &entry.fix_its {
                if fix_it.replacement.is_empty() {
                    writeln!(f, "  fix-it: remove {}", SpanDisplay(&fix_it.span))?;
                } else {
                    writeln!(
                        f,
                        "  fix-it: replace {} with {:?}",
                        SpanDisplay(&fix_it.span),
                        fix_it.replacement
                    )?;
                }
            }
        }
        let errors =
            self.count(DiagnosticSeverity::Error) + self.count(DiagnosticSeverity::Fatal);
        writeln!(
            f,
            "{}: {} diagnostics ({} errors, {} warnings)",
            self.file.display(),
            self.diagnostics.len(),
            errors,
            self.count(DiagnosticSeverity::Warning)
        )
    }
}

#[instrument(skip(library, database))]
pub fn run(
    library: &Library,
    database: Option<&CompilationDatabase>,
    file: &Path,
    args: &[String],
) -> Result<DiagnosticsReport> {
    let config = parse_config(file, args, database)?;
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&config)?;

    let options = DiagnosticDisplayOptions::default_options();
    let diagnostics = unit
        .diagnostics()
        .map(|diagnostic| DiagnosticEntry::from_diagnostic(&diagnostic, options))
        .collect();

    Ok(DiagnosticsReport {
        file: file.to_path_buf(),
        diagnostics,
    })
}
