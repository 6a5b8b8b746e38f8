//! Subcommands of the `clang-bridge` binary
//!
//! Each command parses one file and turns what libclang reports into a plain
//! report struct. Reports render as text through `Display` and as JSON through
//! `Serialize`.

pub mod completion;
pub mod diagnostics;
pub mod outline;
pub mod references;

use std::fmt;
use std::path::{Path, PathBuf};

use clang_bridge::{
    CompilationDatabase, FileSpan, ParseConfig, ParseConfigBuilder, Result, SourceLocation, Span,
};
use serde::Serialize;
use tracing::debug;

/// Anything a command can print
pub trait Report: Serialize + fmt::Display {}

impl<T: Serialize + fmt::Display> Report for T {}

/// Print a report as text or pretty JSON
pub fn print_report<R: Report>(report: &R, json: bool) -> std::result::Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct VersionReport {
    pub version: String,
}

impl fmt::Display for VersionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.version)
    }
}

/// Where compiler arguments for a file come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentSource {
    CommandLine,
    CompilationDatabase,
    None,
}

/// Compiler arguments for `file`
///
/// Arguments given after `--` win; otherwise the compilation database is
/// consulted with the path as given and then in canonical form.
pub fn resolve_arguments(
    file: &Path,
    explicit: &[String],
    database: Option<&CompilationDatabase>,
) -> (Vec<String>, ArgumentSource) {
    if !explicit.is_empty() {
        return (explicit.to_vec(), ArgumentSource::CommandLine);
    }

    let from_database = database.and_then(|db| {
        db.arguments_for(file).or_else(|| {
            let canonical: PathBuf = file.canonicalize().ok()?;
            db.arguments_for(&canonical)
        })
    });

    match from_database {
        Some(arguments) => (arguments, ArgumentSource::CompilationDatabase),
        None => (Vec::new(), ArgumentSource::None),
    }
}

/// Parse configuration for a command operating on `file`
pub fn parse_config(
    file: &Path,
    explicit: &[String],
    database: Option<&CompilationDatabase>,
) -> Result<ParseConfig> {
    let (arguments, source) = resolve_arguments(file, explicit, database);
    debug!(file = %file.display(), ?source, args = ?arguments, "Resolved compiler arguments");

    Ok(ParseConfigBuilder::new()
        .source_file(file)
        .add_args(arguments)
        .build()?)
}

/// A single-point span for a location, `None` when it has no file
pub fn point_span(location: &SourceLocation<'_>) -> Option<FileSpan> {
    let resolved = location.spelling_location();
    let file = resolved.file?;
    Some(FileSpan {
        file_path: PathBuf::from(file.name()),
        span: Span {
            start: resolved.position,
            end: resolved.position,
        },
    })
}

/// Render an optional span, or `<unknown>`
pub(crate) struct SpanDisplay<'a>(pub &'a Option<FileSpan>);

impl fmt::Display for SpanDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(span) => write!(f, "{span}"),
            None => f.write_str("<unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn database() -> (NamedTempFile, CompilationDatabase) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{
                "directory": "/work",
                "file": "src/app.cpp",
                "arguments": ["clang++", "-Iinclude", "-c", "src/app.cpp"]
            }]"#,
        )
        .unwrap();
        let db = CompilationDatabase::new(file.path().to_path_buf()).unwrap();
        (file, db)
    }

    #[test]
    fn test_explicit_arguments_win() {
        let (_file, db) = database();
        let (arguments, source) =
            resolve_arguments(Path::new("src/app.cpp"), &["-DX".to_string()], Some(&db));
        assert_eq!(arguments, vec!["-DX"]);
        assert_eq!(source, ArgumentSource::CommandLine);
    }

    #[test]
    fn test_database_arguments_are_used() {
        let (_file, db) = database();
        let (arguments, source) = resolve_arguments(Path::new("/work/src/app.cpp"), &[], Some(&db));
        assert_eq!(arguments, vec!["-working-directory=/work", "-Iinclude"]);
        assert_eq!(source, ArgumentSource::CompilationDatabase);
    }

    #[test]
    fn test_no_arguments_without_database_entry() {
        let (_file, db) = database();
        let (arguments, source) = resolve_arguments(Path::new("other.cpp"), &[], Some(&db));
        assert!(arguments.is_empty());
        assert_eq!(source, ArgumentSource::None);

        let (_, source) = resolve_arguments(Path::new("other.cpp"), &[], None);
        assert_eq!(source, ArgumentSource::None);
    }

    #[test]
    fn test_parse_config_carries_arguments() {
        let config = parse_config(Path::new("main.c"), &["-std=c11".to_string()], None).unwrap();
        assert_eq!(config.source_file, PathBuf::from("main.c"));
        assert_eq!(config.args, vec!["-std=c11"]);
    }

    #[test]
    fn test_span_display_unknown() {
        assert_eq!(SpanDisplay(&None).to_string(), "<unknown>");
    }
}
