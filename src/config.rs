//! Configuration for index creation, parsing and code completion
//!
//! Builders collect options with sensible defaults and validate everything that
//! would otherwise fail at the C boundary (interior NUL bytes, zero positions)
//! before any libclang call is made.

use std::path::{Path, PathBuf};

use crate::completion::CodeCompleteFlags;
use crate::translation_unit::{TranslationUnitFlags, UnsavedFile};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Parse flags used when none are given
///
/// `KEEP_GOING` keeps unresolved includes from cutting the AST short, which is
/// what inspection tools want.
pub const DEFAULT_PARSE_FLAGS: TranslationUnitFlags = TranslationUnitFlags::KEEP_GOING;

/// Completion flags used when none are given
pub const DEFAULT_COMPLETION_FLAGS: CodeCompleteFlags =
    CodeCompleteFlags::INCLUDE_MACROS.union(CodeCompleteFlags::INCLUDE_BRIEF_COMMENTS);

// ============================================================================
// Errors
// ============================================================================

/// Configuration validation and building errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Missing required configuration field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid compiler arguments
    #[error("Invalid compiler arguments: {args:?} - {reason}")]
    InvalidArguments { args: Vec<String>, reason: String },

    /// Invalid completion position
    #[error("Invalid position {line}:{column} - {reason}")]
    InvalidPosition {
        line: u32,
        column: u32,
        reason: String,
    },

    /// Invalid path format or value
    #[error("Invalid path: {path} - {reason}")]
    InvalidPath { path: String, reason: String },
}

impl ConfigError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(args: Vec<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            args,
            reason: reason.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Core Configuration Types
// ============================================================================

/// Options passed to `clang_createIndex`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexOptions {
    /// Skip declarations that come from a precompiled header
    pub exclude_declarations_from_pch: bool,

    /// Let libclang print diagnostics to stderr while parsing
    pub display_diagnostics: bool,
}

/// Everything needed to parse one translation unit
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Main source file
    pub source_file: PathBuf,

    /// Compiler arguments, without the compiler executable itself
    pub args: Vec<String>,

    /// In-memory contents overriding files on disk
    pub unsaved_files: Vec<UnsavedFile>,

    /// Translation unit flags
    pub flags: TranslationUnitFlags,
}

/// Position and options for one code completion request
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// File the position refers to
    pub file: PathBuf,

    /// 1-based line
    pub line: u32,

    /// 1-based column, in bytes
    pub column: u32,

    /// Completion flags
    pub flags: CodeCompleteFlags,

    /// In-memory contents overriding files on disk
    pub unsaved_files: Vec<UnsavedFile>,

    /// Sort results by typed text before returning them
    pub sort_results: bool,
}

// ============================================================================
// Configuration Builders
// ============================================================================

/// Builder for ParseConfig with validation and defaults
#[derive(Debug, Default)]
pub struct ParseConfigBuilder {
    source_file: Option<PathBuf>,
    args: Vec<String>,
    unsaved_files: Vec<UnsavedFile>,
    flags: Option<TranslationUnitFlags>,
}

impl ParseConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the main source file
    pub fn source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    /// Add a compiler argument
    pub fn add_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple compiler arguments
    pub fn add_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|arg| arg.into()));
        self
    }

    /// Override a file's contents for this parse
    pub fn unsaved_file(mut self, file: UnsavedFile) -> Self {
        self.unsaved_files.push(file);
        self
    }

    /// Set the translation unit flags
    pub fn flags(mut self, flags: TranslationUnitFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Build the configuration with validation
    pub fn build(self) -> Result<ParseConfig, ConfigError> {
        let source_file = self
            .source_file
            .ok_or_else(|| ConfigError::missing_field("source_file"))?;

        validate_path(&source_file)?;
        validate_arguments(&self.args)?;

        Ok(ParseConfig {
            source_file,
            args: self.args,
            unsaved_files: self.unsaved_files,
            flags: self.flags.unwrap_or(DEFAULT_PARSE_FLAGS),
        })
    }
}

/// Builder for CompletionConfig with validation and defaults
#[derive(Debug, Default)]
pub struct CompletionConfigBuilder {
    file: Option<PathBuf>,
    line: Option<u32>,
    column: Option<u32>,
    flags: Option<CodeCompleteFlags>,
    unsaved_files: Vec<UnsavedFile>,
    sort_results: Option<bool>,
}

impl CompletionConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file to complete in
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Set the 1-based line and column to complete at
    pub fn position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Set the completion flags
    pub fn flags(mut self, flags: CodeCompleteFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Override a file's contents for this request
    pub fn unsaved_file(mut self, file: UnsavedFile) -> Self {
        self.unsaved_files.push(file);
        self
    }

    /// Enable or disable sorting of the results
    pub fn sort_results(mut self, enabled: bool) -> Self {
        self.sort_results = Some(enabled);
        self
    }

    /// Build the configuration with validation
    pub fn build(self) -> Result<CompletionConfig, ConfigError> {
        let file = self.file.ok_or_else(|| ConfigError::missing_field("file"))?;
        let line = self.line.ok_or_else(|| ConfigError::missing_field("line"))?;
        let column = self
            .column
            .ok_or_else(|| ConfigError::missing_field("column"))?;

        validate_path(&file)?;
        if line == 0 || column == 0 {
            return Err(ConfigError::InvalidPosition {
                line,
                column,
                reason: "lines and columns are 1-based".to_string(),
            });
        }

        Ok(CompletionConfig {
            file,
            line,
            column,
            flags: self.flags.unwrap_or(DEFAULT_COMPLETION_FLAGS),
            unsaved_files: self.unsaved_files,
            sort_results: self.sort_results.unwrap_or(true),
        })
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let Some(text) = path.to_str() else {
        return Err(ConfigError::invalid_path(
            path.to_string_lossy(),
            "Path is not valid UTF-8",
        ));
    };

    if text.is_empty() {
        return Err(ConfigError::invalid_path(text, "Path cannot be empty"));
    }

    if text.contains('\0') {
        return Err(ConfigError::invalid_path(
            text,
            "Path contains null character",
        ));
    }

    Ok(())
}

fn validate_arguments(args: &[String]) -> Result<(), ConfigError> {
    for arg in args {
        if arg.contains('\0') {
            return Err(ConfigError::invalid_arguments(
                args.to_vec(),
                "Arguments cannot contain null characters",
            ));
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_builder_full() {
        let config = ParseConfigBuilder::new()
            .source_file("src/main.cpp")
            .add_arg("-std=c++17")
            .add_args(["-Iinclude", "-DNDEBUG"])
            .unsaved_file(UnsavedFile::new("src/main.cpp", "int main() {}"))
            .flags(TranslationUnitFlags::SKIP_FUNCTION_BODIES)
            .build()
            .unwrap();

        assert_eq!(config.source_file, PathBuf::from("src/main.cpp"));
        assert_eq!(config.args, vec!["-std=c++17", "-Iinclude", "-DNDEBUG"]);
        assert_eq!(config.unsaved_files.len(), 1);
        assert_eq!(config.flags, TranslationUnitFlags::SKIP_FUNCTION_BODIES);
    }

    #[test]
    fn test_parse_config_defaults() {
        let config = ParseConfigBuilder::new()
            .source_file("a.c")
            .build()
            .unwrap();
        assert!(config.args.is_empty());
        assert_eq!(config.flags, DEFAULT_PARSE_FLAGS);
    }

    #[test]
    fn test_parse_config_missing_source() {
        let result = ParseConfigBuilder::new().build();
        assert!(result.unwrap_err().to_string().contains("source_file"));
    }

    #[test]
    fn test_parse_config_rejects_nul_argument() {
        let result = ParseConfigBuilder::new()
            .source_file("a.c")
            .add_arg("-DNAME=\0")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidArguments { .. })));
    }

    #[test]
    fn test_parse_config_rejects_empty_path() {
        let result = ParseConfigBuilder::new().source_file("").build();
        assert!(matches!(result, Err(ConfigError::InvalidPath { .. })));
    }

    #[test]
    fn test_completion_config_defaults() {
        let config = CompletionConfigBuilder::new()
            .file("main.cpp")
            .position(3, 7)
            .build()
            .unwrap();
        assert_eq!((config.line, config.column), (3, 7));
        assert_eq!(config.flags, DEFAULT_COMPLETION_FLAGS);
        assert!(config.flags.contains(CodeCompleteFlags::INCLUDE_MACROS));
        assert!(config.sort_results);
    }

    #[test]
    fn test_completion_config_rejects_zero_position() {
        let result = CompletionConfigBuilder::new()
            .file("main.cpp")
            .position(0, 1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPosition { .. })));
    }

    #[test]
    fn test_completion_config_missing_position() {
        let result = CompletionConfigBuilder::new().file("main.cpp").build();
        assert!(result.unwrap_err().to_string().contains("line"));
    }
}
