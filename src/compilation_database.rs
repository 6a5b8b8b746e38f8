use json_compilation_db::Entry;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CompilationDatabaseError {
    #[error("Compilation database file not found: {path}")]
    FileNotFound { path: String },
    #[error("Failed to read compilation database file: {error}")]
    ReadError { error: String },
    #[error("Failed to parse compilation database JSON: {error}")]
    ParseError { error: String },
    #[error("Compilation database is empty")]
    EmptyDatabase,
}

/// A loaded `compile_commands.json`
///
/// Entries are turned into libclang command lines with
/// [`CompilationDatabase::arguments_for`]. When serialized, only the path is
/// written.
#[derive(Debug)]
pub struct CompilationDatabase {
    /// Path to the compilation database file (compile_commands.json)
    pub path: PathBuf,
    /// Parsed compilation database entries (loaded at initialization)
    pub entries: Vec<Entry>,
}

impl CompilationDatabase {
    /// Load and parse the compilation database at `path`
    pub fn new(path: PathBuf) -> Result<Self, CompilationDatabaseError> {
        if !path.exists() {
            return Err(CompilationDatabaseError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let file = std::fs::File::open(&path).map_err(|e| CompilationDatabaseError::ReadError {
            error: e.to_string(),
        })?;

        let reader = std::io::BufReader::new(file);
        let entries: Vec<Entry> =
            serde_json::from_reader(reader).map_err(|e| CompilationDatabaseError::ParseError {
                error: e.to_string(),
            })?;

        if entries.is_empty() {
            return Err(CompilationDatabaseError::EmptyDatabase);
        }

        debug!(path = %path.display(), entries = entries.len(), "Loaded compilation database");
        Ok(Self { path, entries })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Check if the database contains an entry for the specified file
    ///
    /// `file_path` may be spelled as in the entry or as the entry's directory
    /// joined with its file.
    pub fn contains_file(&self, file_path: &Path) -> bool {
        self.entry_for(file_path).is_some()
    }

    /// Get all unique source files referenced in the compilation database
    pub fn source_files(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = self
            .entries
            .iter()
            .map(|entry| entry.file.as_path())
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Get all unique directories referenced in the compilation database
    pub fn directories(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = self
            .entries
            .iter()
            .map(|entry| entry.directory.as_path())
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }

    fn entry_for(&self, file_path: &Path) -> Option<&Entry> {
        self.entries.iter().find(|entry| {
            entry.file == file_path || entry.directory.join(&entry.file) == file_path
        })
    }

    /// Compiler arguments for `file_path`, ready for libclang
    ///
    /// The compiler executable, the source file itself, `-c` and `-o <out>`
    /// are dropped, and `-working-directory=<dir>` is prepended so relative
    /// include paths resolve against the entry's directory. The first entry
    /// for a file wins.
    pub fn arguments_for(&self, file_path: &Path) -> Option<Vec<String>> {
        let entry = self.entry_for(file_path)?;
        if entry.arguments.is_empty() {
            warn!(file = %entry.file.display(), "Skipping compilation entry without arguments");
            return None;
        }

        let source = entry.file.to_string_lossy();
        let absolute = entry.directory.join(&entry.file);
        let absolute = absolute.to_string_lossy();

        let mut arguments = vec![format!(
            "-working-directory={}",
            entry.directory.display()
        )];
        let mut rest = entry.arguments.iter().skip(1);
        while let Some(argument) = rest.next() {
            match argument.as_str() {
                "-c" => {}
                "-o" => {
                    rest.next();
                }
                other if other == source || other == absolute => {}
                other => arguments.push(other.to_string()),
            }
        }
        Some(arguments)
    }
}

/// Only the path is serialized, never the entries
impl Serialize for CompilationDatabase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.path.serialize(serializer)
    }
}
