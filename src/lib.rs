//! Ownership-typed bindings over the libclang C API
//!
//! Every libclang handle is wrapped once: owned handles release themselves on
//! drop, borrowed handles carry the lifetime of their owner, strings and
//! arrays are copied or viewed without outliving the memory behind them, and
//! enumerations keep values this crate does not name as `Unknown(raw)`.
//!
//! ```no_run
//! use clang_bridge::{IndexOptions, Library, ParseConfigBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let library = Library::load()?;
//! let index = library.create_index(IndexOptions::default());
//! let config = ParseConfigBuilder::new()
//!     .source_file("src/main.cpp")
//!     .add_arg("-std=c++17")
//!     .build()?;
//! let unit = index.parse(&config)?;
//! for diagnostic in unit.diagnostics() {
//!     println!("{}", diagnostic.spelling());
//! }
//! # Ok(())
//! # }
//! ```

pub mod comment;
pub mod compilation_database;
pub mod completion;
pub mod config;
pub mod cursor;
pub mod diagnostic;
pub mod error;
mod ffi;
pub mod file;
pub mod index;
pub mod indexing;
pub mod library;
pub mod logging;
pub mod source;
pub mod translation_unit;

#[cfg(test)]
mod test_utils;

#[cfg(all(test, feature = "libclang-integration-tests"))]
mod integration_tests;

#[cfg(all(test, feature = "test-logging"))]
crate::setup_test_logging!();

pub use comment::{Comment, CommentInlineCommandRenderKind, CommentKind};
pub use compilation_database::{CompilationDatabase, CompilationDatabaseError};
pub use completion::{
    AvailabilityKind, CodeCompleteFlags, CodeCompleteResults, CompletionChunk,
    CompletionChunkKind, CompletionContainer, CompletionContext, CompletionResult,
    CompletionString,
};
pub use config::{
    CompletionConfig, CompletionConfigBuilder, ConfigError, IndexOptions, ParseConfig,
    ParseConfigBuilder,
};
pub use cursor::{ChildVisit, Cursor, CursorKind};
pub use diagnostic::{
    Diagnostic, DiagnosticDisplayOptions, DiagnosticOption, DiagnosticSeverity, FixIt,
};
pub use error::{ClangError, Result};
pub use file::{File, FileUniqueId};
pub use index::{GlobalOptions, Index};
pub use indexing::{
    ContainerInfo, DeclInfo, EntityInfo, EntityKind, EntityRefInfo, EntityRefKind,
    IndexAction, IndexConsumer, IndexLocation, IndexOptFlags, SymbolRole,
};
pub use library::Library;
pub use source::{FileSpan, Position, ResolvedLocation, SourceLocation, SourceRange, Span};
pub use translation_unit::{ErrorCode, SaveError, TranslationUnit, TranslationUnitFlags, UnsavedFile};
