//! Translation units: a parsed source file plus everything it includes

mod flags;
pub(crate) mod unsaved;

pub use flags::{ErrorCode, SaveError, TranslationUnitFlags};
pub use unsaved::UnsavedFile;

use std::marker::PhantomData;
use std::path::Path;

use clang_sys::{
    CXTranslationUnit, clang_codeCompleteAt, clang_defaultReparseOptions,
    clang_defaultSaveOptions, clang_disposeTranslationUnit, clang_getDiagnostic, clang_getFile,
    clang_getLocation, clang_getNumDiagnostics, clang_getTranslationUnitCursor,
    clang_getTranslationUnitSpelling, clang_reparseTranslationUnit, clang_saveTranslationUnit,
};
use tracing::debug;

use crate::completion::CodeCompleteResults;
use crate::config::CompletionConfig;
use crate::cursor::Cursor;
use crate::diagnostic::Diagnostic;
use crate::error::{ClangError, Result};
use crate::ffi::{Disposable, Owned, c_path, cx_string};
use crate::file::File;
use crate::source::SourceLocation;

pub(crate) enum TranslationUnitResource {}

unsafe impl Disposable for TranslationUnitResource {
    type Raw = CXTranslationUnit;
    const NAME: &'static str = "CXTranslationUnit";

    unsafe fn dispose(raw: CXTranslationUnit) {
        unsafe { clang_disposeTranslationUnit(raw) }
    }
}

/// An owned `CXTranslationUnit`
///
/// Cursors, files, locations, diagnostics and completion results borrow the
/// unit and cannot outlive it.
#[derive(Debug)]
pub struct TranslationUnit<'i> {
    raw: Owned<TranslationUnitResource>,
    _index: PhantomData<&'i ()>,
}

impl<'i> TranslationUnit<'i> {
    /// # Safety
    /// `raw` must be a live translation unit created from an index that
    /// outlives `'i`.
    pub(crate) unsafe fn from_raw(raw: CXTranslationUnit) -> Self {
        Self {
            raw: unsafe { Owned::from_raw(raw) },
            _index: PhantomData,
        }
    }

    pub(crate) fn as_raw(&self) -> CXTranslationUnit {
        self.raw.as_raw()
    }

    /// Main file name of the unit
    pub fn spelling(&self) -> String {
        cx_string(unsafe { clang_getTranslationUnitSpelling(self.as_raw()) })
    }

    /// The cursor for the unit itself, root of the AST
    pub fn cursor(&self) -> Cursor<'_> {
        unsafe { Cursor::from_raw(clang_getTranslationUnitCursor(self.as_raw())) }
    }

    /// Look up a file that takes part in this unit
    pub fn file(&self, path: &Path) -> Result<Option<File<'_>>> {
        let name = c_path(path)?;
        let raw = unsafe { clang_getFile(self.as_raw(), name.as_ptr()) };
        Ok(unsafe { File::from_raw(raw) })
    }

    /// Source location for a 1-based line and column in `file`
    pub fn location<'a>(&'a self, file: &File<'a>, line: u32, column: u32) -> SourceLocation<'a> {
        unsafe {
            SourceLocation::from_raw(clang_getLocation(
                self.as_raw(),
                file.as_raw(),
                line as _,
                column as _,
            ))
        }
    }

    pub fn num_diagnostics(&self) -> u32 {
        unsafe { clang_getNumDiagnostics(self.as_raw()) as u32 }
    }

    /// Diagnostic at `index`, or `None` past the end
    pub fn diagnostic(&self, index: u32) -> Option<Diagnostic<'_>> {
        if index >= self.num_diagnostics() {
            return None;
        }
        unsafe { Diagnostic::from_raw(clang_getDiagnostic(self.as_raw(), index as _)) }
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic<'_>> + '_ {
        (0..self.num_diagnostics()).filter_map(move |index| self.diagnostic(index))
    }

    /// Reparse the unit from disk, overlaid with `unsaved_files`
    ///
    /// libclang only permits disposal of a unit whose reparse failed, so the
    /// unit is consumed and released on error.
    pub fn reparse(self, unsaved_files: &[UnsavedFile]) -> Result<Self> {
        let unsaved = unsaved::Marshaled::new(unsaved_files)?;
        let code = unsafe {
            let options = clang_defaultReparseOptions(self.as_raw());
            clang_reparseTranslationUnit(
                self.as_raw(),
                unsaved.len() as _,
                unsaved.as_ptr(),
                options as _,
            )
        };

        match ErrorCode::from_raw(code as u32) {
            ErrorCode::Success => {
                debug!(file = %self.spelling(), "Reparsed translation unit");
                Ok(self)
            }
            code => Err(ClangError::Reparse { code }),
        }
    }

    /// Serialize the unit to an AST file
    pub fn save(&self, path: &Path) -> Result<()> {
        let name = c_path(path)?;
        let status = unsafe {
            let options = clang_defaultSaveOptions(self.as_raw());
            clang_saveTranslationUnit(self.as_raw(), name.as_ptr(), options)
        };

        match SaveError::from_raw(status as u32) {
            SaveError::None => Ok(()),
            code => Err(ClangError::Save {
                path: path.to_path_buf(),
                code,
            }),
        }
    }

    /// Run code completion at a position with `clang_codeCompleteAt`
    pub fn code_complete_at(&self, config: &CompletionConfig) -> Result<CodeCompleteResults<'_>> {
        let file = c_path(&config.file)?;
        let unsaved = unsaved::Marshaled::new(&config.unsaved_files)?;

        debug!(
            file = %config.file.display(),
            line = config.line,
            column = config.column,
            flags = %config.flags,
            "Requesting code completion"
        );

        let raw = unsafe {
            clang_codeCompleteAt(
                self.as_raw(),
                file.as_ptr(),
                config.line as _,
                config.column as _,
                unsaved.as_ptr(),
                unsaved.len() as _,
                config.flags.to_raw() as _,
            )
        };

        let mut results =
            unsafe { CodeCompleteResults::from_raw(raw) }.ok_or_else(|| ClangError::Completion {
                file: config.file.clone(),
                line: config.line,
                column: config.column,
            })?;

        if config.sort_results {
            results.sort();
        }
        debug!(count = results.num_results(), "Code completion finished");
        Ok(results)
    }
}
