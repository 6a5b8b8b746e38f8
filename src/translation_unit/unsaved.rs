//! In-memory file contents passed to parse, reparse and completion calls

use std::ffi::CString;
use std::path::PathBuf;
use std::ptr;

use clang_sys::CXUnsavedFile;

use crate::error::Result;
use crate::ffi::{c_path, c_string};

/// A file whose contents have not been saved to disk yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsavedFile {
    pub path: PathBuf,
    pub contents: String,
}

impl UnsavedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// `CXUnsavedFile` records plus the C strings they point into
///
/// The records borrow the owned strings, so they are only handed to libclang
/// while this value is alive.
pub(crate) struct Marshaled {
    _strings: Vec<(CString, CString)>,
    records: Vec<CXUnsavedFile>,
}

impl Marshaled {
    pub(crate) fn new(files: &[UnsavedFile]) -> Result<Self> {
        let strings = files
            .iter()
            .map(|file| Ok((c_path(&file.path)?, c_string(&file.contents)?)))
            .collect::<Result<Vec<_>>>()?;

        let records = strings
            .iter()
            .zip(files)
            .map(|((name, contents), file)| CXUnsavedFile {
                Filename: name.as_ptr(),
                Contents: contents.as_ptr(),
                Length: file.contents.len() as _,
            })
            .collect();

        Ok(Self {
            _strings: strings,
            records,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Pointer for libclang; null when there are no files
    pub(crate) fn as_ptr(&self) -> *mut CXUnsavedFile {
        if self.records.is_empty() {
            ptr::null_mut()
        } else {
            // libclang takes a mutable pointer but only reads the records.
            self.records.as_ptr() as *mut CXUnsavedFile
        }
    }
}
