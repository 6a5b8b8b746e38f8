//! Runtime loading of the libclang shared library
//!
//! `clang-sys` loads libclang per thread. [`Library`] is the guard for that
//! load: every other wrapper borrows it, and it is neither `Send` nor `Sync`,
//! so the whole object graph stays on the thread that loaded the library.

use std::cell::Cell;
use std::marker::PhantomData;

use clang_sys::clang_getClangVersion;
use tracing::{debug, warn};

use crate::config::IndexOptions;
use crate::error::{ClangError, Result};
use crate::ffi::cx_string;
use crate::index::Index;

thread_local! {
    static LOADED: Cell<bool> = const { Cell::new(false) };
}

/// A loaded libclang, usable from the current thread only
#[derive(Debug)]
pub struct Library {
    _not_send: PhantomData<*mut ()>,
}

impl Library {
    /// Load libclang for this thread
    ///
    /// The library is located the way `clang-sys` does it: `LIBCLANG_PATH`
    /// first, then `llvm-config`, then the usual system directories.
    pub fn load() -> Result<Self> {
        if LOADED.with(Cell::get) {
            return Err(ClangError::AlreadyLoaded);
        }

        clang_sys::load().map_err(ClangError::library_load)?;
        LOADED.with(|loaded| loaded.set(true));

        let library = Self {
            _not_send: PhantomData,
        };
        debug!(version = %library.clang_version(), "Loaded libclang");
        Ok(library)
    }

    /// Version string reported by libclang, e.g. "clang version 17.0.6"
    pub fn clang_version(&self) -> String {
        cx_string(unsafe { clang_getClangVersion() })
    }

    /// Create an index, the top-level context for translation units
    pub fn create_index(&self, options: IndexOptions) -> Index<'_> {
        Index::new(self, options)
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        if let Err(e) = clang_sys::unload() {
            warn!("Failed to unload libclang: {}", e);
        }
        LOADED.with(|loaded| loaded.set(false));
    }
}
