//! The libclang index: shared context for a set of translation units

use std::marker::PhantomData;
use std::ptr;

use clang_sys::{
    CXIndex, CXTranslationUnit, clang_CXIndex_getGlobalOptions, clang_CXIndex_setGlobalOptions,
    clang_createIndex, clang_disposeIndex, clang_parseTranslationUnit2,
};
use tracing::debug;

use crate::config::{IndexOptions, ParseConfig};
use crate::error::{ClangError, Result};
use crate::ffi::enums::foreign_flags;
use crate::ffi::{Disposable, Owned, c_path, c_string};
use crate::indexing::IndexAction;
use crate::library::Library;
use crate::translation_unit::{ErrorCode, TranslationUnit, unsaved};

foreign_flags! {
    /// Thread-priority options applied to every translation unit of an index
    pub struct GlobalOptions: u32 as "GlobalOpt" {
        const THREAD_BACKGROUND_PRIORITY_FOR_INDEXING = 0x1 => "ThreadBackgroundPriorityForIndexing";
        const THREAD_BACKGROUND_PRIORITY_FOR_EDITING = 0x2 => "ThreadBackgroundPriorityForEditing";
        const THREAD_BACKGROUND_PRIORITY_FOR_ALL = 0x3 => "ThreadBackgroundPriorityForAll";
    }
}

pub(crate) enum IndexResource {}

unsafe impl Disposable for IndexResource {
    type Raw = CXIndex;
    const NAME: &'static str = "CXIndex";

    unsafe fn dispose(raw: CXIndex) {
        unsafe { clang_disposeIndex(raw) }
    }
}

/// An owned `CXIndex`
#[derive(Debug)]
pub struct Index<'l> {
    raw: Owned<IndexResource>,
    _library: PhantomData<&'l Library>,
}

impl<'l> Index<'l> {
    /// Create an index via `clang_createIndex`
    pub fn new(_library: &'l Library, options: IndexOptions) -> Self {
        let raw = unsafe {
            clang_createIndex(
                options.exclude_declarations_from_pch as _,
                options.display_diagnostics as _,
            )
        };
        Self {
            raw: unsafe { Owned::from_raw(raw) },
            _library: PhantomData,
        }
    }

    pub(crate) fn as_raw(&self) -> CXIndex {
        self.raw.as_raw()
    }

    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions::from_raw(unsafe { clang_CXIndex_getGlobalOptions(self.as_raw()) } as u32)
    }

    pub fn set_global_options(&self, options: GlobalOptions) {
        unsafe { clang_CXIndex_setGlobalOptions(self.as_raw(), options.to_raw() as _) }
    }

    /// Parse a translation unit with `clang_parseTranslationUnit2`
    ///
    /// The returned unit borrows this index and must be dropped before it.
    pub fn parse(&self, config: &ParseConfig) -> Result<TranslationUnit<'_>> {
        let source = c_path(&config.source_file)?;
        let args = config
            .args
            .iter()
            .map(|arg| c_string(arg))
            .collect::<Result<Vec<_>>>()?;
        let arg_ptrs: Vec<_> = args.iter().map(|arg| arg.as_ptr()).collect();
        let unsaved = unsaved::Marshaled::new(&config.unsaved_files)?;

        debug!(
            file = %config.source_file.display(),
            args = ?config.args,
            flags = %config.flags,
            "Parsing translation unit"
        );

        let mut raw: CXTranslationUnit = ptr::null_mut();
        let code = unsafe {
            clang_parseTranslationUnit2(
                self.as_raw(),
                source.as_ptr(),
                if arg_ptrs.is_empty() {
                    ptr::null()
                } else {
                    arg_ptrs.as_ptr()
                },
                arg_ptrs.len() as _,
                unsaved.as_ptr(),
                unsaved.len() as _,
                config.flags.to_raw() as _,
                &mut raw,
            )
        };

        // Take ownership first so a handle returned alongside an error is still released.
        let unit = (!raw.is_null()).then(|| unsafe { TranslationUnit::from_raw(raw) });
        match (ErrorCode::from_raw(code as u32), unit) {
            (ErrorCode::Success, Some(unit)) => Ok(unit),
            (ErrorCode::Success, None) => Err(ClangError::Parse {
                path: config.source_file.clone(),
                code: ErrorCode::Failure,
            }),
            (code, _) => Err(ClangError::Parse {
                path: config.source_file.clone(),
                code,
            }),
        }
    }

    /// Create an action for `clang_indexTranslationUnit`
    pub fn create_action(&self) -> IndexAction<'_> {
        IndexAction::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_values() {
        assert_eq!(GlobalOptions::empty().to_raw(), 0);
        assert_eq!(
            GlobalOptions::THREAD_BACKGROUND_PRIORITY_FOR_INDEXING
                | GlobalOptions::THREAD_BACKGROUND_PRIORITY_FOR_EDITING,
            GlobalOptions::THREAD_BACKGROUND_PRIORITY_FOR_ALL
        );
        assert_eq!(
            GlobalOptions::THREAD_BACKGROUND_PRIORITY_FOR_ALL.spelling(),
            "GlobalOpt=ThreadBackgroundPriorityForAll"
        );
    }
}
