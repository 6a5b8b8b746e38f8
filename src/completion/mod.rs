//! Code completion results
//!
//! [`CodeCompleteResults`] owns the result set returned by
//! `clang_codeCompleteAt`. Results, completion strings and diagnostics are
//! views into it and share its lifetime.

mod flags;
mod string;

pub use flags::{AvailabilityKind, CodeCompleteFlags, CompletionChunkKind, CompletionContext};
pub use string::{CompletionChunk, CompletionString};

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use clang_sys::{
    CXCodeCompleteResults, CXCompletionResult, CXSourceRange, clang_codeCompleteGetContainerKind,
    clang_codeCompleteGetContainerUSR, clang_codeCompleteGetContexts,
    clang_codeCompleteGetDiagnostic, clang_codeCompleteGetNumDiagnostics,
    clang_codeCompleteGetObjCSelector, clang_disposeCodeCompleteResults,
    clang_getCompletionFixIt, clang_getCompletionNumFixIts, clang_sortCodeCompletionResults,
};
use serde::Serialize;

use crate::cursor::CursorKind;
use crate::diagnostic::{Diagnostic, FixIt};
use crate::ffi::{Disposable, Owned, cx_string, cx_string_opt, foreign_slice};
use crate::source::SourceRange;

pub(crate) enum CodeCompleteResultsResource {}

unsafe impl Disposable for CodeCompleteResultsResource {
    type Raw = *mut CXCodeCompleteResults;
    const NAME: &'static str = "CXCodeCompleteResults";

    unsafe fn dispose(raw: *mut CXCodeCompleteResults) {
        unsafe { clang_disposeCodeCompleteResults(raw) }
    }
}

/// The entity completion was performed in, such as the struct for `s.`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionContainer {
    #[serde(serialize_with = "serialize_kind")]
    pub kind: CursorKind,
    /// libclang only saw part of the container, so results may be missing
    pub is_incomplete: bool,
}

impl CompletionContainer {
    fn from_raw(kind: u32, incomplete: u32) -> Self {
        Self {
            kind: CursorKind::from_raw(kind),
            is_incomplete: incomplete != 0,
        }
    }

    /// `false` when libclang reported its `InvalidCode` sentinel
    pub fn has_container(&self) -> bool {
        self.kind != CursorKind::InvalidCode
    }
}

fn serialize_kind<S: serde::Serializer>(kind: &CursorKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&kind.spelling())
}

/// One completion candidate inside a result set
#[repr(transparent)]
pub struct CompletionResult(CXCompletionResult);

impl CompletionResult {
    /// Kind of the entity this result would insert
    pub fn cursor_kind(&self) -> CursorKind {
        CursorKind::from_raw(self.0.CursorKind as u32)
    }

    pub fn completion_string(&self) -> Option<CompletionString<'_>> {
        unsafe { CompletionString::from_raw(self.0.CompletionString) }
    }
}

impl fmt::Debug for CompletionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionResult")
            .field("cursor_kind", &self.cursor_kind())
            .field("completion_string", &self.completion_string())
            .finish()
    }
}

/// View the `Results` array of a result set
///
/// # Safety
/// `raw` must be a result set libclang returned, not yet disposed.
unsafe fn result_view(raw: &CXCodeCompleteResults) -> &[CompletionResult] {
    unsafe {
        foreign_slice(
            raw.Results as *const CompletionResult,
            raw.NumResults as usize,
        )
    }
}

/// An owned `CXCodeCompleteResults`
pub struct CodeCompleteResults<'tu> {
    raw: Owned<CodeCompleteResultsResource>,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> CodeCompleteResults<'tu> {
    /// Take ownership of a result set, mapping null (completion failed) to `None`
    ///
    /// # Safety
    /// `raw` must be null or a result set of a translation unit that outlives `'tu`.
    pub(crate) unsafe fn from_raw(raw: *mut CXCodeCompleteResults) -> Option<Self> {
        (!raw.is_null()).then(|| Self {
            raw: unsafe { Owned::from_raw(raw) },
            _tu: PhantomData,
        })
    }

    fn as_raw(&self) -> *mut CXCodeCompleteResults {
        self.raw.as_raw()
    }

    pub fn num_results(&self) -> u32 {
        unsafe { (*self.as_raw()).NumResults as u32 }
    }

    /// Results in libclang's order, or sorted after [`CodeCompleteResults::sort`]
    pub fn results(&self) -> &[CompletionResult] {
        unsafe { result_view(&*self.as_raw()) }
    }

    /// Sort the results by typed text, in place
    pub fn sort(&mut self) {
        let raw = self.as_raw();
        unsafe {
            if (*raw).NumResults > 0 {
                clang_sortCodeCompletionResults((*raw).Results, (*raw).NumResults);
            }
        }
    }

    /// Fix-its that must be applied before inserting result `index`
    pub fn completion_num_fix_its(&self, index: u32) -> u32 {
        if index >= self.num_results() {
            return 0;
        }
        unsafe { clang_getCompletionNumFixIts(self.as_raw(), index as _) as u32 }
    }

    pub fn completion_fix_it(&self, index: u32, fix_it: u32) -> Option<FixIt<'_>> {
        if fix_it >= self.completion_num_fix_its(index) {
            return None;
        }
        let mut range = CXSourceRange {
            ptr_data: [ptr::null(); 2],
            begin_int_data: 0,
            end_int_data: 0,
        };
        let replacement = cx_string(unsafe {
            clang_getCompletionFixIt(self.as_raw(), index as _, fix_it as _, &mut range)
        });
        Some(FixIt {
            range: unsafe { SourceRange::from_raw(range) },
            replacement,
        })
    }

    pub fn num_diagnostics(&self) -> u32 {
        unsafe { clang_codeCompleteGetNumDiagnostics(self.as_raw()) as u32 }
    }

    pub fn diagnostic(&self, index: u32) -> Option<Diagnostic<'_>> {
        if index >= self.num_diagnostics() {
            return None;
        }
        unsafe { Diagnostic::from_raw(clang_codeCompleteGetDiagnostic(self.as_raw(), index as _)) }
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic<'_>> + '_ {
        (0..self.num_diagnostics()).filter_map(move |index| self.diagnostic(index))
    }

    /// Kinds of completions that fit at the completion point
    pub fn contexts(&self) -> CompletionContext {
        CompletionContext::from_raw(unsafe { clang_codeCompleteGetContexts(self.as_raw()) } as u64)
    }

    pub fn container_kind(&self) -> CompletionContainer {
        let mut incomplete = 0;
        let kind = unsafe { clang_codeCompleteGetContainerKind(self.as_raw(), &mut incomplete) };
        CompletionContainer::from_raw(kind as u32, incomplete as u32)
    }

    pub fn container_usr(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_codeCompleteGetContainerUSR(self.as_raw()) })
    }

    /// Selector typed so far, for Objective-C message sends
    pub fn objc_selector(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_codeCompleteGetObjCSelector(self.as_raw()) })
    }

    /// Release the result set now instead of at the end of scope
    pub fn dispose(self) {
        drop(self)
    }
}

impl fmt::Debug for CodeCompleteResults<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeCompleteResults")
            .field("num_results", &self.num_results())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_results_view_is_empty() {
        let raw = CXCodeCompleteResults {
            Results: ptr::null_mut(),
            NumResults: 0,
        };
        let view = unsafe { result_view(&raw) };
        assert!(view.is_empty());
    }

    #[test]
    fn test_results_view_reads_records() {
        let mut records = [
            CXCompletionResult {
                CursorKind: CursorKind::FunctionDecl.to_raw() as _,
                CompletionString: ptr::null_mut(),
            },
            CXCompletionResult {
                CursorKind: CursorKind::MacroDefinition.to_raw() as _,
                CompletionString: ptr::null_mut(),
            },
        ];
        let raw = CXCodeCompleteResults {
            Results: records.as_mut_ptr(),
            NumResults: records.len() as _,
        };
        let view = unsafe { result_view(&raw) };
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].cursor_kind(), CursorKind::FunctionDecl);
        assert_eq!(view[1].cursor_kind(), CursorKind::MacroDefinition);
        assert!(view[1].completion_string().is_none());
    }

    #[test]
    fn test_container_sentinel_means_no_container() {
        let container = CompletionContainer::from_raw(73, 0);
        assert_eq!(container.kind, CursorKind::InvalidCode);
        assert!(!container.has_container());
        assert!(!container.is_incomplete);

        let container = CompletionContainer::from_raw(CursorKind::StructDecl.to_raw(), 1);
        assert!(container.has_container());
        assert!(container.is_incomplete);
    }

    #[test]
    fn test_container_serialization() {
        let container = CompletionContainer::from_raw(CursorKind::ClassDecl.to_raw(), 0);
        let json = serde_json::to_value(container).unwrap();
        assert_eq!(json["kind"], "Cursor=ClassDecl");
        assert_eq!(json["is_incomplete"], false);
    }

    #[test]
    fn test_null_results_are_none() {
        assert!(unsafe { CodeCompleteResults::from_raw(ptr::null_mut()) }.is_none());
    }
}
