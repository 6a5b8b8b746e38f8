//! Completion strings: the structured text of a single completion result

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use clang_sys::{
    CXCompletionString, clang_getCompletionAnnotation, clang_getCompletionAvailability,
    clang_getCompletionBriefComment, clang_getCompletionChunkCompletionString,
    clang_getCompletionChunkKind, clang_getCompletionChunkText, clang_getCompletionNumAnnotations,
    clang_getCompletionParent, clang_getCompletionPriority, clang_getNumCompletionChunks,
};

use super::flags::{AvailabilityKind, CompletionChunkKind};
use crate::ffi::{cx_string, cx_string_opt};

/// A borrowed `CXCompletionString`, valid while its result set is alive
#[derive(Clone, Copy)]
pub struct CompletionString<'r> {
    raw: CXCompletionString,
    _results: PhantomData<&'r ()>,
}

/// One piece of a completion string
#[derive(Debug, Clone, Copy)]
pub struct CompletionChunk<'r> {
    string: CompletionString<'r>,
    index: u32,
}

impl<'r> CompletionString<'r> {
    /// Wrap a completion string, mapping null to `None`
    ///
    /// # Safety
    /// `raw` must be null or belong to a result set that outlives `'r`.
    pub(crate) unsafe fn from_raw(raw: CXCompletionString) -> Option<Self> {
        (!raw.is_null()).then_some(Self {
            raw,
            _results: PhantomData,
        })
    }

    pub fn num_chunks(&self) -> u32 {
        unsafe { clang_getNumCompletionChunks(self.raw) as u32 }
    }

    pub fn chunk_kind(&self, index: u32) -> Option<CompletionChunkKind> {
        if index >= self.num_chunks() {
            return None;
        }
        Some(CompletionChunkKind::from_raw(
            unsafe { clang_getCompletionChunkKind(self.raw, index as _) } as u32,
        ))
    }

    pub fn chunk_text(&self, index: u32) -> Option<String> {
        if index >= self.num_chunks() {
            return None;
        }
        Some(cx_string(unsafe { clang_getCompletionChunkText(self.raw, index as _) }))
    }

    /// The nested string of an [`CompletionChunkKind::Optional`] chunk
    pub fn chunk_completion_string(&self, index: u32) -> Option<CompletionString<'r>> {
        if index >= self.num_chunks() {
            return None;
        }
        unsafe { Self::from_raw(clang_getCompletionChunkCompletionString(self.raw, index as _)) }
    }

    pub fn chunks(&self) -> impl Iterator<Item = CompletionChunk<'r>> + use<'r> {
        let string = *self;
        (0..self.num_chunks()).map(move |index| CompletionChunk { string, index })
    }

    /// Text of the first [`CompletionChunkKind::TypedText`] chunk
    pub fn typed_text(&self) -> Option<String> {
        self.chunks()
            .find(|chunk| chunk.kind() == CompletionChunkKind::TypedText)
            .map(|chunk| chunk.text())
    }

    /// Priority of this result; smaller values are more likely
    pub fn priority(&self) -> u32 {
        unsafe { clang_getCompletionPriority(self.raw) as u32 }
    }

    pub fn availability(&self) -> AvailabilityKind {
        AvailabilityKind::from_raw(unsafe { clang_getCompletionAvailability(self.raw) } as u32)
    }

    pub fn brief_comment(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_getCompletionBriefComment(self.raw) })
    }

    pub fn num_annotations(&self) -> u32 {
        unsafe { clang_getCompletionNumAnnotations(self.raw) as u32 }
    }

    pub fn annotation(&self, index: u32) -> Option<String> {
        if index >= self.num_annotations() {
            return None;
        }
        Some(cx_string(unsafe { clang_getCompletionAnnotation(self.raw, index as _) }))
    }

    /// Name of the semantic parent, for example the class of a member
    pub fn parent(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_getCompletionParent(self.raw, ptr::null_mut()) })
    }
}

impl<'r> CompletionChunk<'r> {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn kind(&self) -> CompletionChunkKind {
        CompletionChunkKind::from_raw(
            unsafe { clang_getCompletionChunkKind(self.string.raw, self.index as _) } as u32,
        )
    }

    pub fn text(&self) -> String {
        cx_string(unsafe { clang_getCompletionChunkText(self.string.raw, self.index as _) })
    }

    pub fn completion_string(&self) -> Option<CompletionString<'r>> {
        self.string.chunk_completion_string(self.index)
    }
}

/// The concatenated text of every chunk, the way an editor would show it
impl fmt::Display for CompletionString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            match chunk.kind() {
                CompletionChunkKind::Optional => {
                    if let Some(nested) = chunk.completion_string() {
                        write!(f, "[{nested}]")?;
                    }
                }
                CompletionChunkKind::Informative | CompletionChunkKind::ResultType => {}
                _ => f.write_str(&chunk.text())?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CompletionString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionString")
            .field("typed_text", &self.typed_text())
            .field("priority", &self.priority())
            .finish()
    }
}
