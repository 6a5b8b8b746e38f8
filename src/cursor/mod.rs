//! Cursors: borrowed handles onto AST nodes of a translation unit

mod kind;

pub use kind::CursorKind;

use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use clang_sys::{
    CXChildVisitResult, CXCursor, clang_Cursor_getBriefCommentText,
    clang_Cursor_getParsedComment, clang_Cursor_getRawCommentText, clang_Cursor_isNull,
    clang_equalCursors, clang_getCursorDefinition, clang_getCursorDisplayName,
    clang_getCursorExtent, clang_getCursorKind, clang_getCursorLexicalParent,
    clang_getCursorLocation, clang_getCursorReferenced, clang_getCursorSemanticParent,
    clang_getCursorSpelling, clang_getCursorUSR, clang_hashCursor, clang_isCursorDefinition,
    clang_visitChildren,
};

use crate::comment::Comment;
use crate::ffi::callback::CallbackState;
use crate::ffi::enums::foreign_enum;
use crate::ffi::{cx_string, cx_string_opt};
use crate::source::{SourceLocation, SourceRange};

foreign_enum! {
    /// What a child visitor asks libclang to do next (`CXChildVisitResult`)
    pub enum ChildVisit as "ChildVisit" {
        /// Stop the traversal
        Break = 0,
        /// Continue with the next sibling without visiting children
        Continue = 1,
        /// Visit the children of this cursor first
        Recurse = 2,
    }
}

/// A borrowed `CXCursor`
#[derive(Clone, Copy)]
pub struct Cursor<'tu> {
    raw: CXCursor,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> Cursor<'tu> {
    /// # Safety
    /// `raw` must come from a translation unit that outlives `'tu`.
    pub(crate) unsafe fn from_raw(raw: CXCursor) -> Self {
        Self {
            raw,
            _tu: PhantomData,
        }
    }

    /// Like [`Cursor::from_raw`], mapping the null cursor to `None`
    ///
    /// # Safety
    /// Same as [`Cursor::from_raw`].
    pub(crate) unsafe fn from_raw_opt(raw: CXCursor) -> Option<Self> {
        if unsafe { clang_Cursor_isNull(raw) } != 0 {
            None
        } else {
            Some(unsafe { Self::from_raw(raw) })
        }
    }

    pub fn kind(&self) -> CursorKind {
        CursorKind::from_raw(unsafe { clang_getCursorKind(self.raw) } as u32)
    }

    pub fn spelling(&self) -> String {
        cx_string(unsafe { clang_getCursorSpelling(self.raw) })
    }

    /// Spelling plus extra detail, such as a function's parameter list
    pub fn display_name(&self) -> String {
        cx_string(unsafe { clang_getCursorDisplayName(self.raw) })
    }

    /// Unified Symbol Resolution string, `None` for cursors without one
    pub fn usr(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_getCursorUSR(self.raw) })
    }

    pub fn location(&self) -> SourceLocation<'tu> {
        unsafe { SourceLocation::from_raw(clang_getCursorLocation(self.raw)) }
    }

    pub fn extent(&self) -> SourceRange<'tu> {
        unsafe { SourceRange::from_raw(clang_getCursorExtent(self.raw)) }
    }

    pub fn semantic_parent(&self) -> Option<Cursor<'tu>> {
        unsafe { Self::from_raw_opt(clang_getCursorSemanticParent(self.raw)) }
    }

    pub fn lexical_parent(&self) -> Option<Cursor<'tu>> {
        unsafe { Self::from_raw_opt(clang_getCursorLexicalParent(self.raw)) }
    }

    /// The entity a reference or expression cursor refers to
    pub fn referenced(&self) -> Option<Cursor<'tu>> {
        unsafe { Self::from_raw_opt(clang_getCursorReferenced(self.raw)) }
    }

    pub fn definition(&self) -> Option<Cursor<'tu>> {
        unsafe { Self::from_raw_opt(clang_getCursorDefinition(self.raw)) }
    }

    pub fn is_definition(&self) -> bool {
        unsafe { clang_isCursorDefinition(self.raw) != 0 }
    }

    /// Walk the children of this cursor
    ///
    /// The visitor receives each cursor and its parent and decides how the
    /// traversal goes on. Returns `true` when the visitor stopped it with
    /// [`ChildVisit::Break`]. A panic in the visitor stops the traversal and
    /// is resumed here once libclang has returned.
    pub fn visit_children<F>(&self, visitor: F) -> bool
    where
        F: FnMut(Cursor<'tu>, Cursor<'tu>) -> ChildVisit,
    {
        let mut state = CallbackState::new(visitor);
        let broken = unsafe {
            clang_visitChildren(self.raw, visit_trampoline::<'tu, F>, state.as_client_data())
        };
        state.finish();
        broken != 0
    }

    /// Direct children, in source order
    pub fn children(&self) -> Vec<Cursor<'tu>> {
        let mut children = Vec::new();
        self.visit_children(|child, _| {
            children.push(child);
            ChildVisit::Continue
        });
        children
    }

    /// The comment text attached to a declaration, markers included
    pub fn raw_comment(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_Cursor_getRawCommentText(self.raw) })
    }

    /// The first paragraph of the attached documentation comment
    pub fn brief_comment(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_Cursor_getBriefCommentText(self.raw) })
    }

    pub fn parsed_comment(&self) -> Option<Comment<'tu>> {
        unsafe { Comment::from_raw(clang_Cursor_getParsedComment(self.raw)) }
    }
}

extern "C" fn visit_trampoline<'tu, F>(
    cursor: CXCursor,
    parent: CXCursor,
    data: *mut c_void,
) -> CXChildVisitResult
where
    F: FnMut(Cursor<'tu>, Cursor<'tu>) -> ChildVisit,
{
    let state = unsafe { CallbackState::<F>::from_client_data(data) };
    let (cursor, parent) = unsafe { (Cursor::from_raw(cursor), Cursor::from_raw(parent)) };
    state
        .invoke(ChildVisit::Break, |visitor| visitor(cursor, parent))
        .to_raw() as _
}

impl PartialEq for Cursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        unsafe { clang_equalCursors(self.raw, other.raw) != 0 }
    }
}

impl Eq for Cursor<'_> {}

impl Hash for Cursor<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        unsafe { clang_hashCursor(self.raw) }.hash(state);
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("kind", &self.kind())
            .field("spelling", &self.spelling())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::ptr;

    fn fake_cursor(kind: u32) -> CXCursor {
        CXCursor {
            kind: kind as _,
            xdata: 0,
            data: [ptr::null(); 3],
        }
    }

    fn trampoline_for<F>(
        _: &CallbackState<F>,
    ) -> extern "C" fn(CXCursor, CXCursor, *mut c_void) -> CXChildVisitResult
    where
        F: FnMut(Cursor<'static>, Cursor<'static>) -> ChildVisit,
    {
        visit_trampoline::<'static, F>
    }

    #[test]
    fn test_child_visit_values() {
        assert_eq!(ChildVisit::Break.to_raw(), 0);
        assert_eq!(ChildVisit::Continue.to_raw(), 1);
        assert_eq!(ChildVisit::Recurse.to_raw(), 2);
    }

    #[test]
    fn test_trampoline_forwards_visitor_result() {
        let mut seen = 0;
        let visitor = |_: Cursor<'_>, _: Cursor<'_>| {
            seen += 1;
            ChildVisit::Recurse
        };
        let mut state = CallbackState::new(visitor);
        let data = state.as_client_data();

        let result = trampoline_for(&state)(fake_cursor(8), fake_cursor(350), data);
        assert_eq!(result as u32, ChildVisit::Recurse.to_raw());
        state.finish();
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_trampoline_stops_after_panic() {
        let visitor = |_: Cursor<'_>, _: Cursor<'_>| -> ChildVisit { panic!("bad visitor") };
        let mut state = CallbackState::new(visitor);
        let data = state.as_client_data();

        let result = trampoline_for(&state)(fake_cursor(8), fake_cursor(350), data);
        assert_eq!(result as u32, ChildVisit::Break.to_raw());
        assert!(panic::catch_unwind(AssertUnwindSafe(|| state.finish())).is_err());
    }
}
