//! Parsed documentation comments
//!
//! A [`Comment`] is a node of the comment AST libclang builds from a
//! declaration's doc comment. The root is always a [`CommentKind::FullComment`].

use std::fmt;
use std::marker::PhantomData;

use clang_sys::{
    CXComment, clang_BlockCommandComment_getCommandName, clang_Comment_getChild,
    clang_Comment_getKind, clang_Comment_getNumChildren, clang_Comment_isWhitespace,
    clang_FullComment_getAsHTML, clang_FullComment_getAsXML,
    clang_InlineCommandComment_getArgText, clang_InlineCommandComment_getCommandName,
    clang_InlineCommandComment_getNumArgs, clang_InlineCommandComment_getRenderKind,
    clang_ParamCommandComment_getParamName, clang_TextComment_getText,
};

use crate::ffi::enums::foreign_enum;
use crate::ffi::{cx_string, cx_string_opt};

foreign_enum! {
    /// Kind of a comment AST node (`CXCommentKind`)
    pub enum CommentKind as "Comment" {
        Null = 0,
        /// Plain text
        Text = 1,
        /// A command with word-like arguments rendered inline, such as `\c`
        InlineCommand = 2,
        HTMLStartTag = 3,
        HTMLEndTag = 4,
        Paragraph = 5,
        /// A command with a paragraph argument, such as `\brief`
        BlockCommand = 6,
        /// `\param`
        ParamCommand = 7,
        /// `\tparam`
        TParamCommand = 8,
        VerbatimBlockCommand = 9,
        VerbatimBlockLine = 10,
        VerbatimLine = 11,
        /// The root of a parsed comment
        FullComment = 12,
    }
}

foreign_enum! {
    /// How an inline command should be rendered (`CXCommentInlineCommandRenderKind`)
    pub enum CommentInlineCommandRenderKind as "CommentInlineCommandRenderKind" {
        Normal = 0,
        Bold = 1,
        Monospaced = 2,
        Emphasized = 3,
        Anchor = 4,
    }
}

/// A borrowed `CXComment` node
#[derive(Clone, Copy)]
pub struct Comment<'tu> {
    raw: CXComment,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> Comment<'tu> {
    /// Wrap a comment node, mapping null nodes to `None`
    ///
    /// # Safety
    /// `raw` must come from a translation unit that outlives `'tu`.
    pub(crate) unsafe fn from_raw(raw: CXComment) -> Option<Self> {
        if raw.ASTNode.is_null() {
            return None;
        }
        let comment = Self {
            raw,
            _tu: PhantomData,
        };
        (comment.kind() != CommentKind::Null).then_some(comment)
    }

    pub fn kind(&self) -> CommentKind {
        CommentKind::from_raw(unsafe { clang_Comment_getKind(self.raw) } as u32)
    }

    pub fn num_children(&self) -> u32 {
        unsafe { clang_Comment_getNumChildren(self.raw) as u32 }
    }

    pub fn child(&self, index: u32) -> Option<Comment<'tu>> {
        if index >= self.num_children() {
            return None;
        }
        unsafe { Self::from_raw(clang_Comment_getChild(self.raw, index as _)) }
    }

    pub fn children(&self) -> impl Iterator<Item = Comment<'tu>> + '_ {
        (0..self.num_children()).filter_map(move |index| self.child(index))
    }

    /// Whether a text or paragraph node holds only whitespace
    pub fn is_whitespace(&self) -> bool {
        unsafe { clang_Comment_isWhitespace(self.raw) != 0 }
    }

    /// Text of a [`CommentKind::Text`] node
    pub fn text(&self) -> Option<String> {
        (self.kind() == CommentKind::Text)
            .then(|| cx_string(unsafe { clang_TextComment_getText(self.raw) }))
    }

    /// Command name of an inline or block command, without the leading `\`
    pub fn command_name(&self) -> Option<String> {
        match self.kind() {
            CommentKind::InlineCommand => cx_string_opt(unsafe {
                clang_InlineCommandComment_getCommandName(self.raw)
            }),
            CommentKind::BlockCommand | CommentKind::ParamCommand | CommentKind::TParamCommand => {
                cx_string_opt(unsafe { clang_BlockCommandComment_getCommandName(self.raw) })
            }
            _ => None,
        }
    }

    /// Parameter named by a `\param` command
    pub fn param_name(&self) -> Option<String> {
        (self.kind() == CommentKind::ParamCommand)
            .then(|| cx_string_opt(unsafe { clang_ParamCommandComment_getParamName(self.raw) }))
            .flatten()
    }

    pub fn render_kind(&self) -> Option<CommentInlineCommandRenderKind> {
        (self.kind() == CommentKind::InlineCommand).then(|| {
            CommentInlineCommandRenderKind::from_raw(
                unsafe { clang_InlineCommandComment_getRenderKind(self.raw) } as u32,
            )
        })
    }

    /// Number of arguments of an inline command, 0 for other kinds
    pub fn num_args(&self) -> u32 {
        if self.kind() != CommentKind::InlineCommand {
            return 0;
        }
        unsafe { clang_InlineCommandComment_getNumArgs(self.raw) as u32 }
    }

    pub fn arg_text(&self, index: u32) -> Option<String> {
        if index >= self.num_args() {
            return None;
        }
        Some(cx_string(unsafe {
            clang_InlineCommandComment_getArgText(self.raw, index as _)
        }))
    }

    /// HTML rendering of a full comment
    pub fn as_html(&self) -> Option<String> {
        (self.kind() == CommentKind::FullComment)
            .then(|| cx_string(unsafe { clang_FullComment_getAsHTML(self.raw) }))
    }

    /// XML rendering of a full comment
    pub fn as_xml(&self) -> Option<String> {
        (self.kind() == CommentKind::FullComment)
            .then(|| cx_string(unsafe { clang_FullComment_getAsXML(self.raw) }))
    }
}

impl fmt::Debug for Comment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comment")
            .field("kind", &self.kind())
            .field("num_children", &self.num_children())
            .finish()
    }
}
