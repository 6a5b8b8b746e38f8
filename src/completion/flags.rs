//! Code-completion options, contexts and chunk kinds

use clang_sys::clang_defaultCodeCompleteOptions;

use crate::ffi::enums::{foreign_enum, foreign_flags};

foreign_flags! {
    /// Options for `clang_codeCompleteAt` (`CXCodeComplete_Flags`)
    pub struct CodeCompleteFlags: u32 as "CodeComplete" {
        /// Include macros in the results
        const INCLUDE_MACROS = 0x01 => "IncludeMacros";
        /// Include code patterns for control structures and similar constructs
        const INCLUDE_CODE_PATTERNS = 0x02 => "IncludeCodePatterns";
        /// Include brief documentation comments
        const INCLUDE_BRIEF_COMMENTS = 0x04 => "IncludeBriefComments";
        /// Skip the preamble; only declarations from the main file are offered
        const SKIP_PREAMBLE = 0x08 => "SkipPreamble";
        /// Include completions that need fix-its, such as `.` to `->`
        const INCLUDE_COMPLETIONS_WITH_FIX_ITS = 0x10 => "IncludeCompletionsWithFixIts";
    }
}

impl CodeCompleteFlags {
    /// Options libclang recommends for completion
    pub fn default_options() -> Self {
        Self::from_raw(unsafe { clang_defaultCodeCompleteOptions() } as u32)
    }
}

foreign_flags! {
    /// Kinds of results that are valid at the completion point (`CXCompletionContext`)
    ///
    /// The empty set is `CXCompletionContext_Unexposed`.
    pub struct CompletionContext: u64 as "CompletionContext" {
        const UNEXPOSED = 0 => "Unexposed";
        const ANY_TYPE = 1 << 0 => "AnyType";
        const ANY_VALUE = 1 << 1 => "AnyValue";
        const OBJC_OBJECT_VALUE = 1 << 2 => "ObjCObjectValue";
        const OBJC_SELECTOR_VALUE = 1 << 3 => "ObjCSelectorValue";
        const CXX_CLASS_TYPE_VALUE = 1 << 4 => "CXXClassTypeValue";
        const DOT_MEMBER_ACCESS = 1 << 5 => "DotMemberAccess";
        const ARROW_MEMBER_ACCESS = 1 << 6 => "ArrowMemberAccess";
        const OBJC_PROPERTY_ACCESS = 1 << 7 => "ObjCPropertyAccess";
        const ENUM_TAG = 1 << 8 => "EnumTag";
        const UNION_TAG = 1 << 9 => "UnionTag";
        const STRUCT_TAG = 1 << 10 => "StructTag";
        const CLASS_TAG = 1 << 11 => "ClassTag";
        const NAMESPACE = 1 << 12 => "Namespace";
        const NESTED_NAME_SPECIFIER = 1 << 13 => "NestedNameSpecifier";
        const OBJC_INTERFACE = 1 << 14 => "ObjCInterface";
        const OBJC_PROTOCOL = 1 << 15 => "ObjCProtocol";
        const OBJC_CATEGORY = 1 << 16 => "ObjCCategory";
        const OBJC_INSTANCE_MESSAGE = 1 << 17 => "ObjCInstanceMessage";
        const OBJC_CLASS_MESSAGE = 1 << 18 => "ObjCClassMessage";
        const OBJC_SELECTOR_NAME = 1 << 19 => "ObjCSelectorName";
        const MACRO_NAME = 1 << 20 => "MacroName";
        /// Inside a comment or string, where only natural language fits
        const NATURAL_LANGUAGE = 1 << 21 => "NaturalLanguage";
        const INCLUDED_FILE = 1 << 22 => "IncludedFile";
        /// libclang could not determine the context; every bit above is set
        const UNKNOWN = (1 << 23) - 1 => "Unknown";
    }
}

foreign_enum! {
    /// Kind of a piece of a completion string (`CXCompletionChunkKind`)
    pub enum CompletionChunkKind as "CompletionChunk" {
        /// A nested completion string for optional arguments
        Optional = 0,
        /// The text the user is expected to type; used for filtering
        TypedText = 1,
        Text = 2,
        /// A placeholder the user should replace
        Placeholder = 3,
        /// Informative text that is not inserted
        Informative = 4,
        /// The parameter currently being completed in a call
        CurrentParameter = 5,
        LeftParen = 6,
        RightParen = 7,
        LeftBracket = 8,
        RightBracket = 9,
        LeftBrace = 10,
        RightBrace = 11,
        LeftAngle = 12,
        RightAngle = 13,
        Comma = 14,
        /// Result type of the function, variable or expression
        ResultType = 15,
        Colon = 16,
        SemiColon = 17,
        Equal = 18,
        HorizontalSpace = 19,
        VerticalSpace = 20,
    }
}

foreign_enum! {
    /// Whether an entity can be used (`CXAvailabilityKind`)
    pub enum AvailabilityKind as "Availability" {
        Available = 0,
        Deprecated = 1,
        NotAvailable = 2,
        /// Available, but not accessible from the completion point
        NotAccessible = 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_complete_flag_values() {
        assert_eq!(CodeCompleteFlags::INCLUDE_MACROS.to_raw(), 0x01);
        assert_eq!(CodeCompleteFlags::SKIP_PREAMBLE.to_raw(), 0x08);
        assert_eq!(CodeCompleteFlags::INCLUDE_COMPLETIONS_WITH_FIX_ITS.to_raw(), 0x10);
        assert_eq!(CodeCompleteFlags::all().to_raw(), 0x1f);
        assert_eq!(CodeCompleteFlags::empty().spelling(), "CodeComplete=None");
    }

    #[test]
    fn test_completion_context_values() {
        assert_eq!(CompletionContext::empty().to_raw(), 0);
        assert_eq!(CompletionContext::ANY_TYPE.to_raw(), 1);
        assert_eq!(CompletionContext::NATURAL_LANGUAGE.to_raw(), 1 << 21);
        assert_eq!(CompletionContext::INCLUDED_FILE.to_raw(), 1 << 22);
        assert_eq!(CompletionContext::UNKNOWN.to_raw(), (1 << 23) - 1);
    }

    #[test]
    fn test_completion_context_spelling() {
        assert_eq!(CompletionContext::UNEXPOSED.to_raw(), 0);
        assert_eq!(
            CompletionContext::from_raw(0).spelling(),
            "CompletionContext=Unexposed"
        );
        assert_eq!(
            CompletionContext::NATURAL_LANGUAGE.spelling(),
            "CompletionContext=NaturalLanguage"
        );
        assert_eq!(
            CompletionContext::UNKNOWN.spelling(),
            "CompletionContext=Unknown"
        );
        assert_eq!(
            (CompletionContext::DOT_MEMBER_ACCESS | CompletionContext::ANY_VALUE).spelling(),
            "CompletionContext=AnyValue|DotMemberAccess"
        );
    }

    #[test]
    fn test_completion_context_keeps_unknown_bits() {
        let context = CompletionContext::from_raw((1 << 30) | 1);
        assert!(context.has_unknown_bits());
        assert!(context.contains(CompletionContext::ANY_TYPE));
        assert_eq!(context.to_raw(), (1 << 30) | 1);
    }

    #[test]
    fn test_chunk_and_availability_values() {
        for (raw, kind) in CompletionChunkKind::KNOWN.iter().enumerate() {
            assert_eq!(kind.to_raw(), raw as u32);
        }
        assert_eq!(CompletionChunkKind::VerticalSpace.to_raw(), 20);
        assert_eq!(AvailabilityKind::NotAccessible.to_raw(), 3);
        assert_eq!(AvailabilityKind::from_raw(4), AvailabilityKind::Unknown(4));
    }
}
