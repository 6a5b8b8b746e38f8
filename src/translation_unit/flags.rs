//! Translation unit flags and status codes

use clang_sys::clang_defaultEditingTranslationUnitOptions;

use crate::ffi::enums::{foreign_enum, foreign_flags};

foreign_flags! {
    /// Flags that control the creation of translation units (`CXTranslationUnit_Flags`)
    ///
    /// The empty set is `CXTranslationUnit_None`.
    pub struct TranslationUnitFlags: u32 as "TranslationUnit" {
        /// Build a detailed preprocessing record, including every macro definition and expansion
        const DETAILED_PREPROCESSING_RECORD = 0x01 => "DetailedPreprocessingRecord";
        /// Suppress the end-of-unit semantic analysis, e.g. when parsing a header for a PCH
        const INCOMPLETE = 0x02 => "Incomplete";
        /// Build an implicit precompiled header for the preamble
        const PRECOMPILED_PREAMBLE = 0x04 => "PrecompiledPreamble";
        /// Cache some code-completion results with each reparse
        const CACHE_COMPLETION_RESULTS = 0x08 => "CacheCompletionResults";
        /// The unit will be serialized with `clang_saveTranslationUnit`
        const FOR_SERIALIZATION = 0x10 => "ForSerialization";
        /// Deprecated chained precompiled preambles in C++
        const CXX_CHAINED_PCH = 0x20 => "CXXChainedPCH";
        /// Skip function and method bodies
        const SKIP_FUNCTION_BODIES = 0x40 => "SkipFunctionBodies";
        /// Include brief documentation comments in code completion
        const INCLUDE_BRIEF_COMMENTS_IN_CODE_COMPLETION = 0x80 => "IncludeBriefCommentsInCodeCompletion";
        /// Create the precompiled preamble on the first parse instead of the first reparse
        const CREATE_PREAMBLE_ON_FIRST_PARSE = 0x100 => "CreatePreambleOnFirstParse";
        /// Do not stop processing when fatal errors are encountered
        const KEEP_GOING = 0x200 => "KeepGoing";
        /// Preprocess a single file only
        const SINGLE_FILE_PARSE = 0x400 => "SingleFileParse";
        /// Limit `SKIP_FUNCTION_BODIES` to the preamble
        const LIMIT_SKIP_FUNCTION_BODIES_TO_PREAMBLE = 0x800 => "LimitSkipFunctionBodiesToPreamble";
        /// Include attributed types in `CXType`
        const INCLUDE_ATTRIBUTED_TYPES = 0x1000 => "IncludeAttributedTypes";
        /// Visit implicit attributes
        const VISIT_IMPLICIT_ATTRIBUTES = 0x2000 => "VisitImplicitAttributes";
        /// Drop non-error diagnostics coming from included files
        const IGNORE_NON_ERRORS_FROM_INCLUDED_FILES = 0x4000 => "IgnoreNonErrorsFromIncludedFiles";
        /// Keep excluded conditional blocks instead of skipping them
        const RETAIN_EXCLUDED_CONDITIONAL_BLOCKS = 0x8000 => "RetainExcludedConditionalBlocks";
    }
}

impl TranslationUnitFlags {
    /// Flags libclang recommends for units that will be edited and reparsed
    pub fn default_editing() -> Self {
        Self::from_raw(unsafe { clang_defaultEditingTranslationUnitOptions() } as u32)
    }
}

foreign_enum! {
    /// Status codes shared by parse, reparse and indexing calls (`CXErrorCode`)
    pub enum ErrorCode as "ErrorCode" {
        /// No error
        Success = 0,
        /// A generic error code, no further details are available
        Failure = 1,
        /// libclang crashed while performing the requested operation
        Crashed = 2,
        /// The function detected that the arguments violate the function contract
        InvalidArguments = 3,
        /// An AST deserialization error has occurred
        AstReadError = 4,
    }
}

foreign_enum! {
    /// Result of `clang_saveTranslationUnit` (`CXSaveError`)
    pub enum SaveError as "SaveError" {
        /// Saved successfully
        None = 0,
        /// `CXSaveError_Unknown`: an I/O or other unspecified failure
        Unspecified = 1,
        /// Errors in the unit prevented it from being saved
        TranslationErrors = 2,
        /// The translation unit handle was invalid
        InvalidTu = 3,
    }
}
