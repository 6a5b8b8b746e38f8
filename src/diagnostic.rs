//! Compiler diagnostics reported by a translation unit or a completion run

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use clang_sys::{
    CXDiagnostic, CXSourceRange, CXString, clang_defaultDiagnosticDisplayOptions,
    clang_disposeDiagnostic, clang_formatDiagnostic, clang_getDiagnosticCategoryText,
    clang_getDiagnosticFixIt, clang_getDiagnosticLocation, clang_getDiagnosticNumFixIts,
    clang_getDiagnosticNumRanges, clang_getDiagnosticOption, clang_getDiagnosticRange,
    clang_getDiagnosticSeverity, clang_getDiagnosticSpelling,
};
use serde::Serialize;

use crate::ffi::enums::{foreign_enum, foreign_flags};
use crate::ffi::string::non_empty;
use crate::ffi::{Disposable, Owned, cx_string, cx_string_opt};
use crate::source::{SourceLocation, SourceRange};

foreign_enum! {
    /// Severity of a diagnostic (`CXDiagnosticSeverity`)
    pub enum DiagnosticSeverity as "Diagnostic" {
        /// Suppressed by the command line
        Ignored = 0,
        /// Supplementary information attached to another diagnostic
        Note = 1,
        Warning = 2,
        Error = 3,
        /// The compiler cannot recover from this error
        Fatal = 4,
    }
}

impl DiagnosticSeverity {
    /// Lower-case label as printed by the clang driver
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticSeverity::Ignored => "ignored",
            DiagnosticSeverity::Note => "note",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Fatal => "fatal error",
            DiagnosticSeverity::Unknown(_) => "unknown",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, DiagnosticSeverity::Error | DiagnosticSeverity::Fatal)
    }
}

impl Serialize for DiagnosticSeverity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

foreign_flags! {
    /// Options for [`Diagnostic::format`] (`CXDiagnosticDisplayOptions`)
    pub struct DiagnosticDisplayOptions: u32 as "Diagnostic" {
        /// Prefix with `file:line:column:` or just `file:`
        const DISPLAY_SOURCE_LOCATION = 0x01 => "DisplaySourceLocation";
        /// Include the column in the location
        const DISPLAY_COLUMN = 0x02 => "DisplayColumn";
        /// Append the source ranges in `{l:c-l:c}` form
        const DISPLAY_SOURCE_RANGES = 0x04 => "DisplaySourceRanges";
        /// Append the command-line option, as in `[-Wunused]`
        const DISPLAY_OPTION = 0x08 => "DisplayOption";
        const DISPLAY_CATEGORY_ID = 0x10 => "DisplayCategoryId";
        const DISPLAY_CATEGORY_NAME = 0x20 => "DisplayCategoryName";
    }
}

impl DiagnosticDisplayOptions {
    /// Options libclang uses to mimic the clang driver's output
    pub fn default_options() -> Self {
        Self::from_raw(unsafe { clang_defaultDiagnosticDisplayOptions() } as u32)
    }
}

/// Command-line option that enables a diagnostic, and the one that disables it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticOption {
    pub enable: String,
    pub disable: Option<String>,
}

/// A replacement proposed by a diagnostic or a completion
#[derive(Debug, Clone)]
pub struct FixIt<'a> {
    pub range: SourceRange<'a>,
    pub replacement: String,
}

pub(crate) enum DiagnosticResource {}

unsafe impl Disposable for DiagnosticResource {
    type Raw = CXDiagnostic;
    const NAME: &'static str = "CXDiagnostic";

    unsafe fn dispose(raw: CXDiagnostic) {
        unsafe { clang_disposeDiagnostic(raw) }
    }
}

/// An owned `CXDiagnostic`, bound to the unit or result set it came from
pub struct Diagnostic<'a> {
    raw: Owned<DiagnosticResource>,
    _owner: PhantomData<&'a ()>,
}

impl<'a> Diagnostic<'a> {
    /// Take ownership of a diagnostic, mapping null to `None`
    ///
    /// # Safety
    /// `raw` must be null or a diagnostic whose owner outlives `'a`.
    pub(crate) unsafe fn from_raw(raw: CXDiagnostic) -> Option<Self> {
        (!raw.is_null()).then(|| Self {
            raw: unsafe { Owned::from_raw(raw) },
            _owner: PhantomData,
        })
    }

    fn as_raw(&self) -> CXDiagnostic {
        self.raw.as_raw()
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::from_raw(unsafe { clang_getDiagnosticSeverity(self.as_raw()) } as u32)
    }

    /// The diagnostic message
    pub fn spelling(&self) -> String {
        cx_string(unsafe { clang_getDiagnosticSpelling(self.as_raw()) })
    }

    pub fn location(&self) -> SourceLocation<'a> {
        unsafe { SourceLocation::from_raw(clang_getDiagnosticLocation(self.as_raw())) }
    }

    /// Render the diagnostic the way a compiler driver would
    pub fn format(&self, options: DiagnosticDisplayOptions) -> String {
        cx_string(unsafe { clang_formatDiagnostic(self.as_raw(), options.to_raw() as _) })
    }

    /// Category name such as "Semantic Issue"
    pub fn category_text(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_getDiagnosticCategoryText(self.as_raw()) })
    }

    /// The warning option controlling this diagnostic, if any
    pub fn option(&self) -> Option<DiagnosticOption> {
        let mut disable = CXString {
            data: ptr::null(),
            private_flags: 0,
        };
        let enable = cx_string(unsafe { clang_getDiagnosticOption(self.as_raw(), &mut disable) });
        let disable = cx_string(disable);
        non_empty(enable).map(|enable| DiagnosticOption {
            enable,
            disable: non_empty(disable),
        })
    }

    pub fn num_ranges(&self) -> u32 {
        unsafe { clang_getDiagnosticNumRanges(self.as_raw()) as u32 }
    }

    pub fn range(&self, index: u32) -> Option<SourceRange<'a>> {
        if index >= self.num_ranges() {
            return None;
        }
        Some(unsafe { SourceRange::from_raw(clang_getDiagnosticRange(self.as_raw(), index as _)) })
    }

    pub fn num_fix_its(&self) -> u32 {
        unsafe { clang_getDiagnosticNumFixIts(self.as_raw()) as u32 }
    }

    /// Fix-it at `index`; an empty replacement means "delete the range"
    pub fn fix_it(&self, index: u32) -> Option<FixIt<'a>> {
        if index >= self.num_fix_its() {
            return None;
        }
        let mut range = CXSourceRange {
            ptr_data: [ptr::null(); 2],
            begin_int_data: 0,
            end_int_data: 0,
        };
        let replacement =
            cx_string(unsafe { clang_getDiagnosticFixIt(self.as_raw(), index as _, &mut range) });
        Some(FixIt {
            range: unsafe { SourceRange::from_raw(range) },
            replacement,
        })
    }

    pub fn fix_its(&self) -> impl Iterator<Item = FixIt<'a>> + '_ {
        (0..self.num_fix_its()).filter_map(move |index| self.fix_it(index))
    }
}

impl fmt::Debug for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("severity", &self.severity())
            .field("spelling", &self.spelling())
            .finish()
    }
}
