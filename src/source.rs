//! Source locations and ranges inside a translation unit
//!
//! [`SourceLocation`] and [`SourceRange`] are libclang values tied to their
//! translation unit. [`Position`], [`Span`] and [`FileSpan`] are plain data
//! resolved from them, suitable for reports and serialization.

use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::ptr;

use clang_sys::{
    CXFile, CXSourceLocation, CXSourceRange, clang_Location_isFromMainFile,
    clang_Location_isInSystemHeader, clang_Range_isNull, clang_equalLocations,
    clang_getExpansionLocation, clang_getRangeEnd, clang_getRangeStart,
    clang_getSpellingLocation,
};
use serde::{Deserialize, Serialize};

use crate::file::File;

/// 1-based line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A span together with the file it lies in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpan {
    pub file_path: PathBuf,
    pub span: Span,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for FileSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Span { start, end } = self.span;
        if start == end {
            write!(f, "{}:{}", self.file_path.display(), start)
        } else if start.line == end.line {
            write!(f, "{}:{}-{}", self.file_path.display(), start, end.column)
        } else {
            write!(f, "{}:{}-{}", self.file_path.display(), start, end)
        }
    }
}

/// A location resolved to a file, position and byte offset
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLocation<'tu> {
    pub file: Option<File<'tu>>,
    pub position: Position,
    pub offset: u32,
}

/// A borrowed `CXSourceLocation`
#[derive(Clone, Copy)]
pub struct SourceLocation<'tu> {
    raw: CXSourceLocation,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> SourceLocation<'tu> {
    /// # Safety
    /// `raw` must belong to a translation unit that outlives `'tu`.
    pub(crate) unsafe fn from_raw(raw: CXSourceLocation) -> Self {
        Self {
            raw,
            _tu: PhantomData,
        }
    }

    /// Where the characters were written, looking through macro expansions
    pub fn spelling_location(&self) -> ResolvedLocation<'tu> {
        self.resolve(false)
    }

    /// Where the location ends up after macro expansion
    pub fn expansion_location(&self) -> ResolvedLocation<'tu> {
        self.resolve(true)
    }

    fn resolve(&self, expansion: bool) -> ResolvedLocation<'tu> {
        let mut file: CXFile = ptr::null_mut();
        let (mut line, mut column, mut offset) = (0, 0, 0);
        unsafe {
            if expansion {
                clang_getExpansionLocation(self.raw, &mut file, &mut line, &mut column, &mut offset);
            } else {
                clang_getSpellingLocation(self.raw, &mut file, &mut line, &mut column, &mut offset);
            }
        }
        ResolvedLocation {
            file: unsafe { File::from_raw(file) },
            position: Position {
                line: line as u32,
                column: column as u32,
            },
            offset: offset as u32,
        }
    }

    pub fn is_in_main_file(&self) -> bool {
        unsafe { clang_Location_isFromMainFile(self.raw) != 0 }
    }

    pub fn is_in_system_header(&self) -> bool {
        unsafe { clang_Location_isInSystemHeader(self.raw) != 0 }
    }
}

impl PartialEq for SourceLocation<'_> {
    fn eq(&self, other: &Self) -> bool {
        unsafe { clang_equalLocations(self.raw, other.raw) != 0 }
    }
}

impl fmt::Debug for SourceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self.spelling_location();
        f.debug_struct("SourceLocation")
            .field("file", &resolved.file.map(|file| file.name()))
            .field("position", &resolved.position)
            .finish()
    }
}

/// A borrowed `CXSourceRange`
#[derive(Clone, Copy)]
pub struct SourceRange<'tu> {
    raw: CXSourceRange,
    _tu: PhantomData<&'tu ()>,
}

impl<'tu> SourceRange<'tu> {
    /// # Safety
    /// `raw` must belong to a translation unit that outlives `'tu`.
    pub(crate) unsafe fn from_raw(raw: CXSourceRange) -> Self {
        Self {
            raw,
            _tu: PhantomData,
        }
    }

    pub fn start(&self) -> SourceLocation<'tu> {
        unsafe { SourceLocation::from_raw(clang_getRangeStart(self.raw)) }
    }

    pub fn end(&self) -> SourceLocation<'tu> {
        unsafe { SourceLocation::from_raw(clang_getRangeEnd(self.raw)) }
    }

    pub fn is_null(&self) -> bool {
        unsafe { clang_Range_isNull(self.raw) != 0 }
    }

    /// Resolve both ends through their spelling locations
    ///
    /// `None` for null ranges and for ranges without a file (built-ins).
    pub fn to_file_span(&self) -> Option<FileSpan> {
        if self.is_null() {
            return None;
        }
        let start = self.start().spelling_location();
        let end = self.end().spelling_location();
        let file = start.file?;
        Some(FileSpan {
            file_path: PathBuf::from(file.name()),
            span: Span {
                start: start.position,
                end: end.position,
            },
        })
    }
}

impl fmt::Debug for SourceRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRange")
            .field("span", &self.to_file_span())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: (u32, u32), end: (u32, u32)) -> FileSpan {
        FileSpan {
            file_path: PathBuf::from("src/main.cpp"),
            span: Span {
                start: Position {
                    line: start.0,
                    column: start.1,
                },
                end: Position {
                    line: end.0,
                    column: end.1,
                },
            },
        }
    }

    #[test]
    fn test_file_span_display() {
        assert_eq!(span((3, 5), (3, 5)).to_string(), "src/main.cpp:3:5");
        assert_eq!(span((3, 5), (3, 12)).to_string(), "src/main.cpp:3:5-12");
        assert_eq!(span((3, 5), (7, 2)).to_string(), "src/main.cpp:3:5-7:2");
    }

    #[test]
    fn test_file_span_serialization() {
        let json = serde_json::to_value(span((1, 1), (1, 4))).unwrap();
        assert_eq!(json["file_path"], "src/main.cpp");
        assert_eq!(json["span"]["start"]["line"], 1);
        assert_eq!(json["span"]["end"]["column"], 4);
    }

    #[test]
    fn test_position_ordering() {
        let a = Position { line: 2, column: 9 };
        let b = Position { line: 3, column: 1 };
        assert!(a < b);
    }
}
