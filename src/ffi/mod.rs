//! Adapter layer between libclang's C calling convention and native Rust values
//!
//! Everything that touches raw libclang memory goes through one of the helpers
//! here: owned handles with RAII disposal, transient string copies, array views
//! and the callback trampolines used by visitors and the indexer.

pub(crate) mod array;
pub(crate) mod callback;
pub(crate) mod enums;
pub(crate) mod resource;
pub(crate) mod string;

use std::ffi::CString;
use std::path::Path;

use crate::error::{ClangError, Result};

pub(crate) use array::foreign_slice;
pub(crate) use resource::{Disposable, Owned};
pub(crate) use string::{cx_string, cx_string_opt};

/// Convert a native string into the NUL-terminated form libclang expects
pub(crate) fn c_string(value: &str) -> Result<CString> {
    CString::new(value).map_err(ClangError::from)
}

/// Convert a path into a C string, rejecting paths that are not valid UTF-8
pub(crate) fn c_path(path: &Path) -> Result<CString> {
    let text = path
        .to_str()
        .ok_or_else(|| ClangError::NonUtf8Path(path.to_path_buf()))?;
    c_string(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_c_string_rejects_interior_nul() {
        let result = c_string("main\0.cpp");
        assert!(matches!(result, Err(ClangError::InteriorNul(_))));
    }

    #[test]
    fn test_c_path_round_trips_utf8() {
        let path = PathBuf::from("/tmp/project/src/main.cpp");
        let c_path = c_path(&path).unwrap();
        assert_eq!(c_path.to_str().unwrap(), "/tmp/project/src/main.cpp");
    }

    #[cfg(unix)]
    #[test]
    fn test_c_path_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/\xff.cpp"));
        assert!(matches!(c_path(path), Err(ClangError::NonUtf8Path(_))));
    }
}
