//! Source files taking part in a translation unit

use std::fmt;
use std::marker::PhantomData;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clang_sys::{
    CXFile, CXFileUniqueID, clang_File_isEqual, clang_File_tryGetRealPathName,
    clang_getFileName, clang_getFileTime, clang_getFileUniqueID,
};

use crate::ffi::{cx_string, cx_string_opt};

/// A borrowed `CXFile`, valid while its translation unit is alive
#[derive(Clone, Copy)]
pub struct File<'tu> {
    raw: CXFile,
    _tu: PhantomData<&'tu ()>,
}

/// Identity of a file on disk; equal across hard links and different spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileUniqueId([u64; 3]);

impl<'tu> File<'tu> {
    /// Wrap a file handle, mapping null to `None`
    ///
    /// # Safety
    /// `raw` must be null or a file of a translation unit that outlives `'tu`.
    pub(crate) unsafe fn from_raw(raw: CXFile) -> Option<Self> {
        (!raw.is_null()).then_some(Self {
            raw,
            _tu: PhantomData,
        })
    }

    pub(crate) fn as_raw(&self) -> CXFile {
        self.raw
    }

    /// Complete file and path name
    pub fn name(&self) -> String {
        cx_string(unsafe { clang_getFileName(self.raw) })
    }

    /// Last modification time
    pub fn time(&self) -> SystemTime {
        let seconds: libc::time_t = unsafe { clang_getFileTime(self.raw) };
        UNIX_EPOCH + Duration::from_secs(seconds.max(0) as u64)
    }

    /// Unique identity of the file, or `None` when libclang cannot determine it
    pub fn unique_id(&self) -> Option<FileUniqueId> {
        let mut id = CXFileUniqueID { data: [0; 3] };
        let status = unsafe { clang_getFileUniqueID(self.raw, &mut id) };
        (status == 0).then(|| FileUniqueId(id.data.map(|part| part as u64)))
    }

    /// Whether both handles refer to the same file
    pub fn is_same(&self, other: &File<'_>) -> bool {
        unsafe { clang_File_isEqual(self.raw, other.raw) != 0 }
    }

    /// Real path of the file, if libclang knows it
    ///
    /// Falls back to nothing rather than to [`File::name`]; callers decide.
    pub fn try_real_path_name(&self) -> Option<String> {
        cx_string_opt(unsafe { clang_File_tryGetRealPathName(self.raw) })
    }
}

impl PartialEq for File<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl fmt::Debug for File<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File").field("name", &self.name()).finish()
    }
}
