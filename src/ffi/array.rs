//! Views over arrays owned by libclang

/// Reinterpret a libclang pointer + count pair as a slice without copying
///
/// A null pointer or a zero count yields an empty slice and the pointer is
/// never read.
///
/// # Safety
/// When `ptr` is non-null it must point to `len` initialised values that stay
/// valid and unmodified for `'a`. Callers bind `'a` to a borrow of the owning
/// resource.
pub(crate) unsafe fn foreign_slice<'a, T>(ptr: *const T, len: usize) -> &'a [T] {
    if ptr.is_null() || len == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(ptr, len) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_pointer_is_empty() {
        let view: &[u32] = unsafe { foreign_slice(std::ptr::null(), 12) };
        assert!(view.is_empty());
    }

    #[test]
    fn test_zero_count_is_empty() {
        let backing = [1u32, 2, 3];
        let view = unsafe { foreign_slice(backing.as_ptr(), 0) };
        assert!(view.is_empty());
    }

    #[test]
    fn test_view_aliases_backing_memory() {
        let backing = vec![10u32, 20, 30];
        let view = unsafe { foreign_slice(backing.as_ptr(), backing.len()) };
        assert_eq!(view, &[10, 20, 30]);
        assert_eq!(view.as_ptr(), backing.as_ptr());
    }
}
