//! Owned libclang handles
//!
//! [`Owned`] pairs a raw handle with the disposal call libclang documents for
//! it. Drop runs that call exactly once; moving the value transfers ownership,
//! so a released handle can never be reached again from safe code.

use std::fmt;
use std::marker::PhantomData;

/// A libclang resource kind with a matching release call
///
/// # Safety
/// `dispose` must be the release function libclang documents for handles of
/// type `Raw`, and must accept every handle produced by the factory that the
/// implementor is paired with.
pub(crate) unsafe trait Disposable {
    /// Raw handle as returned by libclang
    type Raw: Copy;

    /// Name used in trace output
    const NAME: &'static str;

    /// Release the handle
    ///
    /// # Safety
    /// `raw` must be live and must not be used after this call.
    unsafe fn dispose(raw: Self::Raw);
}

/// Exclusive owner of one libclang handle
pub(crate) struct Owned<R: Disposable> {
    raw: R::Raw,
    // Raw pointers keep the owner on the thread that loaded libclang.
    _marker: PhantomData<(R, *mut ())>,
}

impl<R: Disposable> Owned<R> {
    /// Take ownership of a handle returned by a libclang factory call
    ///
    /// # Safety
    /// `raw` must be a live handle that no other owner will dispose.
    pub(crate) unsafe fn from_raw(raw: R::Raw) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn as_raw(&self) -> R::Raw {
        self.raw
    }

    /// Give up ownership without releasing the handle
    #[cfg(test)]
    pub(crate) fn into_raw(self) -> R::Raw {
        let this = std::mem::ManuallyDrop::new(self);
        this.raw
    }
}

impl<R: Disposable> Drop for Owned<R> {
    fn drop(&mut self) {
        tracing::trace!(resource = R::NAME, "Disposing libclang resource");
        // SAFETY: the handle is owned exclusively by self and this is the only
        // place it is released.
        unsafe { R::dispose(self.raw) }
    }
}

impl<R: Disposable> fmt::Debug for Owned<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owned").field("resource", &R::NAME).finish()
    }
}
