//! Client-data plumbing for libclang callbacks
//!
//! libclang calls back through `extern "C"` functions with an opaque
//! client-data pointer. [`CallbackState`] is what that pointer refers to: the
//! Rust handler plus a slot for a panic raised inside it. A panic must not
//! unwind through libclang's frames, so it is parked here, libclang is asked
//! to stop, and the panic resumes once the foreign call has returned.

use std::any::Any;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

pub(crate) struct CallbackState<H> {
    pub(crate) handler: H,
    panic: Option<Box<dyn Any + Send + 'static>>,
}

impl<H> CallbackState<H> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler,
            panic: None,
        }
    }

    pub(crate) fn as_client_data(&mut self) -> *mut c_void {
        self as *mut Self as *mut c_void
    }

    /// Recover the state behind a client-data pointer
    ///
    /// # Safety
    /// `data` must come from [`CallbackState::as_client_data`] on a state of
    /// the same `H` that is still alive and not otherwise borrowed.
    pub(crate) unsafe fn from_client_data<'a>(data: *mut c_void) -> &'a mut Self {
        unsafe { &mut *(data as *mut Self) }
    }

    #[cfg(test)]
    pub(crate) fn has_panicked(&self) -> bool {
        self.panic.is_some()
    }

    /// Run the handler, returning `stop` instead if it panics or already has
    pub(crate) fn invoke<T>(&mut self, stop: T, call: impl FnOnce(&mut H) -> T) -> T {
        if self.panic.is_some() {
            return stop;
        }
        let handler = &mut self.handler;
        match panic::catch_unwind(AssertUnwindSafe(|| call(handler))) {
            Ok(value) => value,
            Err(payload) => {
                self.panic = Some(payload);
                stop
            }
        }
    }

    /// Re-raise a panic captured during the foreign call, if any
    pub(crate) fn finish(self) -> H {
        if let Some(payload) = self.panic {
            panic::resume_unwind(payload);
        }
        self.handler
    }
}
