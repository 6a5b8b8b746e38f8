//! Indexing a translation unit through `clang_indexTranslationUnit`
//!
//! libclang walks the unit and reports declarations and references through a
//! table of callbacks. Those callbacks are routed to an [`IndexConsumer`].

mod flags;
mod info;

pub use flags::{EntityKind, EntityRefKind, IndexOptFlags, SymbolRole};
pub use info::{ContainerInfo, DeclInfo, EntityInfo, EntityRefInfo, IndexLocation};

use std::ffi::{c_int, c_void};
use std::marker::PhantomData;
use std::mem;

use clang_sys::{
    CXClientData, CXIdxDeclInfo, CXIdxEntityRefInfo, CXIndexAction, IndexerCallbacks,
    clang_IndexAction_create, clang_IndexAction_dispose, clang_indexTranslationUnit,
};
use tracing::debug;

use crate::error::{ClangError, Result};
use crate::ffi::callback::CallbackState;
use crate::ffi::{Disposable, Owned};
use crate::index::Index;
use crate::translation_unit::{ErrorCode, TranslationUnit};

/// Receives what the indexer finds
///
/// Info values borrow libclang memory that is only valid during the call.
pub trait IndexConsumer {
    /// Called repeatedly; returning `true` stops indexing early
    fn abort_requested(&mut self) -> bool {
        false
    }

    fn declaration(&mut self, _info: DeclInfo<'_>) {}

    fn entity_reference(&mut self, _info: EntityRefInfo<'_>) {}
}

pub(crate) enum IndexActionResource {}

unsafe impl Disposable for IndexActionResource {
    type Raw = CXIndexAction;
    const NAME: &'static str = "CXIndexAction";

    unsafe fn dispose(raw: CXIndexAction) {
        unsafe { clang_IndexAction_dispose(raw) }
    }
}

/// An owned `CXIndexAction`
///
/// One action can index several units; with
/// [`IndexOptFlags::SKIP_PARSED_BODIES_IN_SESSION`] it skips bodies it has
/// already seen.
#[derive(Debug)]
pub struct IndexAction<'i> {
    raw: Owned<IndexActionResource>,
    _index: PhantomData<&'i ()>,
}

impl<'i> IndexAction<'i> {
    pub fn new(index: &'i Index<'_>) -> Self {
        Self {
            raw: unsafe { Owned::from_raw(clang_IndexAction_create(index.as_raw())) },
            _index: PhantomData,
        }
    }

    /// Index an already parsed unit, reporting to `consumer`
    ///
    /// A panic inside the consumer aborts indexing and is resumed once
    /// libclang has returned.
    pub fn index_translation_unit<C: IndexConsumer>(
        &self,
        unit: &TranslationUnit<'_>,
        flags: IndexOptFlags,
        consumer: &mut C,
    ) -> Result<()> {
        let mut callbacks = callbacks_for::<C>();
        let mut state = CallbackState::new(consumer);

        debug!(file = %unit.spelling(), flags = %flags, "Indexing translation unit");
        let code = unsafe {
            clang_indexTranslationUnit(
                self.raw.as_raw(),
                state.as_client_data(),
                &mut callbacks,
                mem::size_of::<IndexerCallbacks>() as _,
                flags.to_raw() as _,
                unit.as_raw(),
            )
        };
        state.finish();

        match ErrorCode::from_raw(code as u32) {
            ErrorCode::Success => Ok(()),
            code => Err(ClangError::Indexing { code }),
        }
    }
}

fn callbacks_for<C: IndexConsumer>() -> IndexerCallbacks {
    IndexerCallbacks {
        abortQuery: Some(abort_query::<C>),
        diagnostic: None,
        enteredMainFile: None,
        ppIncludedFile: None,
        importedASTFile: None,
        startedTranslationUnit: None,
        indexDeclaration: Some(index_declaration::<C>),
        indexEntityReference: Some(index_entity_reference::<C>),
    }
}

extern "C" fn abort_query<C: IndexConsumer>(data: CXClientData, _reserved: *mut c_void) -> c_int {
    let state = unsafe { CallbackState::<&mut C>::from_client_data(data) };
    state.invoke(true, |consumer| consumer.abort_requested()) as c_int
}

extern "C" fn index_declaration<C: IndexConsumer>(data: CXClientData, info: *const CXIdxDeclInfo) {
    let state = unsafe { CallbackState::<&mut C>::from_client_data(data) };
    if let Some(info) = unsafe { info.as_ref() } {
        state.invoke((), |consumer| consumer.declaration(DeclInfo::new(info)));
    }
}

extern "C" fn index_entity_reference<C: IndexConsumer>(
    data: CXClientData,
    info: *const CXIdxEntityRefInfo,
) {
    let state = unsafe { CallbackState::<&mut C>::from_client_data(data) };
    if let Some(info) = unsafe { info.as_ref() } {
        state.invoke((), |consumer| consumer.entity_reference(EntityRefInfo::new(info)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clang_sys::{CXCursor, CXIdxLoc};
    use std::panic::{self, AssertUnwindSafe};
    use std::ptr;

    #[derive(Default)]
    struct Recorder {
        references: Vec<SymbolRole>,
        stop: bool,
    }

    impl IndexConsumer for Recorder {
        fn abort_requested(&mut self) -> bool {
            self.stop
        }

        fn entity_reference(&mut self, info: EntityRefInfo<'_>) {
            if info.role().contains(SymbolRole::WRITE) {
                panic!("unexpected write");
            }
            self.references.push(info.role());
        }
    }

    fn reference(role: SymbolRole) -> CXIdxEntityRefInfo {
        CXIdxEntityRefInfo {
            kind: EntityRefKind::Direct.to_raw() as _,
            cursor: CXCursor {
                kind: 0,
                xdata: 0,
                data: [ptr::null(); 3],
            },
            loc: CXIdxLoc {
                ptr_data: [ptr::null_mut(); 2],
                int_data: 0,
            },
            referencedEntity: ptr::null(),
            parentEntity: ptr::null(),
            container: ptr::null(),
            role: role.to_raw() as _,
        }
    }

    #[test]
    fn test_reference_callback_reaches_consumer() {
        let mut recorder = Recorder::default();
        let mut state = CallbackState::new(&mut recorder);
        let data = state.as_client_data();

        let info = reference(SymbolRole::REFERENCE | SymbolRole::READ);
        index_entity_reference::<Recorder>(data, &info);
        index_entity_reference::<Recorder>(data, ptr::null());
        assert_eq!(abort_query::<Recorder>(data, ptr::null_mut()), 0);
        state.finish();

        assert_eq!(
            recorder.references,
            vec![SymbolRole::REFERENCE | SymbolRole::READ]
        );
    }

    #[test]
    fn test_abort_query_forwards_consumer_request() {
        let mut recorder = Recorder {
            stop: true,
            ..Recorder::default()
        };
        let mut state = CallbackState::new(&mut recorder);
        let data = state.as_client_data();
        assert_eq!(abort_query::<Recorder>(data, ptr::null_mut()), 1);
        state.finish();
    }

    #[test]
    fn test_consumer_panic_requests_abort() {
        let mut recorder = Recorder::default();
        let mut state = CallbackState::new(&mut recorder);
        let data = state.as_client_data();

        let info = reference(SymbolRole::WRITE);
        index_entity_reference::<Recorder>(data, &info);
        assert_eq!(abort_query::<Recorder>(data, ptr::null_mut()), 1);

        let resumed = panic::catch_unwind(AssertUnwindSafe(|| state.finish()));
        assert!(resumed.is_err());
        assert!(recorder.references.is_empty());
    }

    #[test]
    fn test_callback_table_wires_consumer() {
        let callbacks = callbacks_for::<Recorder>();
        assert!(callbacks.abortQuery.is_some());
        assert!(callbacks.indexDeclaration.is_some());
        assert!(callbacks.indexEntityReference.is_some());
        assert!(callbacks.diagnostic.is_none());
    }
}
