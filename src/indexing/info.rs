//! Views over the records libclang passes to indexer callbacks
//!
//! Every record lives only for the duration of a single callback, so each view
//! borrows it for that long and nothing derived from it may be kept.

use std::fmt;
use std::ptr;

use clang_sys::{
    CXFile, CXIdxClientFile, CXIdxContainerInfo, CXIdxDeclInfo, CXIdxEntityInfo,
    CXIdxEntityRefInfo, CXIdxLoc, clang_indexLoc_getCXSourceLocation,
    clang_indexLoc_getFileLocation,
};

use super::flags::{EntityKind, EntityRefKind, SymbolRole};
use crate::cursor::Cursor;
use crate::ffi::string::borrowed_c_str;
use crate::file::File;
use crate::source::{Position, ResolvedLocation, SourceLocation};

/// A location as reported by the indexer
#[derive(Clone, Copy)]
pub struct IndexLocation<'a> {
    raw: CXIdxLoc,
    _info: std::marker::PhantomData<&'a ()>,
}

impl<'a> IndexLocation<'a> {
    fn new(raw: CXIdxLoc) -> Self {
        Self {
            raw,
            _info: std::marker::PhantomData,
        }
    }

    /// File, line, column and offset of the location
    pub fn file_location(&self) -> ResolvedLocation<'a> {
        let mut client_file: CXIdxClientFile = ptr::null_mut();
        let mut file: CXFile = ptr::null_mut();
        let (mut line, mut column, mut offset) = (0, 0, 0);
        unsafe {
            clang_indexLoc_getFileLocation(
                self.raw,
                &mut client_file,
                &mut file,
                &mut line,
                &mut column,
                &mut offset,
            );
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

    pub fn source_location(&self) -> SourceLocation<'a> {
        unsafe { SourceLocation::from_raw(clang_indexLoc_getCXSourceLocation(self.raw)) }
    }
}

impl fmt::Debug for IndexLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.file_location();
        f.debug_struct("IndexLocation")
            .field("file", &location.file.map(|file| file.name()))
            .field("position", &location.position)
            .finish()
    }
}

/// An entity taking part in a declaration or reference
#[derive(Clone, Copy)]
pub struct EntityInfo<'a> {
    raw: &'a CXIdxEntityInfo,
}

impl<'a> EntityInfo<'a> {
    /// # Safety
    /// `raw` must be null or valid for `'a`.
    pub(crate) unsafe fn from_ptr(raw: *const CXIdxEntityInfo) -> Option<Self> {
        unsafe { raw.as_ref() }.map(|raw| Self { raw })
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::from_raw(self.raw.kind as u32)
    }

    /// Entity name; `None` for anonymous entities
    pub fn name(&self) -> Option<String> {
        unsafe { borrowed_c_str(self.raw.name) }
    }

    pub fn usr(&self) -> Option<String> {
        unsafe { borrowed_c_str(self.raw.USR) }
    }

    pub fn cursor(&self) -> Cursor<'a> {
        unsafe { Cursor::from_raw(self.raw.cursor) }
    }
}

impl fmt::Debug for EntityInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityInfo")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("usr", &self.usr())
            .finish()
    }
}

/// The lexical or semantic container of a declaration or reference
#[derive(Clone, Copy)]
pub struct ContainerInfo<'a> {
    raw: &'a CXIdxContainerInfo,
}

impl<'a> ContainerInfo<'a> {
    /// # Safety
    /// `raw` must be null or valid for `'a`.
    pub(crate) unsafe fn from_ptr(raw: *const CXIdxContainerInfo) -> Option<Self> {
        unsafe { raw.as_ref() }.map(|raw| Self { raw })
    }

    pub fn cursor(&self) -> Cursor<'a> {
        unsafe { Cursor::from_raw(self.raw.cursor) }
    }
}

impl fmt::Debug for ContainerInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerInfo")
            .field("cursor", &self.cursor())
            .finish()
    }
}

/// A reference to an entity, reported through `indexEntityReference`
#[derive(Clone, Copy)]
pub struct EntityRefInfo<'a> {
    raw: &'a CXIdxEntityRefInfo,
}

impl<'a> EntityRefInfo<'a> {
    pub(crate) fn new(raw: &'a CXIdxEntityRefInfo) -> Self {
        Self { raw }
    }

    pub fn kind(&self) -> EntityRefKind {
        EntityRefKind::from_raw(self.raw.kind as u32)
    }

    /// The cursor of the reference itself
    pub fn cursor(&self) -> Cursor<'a> {
        unsafe { Cursor::from_raw(self.raw.cursor) }
    }

    pub fn loc(&self) -> IndexLocation<'a> {
        IndexLocation::new(self.raw.loc)
    }

    /// The entity that gets referenced
    pub fn referenced_entity(&self) -> Option<EntityInfo<'a>> {
        unsafe { EntityInfo::from_ptr(self.raw.referencedEntity) }
    }

    /// Immediate parent of the reference
    ///
    /// In `Foo *var;` the parent of the reference to `Foo` is `var`. Inside a
    /// function body the parent is the function.
    pub fn parent_entity(&self) -> Option<EntityInfo<'a>> {
        unsafe { EntityInfo::from_ptr(self.raw.parentEntity) }
    }

    /// Lexical container of the reference
    pub fn container(&self) -> Option<ContainerInfo<'a>> {
        unsafe { ContainerInfo::from_ptr(self.raw.container) }
    }

    pub fn role(&self) -> SymbolRole {
        SymbolRole::from_raw(self.raw.role as u32)
    }
}

impl fmt::Debug for EntityRefInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRefInfo")
            .field("kind", &self.kind())
            .field("referenced_entity", &self.referenced_entity())
            .field("role", &self.role())
            .finish()
    }
}

/// A declaration, reported through `indexDeclaration`
#[derive(Clone, Copy)]
pub struct DeclInfo<'a> {
    raw: &'a CXIdxDeclInfo,
}

impl<'a> DeclInfo<'a> {
    pub(crate) fn new(raw: &'a CXIdxDeclInfo) -> Self {
        Self { raw }
    }

    pub fn entity(&self) -> Option<EntityInfo<'a>> {
        unsafe { EntityInfo::from_ptr(self.raw.entityInfo) }
    }

    pub fn cursor(&self) -> Cursor<'a> {
        unsafe { Cursor::from_raw(self.raw.cursor) }
    }

    pub fn loc(&self) -> IndexLocation<'a> {
        IndexLocation::new(self.raw.loc)
    }

    pub fn semantic_container(&self) -> Option<ContainerInfo<'a>> {
        unsafe { ContainerInfo::from_ptr(self.raw.semanticContainer) }
    }

    pub fn lexical_container(&self) -> Option<ContainerInfo<'a>> {
        unsafe { ContainerInfo::from_ptr(self.raw.lexicalContainer) }
    }

    pub fn is_definition(&self) -> bool {
        self.raw.isDefinition != 0
    }

    pub fn is_redeclaration(&self) -> bool {
        self.raw.isRedeclaration != 0
    }

    pub fn is_implicit(&self) -> bool {
        self.raw.isImplicit != 0
    }

    /// Whether the declaration can contain other declarations
    pub fn is_container(&self) -> bool {
        self.raw.isContainer != 0
    }
}

impl fmt::Debug for DeclInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclInfo")
            .field("entity", &self.entity())
            .field("is_definition", &self.is_definition())
            .field("is_redeclaration", &self.is_redeclaration())
            .finish()
    }
}
