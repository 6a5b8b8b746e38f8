//! Indexer option flags, symbol roles and entity kinds

use crate::ffi::enums::{foreign_enum, foreign_flags};

foreign_flags! {
    /// Options for `clang_indexTranslationUnit` (`CXIndexOptFlags`)
    ///
    /// The empty set is `CXIndexOpt_None`.
    pub struct IndexOptFlags: u32 as "IndexOpt" {
        /// Report a reference only once per entity and location
        const SUPPRESS_REDUNDANT_REFS = 0x01 => "SuppressRedundantRefs";
        /// Report function-local symbols too
        const INDEX_FUNCTION_LOCAL_SYMBOLS = 0x02 => "IndexFunctionLocalSymbols";
        /// Report implicit template instantiations
        const INDEX_IMPLICIT_TEMPLATE_INSTANTIATIONS = 0x04 => "IndexImplicitTemplateInstantiations";
        /// Suppress all compiler warnings while indexing
        const SUPPRESS_WARNINGS = 0x08 => "SuppressWarnings";
        /// Skip bodies already parsed by an earlier unit of the same action
        const SKIP_PARSED_BODIES_IN_SESSION = 0x10 => "SkipParsedBodiesInSession";
    }
}

foreign_flags! {
    /// Roles a symbol plays at a reference (`CXSymbolRole`)
    pub struct SymbolRole: u32 as "SymbolRole" {
        const DECLARATION = 1 << 0 => "Declaration";
        const DEFINITION = 1 << 1 => "Definition";
        const REFERENCE = 1 << 2 => "Reference";
        const READ = 1 << 3 => "Read";
        const WRITE = 1 << 4 => "Write";
        const CALL = 1 << 5 => "Call";
        const DYNAMIC = 1 << 6 => "Dynamic";
        const ADDRESS_OF = 1 << 7 => "AddressOf";
        const IMPLICIT = 1 << 8 => "Implicit";
    }
}

foreign_enum! {
    /// How an entity is referenced (`CXIdxEntityRefKind`)
    pub enum EntityRefKind as "IdxEntityRef" {
        /// Written in the source
        Direct = 1,
        /// Implied, as with an Objective-C property access
        Implicit = 2,
    }
}

foreign_enum! {
    /// Kind of an indexed entity (`CXIdxEntityKind`)
    pub enum EntityKind as "IdxEntity" {
        Unexposed = 0,
        Typedef = 1,
        Function = 2,
        Variable = 3,
        Field = 4,
        EnumConstant = 5,
        ObjCClass = 6,
        ObjCProtocol = 7,
        ObjCCategory = 8,
        ObjCInstanceMethod = 9,
        ObjCClassMethod = 10,
        ObjCProperty = 11,
        ObjCIvar = 12,
        Enum = 13,
        Struct = 14,
        Union = 15,
        CXXClass = 16,
        CXXNamespace = 17,
        CXXNamespaceAlias = 18,
        CXXStaticVariable = 19,
        CXXStaticMethod = 20,
        CXXInstanceMethod = 21,
        CXXConstructor = 22,
        CXXDestructor = 23,
        CXXConversionFunction = 24,
        CXXTypeAlias = 25,
        CXXInterface = 26,
    }
}
