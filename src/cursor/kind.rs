//! Cursor kinds (`CXCursorKind`)
//!
//! Only the kinds this crate reports on are named. Everything else, including
//! kinds added by newer libclang releases, is carried as `Unknown(raw)`; the
//! category predicates still work on those because they ask libclang.

use clang_sys::{
    clang_isAttribute, clang_isDeclaration, clang_isExpression, clang_isInvalid,
    clang_isPreprocessing, clang_isReference, clang_isStatement, clang_isTranslationUnit,
};

use crate::ffi::enums::foreign_enum;

foreign_enum! {
    /// The kind of entity a cursor points at
    pub enum CursorKind as "Cursor" {
        UnexposedDecl = 1,
        StructDecl = 2,
        UnionDecl = 3,
        ClassDecl = 4,
        EnumDecl = 5,
        FieldDecl = 6,
        EnumConstantDecl = 7,
        FunctionDecl = 8,
        VarDecl = 9,
        ParmDecl = 10,
        ObjCInterfaceDecl = 11,
        ObjCCategoryDecl = 12,
        ObjCProtocolDecl = 13,
        ObjCPropertyDecl = 14,
        ObjCIvarDecl = 15,
        ObjCInstanceMethodDecl = 16,
        ObjCClassMethodDecl = 17,
        ObjCImplementationDecl = 18,
        ObjCCategoryImplDecl = 19,
        TypedefDecl = 20,
        CXXMethod = 21,
        Namespace = 22,
        LinkageSpec = 23,
        Constructor = 24,
        Destructor = 25,
        ConversionFunction = 26,
        TemplateTypeParameter = 27,
        NonTypeTemplateParameter = 28,
        TemplateTemplateParameter = 29,
        FunctionTemplate = 30,
        ClassTemplate = 31,
        ClassTemplatePartialSpecialization = 32,
        NamespaceAlias = 33,
        UsingDirective = 34,
        UsingDeclaration = 35,
        TypeAliasDecl = 36,
        ObjCSynthesizeDecl = 37,
        ObjCDynamicDecl = 38,
        CXXAccessSpecifier = 39,

        ObjCSuperClassRef = 40,
        ObjCProtocolRef = 41,
        ObjCClassRef = 42,
        TypeRef = 43,
        CXXBaseSpecifier = 44,
        TemplateRef = 45,
        NamespaceRef = 46,
        MemberRef = 47,
        LabelRef = 48,
        OverloadedDeclRef = 49,
        VariableRef = 50,

        InvalidFile = 70,
        NoDeclFound = 71,
        NotImplemented = 72,
        /// Also the container kind reported when completion has no container
        InvalidCode = 73,

        UnexposedExpr = 100,
        DeclRefExpr = 101,
        MemberRefExpr = 102,
        CallExpr = 103,
        ObjCMessageExpr = 104,
        BlockExpr = 105,
        IntegerLiteral = 106,
        FloatingLiteral = 107,
        ImaginaryLiteral = 108,
        StringLiteral = 109,
        CharacterLiteral = 110,
        ParenExpr = 111,
        UnaryOperator = 112,
        ArraySubscriptExpr = 113,
        BinaryOperator = 114,
        CompoundAssignOperator = 115,
        ConditionalOperator = 116,
        CStyleCastExpr = 117,
        CXXBoolLiteralExpr = 130,
        CXXNullPtrLiteralExpr = 131,
        CXXThisExpr = 132,
        LambdaExpr = 144,

        UnexposedStmt = 200,
        LabelStmt = 201,
        CompoundStmt = 202,
        CaseStmt = 203,
        DefaultStmt = 204,
        IfStmt = 205,
        SwitchStmt = 206,
        WhileStmt = 207,
        DoStmt = 208,
        ForStmt = 209,
        GotoStmt = 210,
        IndirectGotoStmt = 211,
        ContinueStmt = 212,
        BreakStmt = 213,
        ReturnStmt = 214,
        GCCAsmStmt = 215,
        NullStmt = 230,
        DeclStmt = 231,

        TranslationUnit = 350,

        UnexposedAttr = 400,

        PreprocessingDirective = 500,
        MacroDefinition = 501,
        MacroExpansion = 502,
        InclusionDirective = 503,

        ModuleImportDecl = 600,
        TypeAliasTemplateDecl = 601,
        StaticAssert = 602,
        FriendDecl = 603,

        OverloadCandidate = 700,
    }
}

impl CursorKind {
    pub fn is_declaration(self) -> bool {
        unsafe { clang_isDeclaration(self.to_raw() as _) != 0 }
    }

    pub fn is_reference(self) -> bool {
        unsafe { clang_isReference(self.to_raw() as _) != 0 }
    }

    pub fn is_expression(self) -> bool {
        unsafe { clang_isExpression(self.to_raw() as _) != 0 }
    }

    pub fn is_statement(self) -> bool {
        unsafe { clang_isStatement(self.to_raw() as _) != 0 }
    }

    pub fn is_attribute(self) -> bool {
        unsafe { clang_isAttribute(self.to_raw() as _) != 0 }
    }

    /// Kinds libclang uses for failed lookups (70..=73)
    pub fn is_invalid(self) -> bool {
        unsafe { clang_isInvalid(self.to_raw() as _) != 0 }
    }

    pub fn is_translation_unit(self) -> bool {
        unsafe { clang_isTranslationUnit(self.to_raw() as _) != 0 }
    }

    pub fn is_preprocessing(self) -> bool {
        unsafe { clang_isPreprocessing(self.to_raw() as _) != 0 }
    }
}
