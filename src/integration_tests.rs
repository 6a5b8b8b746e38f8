//! End-to-end tests against a real libclang
//!
//! Enabled with `--features libclang-integration-tests`. libclang is located
//! through `LIBCLANG_PATH` or the usual system directories.

use std::path::{Path, PathBuf};

use crate::test_utils::sources::SourceTree;
use crate::{
    ChildVisit, ClangError, CodeCompleteFlags, CompletionConfigBuilder, CompletionContext,
    CursorKind, DeclInfo, DiagnosticDisplayOptions, DiagnosticSeverity, EntityKind,
    EntityRefInfo, IndexConsumer, IndexOptFlags, IndexOptions, Library, ParseConfigBuilder,
    SymbolRole, TranslationUnitFlags, UnsavedFile,
};

const SHAPES: &str = r#"/// A point on the plane
struct Point {
    int x;
    int y;
};

/// Adds the coordinates of a point
int sum(Point p) {
    return p.x + p.y;
}

int use_sum() {
    Point p{1, 2};
    return sum(p);
}
"#;

fn write_source(name: &str, contents: &str) -> (SourceTree, PathBuf) {
    let tree = SourceTree::new().unwrap();
    let path = tree.write(name, contents).unwrap();
    (tree, path)
}

fn parse_config(path: &Path) -> crate::ParseConfig {
    ParseConfigBuilder::new()
        .source_file(path)
        .add_args(["-x", "c++", "-std=c++17"])
        .build()
        .unwrap()
}

#[test]
fn test_library_reports_version_and_rejects_second_load() {
    let library = Library::load().unwrap();
    assert!(library.clang_version().contains("clang version"));
    assert!(matches!(Library::load(), Err(ClangError::AlreadyLoaded)));
    drop(library);

    let reloaded = Library::load().unwrap();
    assert!(!reloaded.clang_version().is_empty());
}

#[test]
fn test_parse_reports_diagnostics() {
    let (_tree, path) = write_source("broken.cpp", "int main() {\n    return missing;\n}\n");
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    assert_eq!(unit.num_diagnostics(), 1);
    let diagnostic = unit.diagnostic(0).unwrap();
    assert_eq!(diagnostic.severity(), DiagnosticSeverity::Error);
    assert!(diagnostic.spelling().contains("missing"));

    let location = diagnostic.location().spelling_location();
    assert_eq!(location.position.line, 2);
    assert_eq!(location.position.column, 12);
    assert!(diagnostic.location().is_in_main_file());

    let formatted = diagnostic.format(DiagnosticDisplayOptions::default_options());
    assert!(formatted.contains("broken.cpp:2:12"));
    assert!(unit.diagnostic(1).is_none());
}

#[test]
fn test_parse_missing_file_fails() {
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let config = parse_config(Path::new("/nonexistent/clang-bridge/missing.cpp"));
    assert!(matches!(index.parse(&config), Err(ClangError::Parse { .. })));
}

#[test]
fn test_cursor_walk_and_comments() {
    let (_tree, path) = write_source("shapes.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let root = unit.cursor();
    assert_eq!(root.kind(), CursorKind::TranslationUnit);

    let declarations: Vec<_> = root
        .children()
        .into_iter()
        .filter(|cursor| cursor.location().is_in_main_file())
        .collect();
    let names: Vec<_> = declarations.iter().map(|cursor| cursor.spelling()).collect();
    assert_eq!(names, vec!["Point", "sum", "use_sum"]);
    assert_eq!(declarations[0].kind(), CursorKind::StructDecl);
    assert_eq!(declarations[1].kind(), CursorKind::FunctionDecl);
    assert_eq!(declarations[1].display_name(), "sum(Point)");
    assert!(declarations[1].is_definition());
    assert!(declarations[1].usr().is_some());

    assert_eq!(
        declarations[0].brief_comment().as_deref(),
        Some("A point on the plane")
    );
    let comment = declarations[1].parsed_comment().unwrap();
    assert_eq!(comment.kind(), crate::CommentKind::FullComment);
    assert!(comment.num_children() > 0);
    assert!(comment.as_xml().unwrap().contains("sum"));
    assert!(declarations[2].parsed_comment().is_none());

    let mut fields = Vec::new();
    declarations[0].visit_children(|cursor, parent| {
        assert_eq!(parent.spelling(), "Point");
        if cursor.kind() == CursorKind::FieldDecl {
            fields.push(cursor.spelling());
        }
        ChildVisit::Continue
    });
    assert_eq!(fields, vec!["x", "y"]);

    let span = declarations[0].extent().to_file_span().unwrap();
    assert_eq!(span.span.start.line, 2);
    assert_eq!(span.span.end.line, 5);
}

#[test]
fn test_visit_children_break_stops_early() {
    let (_tree, path) = write_source("shapes.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let mut visited = 0;
    let broken = unit.cursor().visit_children(|_, _| {
        visited += 1;
        ChildVisit::Break
    });
    assert!(broken);
    assert_eq!(visited, 1);
}

#[test]
fn test_references_resolve_to_declarations() {
    let (_tree, path) = write_source("shapes.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let call = find_cursor(unit.cursor(), CursorKind::CallExpr).unwrap();
    let target = call.referenced().unwrap();
    assert_eq!(target.spelling(), "sum");
    assert_eq!(target.definition().unwrap(), target);
    assert_eq!(
        target.semantic_parent().unwrap().kind(),
        CursorKind::TranslationUnit
    );
}

fn find_cursor(root: crate::Cursor<'_>, kind: CursorKind) -> Option<crate::Cursor<'_>> {
    let mut found = None;
    root.visit_children(|cursor, _| {
        if cursor.kind() == kind {
            found = Some(cursor);
            ChildVisit::Break
        } else {
            ChildVisit::Recurse
        }
    });
    found
}

#[test]
fn test_files_of_a_unit() {
    let (_tree, path) = write_source("shapes.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let file = unit.file(&path).unwrap().unwrap();
    assert!(file.name().ends_with("shapes.cpp"));
    assert!(file.unique_id().is_some());
    assert!(file.is_same(&file));

    let location = unit.location(&file, 8, 5);
    let resolved = location.spelling_location();
    assert_eq!(resolved.file, Some(file));
    assert_eq!(resolved.position.line, 8);

    assert!(unit.file(Path::new("/nonexistent/other.h")).unwrap().is_none());
}

#[test]
fn test_member_completion() {
    let source = "struct Point { int x; int y; };\nint f() {\n    Point p;\n    return p.\n}\n";
    let (_tree, path) = write_source("complete.cpp", source);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let config = CompletionConfigBuilder::new()
        .file(&path)
        .position(4, 14)
        .build()
        .unwrap();
    let results = unit.code_complete_at(&config).unwrap();

    let typed: Vec<_> = results
        .results()
        .iter()
        .filter_map(|result| result.completion_string()?.typed_text())
        .collect();
    assert!(typed.contains(&"x".to_string()));
    assert!(typed.contains(&"y".to_string()));
    assert_eq!(results.results().len() as u32, results.num_results());

    assert!(results.contexts().contains(CompletionContext::DOT_MEMBER_ACCESS));
    let container = results.container_kind();
    assert!(container.has_container());
    assert_eq!(container.kind, CursorKind::StructDecl);
    assert!(results.container_usr().is_some());
}

#[test]
fn test_completion_inside_comment_has_no_results() {
    let source = "// a comment here\nint value;\n";
    let (_tree, path) = write_source("comment.cpp", source);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let config = CompletionConfigBuilder::new()
        .file(&path)
        .position(1, 6)
        .flags(CodeCompleteFlags::default_options())
        .build()
        .unwrap();
    let results = unit.code_complete_at(&config).unwrap();

    assert_eq!(results.num_results(), 0);
    assert!(results.results().is_empty());
    assert_eq!(results.contexts(), CompletionContext::NATURAL_LANGUAGE);

    let container = results.container_kind();
    assert_eq!(container.kind, CursorKind::InvalidCode);
    assert!(!container.has_container());
    assert!(results.container_usr().is_none());
    results.dispose();
}

#[test]
fn test_reparse_with_unsaved_contents() {
    let (_tree, path) = write_source("edit.cpp", "int value = 1;\n");
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let config = ParseConfigBuilder::new()
        .source_file(&path)
        .add_args(["-x", "c++"])
        .flags(TranslationUnitFlags::default_editing())
        .build()
        .unwrap();
    let unit = index.parse(&config).unwrap();
    assert_eq!(unit.num_diagnostics(), 0);

    let edited = UnsavedFile::new(&path, "int value = missing;\n");
    let unit = unit.reparse(&[edited]).unwrap();
    assert_eq!(unit.num_diagnostics(), 1);
    assert!(unit.diagnostics().all(|d| d.severity().is_error()));
}

#[test]
fn test_save_writes_ast_file() {
    let (tree, path) = write_source("save.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let output = tree.root.join("save.ast");
    unit.save(&output).unwrap();
    assert!(output.exists());
}

#[derive(Default)]
struct Collector {
    declarations: Vec<(String, EntityKind, bool)>,
    references: Vec<(String, SymbolRole)>,
}

impl IndexConsumer for Collector {
    fn declaration(&mut self, info: DeclInfo<'_>) {
        if let Some(entity) = info.entity() {
            let name = entity.name().unwrap_or_default();
            self.declarations
                .push((name, entity.kind(), info.is_definition()));
        }
    }

    fn entity_reference(&mut self, info: EntityRefInfo<'_>) {
        if let Some(entity) = info.referenced_entity() {
            self.references
                .push((entity.name().unwrap_or_default(), info.role()));
        }
    }
}

#[test]
fn test_indexing_reports_declarations_and_references() {
    let (_tree, path) = write_source("shapes.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let action = index.create_action();
    let mut collector = Collector::default();
    action
        .index_translation_unit(&unit, IndexOptFlags::SUPPRESS_WARNINGS, &mut collector)
        .unwrap();

    assert!(
        collector
            .declarations
            .contains(&("sum".to_string(), EntityKind::Function, true))
    );
    assert!(
        collector
            .declarations
            .iter()
            .any(|(name, kind, _)| name == "Point" && *kind == EntityKind::Struct)
    );
    let call = collector
        .references
        .iter()
        .find(|(name, _)| name == "sum")
        .unwrap();
    assert!(call.1.contains(SymbolRole::CALL));
}

#[test]
fn test_indexing_abort_stops_early() {
    struct Impatient(usize);

    impl IndexConsumer for Impatient {
        fn abort_requested(&mut self) -> bool {
            self.0 > 0
        }

        fn declaration(&mut self, _info: DeclInfo<'_>) {
            self.0 += 1;
        }
    }

    let (_tree, path) = write_source("shapes.cpp", SHAPES);
    let library = Library::load().unwrap();
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse_config(&path)).unwrap();

    let mut consumer = Impatient(0);
    let _ = index
        .create_action()
        .index_translation_unit(&unit, IndexOptFlags::empty(), &mut consumer);
    assert!(consumer.0 >= 1);
    assert!(consumer.0 < 5);
}
