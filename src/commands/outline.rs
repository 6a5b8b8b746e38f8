//! `clang-bridge outline FILE`

use std::fmt;
use std::path::{Path, PathBuf};

use clang_bridge::{
    ChildVisit, CompilationDatabase, Cursor, CursorKind, FileSpan, IndexOptions, Library, Result,
};
use serde::Serialize;
use tracing::instrument;

use super::{SpanDisplay, parse_config};

#[derive(Debug, Serialize)]
pub struct OutlineEntry {
    pub name: String,
    pub kind: String,
    pub span: Option<FileSpan>,
    pub is_definition: bool,
    pub brief_comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineEntry>,
}

/// Kinds whose members are listed under them
fn is_scope(kind: CursorKind) -> bool {
    matches!(
        kind,
        CursorKind::Namespace
            | CursorKind::StructDecl
            | CursorKind::ClassDecl
            | CursorKind::UnionDecl
            | CursorKind::EnumDecl
            | CursorKind::ClassTemplate
            | CursorKind::LinkageSpec
    )
}

fn outline_of(parent: Cursor<'_>) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    parent.visit_children(|cursor, _| {
        let kind = cursor.kind();
        if !cursor.location().is_in_main_file()
            || !kind.is_declaration()
            || kind == CursorKind::CXXAccessSpecifier
        {
            return ChildVisit::Continue;
        }
        entries.push(OutlineEntry {
            name: cursor.display_name(),
            kind: kind.spelling().into_owned(),
            span: cursor.extent().to_file_span(),
            is_definition: cursor.is_definition(),
            brief_comment: cursor.brief_comment(),
            children: if is_scope(kind) {
                outline_of(cursor)
            } else {
                Vec::new()
            },
        });
        ChildVisit::Continue
    });
    entries
}

#[derive(Debug, Serialize)]
pub struct OutlineReport {
    pub file: PathBuf,
    pub symbols: Vec<OutlineEntry>,
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[OutlineEntry], depth: usize) -> fmt::Result {
    for entry in entries {
        write!(
            f,
            "{:indent$}{} [{}] {}",
            "",
            entry.name,
            entry.kind,
            SpanDisplay(&entry.span),
            indent = depth * 2
        )?;
        if let Some(comment) = &entry.brief_comment {
            write!(f, "  // {comment}")?;
        }
        writeln!(f)?;
        write_entries(f, &entry.children, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for OutlineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entries(f, &self.symbols, 0)
    }
}

#[instrument(skip(library, database))]
pub fn run(
    library: &Library,
    database: Option<&CompilationDatabase>,
    file: &Path,
    args: &[String],
) -> Result<OutlineReport> {
    let config = parse_config(file, args, database)?;
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&config)?;

    Ok(OutlineReport {
        file: file.to_path_buf(),
        symbols: outline_of(unit.cursor()),
    })
}
