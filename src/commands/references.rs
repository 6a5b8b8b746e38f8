//! `clang-bridge references FILE`

use std::fmt;
use std::path::{Path, PathBuf};

use clang_bridge::{
    CompilationDatabase, EntityRefInfo, FileSpan, IndexConsumer, IndexOptFlags, IndexOptions,
    Library, Result,
};
use serde::Serialize;
use tracing::instrument;

use super::{SpanDisplay, parse_config, point_span};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub usr: Option<String>,
    pub entity_kind: String,
    pub role: String,
    pub location: Option<FileSpan>,
    /// Name of the entity the reference appears in
    pub parent: Option<String>,
}

/// Collects references located in the main file
#[derive(Debug, Default)]
struct ReferenceCollector {
    references: Vec<ReferenceEntry>,
}

impl IndexConsumer for ReferenceCollector {
    fn entity_reference(&mut self, info: EntityRefInfo<'_>) {
        let Some(entity) = info.referenced_entity() else {
            return;
        };
        let location = info.loc().source_location();
        if !location.is_in_main_file() {
            return;
        }
        self.references.push(ReferenceEntry {
            name: entity.name().unwrap_or_else(|| "<anonymous>".to_string()),
            usr: entity.usr(),
            entity_kind: entity.kind().spelling().into_owned(),
            role: info.role().spelling(),
            location: point_span(&location),
            parent: info.parent_entity().and_then(|parent| parent.name()),
        });
    }
}

#[derive(Debug, Serialize)]
pub struct ReferencesReport {
    pub file: PathBuf,
    pub references: Vec<ReferenceEntry>,
}

impl fmt::Display for ReferencesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.references {
            write!(
                f,
                "{}: {} [{}] {}",
                SpanDisplay(&entry.location),
                entry.name,
                entry.entity_kind,
                entry.role
            )?;
            if let Some(parent) = &entry.parent {
                write!(f, " in {parent}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{} references", self.references.len())
    }
}

#[instrument(skip(library, database))]
pub fn run(
    library: &Library,
    database: Option<&CompilationDatabase>,
    file: &Path,
    args: &[String],
) -> Result<ReferencesReport> {
    let config = parse_config(file, args, database)?;
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&config)?;

    let mut collector = ReferenceCollector::default();
    index.create_action().index_translation_unit(
        &unit,
        IndexOptFlags::SUPPRESS_WARNINGS | IndexOptFlags::INDEX_FUNCTION_LOCAL_SYMBOLS,
        &mut collector,
    )?;

    let mut references = collector.references;
    references.sort_by_key(|entry| entry.location.as_ref().map(|span| span.span.start));
    Ok(ReferencesReport {
        file: file.to_path_buf(),
        references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clang_bridge::{EntityKind, Position, Span, SymbolRole};

    #[test]
    fn test_text_output() {
        let report = ReferencesReport {
            file: PathBuf::from("main.cpp"),
            references: vec![ReferenceEntry {
                name: "sum".to_string(),
                usr: Some("c:@F@sum#$@S@Point#".to_string()),
                entity_kind: EntityKind::Function.spelling().into_owned(),
                role: (SymbolRole::REFERENCE | SymbolRole::CALL).spelling(),
                location: Some(FileSpan {
                    file_path: PathBuf::from("main.cpp"),
                    span: Span {
                        start: Position { line: 14, column: 12 },
                        end: Position { line: 14, column: 12 },
                    },
                }),
                parent: Some("use_sum".to_string()),
            }],
        };
        assert_eq!(
            report.to_string(),
            "main.cpp:14:12: sum [IdxEntity=Function] SymbolRole=Reference|Call in use_sum\n1 references\n"
        );
    }
}
