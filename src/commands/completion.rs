//! `clang-bridge complete FILE LINE COLUMN`

use std::fmt;
use std::path::PathBuf;

use clang_bridge::{
    CodeCompleteFlags, CompilationDatabase, CompletionConfigBuilder, CompletionContainer,
    CompletionResult, IndexOptions, Library, Result, config::DEFAULT_COMPLETION_FLAGS,
};
use serde::Serialize;
use tracing::instrument;

use super::parse_config;

/// What the user asked for on the command line
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub limit: Option<usize>,
    pub include_macros: bool,
    pub include_patterns: bool,
    pub args: Vec<String>,
}

impl CompletionRequest {
    pub fn flags(&self) -> CodeCompleteFlags {
        let mut flags = DEFAULT_COMPLETION_FLAGS;
        flags.set(CodeCompleteFlags::INCLUDE_MACROS, self.include_macros);
        flags.set(CodeCompleteFlags::INCLUDE_CODE_PATTERNS, self.include_patterns);
        flags
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionEntry {
    pub typed_text: String,
    /// Everything the result would insert, optional parts in brackets
    pub text: String,
    pub result_type: Option<String>,
    pub kind: String,
    pub priority: u32,
    pub availability: String,
    pub brief_comment: Option<String>,
}

impl CompletionEntry {
    fn from_result(result: &CompletionResult) -> Option<Self> {
        let string = result.completion_string()?;
        let result_type = string
            .chunks()
            .find(|chunk| chunk.kind() == clang_bridge::CompletionChunkKind::ResultType)
            .map(|chunk| chunk.text());
        Some(Self {
            typed_text: string.typed_text().unwrap_or_default(),
            text: string.to_string(),
            result_type,
            kind: result.cursor_kind().spelling().into_owned(),
            priority: string.priority(),
            availability: string.availability().spelling().into_owned(),
            brief_comment: string.brief_comment(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionReport {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
    pub total: u32,
    pub contexts: String,
    pub container: CompletionContainer,
    pub container_usr: Option<String>,
    pub completions: Vec<CompletionEntry>,
}

impl fmt::Display for CompletionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}:{}:{}: {} of {} completions",
            self.file.display(),
            self.line,
            self.column,
            self.completions.len(),
            self.total
        )?;
        if self.container.has_container() {
            write!(f, "container: {}", self.container.kind)?;
            if let Some(usr) = &self.container_usr {
                write!(f, " ({usr})")?;
            }
            if self.container.is_incomplete {
                f.write_str(" [incomplete]")?;
            }
            writeln!(f)?;
        } else {
            writeln!(f, "container: none")?;
        }
        writeln!(f, "contexts: {}", self.contexts)?;

        for entry in &self.completions {
            write!(f, "{:>6}  {}", entry.priority, entry.text)?;
            if let Some(result_type) = &entry.result_type {
                write!(f, " -> {result_type}")?;
            }
            write!(f, "  [{}]", entry.kind)?;
            if let Some(comment) = &entry.brief_comment {
                write!(f, "  // {comment}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[instrument(skip(library, database))]
pub fn run(
    library: &Library,
    database: Option<&CompilationDatabase>,
    request: &CompletionRequest,
) -> Result<CompletionReport> {
    let parse = parse_config(&request.file, &request.args, database)?;
    let index = library.create_index(IndexOptions::default());
    let unit = index.parse(&parse)?;

    let config = CompletionConfigBuilder::new()
        .file(&request.file)
        .position(request.line, request.column)
        .flags(request.flags())
        .build()?;
    let results = unit.code_complete_at(&config)?;

    let limit = request.limit.unwrap_or(usize::MAX);
    let completions = results
        .results()
        .iter()
        .filter_map(CompletionEntry::from_result)
        .take(limit)
        .collect();

    Ok(CompletionReport {
        file: request.file.clone(),
        line: request.line,
        column: request.column,
        total: results.num_results(),
        contexts: results.contexts().spelling(),
        container: results.container_kind(),
        container_usr: results.container_usr(),
        completions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clang_bridge::CursorKind;

    fn request(include_macros: bool, include_patterns: bool) -> CompletionRequest {
        CompletionRequest {
            file: PathBuf::from("main.cpp"),
            line: 4,
            column: 14,
            limit: None,
            include_macros,
            include_patterns,
            args: Vec::new(),
        }
    }

    #[test]
    fn test_request_flags() {
        assert_eq!(request(true, false).flags(), DEFAULT_COMPLETION_FLAGS);
        assert_eq!(
            request(false, false).flags(),
            CodeCompleteFlags::INCLUDE_BRIEF_COMMENTS
        );
        assert!(
            request(true, true)
                .flags()
                .contains(CodeCompleteFlags::INCLUDE_CODE_PATTERNS)
        );
    }

    fn report(container: CursorKind, completions: Vec<CompletionEntry>) -> CompletionReport {
        CompletionReport {
            file: PathBuf::from("main.cpp"),
            line: 4,
            column: 14,
            total: 2,
            contexts: "CompletionContext=DotMemberAccess".to_string(),
            container: CompletionContainer {
                kind: container,
                is_incomplete: false,
            },
            container_usr: Some("c:@S@Point".to_string()),
            completions,
        }
    }

    #[test]
    fn test_text_output() {
        let text = report(
            CursorKind::StructDecl,
            vec![CompletionEntry {
                typed_text: "x".to_string(),
                text: "x".to_string(),
                result_type: Some("int".to_string()),
                kind: "Cursor=FieldDecl".to_string(),
                priority: 35,
                availability: "Availability=Available".to_string(),
                brief_comment: Some("Horizontal offset".to_string()),
            }],
        )
        .to_string();

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "main.cpp:4:14: 1 of 2 completions");
        assert_eq!(lines[1], "container: Cursor=StructDecl (c:@S@Point)");
        assert_eq!(lines[2], "contexts: CompletionContext=DotMemberAccess");
        assert_eq!(
            lines[3],
            "    35  x -> int  [Cursor=FieldDecl]  // Horizontal offset"
        );
    }

    #[test]
    fn test_text_output_without_container() {
        let text = report(CursorKind::InvalidCode, Vec::new()).to_string();
        assert!(text.contains("container: none\n"));
    }
}
