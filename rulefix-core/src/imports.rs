//! Removal of unused single-type imports from Java-like sources.
//!
//! Line-based: an import is unused when its simple name never appears as an
//! identifier outside import lines. Wildcard and static imports are always
//! kept. Repeated imports collapse to the first one.

use std::collections::HashSet;
use thiserror::Error;

/// A line that looks like an import but cannot be handled safely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("line {line}: unterminated import `{text}`")]
    Unterminated { line: usize, text: String },

    #[error("line {line}: empty import")]
    Empty { line: usize },

    #[error("line {line}: code after an import on the same line")]
    TrailingCode { line: usize },
}

/// Returns `source` without unused or repeated imports.
///
/// Several imports on one line are judged one by one. Fails when an import is
/// not terminated on its line or shares it with other code.
pub fn strip_unused_imports(source: &str) -> Result<String, ImportError> {
    let lines: Vec<&str> = source.split_inclusive('\n').collect();

    let mut imports: Vec<Option<Vec<Import<'_>>>> = Vec::with_capacity(lines.len());
    let mut used: HashSet<&str> = HashSet::new();
    for (idx, line) in lines.iter().enumerate() {
        let parsed = parse_imports(line, idx + 1)?;
        if parsed.is_none() {
            used.extend(identifiers(line));
        }
        imports.push(parsed);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = String::with_capacity(source.len());
    for (line, parsed) in lines.iter().zip(&imports) {
        let Some(statements) = parsed else {
            out.push_str(line);
            continue;
        };
        let kept: Vec<&Import<'_>> = statements
            .iter()
            .filter(|import| {
                seen.insert(import.target)
                    && (import.always_kept() || used.contains(import.simple_name()))
            })
            .collect();
        if kept.len() == statements.len() {
            out.push_str(line);
        } else if !kept.is_empty() {
            out.push_str(&rebuild_line(line, &kept));
        }
    }
    Ok(out)
}

struct Import<'a> {
    /// Qualified name, with `static ` preserved.
    target: &'a str,
}

impl Import<'_> {
    fn always_kept(&self) -> bool {
        self.target.starts_with("static ") || self.target.ends_with(".*")
    }

    fn simple_name(&self) -> &str {
        self.target.rsplit('.').next().unwrap_or(self.target)
    }
}

/// `None` for lines that are not import statements.
fn parse_imports(line: &str, number: usize) -> Result<Option<Vec<Import<'_>>>, ImportError> {
    let trimmed = line.trim();
    if !is_import(trimmed) {
        return Ok(None);
    }
    let Some(body) = trimmed.strip_suffix(';') else {
        return Err(ImportError::Unterminated {
            line: number,
            text: trimmed.to_string(),
        });
    };

    let mut statements = Vec::new();
    for statement in body.split(';') {
        let statement = statement.trim();
        if !is_import(statement) {
            return Err(ImportError::TrailingCode { line: number });
        }
        let target = statement["import".len()..].trim();
        if target.is_empty() {
            return Err(ImportError::Empty { line: number });
        }
        statements.push(Import { target });
    }
    Ok(Some(statements))
}

fn is_import(text: &str) -> bool {
    text.strip_prefix("import")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

fn rebuild_line(line: &str, kept: &[&Import<'_>]) -> String {
    let indent = &line[..line.len() - line.trim_start().len()];
    let ending = &line[line.trim_end().len()..];
    let statements: Vec<String> = kept
        .iter()
        .map(|import| format!("import {};", import.target))
        .collect();
    format!("{indent}{}{ending}", statements.join(" "))
}

fn identifiers(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|token| !token.is_empty())
}
