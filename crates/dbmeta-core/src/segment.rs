//! Statement segmentation.
//!
//! Splits raw script text into individually executable statements. Splitting
//! is line-based rather than lexical: a line closes a statement when its
//! right-trimmed text ends with `;`. Procedure scripts use a stricter
//! rule so that the semicolons inside a procedure body do not cut it short.
//!
//! Known limitation: string literals are not tracked, so a literal that
//! ends a line with `;` closes the statement there.

use crate::script::ScriptCategory;

/// Statement terminator.
pub const TERMINATOR: char = ';';

/// Line comment marker, only recognized at the start of a trimmed line.
pub const LINE_COMMENT: &str = "--";

/// Keyword closing a procedure body.
pub const BLOCK_END: &str = "END";

/// Splits `text` into statements according to the rules of `category`.
///
/// Every retained line keeps its original content and is followed by `\n`.
/// Comment lines are dropped. Trailing text without a terminator is emitted
/// as a final statement.
#[must_use]
pub fn split_statements(text: &str, category: ScriptCategory) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut prev_line = "";

    for line in text
        .split(|c| c == '\r' || c == '\n')
        .filter(|l| !l.is_empty())
    {
        if line.trim_start().starts_with(LINE_COMMENT) {
            continue;
        }

        current.push_str(line);
        current.push('\n');

        let closes = match category {
            ScriptCategory::Procedures => closes_procedure(line, prev_line),
            _ => ends_with_terminator(line),
        };

        if closes {
            statements.push(std::mem::take(&mut current));
        }

        prev_line = line;
    }

    if !current.is_empty() {
        statements.push(current);
    }

    statements
}

fn ends_with_terminator(line: &str) -> bool {
    line.trim_end().ends_with(TERMINATOR)
}

/// A procedure statement ends on an `END;` keyword, or on a terminated line
/// directly after a bare `END` line.
fn closes_procedure(line: &str, prev_line: &str) -> bool {
    let trimmed = line.trim_end();
    let Some(head) = trimmed.strip_suffix(TERMINATOR) else {
        return false;
    };
    ends_with_block_end(head) || prev_line.trim_end().eq_ignore_ascii_case(BLOCK_END)
}

/// `END` as a whole word at the end of `head` (`SUSPEND` does not count).
fn ends_with_block_end(head: &str) -> bool {
    let Some(split) = head.len().checked_sub(BLOCK_END.len()) else {
        return false;
    };
    let (Some(before), Some(word)) = (head.get(..split), head.get(split..)) else {
        return false;
    };
    word.eq_ignore_ascii_case(BLOCK_END)
        && !before.ends_with(|c: char| c.is_alphanumeric() || c == '_')
}
