use crate::color::resolve_color;
use crate::ir::{Entry, Role};
use anyhow::{Result, bail};
use tracing::debug;

const DELIMITER: char = ',';
const QUOTE: char = '|';
const MAX_COLUMNS: usize = 4;

/// Parses a viewer list (`name,color,nickname,role`) into layout-ready entries.
///
/// Only the name column is required. Rows with an empty name are skipped and
/// the nickname, when present, replaces the name as display text. A `|`-quoted
/// field may span several lines; errors name the line its record starts on.
pub fn parse_viewers(input: &str) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for Record { line_no, fields } in split_records(input)? {
        if fields.len() > MAX_COLUMNS {
            bail!(
                "line {line_no}: expected at most {MAX_COLUMNS} values (name,color,nickname,role), found {}",
                fields.len()
            );
        }
        let (name, color, nickname, role) = (
            column(&fields, 0),
            column(&fields, 1),
            column(&fields, 2),
            column(&fields, 3),
        );
        if name.is_empty() {
            debug!(line = line_no, "skipping row without a name");
            continue;
        }
        let display = if nickname.is_empty() { name } else { nickname };
        let parsed_role = Role::from_token(role);
        if parsed_role == Role::None && !role.is_empty() {
            debug!(line = line_no, role, "unrecognized role, no badge");
        }
        entries.push(Entry::new(display, resolve_color(color), parsed_role));
    }
    Ok(entries)
}

fn column(fields: &[String], pos: usize) -> &str {
    fields.get(pos).map(|s| s.trim()).unwrap_or("")
}

struct Record {
    /// Line the record starts on, 1-based.
    line_no: usize,
    fields: Vec<String>,
}

/// Splits the whole input into records. Newlines end a record only outside
/// quotes; blank lines produce no record.
fn split_records(input: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut blank = true;
    let mut line_no = 1;
    let mut record_line = 1;

    while let Some(ch) = chars.next() {
        if ch == '\r' && chars.peek() == Some(&'\n') {
            continue;
        }
        if in_quotes {
            if ch == QUOTE {
                if chars.peek() == Some(&QUOTE) {
                    current.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                if ch == '\n' {
                    line_no += 1;
                }
                current.push(ch);
            }
            continue;
        }
        match ch {
            '\n' => {
                fields.push(std::mem::take(&mut current));
                let fields = std::mem::take(&mut fields);
                if !blank {
                    records.push(Record {
                        line_no: record_line,
                        fields,
                    });
                }
                line_no += 1;
                record_line = line_no;
                at_field_start = true;
                blank = true;
            }
            QUOTE if at_field_start => {
                in_quotes = true;
                at_field_start = false;
                blank = false;
            }
            DELIMITER => {
                fields.push(std::mem::take(&mut current));
                at_field_start = true;
                blank = false;
            }
            _ => {
                current.push(ch);
                at_field_start = false;
                blank &= ch.is_whitespace();
            }
        }
    }

    if in_quotes {
        bail!("line {record_line}: unterminated '{QUOTE}' quoted field");
    }
    if !blank {
        fields.push(current);
        records.push(Record {
            line_no: record_line,
            fields,
        });
    }
    Ok(records)
}
