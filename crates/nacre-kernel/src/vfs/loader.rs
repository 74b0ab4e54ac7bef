//! Builds a [`Vfs`] from a CSV description.
//!
//! The description is strict: any malformed row aborts the whole load
//! with an error naming the row, and the caller keeps whatever tree it
//! already had. Row numbers are 1-based over the data rows (the header
//! is row 0 in spirit and excluded); blank rows are skipped but still
//! consume a number, so errors line up with the file as an author sees
//! it in an editor.

use std::collections::BTreeMap;
use std::mem;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Local;
use thiserror::Error;

use super::{Node, Source, Vfs};

/// Why a CSV description was rejected.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("description is not valid UTF-8")]
    Utf8,
    #[error("header missing column {0:?}")]
    Header(&'static str),
    #[error("row {0}: empty path")]
    EmptyPath(usize),
    #[error("row {0}: empty type")]
    EmptyType(usize),
    #[error("row {row}: unknown type {kind:?}")]
    UnknownType { row: usize, kind: String },
    #[error("row {row}: unknown encoding {encoding:?}")]
    UnknownEncoding { row: usize, encoding: String },
    #[error("row {row}: bad base64 content: {source}")]
    Base64 {
        row: usize,
        source: base64::DecodeError,
    },
    #[error("row {row}: {path:?} is a file, not a directory")]
    NotADirectory { row: usize, path: String },
}

impl Vfs {
    /// Parses `bytes` as a CSV tree description and builds a fresh tree.
    ///
    /// All-or-nothing: the returned `Vfs` exists only if every row was
    /// accepted. `name` is recorded for later integrity reporting, along
    /// with the exact input bytes.
    pub fn from_csv(bytes: Vec<u8>, name: &str) -> Result<Vfs, LoadError> {
        let text = std::str::from_utf8(&bytes).map_err(|_| LoadError::Utf8)?;
        let rows = parse_rows(text);

        let mut iter = rows.into_iter();
        let header = iter.next().ok_or(LoadError::Header("path"))?;
        let column = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::Header(name))
        };
        let path_col = column("path")?;
        let type_col = column("type")?;
        let encoding_col = column("encoding")?;
        let content_col = column("content")?;

        let mut root: BTreeMap<String, Node> = BTreeMap::new();

        for (index, row) in iter.enumerate() {
            let rownum = index + 1;
            if row.is_empty() {
                continue;
            }
            let field = |col: usize| row.get(col).map(String::as_str).unwrap_or("");

            let path = field(path_col).trim();
            if path.is_empty() {
                return Err(LoadError::EmptyPath(rownum));
            }
            let kind = field(type_col).trim().to_ascii_lowercase();
            if kind.is_empty() {
                return Err(LoadError::EmptyType(rownum));
            }
            let encoding = field(encoding_col).trim().to_ascii_lowercase();
            let content = field(content_col);

            let segments: Vec<&str> = path
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .collect();

            match kind.as_str() {
                "dir" => {
                    ensure_dirs(&mut root, &segments, rownum)?;
                }
                "file" => {
                    let Some((leaf, parents)) = segments.split_last() else {
                        return Err(LoadError::EmptyPath(rownum));
                    };
                    let data = decode_content(content, &encoding, rownum)?;
                    let children = ensure_dirs(&mut root, parents, rownum)?;
                    // A later row wins outright, even over a directory.
                    children.insert((*leaf).to_string(), Node::file(data));
                }
                _ => {
                    return Err(LoadError::UnknownType {
                        row: rownum,
                        kind,
                    });
                }
            }
        }

        Ok(Vfs {
            root: Node::Directory {
                children: root,
                mode: 0o755,
                mtime: Local::now(),
            },
            source: Some(Source {
                name: name.to_string(),
                bytes,
            }),
        })
    }
}

/// Walks `segments` from the root, creating missing directories along
/// the way, and returns the child map of the final one. Hitting a file
/// partway is a conflict named after the offending prefix.
fn ensure_dirs<'a>(
    root: &'a mut BTreeMap<String, Node>,
    segments: &[&str],
    row: usize,
) -> Result<&'a mut BTreeMap<String, Node>, LoadError> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        current = match current.entry((*segment).to_string()).or_insert_with(Node::dir) {
            Node::Directory { children, .. } => children,
            Node::File { .. } => {
                return Err(LoadError::NotADirectory {
                    row,
                    path: segments[..=depth].join("/"),
                });
            }
        };
    }
    Ok(current)
}

fn decode_content(content: &str, encoding: &str, row: usize) -> Result<Vec<u8>, LoadError> {
    match encoding {
        "" | "utf8" | "text" => Ok(content.as_bytes().to_vec()),
        "base64" | "b64" | "binary" => BASE64
            .decode(content.trim())
            .map_err(|source| LoadError::Base64 { row, source }),
        _ => Err(LoadError::UnknownEncoding {
            row,
            encoding: encoding.to_string(),
        }),
    }
}

/// Minimal CSV reader: double-quoted fields may hold commas, newlines,
/// and doubled quotes. A blank line becomes an empty row rather than a
/// row with one empty field, so the loader can skip it while keeping
/// the numbering. An unclosed quote at end of input ends the field
/// there.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut any = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                any = true;
            }
            '"' => field.push(c),
            ',' => {
                row.push(mem::take(&mut field));
                any = true;
            }
            '\n' | '\r' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if any || !row.is_empty() || !field.is_empty() {
                    row.push(mem::take(&mut field));
                    rows.push(mem::take(&mut row));
                } else {
                    rows.push(Vec::new());
                }
                any = false;
            }
            _ => {
                field.push(c);
                any = true;
            }
        }
    }
    if in_quotes || any || !row.is_empty() || !field.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
