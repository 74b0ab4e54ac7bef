//! chmod-style mode parsing and application.
//!
//! Two spellings are accepted: numeric octal (`644`, `0755`) and
//! symbolic clause lists (`u+x`, `go-w,a=r`). Modes are nine bits; the
//! special bits a real chmod knows (setuid, sticky) do not exist here
//! and are masked away.

use thiserror::Error;

use crate::vfs::Node;

/// Why a mode expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("invalid numeric mode {0:?}")]
    Numeric(String),
    #[error("missing operator in clause {0:?}")]
    MissingOp(String),
    #[error("empty permissions in clause {0:?}")]
    EmptyPerms(String),
    #[error("invalid permission {ch:?} in clause {clause:?}")]
    BadPerm { clause: String, ch: char },
}

/// Applies a mode expression to `mode` and returns the new value.
///
/// `is_dir` matters only for the conditional `X` permission, which
/// grants execute to directories unconditionally and to files only if
/// some execute bit was already set when the clause started.
pub fn apply(mode: u32, spec: &str, is_dir: bool) -> Result<u32, ModeError> {
    if !spec.is_empty() && spec.chars().all(|c| c.is_ascii_digit()) {
        return numeric(spec);
    }
    let mut mode = mode;
    for clause in spec.split(',') {
        mode = apply_clause(mode, clause, is_dir)?;
    }
    Ok(mode)
}

fn numeric(spec: &str) -> Result<u32, ModeError> {
    if spec.len() != 3 && spec.len() != 4 {
        return Err(ModeError::Numeric(spec.to_string()));
    }
    let value = u32::from_str_radix(spec, 8).map_err(|_| ModeError::Numeric(spec.to_string()))?;
    Ok(value & 0o777)
}

fn apply_clause(mode: u32, clause: &str, is_dir: bool) -> Result<u32, ModeError> {
    let start_mode = mode;
    let mut chars = clause.chars().peekable();

    let mut selected = 0u32;
    while let Some(&c) = chars.peek() {
        match c {
            'u' => selected |= 0o700,
            'g' => selected |= 0o070,
            'o' => selected |= 0o007,
            'a' => selected |= 0o777,
            _ => break,
        }
        chars.next();
    }
    // No classes means "a", like chmod.
    if selected == 0 {
        selected = 0o777;
    }

    let op = match chars.next() {
        Some(c @ ('+' | '-' | '=')) => c,
        _ => return Err(ModeError::MissingOp(clause.to_string())),
    };

    let perms: Vec<char> = chars.collect();
    if perms.is_empty() {
        return Err(ModeError::EmptyPerms(clause.to_string()));
    }
    let mut bits = 0u32;
    for ch in perms {
        bits |= match ch {
            'r' => 4,
            'w' => 2,
            'x' => 1,
            'X' => {
                if is_dir || start_mode & 0o111 != 0 {
                    1
                } else {
                    0
                }
            }
            _ => {
                return Err(ModeError::BadPerm {
                    clause: clause.to_string(),
                    ch,
                });
            }
        };
    }

    let spread = (bits << 6 | bits << 3 | bits) & selected;
    let next = match op {
        '+' => mode | spread,
        '-' => mode & !spread,
        _ => (mode & !selected) | spread,
    };
    Ok(next & 0o777)
}

/// Applies a mode expression to `node` and every node beneath it,
/// parent before children. `is_dir` is evaluated per node, so `X`
/// behaves differently across a mixed subtree.
pub fn apply_tree(node: &mut Node, spec: &str) -> Result<(), ModeError> {
    let mode = apply(node.mode(), spec, node.is_dir())?;
    node.set_mode(mode);
    if let Node::Directory { children, .. } = node {
        for child in children.values_mut() {
            apply_tree(child, spec)?;
        }
    }
    Ok(())
}

/// Renders a mode the way `ls -l` shows it here: four octal digits.
pub fn format_octal(mode: u32) -> String {
    format!("{:04o}", mode & 0o777)
}
