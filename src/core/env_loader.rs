// src/core/env_loader.rs
//
// Line-oriented dotenv parser. Loads `KEY=VALUE` pairs into an `EnvStore`,
// with quoting, inline comments, a single pass of `${VAR}` expansion, and an
// interactive fallback that appends entries to the file when nothing was
// loaded.

use crate::{cli::prompt::Prompter, core::env_store::EnvStore};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static! {
    // `${NAME}`; a reference with no closing brace never matches and is
    // therefore left as literal text.
    static ref VAR_REFERENCE: Regex = Regex::new(r"\$\{([^}]*)\}").expect("valid regex");
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Loads a dotenv file into `env` and returns the number of entries set.
///
/// A missing file is not an error: it simply contributes zero entries. If,
/// after the file pass, nothing was set and a human is attached, the user is
/// offered the chance to type `KEY=VALUE` entries which are appended to the
/// file verbatim and installed immediately.
pub fn load_dotenv(
    path: &Path,
    env: &mut dyn EnvStore,
    ui: &mut dyn Prompter,
) -> Result<usize, LoadError> {
    let mut entries_set = 0usize;
    let mut file_missing = false;

    match File::open(path) {
        Ok(file) => {
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|e| LoadError::io(path, e))?;
                let Some((key, raw_value)) = split_entry(&line) else {
                    continue;
                };
                let parsed = parse_value(raw_value);
                let expanded = expand_vars(&parsed, env);
                env.set(key, &expanded);
                entries_set += 1;
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => file_missing = true,
        Err(e) => return Err(LoadError::io(path, e)),
    }

    log::debug!(
        "dotenv pass over '{}' set {} entries",
        path.display(),
        entries_set
    );

    if entries_set == 0 && ui.is_interactive() {
        if file_missing {
            ui.say(&format!("No dotenv file found at '{}'.", path.display()));
        } else {
            ui.say(&format!(
                "No environment variables were set from '{}'.",
                path.display()
            ));
        }
        let Ok(wants_entries) = ui.confirm(
            &format!("Create/append entries to '{}' now?", path.display()),
            false,
        ) else {
            return Ok(entries_set);
        };
        if wants_entries {
            let added = interactive_create_entries(path, env, ui)?;
            if added == 0 {
                ui.say("No entries added.");
            } else {
                ui.say(&format!(
                    "Added {} env entries to '{}' and set them in the process.",
                    added,
                    path.display()
                ));
            }
            entries_set += added;
        }
    }

    Ok(entries_set)
}

/// Prompts for `KEY=VALUE` lines until a blank line, appending each valid
/// line verbatim to the file and installing it immediately. Malformed lines
/// are rejected with a message; the loop keeps going.
fn interactive_create_entries(
    path: &Path,
    env: &mut dyn EnvStore,
    ui: &mut dyn Prompter,
) -> Result<usize, LoadError> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| LoadError::io(path, e))?;

    ui.say("Enter KEY=VALUE pairs (one per line). Empty line finishes.");
    let mut added = 0usize;
    loop {
        // A prompt failure (e.g. closed stdin) ends the loop like a blank line.
        let Ok(line) = ui.input(">") else { break };
        let line = line.trim().to_string();
        if line.is_empty() {
            break;
        }

        let Some(eq) = line.find('=') else {
            ui.say("Invalid format (missing '='). Use KEY=VALUE.");
            continue;
        };
        let key = line[..eq].trim();
        if key.is_empty() {
            ui.say("Key is empty.");
            continue;
        }
        let value = &line[eq + 1..];

        // Raw line as typed; no quoting or expansion is applied here.
        writeln!(file, "{}", line).map_err(|e| LoadError::io(path, e))?;
        env.set(key, value);
        added += 1;
    }

    Ok(added)
}

/// Splits one file line into `(key, raw_value)`.
///
/// Returns `None` for blank lines, comments, and malformed lines (no `=`, or
/// an empty key after trimming); those are skipped silently. A leading
/// `export ` token is stripped first.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut s = line.trim();
    if s.is_empty() || s.starts_with('#') {
        return None;
    }
    if let Some(rest) = s.strip_prefix("export ") {
        s = rest;
    }
    let eq = s.find('=')?;
    let key = s[..eq].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, &s[eq + 1..]))
}

/// Parses a raw value: quoted (single or double, with backslash escapes, `#`
/// kept literal, trailing text after the closing quote ignored) or bare
/// (truncated at the first `#`, then trimmed).
fn parse_value(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let mut chars = trimmed.chars();

    match chars.next() {
        Some(quote @ ('"' | '\'')) => {
            let mut out = String::new();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    match chars.next() {
                        Some(escaped) => out.push(escaped),
                        None => break,
                    }
                } else if c == quote {
                    break;
                } else {
                    out.push(c);
                }
            }
            out
        }
        _ => {
            let bare = match trimmed.find('#') {
                Some(pos) => &trimmed[..pos],
                None => trimmed,
            };
            bare.trim().to_string()
        }
    }
}

/// Expands `${NAME}` references in a single, non-recursive pass against the
/// store as it exists right now. Unset names expand to the empty string.
fn expand_vars(input: &str, env: &dyn EnvStore) -> String {
    VAR_REFERENCE
        .replace_all(input, |caps: &regex::Captures<'_>| {
            env.get(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env_store::MemoryEnv;
    use crate::test_support::ScriptedPrompter;

    fn load_str(contents: &str, env: &mut MemoryEnv) -> usize {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, contents).unwrap();
        let mut ui = ScriptedPrompter::new();
        load_dotenv(&path, env, &mut ui).unwrap()
    }

    // --- value parsing ---

    #[test]
    fn test_quoted_hash_is_preserved() {
        assert_eq!(parse_value("\"quoted # not a comment\""), "quoted # not a comment");
        assert_eq!(parse_value("'also # kept'"), "also # kept");
    }

    #[test]
    fn test_bare_value_truncates_at_hash() {
        assert_eq!(parse_value("value   # trailing comment"), "value");
    }

    #[test]
    fn test_escaped_characters_inside_quotes() {
        assert_eq!(parse_value(r#""a \"b\" c""#), "a \"b\" c");
    }

    #[test]
    fn test_text_after_closing_quote_ignored() {
        assert_eq!(parse_value("\"kept\" # dropped"), "kept");
    }

    // --- expansion ---

    #[test]
    fn test_expansion_uses_earlier_lines() {
        let mut env = MemoryEnv::new();
        let count = load_str("A=1\nB=${A}2\n", &mut env);
        assert_eq!(count, 2);
        assert_eq!(env.get("B").as_deref(), Some("12"));
    }

    #[test]
    fn test_undefined_reference_expands_to_empty() {
        let mut env = MemoryEnv::new();
        load_str("C=${UNDEFINED}x\n", &mut env);
        assert_eq!(env.get("C").as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_closing_brace_is_literal() {
        let mut env = MemoryEnv::new().with("A", "1");
        load_str("B=${A/suffix\n", &mut env);
        assert_eq!(env.get("B").as_deref(), Some("${A/suffix"));
    }

    #[test]
    fn test_expansion_is_single_pass() {
        let mut env = MemoryEnv::new().with("INNER", "${OUTER}");
        load_str("X=${INNER}\n", &mut env);
        // The expanded text is not scanned again.
        assert_eq!(env.get("X").as_deref(), Some("${OUTER}"));
    }

    // --- file pass ---

    #[test]
    fn test_last_line_wins() {
        let mut env = MemoryEnv::new();
        load_str("KEY=first\nKEY=second\n", &mut env);
        assert_eq!(env.get("KEY").as_deref(), Some("second"));
    }

    #[test]
    fn test_export_prefix_and_comments() {
        let mut env = MemoryEnv::new();
        let count = load_str("# header\n\nexport KEY=value\n", &mut env);
        assert_eq!(count, 1);
        assert_eq!(env.get("KEY").as_deref(), Some("value"));
    }

    #[test]
    fn test_malformed_lines_are_skipped_silently() {
        let mut env = MemoryEnv::new();
        let count = load_str("NOEQUALS\n  =value\nOK=1\n", &mut env);
        assert_eq!(count, 1);
        assert_eq!(env.get("OK").as_deref(), Some("1"));
    }

    #[test]
    fn test_missing_file_sets_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut env = MemoryEnv::new();
        let mut ui = ScriptedPrompter::new();
        let count = load_dotenv(&dir.path().join("absent.env"), &mut env, &mut ui).unwrap();
        assert_eq!(count, 0);
    }

    // --- interactive fallback ---

    #[test]
    fn test_interactive_fallback_appends_and_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut env = MemoryEnv::new();
        let mut ui = ScriptedPrompter::new()
            .interactive()
            .confirms([true])
            .inputs(["NOEQUALS", "FOO=bar", "=empty-key", ""]);

        let count = load_dotenv(&path, &mut env, &mut ui).unwrap();
        assert_eq!(count, 1);
        assert_eq!(env.get("FOO").as_deref(), Some("bar"));
        // Only the valid line was appended, verbatim.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "FOO=bar\n");
    }

    #[test]
    fn test_no_fallback_when_not_interactive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut env = MemoryEnv::new();
        // A non-interactive prompter would panic on any confirm/input.
        let mut ui = ScriptedPrompter::new();
        let count = load_dotenv(&path, &mut env, &mut ui).unwrap();
        assert_eq!(count, 0);
    }
}
