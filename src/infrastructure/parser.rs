use crate::domain::error::LogrotateError;
use crate::domain::model::{ParsedConfig, Stanza, Value};
use crate::domain::traits::ConfigParser;
use crate::infrastructure::syntax::{Lexer, Line};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default system-wide logrotate configuration
pub const DEFAULT_CONF_FILE: &str = "/etc/logrotate.conf";

/// File name suffixes skipped when an included directory is expanded
const TABOO_SUFFIXES: &[&str] = &[
    ",v",
    ".bak",
    ".cfsaved",
    ".disabled",
    ".dpkg-bak",
    ".dpkg-del",
    ".dpkg-dist",
    ".dpkg-new",
    ".dpkg-old",
    ".dpkg-tmp",
    ".rpmnew",
    ".rpmorig",
    ".rpmsave",
    ".swp",
    ".ucf-dist",
    ".ucf-new",
    ".ucf-old",
    "~",
];

/// Parses a logrotate configuration file from disk on every call
#[derive(Debug, Clone)]
pub struct FileParser {
    path: PathBuf,
}

impl FileParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileParser {
    fn default() -> Self {
        Self::new(DEFAULT_CONF_FILE)
    }
}

impl ConfigParser for FileParser {
    fn parse(&self) -> Result<ParsedConfig, LogrotateError> {
        let mut visited = HashSet::new();
        parse_file(&self.path, &mut visited)
    }

    fn source(&self) -> &Path {
        &self.path
    }
}

/// Parse logrotate text; `origin` names the file for errors and relative includes
pub fn parse_str(content: &str, origin: &Path) -> Result<ParsedConfig, LogrotateError> {
    let mut visited = HashSet::new();
    visited.insert(origin.to_path_buf());
    parse_content(content, origin, &mut visited)
}

fn parse_file(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<ParsedConfig, LogrotateError> {
    debug!("Parsing logrotate configuration: {}", path.display());
    let content = fs::read_to_string(path)?;
    visited.insert(path.to_path_buf());
    parse_content(&content, path, visited)
}

struct OpenBlock {
    names: Vec<String>,
    entries: Stanza,
    line: usize,
}

fn parse_content(
    content: &str,
    origin: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<ParsedConfig, LogrotateError> {
    let mut conf = ParsedConfig::new();
    let mut lexer = Lexer::new();
    let mut block: Option<OpenBlock> = None;
    let mut prev_tokens: Vec<String> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        match lexer.classify(raw) {
            Line::Blank | Line::Comment | Line::Script => {}
            Line::Open { names } => {
                if let Some(open) = &block {
                    return Err(parse_error(
                        origin,
                        line_no,
                        format!("nested block inside stanza opened at line {}", open.line),
                    ));
                }
                // `{` on its own line takes its names from the line above
                let header = std::mem::take(&mut prev_tokens);
                let names: Vec<String> = if names.is_empty() {
                    header
                } else {
                    names.into_iter().map(str::to_string).collect()
                };
                if names.is_empty() {
                    return Err(parse_error(origin, line_no, "block without a log path"));
                }
                block = Some(OpenBlock {
                    names,
                    entries: Stanza::new(),
                    line: line_no,
                });
            }
            Line::Close => {
                let open = block
                    .take()
                    .ok_or_else(|| parse_error(origin, line_no, "'}' without an open stanza"))?;
                for name in open.names {
                    forget_source(&mut conf, &name);
                    conf.insert(name, Value::Stanza(open.entries.clone()));
                }
                prev_tokens.clear();
            }
            Line::Directive { tokens } => {
                let key = tokens[0].to_string();
                let value = tokens[1..].join(" ");

                if key == "include" {
                    if let Some(open) = &block {
                        return Err(parse_error(
                            origin,
                            line_no,
                            format!("include is not allowed inside stanza opened at line {}", open.line),
                        ));
                    }
                    if !value.is_empty() {
                        include(&mut conf, &resolve(origin, &value), visited)?;
                    }
                }

                match block.as_mut() {
                    Some(open) => {
                        open.entries.insert(key, value);
                    }
                    None => {
                        forget_source(&mut conf, &key);
                        conf.insert(key, Value::Scalar(value));
                    }
                }
                prev_tokens = tokens.into_iter().map(str::to_string).collect();
            }
        }
    }

    if let Some(open) = block {
        return Err(parse_error(
            origin,
            open.line,
            format!("stanza '{}' is never closed", open.names.join(" ")),
        ));
    }

    Ok(conf)
}

/// Merge an included file, or every file of an included directory, into `conf`
fn include(
    conf: &mut ParsedConfig,
    target: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<(), LogrotateError> {
    let files = if target.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(target)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if is_ignored(&path) {
                debug!("Ignoring {} in included directory", path.display());
                continue;
            }
            files.push(path);
        }
        files.sort();
        files
    } else if target.is_file() {
        vec![target.to_path_buf()]
    } else {
        warn!("Include path {} does not exist, skipping", target.display());
        return Ok(());
    };

    for file in files {
        if visited.contains(&file) {
            warn!("Skipping recursive include of {}", file.display());
            continue;
        }
        let sub = parse_file(&file, visited)?;

        // Keys pulled in through a nested include stay attributed to that file
        let nested: HashSet<&String> = sub.includes.values().flatten().collect();
        let own: Vec<String> = sub
            .entries
            .keys()
            .filter(|k| !nested.contains(k))
            .cloned()
            .collect();

        for key in sub.entries.keys() {
            forget_source(conf, key);
        }
        conf.entries.extend(sub.entries);
        conf.includes.extend(sub.includes);
        conf.includes.insert(file, own);
    }

    Ok(())
}

/// Hidden files and editor or package manager leftovers (`.bak`, `~`, `.rpmnew`, ...)
fn is_ignored(path: &Path) -> bool {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return true;
    };
    name.starts_with('.') || TABOO_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Drop any earlier include attribution for `key`; a later definition owns it
fn forget_source(conf: &mut ParsedConfig, key: &str) {
    for keys in conf.includes.values_mut() {
        keys.retain(|k| k != key);
    }
}

fn resolve(origin: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    origin
        .parent()
        .map(|dir| dir.join(target))
        .unwrap_or_else(|| target.to_path_buf())
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> LogrotateError {
    LogrotateError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}
