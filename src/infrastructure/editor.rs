use crate::domain::error::LogrotateError;
use crate::domain::model::LineEdit;
use crate::domain::traits::TextEditor;
use crate::infrastructure::syntax::{Lexer, Line};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rewrites matching configuration lines in place
///
/// A line matches when its whitespace-separated tokens equal those of the
/// edit's `old_line` and it sits in the requested scope: outside every block
/// for top-level edits, or inside a block whose header names the stanza.
#[derive(Debug, Clone, Default)]
pub struct FileEditor {
    backup: bool,
}

impl FileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the original to `<file>.bak` before the first write
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }
}

impl TextEditor for FileEditor {
    fn replace_line(&self, edit: &LineEdit) -> Result<bool, LogrotateError> {
        let old_tokens: Vec<&str> = edit.old_line.split_whitespace().collect();
        if old_tokens.is_empty() {
            return Err(LogrotateError::InvalidArgument(
                "cannot replace an empty line".to_string(),
            ));
        }

        let content = fs::read_to_string(&edit.path)?;
        let (updated, replaced) = rewrite(&content, edit, &old_tokens);

        if replaced == 0 {
            debug!(
                "No line matching '{}' in {}",
                edit.old_line,
                edit.path.display()
            );
            return Ok(false);
        }

        if self.backup {
            let backup = backup_path(&edit.path);
            fs::copy(&edit.path, &backup)?;
            debug!("Backed up {} to {}", edit.path.display(), backup.display());
        }
        atomic_write(&edit.path, updated.as_bytes())?;
        debug!(
            "Replaced {} line(s) in {}: '{}' -> '{}'",
            replaced,
            edit.path.display(),
            edit.old_line,
            edit.new_line
        );

        Ok(true)
    }
}

/// Returns the rewritten text and the number of replaced lines
fn rewrite(content: &str, edit: &LineEdit, old_tokens: &[&str]) -> (String, usize) {
    let mut out = String::with_capacity(content.len() + edit.new_line.len());
    let mut lexer = Lexer::new();
    let mut block: Option<Vec<String>> = None;
    let mut prev_tokens: Vec<String> = Vec::new();
    let mut replaced = 0;

    for raw in content.split_inclusive('\n') {
        let body = raw.trim_end_matches(['\n', '\r']);
        let eol = &raw[body.len()..];

        match lexer.classify(body) {
            Line::Open { names } => {
                let header = std::mem::take(&mut prev_tokens);
                block = Some(if names.is_empty() {
                    header
                } else {
                    names.into_iter().map(str::to_string).collect()
                });
            }
            Line::Close => {
                block = None;
                prev_tokens.clear();
            }
            Line::Directive { tokens } => {
                let in_scope = match (&edit.stanza, &block) {
                    (None, None) => true,
                    (Some(stanza), Some(names)) => names.iter().any(|n| n == stanza),
                    _ => false,
                };
                if in_scope && tokens == old_tokens {
                    let indent = &body[..body.len() - body.trim_start().len()];
                    out.push_str(indent);
                    out.push_str(&edit.new_line);
                    out.push_str(eol);
                    replaced += 1;
                    continue;
                }
                prev_tokens = tokens.into_iter().map(str::to_string).collect();
            }
            Line::Blank | Line::Comment | Line::Script => {}
        }
        out.push_str(raw);
    }

    (out, replaced)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// Write to a temp file beside `path`, then rename over it
fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), LogrotateError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| LogrotateError::InvalidArgument(format!("{} is not a file", path.display())))?;
    let temp_path = parent.join(format!(
        ".{}.lrconf.{}",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    let result = (|| -> Result<(), LogrotateError> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::set_permissions(&temp_path, fs::metadata(path)?.permissions())?;
        fs::rename(&temp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}
