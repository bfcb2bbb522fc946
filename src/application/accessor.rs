use crate::domain::error::LogrotateError;
use crate::domain::model::{render_line, LineEdit, ParsedConfig, SetRequest, Value};
use crate::domain::traits::{ConfigParser, TextEditor};
use std::path::PathBuf;
use tracing::debug;

/// Reads and edits logrotate configuration
///
/// Every call re-parses through the injected parser; nothing is cached.
/// Writes go through the injected editor as a single line substitution and
/// only ever change keys that already exist.
pub struct ConfigAccessor<P, E> {
    parser: P,
    editor: E,
}

impl<P: ConfigParser, E: TextEditor> ConfigAccessor<P, E> {
    pub fn new(parser: P, editor: E) -> Self {
        Self { parser, editor }
    }

    /// Full parsed configuration, exactly as the parser produced it
    pub fn show_conf(&self) -> Result<ParsedConfig, LogrotateError> {
        self.parser.parse()
    }

    /// Value of `key`, or of `key` inside `stanza` when one is given
    ///
    /// The directive name comes first and the stanza second:
    /// `get("rotate", Some("/var/log/wtmp"))`.
    ///
    /// Absence is not an error: it returns `None` and logs at debug level.
    pub fn get(&self, key: &str, stanza: Option<&str>) -> Result<Option<Value>, LogrotateError> {
        let conf = self.parser.parse()?;

        let Some(stanza) = stanza else {
            let value = conf.get(key).cloned();
            if value.is_none() {
                debug!("Key '{}' not present.", key);
            }
            return Ok(value);
        };

        let Some(block) = conf.stanza(stanza).filter(|block| !block.is_empty()) else {
            debug!("Block '{}' not present or empty.", stanza);
            return Ok(None);
        };

        match block.get(key) {
            Some(value) => Ok(Some(Value::Scalar(value.clone()))),
            None => {
                debug!("Key '{}' not present in block '{}'.", key, stanza);
                Ok(None)
            }
        }
    }

    /// Change a top-level directive
    pub fn set_directive(&self, key: &str, value: &str) -> Result<bool, LogrotateError> {
        self.set(&SetRequest::directive(key, value))
    }

    /// Change a directive inside the stanza named `stanza`
    pub fn set_stanza_field(
        &self,
        stanza: &str,
        key: &str,
        value: &str,
    ) -> Result<bool, LogrotateError> {
        self.set(&SetRequest::stanza_field(stanza, key, value))
    }

    /// Apply `request`, returning what the editor reports
    ///
    /// Fails with `InvalidArgument` when the target does not already exist in
    /// the expected shape. A request that matches the current value succeeds
    /// without touching the file.
    pub fn set(&self, request: &SetRequest) -> Result<bool, LogrotateError> {
        let conf = self.parser.parse()?;

        let edit = match request {
            SetRequest::Directive { key, value } => {
                let current = match conf.get(key) {
                    Some(Value::Scalar(current)) => current,
                    Some(Value::Stanza(_)) => {
                        return Err(LogrotateError::InvalidArgument(format!(
                            "{} is a stanza, and a specific setting inside it was not declared",
                            key
                        )));
                    }
                    None => {
                        return Err(LogrotateError::InvalidArgument(format!(
                            "{} is not set in {}; only existing directives can be changed",
                            key,
                            self.parser.source().display()
                        )));
                    }
                };
                if current == value {
                    debug!("Command '{}' already has: {}", key, value);
                    return Ok(true);
                }
                LineEdit {
                    path: self.target_file(&conf, key),
                    stanza: None,
                    old_line: render_line(key, current),
                    new_line: render_line(key, value),
                }
            }
            SetRequest::StanzaField { stanza, key, value } => {
                let block = match conf.get(stanza) {
                    Some(Value::Stanza(block)) => block,
                    Some(Value::Scalar(_)) => {
                        return Err(LogrotateError::InvalidArgument(format!(
                            "A setting for a stanza was declared, but {} is not a stanza",
                            stanza
                        )));
                    }
                    None => {
                        return Err(LogrotateError::InvalidArgument(format!(
                            "Stanza {} is not present in {}",
                            stanza,
                            self.parser.source().display()
                        )));
                    }
                };
                let current = block.get(key).ok_or_else(|| {
                    LogrotateError::InvalidArgument(format!(
                        "{} is not set in stanza {}; only existing settings can be changed",
                        key, stanza
                    ))
                })?;
                if current == value {
                    debug!("Command '{}' already has: {}", key, value);
                    return Ok(true);
                }
                LineEdit {
                    path: self.target_file(&conf, stanza),
                    stanza: Some(stanza.clone()),
                    old_line: render_line(key, current),
                    new_line: render_line(key, value),
                }
            }
        };

        debug!(
            "Setting file '{}' line: {}",
            edit.path.display(),
            edit.new_line
        );
        self.editor.replace_line(&edit)
    }

    /// File that owns `key`: the included file that defined it, else the main file
    fn target_file(&self, conf: &ParsedConfig, key: &str) -> PathBuf {
        conf.source_of(key)
            .unwrap_or_else(|| self.parser.source())
            .to_path_buf()
    }
}
