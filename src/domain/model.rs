use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directives inside a stanza, keyed by directive name
pub type Stanza = BTreeMap<String, String>;

/// A single top-level configuration value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Value {
    /// Directive value; empty for bare directives such as `compress`
    Scalar(String),
    /// Per-log block of directives
    Stanza(Stanza),
}

impl Value {
    pub fn scalar(value: impl Into<String>) -> Self {
        Value::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::Stanza(_) => None,
        }
    }

    pub fn as_stanza(&self) -> Option<&Stanza> {
        match self {
            Value::Stanza(stanza) => Some(stanza),
            Value::Scalar(_) => None,
        }
    }

    pub fn is_stanza(&self) -> bool {
        matches!(self, Value::Stanza(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::Stanza(stanza) => {
                writeln!(f, "{{")?;
                for (key, value) in stanza {
                    writeln!(f, "    {}", render_line(key, value))?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Parsed logrotate configuration
///
/// `entries` holds directives and stanzas from the main file and every file
/// pulled in through `include`. `includes` records which keys each included
/// file contributed, so edits can be routed back to the file that owns them.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ParsedConfig {
    #[serde(flatten)]
    pub entries: BTreeMap<String, Value>,
    #[serde(rename = "include files", skip_serializing_if = "BTreeMap::is_empty")]
    pub includes: BTreeMap<PathBuf, Vec<String>>,
}

impl ParsedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Stanza named `name`, if that entry exists and is a stanza
    pub fn stanza(&self, name: &str) -> Option<&Stanza> {
        self.entries.get(name).and_then(Value::as_stanza)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Included file that defined `key`, if it did not come from the main file
    pub fn source_of(&self, key: &str) -> Option<&Path> {
        self.includes
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| k == key))
            .map(|(path, _)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A write request for the configuration accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetRequest {
    /// Change a top-level directive
    Directive { key: String, value: String },
    /// Change a directive inside a stanza
    StanzaField {
        stanza: String,
        key: String,
        value: String,
    },
}

impl SetRequest {
    pub fn directive(key: impl Into<String>, value: impl Into<String>) -> Self {
        SetRequest::Directive {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn stanza_field(
        stanza: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        SetRequest::StanzaField {
            stanza: stanza.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One line substitution handed to a text editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub path: PathBuf,
    /// Restrict matches to the block of this stanza; `None` means top level only
    pub stanza: Option<String>,
    pub old_line: String,
    pub new_line: String,
}

/// Configuration line text for `key` set to `value`
pub fn render_line(key: &str, value: &str) -> String {
    if value.is_empty() {
        key.to_string()
    } else {
        format!("{} {}", key, value)
    }
}
