//! Query and edit logrotate configuration files.
//!
//! [`ConfigAccessor`] reads through a [`ConfigParser`] and writes through a
//! [`TextEditor`]; the file-backed implementations live in
//! [`infrastructure`].

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;

pub use application::accessor::ConfigAccessor;
pub use domain::error::LogrotateError;
pub use domain::model::{LineEdit, ParsedConfig, SetRequest, Stanza, Value};
pub use domain::traits::{ConfigParser, TextEditor};
pub use infrastructure::editor::FileEditor;
pub use infrastructure::parser::{parse_str, FileParser, DEFAULT_CONF_FILE};
