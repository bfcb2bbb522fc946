use crate::domain::error::LogrotateError;
use crate::domain::model::{LineEdit, ParsedConfig};
use std::path::Path;

/// Source of parsed logrotate configuration
///
/// Implementations re-read their backing file on every call; callers must not
/// assume two calls return the same data.
pub trait ConfigParser {
    /// Parse the configuration
    fn parse(&self) -> Result<ParsedConfig, LogrotateError>;

    /// Main configuration file the parser reads
    fn source(&self) -> &Path;
}

/// In-place line substitution on a configuration file
pub trait TextEditor {
    /// Apply `edit`, returning whether the file changed
    fn replace_line(&self, edit: &LineEdit) -> Result<bool, LogrotateError>;
}

impl<T: ConfigParser + ?Sized> ConfigParser for &T {
    fn parse(&self) -> Result<ParsedConfig, LogrotateError> {
        (**self).parse()
    }

    fn source(&self) -> &Path {
        (**self).source()
    }
}

impl<T: TextEditor + ?Sized> TextEditor for &T {
    fn replace_line(&self, edit: &LineEdit) -> Result<bool, LogrotateError> {
        (**self).replace_line(edit)
    }
}
