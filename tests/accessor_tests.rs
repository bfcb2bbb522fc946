//! Configuration accessor tests against an in-memory parser and a recording editor

use lrconf::{
    ConfigAccessor, ConfigParser, LineEdit, LogrotateError, ParsedConfig, SetRequest, Stanza,
    TextEditor, Value,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

struct StaticParser {
    conf: ParsedConfig,
    source: PathBuf,
}

impl ConfigParser for StaticParser {
    fn parse(&self) -> Result<ParsedConfig, LogrotateError> {
        Ok(self.conf.clone())
    }

    fn source(&self) -> &Path {
        &self.source
    }
}

struct StubEditor {
    result: bool,
    calls: RefCell<Vec<LineEdit>>,
}

impl StubEditor {
    fn returning(result: bool) -> Self {
        Self {
            result,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl TextEditor for StubEditor {
    fn replace_line(&self, edit: &LineEdit) -> Result<bool, LogrotateError> {
        self.calls.borrow_mut().push(edit.clone());
        Ok(self.result)
    }
}

struct FailingEditor;

impl TextEditor for FailingEditor {
    fn replace_line(&self, _edit: &LineEdit) -> Result<bool, LogrotateError> {
        Err(LogrotateError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        )))
    }
}

fn parse_conf() -> ParsedConfig {
    let mut conf = ParsedConfig::new();
    conf.insert("rotate", Value::scalar("1"));
    let mut wtmp = Stanza::new();
    wtmp.insert("rotate".to_string(), "1".to_string());
    conf.insert("/var/log/wtmp", Value::Stanza(wtmp));
    conf.includes.insert(
        PathBuf::from("/etc/logrotate.d/rsyslog"),
        vec!["/var/log/syslog".to_string()],
    );
    conf
}

fn parser() -> StaticParser {
    StaticParser {
        conf: parse_conf(),
        source: PathBuf::from("/etc/logrotate.conf"),
    }
}

#[test]
fn test_show_conf_passes_parser_output_through() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(true));
    assert_eq!(accessor.show_conf().unwrap(), parse_conf());
}

#[test]
fn test_get_directive() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(true));

    let value = accessor.get("rotate", None).unwrap();
    assert_eq!(value, Some(Value::scalar("1")));
    assert_ne!(value, Some(Value::scalar("2")));
}

#[test]
fn test_get_stanza_value() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(true));

    let value = accessor.get("rotate", Some("/var/log/wtmp")).unwrap();
    assert_eq!(value, Some(Value::scalar("1")));
    assert_ne!(value, Some(Value::scalar("2")));
}

#[test]
fn test_get_absent_is_none() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(true));

    assert_eq!(accessor.get("rotate", Some("/var/log/utmp")).unwrap(), None);
    assert_eq!(accessor.get("compress", None).unwrap(), None);
    assert_eq!(accessor.get("size", Some("/var/log/wtmp")).unwrap(), None);
    // A directive is not a stanza
    assert_eq!(accessor.get("rotate", Some("rotate")).unwrap(), None);
}

#[test]
fn test_get_is_repeatable() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(true));

    let first = accessor.get("rotate", Some("/var/log/wtmp")).unwrap();
    let second = accessor.get("rotate", Some("/var/log/wtmp")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_set_directive() {
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser(), &editor);

    assert!(accessor.set_directive("rotate", "2").unwrap());

    let calls = editor.calls.borrow();
    assert_eq!(
        calls.as_slice(),
        &[LineEdit {
            path: PathBuf::from("/etc/logrotate.conf"),
            stanza: None,
            old_line: "rotate 1".to_string(),
            new_line: "rotate 2".to_string(),
        }]
    );
}

#[test]
fn test_set_directive_on_stanza_fails() {
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser(), &editor);

    let err = accessor.set_directive("/var/log/wtmp", "2").unwrap_err();
    assert!(matches!(err, LogrotateError::InvalidArgument(_)));
    assert!(editor.calls.borrow().is_empty());
}

#[test]
fn test_set_unknown_directive_fails() {
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser(), &editor);

    let err = accessor.set_directive("compress", "").unwrap_err();
    assert!(matches!(err, LogrotateError::InvalidArgument(_)));
    assert!(editor.calls.borrow().is_empty());
}

#[test]
fn test_set_stanza_field() {
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser(), &editor);

    assert!(accessor
        .set_stanza_field("/var/log/wtmp", "rotate", "2")
        .unwrap());

    let calls = editor.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].stanza.as_deref(), Some("/var/log/wtmp"));
    assert_eq!(calls[0].old_line, "rotate 1");
    assert_eq!(calls[0].new_line, "rotate 2");
}

#[test]
fn test_set_stanza_field_on_directive_fails() {
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser(), &editor);

    let err = accessor
        .set_stanza_field("rotate", "/var/log/wtmp", "2")
        .unwrap_err();
    assert!(matches!(err, LogrotateError::InvalidArgument(_)));
    assert!(editor.calls.borrow().is_empty());
}

#[test]
fn test_set_stanza_field_rejects_missing_targets() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(true));

    let missing_stanza = accessor.set_stanza_field("/var/log/utmp", "rotate", "2");
    assert!(matches!(
        missing_stanza,
        Err(LogrotateError::InvalidArgument(_))
    ));

    let missing_key = accessor.set_stanza_field("/var/log/wtmp", "size", "1M");
    assert!(matches!(missing_key, Err(LogrotateError::InvalidArgument(_))));
}

#[test]
fn test_set_unchanged_value_skips_editor() {
    let editor = StubEditor::returning(false);
    let accessor = ConfigAccessor::new(parser(), &editor);

    assert!(accessor.set_directive("rotate", "1").unwrap());
    assert!(accessor
        .set_stanza_field("/var/log/wtmp", "rotate", "1")
        .unwrap());
    assert!(editor.calls.borrow().is_empty());
}

#[test]
fn test_set_reports_editor_result() {
    let accessor = ConfigAccessor::new(parser(), StubEditor::returning(false));
    assert!(!accessor.set_directive("rotate", "2").unwrap());
}

#[test]
fn test_set_propagates_editor_error() {
    let accessor = ConfigAccessor::new(parser(), FailingEditor);
    let err = accessor.set_directive("rotate", "2").unwrap_err();
    assert!(matches!(err, LogrotateError::Io(_)));
}

#[test]
fn test_set_request_variants() {
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser(), &editor);

    assert!(accessor
        .set(&SetRequest::directive("rotate", "3"))
        .unwrap());
    assert!(accessor
        .set(&SetRequest::stanza_field("/var/log/wtmp", "rotate", "3"))
        .unwrap());
    assert!(accessor
        .set(&SetRequest::stanza_field("rotate", "/var/log/wtmp", "2"))
        .is_err());
    assert_eq!(editor.calls.borrow().len(), 2);
}

#[test]
fn test_set_targets_included_file() {
    let mut conf = parse_conf();
    let mut syslog = Stanza::new();
    syslog.insert("rotate".to_string(), "7".to_string());
    conf.insert("/var/log/syslog", Value::Stanza(syslog));
    let parser = StaticParser {
        conf,
        source: PathBuf::from("/etc/logrotate.conf"),
    };
    let editor = StubEditor::returning(true);
    let accessor = ConfigAccessor::new(parser, &editor);

    assert!(accessor
        .set_stanza_field("/var/log/syslog", "rotate", "14")
        .unwrap());
    assert_eq!(
        editor.calls.borrow()[0].path,
        PathBuf::from("/etc/logrotate.d/rsyslog")
    );
}
