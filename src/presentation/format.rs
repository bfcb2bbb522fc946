use crate::domain::model::{ParsedConfig, Stanza, Value};
use crate::presentation::theme::Theme;
use std::fmt::Write;

/// Render a parsed configuration as logrotate-like text
pub fn format_conf(conf: &ParsedConfig, theme: &Theme) -> String {
    let mut output = String::new();

    // Directives first, then stanzas, the way logrotate.conf is laid out
    for (key, value) in &conf.entries {
        if let Value::Scalar(s) = value {
            writeln!(output, "{}", format_directive(key, s, theme)).ok();
        }
    }
    for (name, value) in &conf.entries {
        if let Value::Stanza(stanza) = value {
            writeln!(output).ok();
            output.push_str(&format_stanza(name, stanza, theme));
        }
    }

    if !conf.includes.is_empty() {
        writeln!(output).ok();
        for (path, keys) in &conf.includes {
            let note = format!("# included from {}: {}", path.display(), keys.join(", "));
            writeln!(output, "{}", (theme.note)(&note)).ok();
        }
    }

    output
}

/// Render the result of a single lookup
pub fn format_value(key: &str, value: &Value, theme: &Theme) -> String {
    match value {
        Value::Scalar(s) if s.is_empty() => format!("{}\n", (theme.note)("(set, no value)")),
        Value::Scalar(s) => format!("{}\n", (theme.value)(s)),
        Value::Stanza(stanza) => format_stanza(key, stanza, theme),
    }
}

fn format_stanza(name: &str, stanza: &Stanza, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{} {}", (theme.stanza)(name), (theme.brace)("{")).ok();
    for (key, value) in stanza {
        writeln!(output, "    {}", format_directive(key, value, theme)).ok();
    }
    writeln!(output, "{}", (theme.brace)("}")).ok();
    output
}

fn format_directive(key: &str, value: &str, theme: &Theme) -> String {
    if value.is_empty() {
        (theme.key)(key)
    } else {
        format!("{} {}", (theme.key)(key), (theme.value)(value))
    }
}
