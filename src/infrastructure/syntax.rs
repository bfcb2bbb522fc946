// Line classification shared by the parser and the line editor
//
// logrotate is line oriented: a line either opens a block (`/var/log/x {`),
// closes one (`}`), or holds a directive. Script directives such as
// `postrotate` swallow every following line up to `endscript`; those lines
// are shell and may contain braces.

const SCRIPT_DIRECTIVES: &[&str] = &[
    "postrotate",
    "prerotate",
    "firstaction",
    "lastaction",
    "preremove",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    /// Block header; `names` is empty when `{` sits on its own line
    Open { names: Vec<&'a str> },
    Close,
    Directive { tokens: Vec<&'a str> },
    /// Script body or the terminating `endscript`
    Script,
}

#[derive(Debug, Default)]
pub struct Lexer {
    in_script: bool,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify<'a>(&mut self, line: &'a str) -> Line<'a> {
        let trimmed = line.trim();

        if self.in_script {
            if trimmed == "endscript" {
                self.in_script = false;
            }
            return Line::Script;
        }

        if trimmed.is_empty() {
            return Line::Blank;
        }
        if trimmed.starts_with('#') {
            return Line::Comment;
        }
        if trimmed.starts_with('}') {
            return Line::Close;
        }
        if let Some(pos) = trimmed.find('{') {
            return Line::Open {
                names: trimmed[..pos].split_whitespace().collect(),
            };
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if SCRIPT_DIRECTIVES.contains(&tokens[0]) {
            self.in_script = true;
        }
        Line::Directive { tokens }
    }
}
