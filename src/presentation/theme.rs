use colored::Colorize;

pub struct Theme {
    pub stanza: fn(&str) -> String,
    pub key: fn(&str) -> String,
    pub value: fn(&str) -> String,
    pub brace: fn(&str) -> String,
    pub note: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" | "" => Self::default_theme(),
            "mono" => Self::mono(),
            "vivid" => Self::vivid(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::default_theme()
            }
        }
    }

    fn default_theme() -> Self {
        Self {
            stanza: |s| s.bright_magenta().bold().to_string(),
            key: |s| s.cyan().to_string(),
            value: |s| s.white().to_string(),
            brace: |s| s.bright_black().dimmed().to_string(),
            note: |s| s.bright_black().italic().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            stanza: |s| s.to_string(),
            key: |s| s.to_string(),
            value: |s| s.to_string(),
            brace: |s| s.to_string(),
            note: |s| s.to_string(),
        }
    }

    fn vivid() -> Self {
        Self {
            stanza: |s| s.blue().bold().underline().to_string(),
            key: |s| s.green().bold().to_string(),
            value: |s| s.bright_yellow().to_string(),
            brace: |s| s.magenta().to_string(),
            note: |s| s.red().italic().to_string(),
        }
    }
}
