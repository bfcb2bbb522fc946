// Main entry point
use clap::Parser;
use colored::Colorize;
use lrconf::infrastructure::config::{generate_config_sample, load_config, Logging};
use lrconf::interfaces::cli::{set_request, Cli, Command};
use lrconf::presentation::format::{format_conf, format_value};
use lrconf::presentation::theme::Theme;
use lrconf::{ConfigAccessor, FileEditor, FileParser};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        generate_config_sample()?;
        return Ok(());
    }

    let Some(command) = cli.command else {
        eprintln!("{}", "Please provide a command: show, get or set".red());
        std::process::exit(2);
    };

    let conf_file = cli.conf_file.unwrap_or_else(|| config.conf_file.clone());
    let accessor = ConfigAccessor::new(
        FileParser::new(conf_file),
        FileEditor::new().with_backup(config.backup),
    );
    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    match command {
        Command::Show => {
            let conf = accessor.show_conf()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&conf)?);
            } else {
                print!("{}", format_conf(&conf, &theme));
            }
        }
        Command::Get { key, stanza } => match accessor.get(&key, stanza.as_deref())? {
            Some(value) => {
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                } else {
                    print!("{}", format_value(&key, &value, &theme));
                }
            }
            None => {
                match stanza {
                    Some(stanza) => eprintln!(
                        "{}",
                        format!("'{}' is not set in stanza '{}'", key, stanza).yellow()
                    ),
                    None => eprintln!("{}", format!("'{}' is not set", key).yellow()),
                }
                std::process::exit(1);
            }
        },
        Command::Set { key, value, stanza } => {
            let request = set_request(&key, &value, stanza.as_deref());
            let changed = accessor.set(&request)?;
            if cli.json {
                println!("{}", serde_json::json!({ "result": changed }));
            } else if changed {
                println!("{}", "✔ Configuration updated".green());
            } else {
                println!("{}", "No matching line was changed".yellow());
            }
            if !changed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
