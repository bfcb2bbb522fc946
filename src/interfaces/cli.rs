use crate::domain::model::SetRequest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lrconf")]
#[command(about = "Query and edit logrotate configuration files.")]
#[command(version)]
pub struct Cli {
    /// logrotate configuration file (default from config, else /etc/logrotate.conf)
    #[arg(short = 'c', long, global = true)]
    pub conf_file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long, global = true)]
    pub theme: Option<String>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Show the parsed configuration
    Show,

    /// Print the value of a directive
    Get {
        key: String,

        /// Look the directive up inside this stanza
        #[arg(short, long)]
        stanza: Option<String>,
    },

    /// Change an existing directive
    Set {
        key: String,

        value: String,

        /// Change the directive inside this stanza
        #[arg(short, long)]
        stanza: Option<String>,
    },
}

/// Turn the `set` arguments into an accessor request
pub fn set_request(key: &str, value: &str, stanza: Option<&str>) -> SetRequest {
    match stanza {
        Some(stanza) => SetRequest::stanza_field(stanza, key, value),
        None => SetRequest::directive(key, value),
    }
}
