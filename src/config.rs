// src/config.rs

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use std::path::PathBuf;
use url::Url;

/// Command line surface. Everything else is driven interactively; there are
/// no config files.
#[derive(Parser, Debug)]
#[command(
    name = "lumen-rs-uploader",
    version,
    about = "Terminal front end for an image prediction service"
)]
pub struct Cli {
    /// Base URL of the prediction server; uploads go to {server}/predict.
    #[arg(long, default_value = "http://localhost:80")]
    pub server: String,

    /// Directory containing sample images to offer in the sample list.
    #[arg(long, default_value = "sample_data")]
    pub samples_dir: PathBuf,
}

/// Parses and validates the command line.
pub fn parse() -> Result<Cli> {
    let cli = Cli::parse();
    validate(cli)
}

fn validate(cli: Cli) -> Result<Cli> {
    let url = Url::parse(&cli.server)
        .map_err(|e| eyre!("--server must be a valid URL ({}): {}", cli.server, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(eyre!(
            "--server must be an http(s) URL, got scheme {:?}",
            url.scheme()
        ));
    }
    Ok(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_server(server: &str) -> Cli {
        Cli {
            server: server.to_string(),
            samples_dir: PathBuf::from("sample_data"),
        }
    }

    #[test]
    fn http_and_https_servers_are_accepted() {
        assert!(validate(cli_with_server("http://localhost:8080")).is_ok());
        assert!(validate(cli_with_server("https://predict.example.com")).is_ok());
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        assert!(validate(cli_with_server("ftp://example.com")).is_err());
        assert!(validate(cli_with_server("not a url")).is_err());
    }
}
