mod run;

use clap::Parser;
use lineout_core::config::{Settings, TailPolicy};
use lineout_core::logging::init_logging;
use owo_colors::OwoColorize;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "lineout",
    version,
    about = "Render structured event streams as console lines"
)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(long)]
    config: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Render timestamps in local time instead of UTC
    #[arg(long)]
    local: bool,

    /// Timestamp pattern (tokens: YYYY YY MM DD HH mm ss SSS)
    #[arg(long)]
    format: Option<String>,

    /// Tail policy: none, all, or a comma-separated tag list
    #[arg(long)]
    tail: Option<TailPolicy>,

    /// Include request headers in response lines
    #[arg(long)]
    request_headers: bool,

    /// Omit request payloads from response lines
    #[arg(long)]
    no_request_payload: bool,

    /// Omit response payloads from response lines
    #[arg(long)]
    no_response_payload: bool,
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: {e:#}", "error".red().bold());
            std::process::exit(1);
        }
    };

    if let Err(e) = run::run(settings) {
        eprintln!("{}: {e}", "error".red().bold());
        std::process::exit(1);
    }
}

/// File settings first, CLI flags on top.
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(Path::new(path))?,
        None => Settings::default(),
    };

    if cli.no_color {
        settings.color = false;
    }
    if cli.local {
        settings.utc = false;
    }
    if let Some(format) = &cli.format {
        settings.format = format.clone();
    }
    if let Some(tail) = &cli.tail {
        settings.tail = tail.clone();
    }
    if cli.request_headers {
        settings.request_headers = true;
    }
    if cli.no_request_payload {
        settings.request_payload = false;
    }
    if cli.no_response_payload {
        settings.response_payload = false;
    }

    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        load_settings(&cli).unwrap()
    }

    #[test]
    fn no_flags_yield_the_defaults() {
        let settings = settings_for(&["lineout"]);

        assert!(settings.color);
        assert!(settings.utc);
        assert_eq!(settings.tail, TailPolicy::None);
        assert!(!settings.request_headers);
        assert!(settings.request_payload);
        assert!(settings.response_payload);
    }

    #[test]
    fn every_flag_overrides_its_default() {
        let settings = settings_for(&[
            "lineout",
            "--no-color",
            "--local",
            "--format",
            "HH:mm:ss",
            "--tail",
            "foo,bar",
            "--request-headers",
            "--no-request-payload",
            "--no-response-payload",
        ]);

        assert!(!settings.color);
        assert!(!settings.utc);
        assert_eq!(settings.format, "HH:mm:ss");
        assert_eq!(
            settings.tail,
            TailPolicy::Tags(vec!["foo".to_string(), "bar".to_string()])
        );
        assert!(settings.request_headers);
        assert!(!settings.request_payload);
        assert!(!settings.response_payload);
    }

    #[test]
    fn flags_win_over_file_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineout.toml");
        std::fs::write(
            &path,
            r#"
            color = true
            tail = "none"
            "#,
        )
        .unwrap();

        let settings = settings_for(&[
            "lineout",
            "--config",
            path.to_str().unwrap(),
            "--no-color",
            "--tail",
            "all",
        ]);

        assert!(!settings.color);
        assert_eq!(settings.tail, TailPolicy::All);
    }

    #[test]
    fn file_settings_apply_when_flags_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineout.toml");
        std::fs::write(
            &path,
            r#"
            utc = false
            format = "YYYY-MM-DD"
            request_headers = true
            "#,
        )
        .unwrap();

        let settings =
            settings_for(&["lineout", "--config", path.to_str().unwrap()]);

        assert!(!settings.utc);
        assert_eq!(settings.format, "YYYY-MM-DD");
        assert!(settings.request_headers);
        // keys the file leaves out stay at their defaults
        assert!(settings.color);
        assert_eq!(settings.tail, TailPolicy::None);
    }

    #[test]
    fn empty_tail_flag_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["lineout", "--tail", ""]);

        assert!(result.is_err());
    }
}
