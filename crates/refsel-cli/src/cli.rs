use std::path::PathBuf;

use clap::Parser;
use refsel_types::Ref;

#[derive(Parser, Debug)]
#[command(
    name = "refsel",
    about = "Browse a repository's branches, tags, and commits and pick one",
    version,
)]
pub struct Cli {
    /// Repository fixture (TOML)
    #[arg(long)]
    pub fixture: PathBuf,

    /// Selector options (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Currently selected ref, as `type:id`
    #[arg(long)]
    pub selected: Option<Ref>,

    /// Artificial provider latency in milliseconds
    #[arg(long, default_value = "0")]
    pub latency_ms: u64,

    /// Offer the cancel command (requires --selected)
    #[arg(long)]
    pub cancellable: bool,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use refsel_types::RefType;

    use super::*;

    #[test]
    fn parse_minimal() {
        let cli = Cli::try_parse_from(["refsel", "--fixture", "repo.toml"]).unwrap();
        assert_eq!(cli.fixture, PathBuf::from("repo.toml"));
        assert!(cli.config.is_none());
        assert!(cli.selected.is_none());
        assert_eq!(cli.latency_ms, 0);
        assert!(!cli.verbose);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn fixture_is_required() {
        assert!(Cli::try_parse_from(["refsel"]).is_err());
    }

    #[test]
    fn parse_selected_ref() {
        let cli = Cli::try_parse_from(["refsel", "--fixture", "r.toml", "--selected", "tag:v1.0.0"]).unwrap();
        let selected = cli.selected.unwrap();
        assert_eq!(selected.ref_type(), RefType::Tag);
        assert_eq!(selected.id(), "v1.0.0");
    }

    #[test]
    fn rejects_malformed_selected_ref() {
        assert!(Cli::try_parse_from(["refsel", "--fixture", "r.toml", "--selected", "main"]).is_err());
        assert!(Cli::try_parse_from(["refsel", "--fixture", "r.toml", "--selected", "remote:main"]).is_err());
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::try_parse_from([
            "refsel",
            "--fixture",
            "r.toml",
            "--config",
            "opts.toml",
            "--latency-ms",
            "250",
            "--cancellable",
            "-v",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("opts.toml")));
        assert_eq!(cli.latency_ms, 250);
        assert!(cli.cancellable);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
