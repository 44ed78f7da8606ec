//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::Parser;

use golden::{config::DEFAULT_GOLDEN_DIR, GoldenConfig};

/// Generate golden images of rendered text for visual regression tests
///
/// Fonts come from the host's font matcher ("fc-match monospace" and
/// "fc-match serif"). Each golden is written to <golden-dir>/<name>.png.
#[derive(Parser, Debug)]
#[command(name = "gen-golden")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only handle goldens whose name contains one of these (substring match)
    pub names: Vec<String>,

    /// List goldens and whether they exist, without rendering
    #[arg(long)]
    pub list: bool,

    /// Also write a copy of each golden to the preview directory
    #[arg(long)]
    pub preview: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory receiving <name>.png
    #[arg(long = "golden-dir", default_value = DEFAULT_GOLDEN_DIR)]
    pub golden_dir: PathBuf,

    /// Directory receiving <name>_freetype.png previews [default: <temp>/msdf_tests]
    #[arg(long = "preview-dir")]
    pub preview_dir: Option<PathBuf>,

    /// Program queried as `<program> <family> --format=%{file}`
    #[arg(long = "font-matcher", default_value = "fc-match")]
    pub font_matcher: String,

    /// Family resolved for the monospace goldens
    #[arg(long = "mono-family", default_value = "monospace")]
    pub mono_family: String,

    /// Family resolved for the serif goldens
    #[arg(long = "serif-family", default_value = "serif")]
    pub serif_family: String,
}

impl Cli {
    pub fn config(&self) -> GoldenConfig {
        let defaults = GoldenConfig::default();
        GoldenConfig {
            golden_dir: self.golden_dir.clone(),
            preview_dir: self.preview_dir.clone().unwrap_or(defaults.preview_dir),
            mono_family: self.mono_family.clone(),
            serif_family: self.serif_family.clone(),
            font_matcher: self.font_matcher.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_defaults() {
        let cli = Cli::try_parse_from(["gen-golden"]).unwrap();
        assert!(cli.names.is_empty());
        assert!(!cli.list && !cli.preview && !cli.verbose);
        assert_eq!(cli.config(), GoldenConfig::default());
    }

    #[test]
    fn flags_and_filters_parse() {
        let cli = Cli::try_parse_from([
            "gen-golden",
            "--list",
            "--golden-dir",
            "/tmp/goldens",
            "--font-matcher",
            "echo",
            "mono",
            "av",
        ])
        .unwrap();
        assert!(cli.list);
        assert_eq!(cli.names, vec!["mono", "av"]);

        let config = cli.config();
        assert_eq!(config.golden_dir, PathBuf::from("/tmp/goldens"));
        assert_eq!(config.font_matcher, "echo");
    }
}
