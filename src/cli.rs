// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "tiger-puppet")]
#[command(about = "Paper tiger puppet, drag to turn it", long_about = None)]
pub struct Cli {
    /// Initial window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Trace at 1/N of the surface resolution
    #[arg(long = "render-scale", default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub render_scale: u32,

    /// JSON file overriding animation and input tuning
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Antialiasing: trace an N x N grid of rays per pixel
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub samples: u32,

    /// Skip shadow rays
    #[arg(long = "no-shadows", default_value = "false")]
    pub no_shadows: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tiger-puppet"]).unwrap();
        assert_eq!(cli.width, 800);
        assert_eq!(cli.render_scale, 2);
        assert!(cli.config.is_none());
        assert!(!cli.no_shadows);
        assert_eq!(cli.samples, 2);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "tiger-puppet",
            "--width",
            "1200",
            "--render-scale",
            "1",
            "--config",
            "tuning.json",
            "--no-shadows",
            "--samples",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.width, 1200);
        assert_eq!(cli.render_scale, 1);
        assert_eq!(cli.config, Some(PathBuf::from("tuning.json")));
        assert!(cli.no_shadows);
        assert_eq!(cli.samples, 3);
    }

    #[test]
    fn test_zero_render_scale_rejected() {
        assert!(Cli::try_parse_from(["tiger-puppet", "--render-scale", "0"]).is_err());
    }

    #[test]
    fn test_samples_range() {
        assert!(Cli::try_parse_from(["tiger-puppet", "--samples", "0"]).is_err());
        assert!(Cli::try_parse_from(["tiger-puppet", "--samples", "9"]).is_err());
        assert_eq!(Cli::try_parse_from(["tiger-puppet", "--samples", "1"]).unwrap().samples, 1);
    }
}
