//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use specsheet_sink::{ImageMode, ImageOptions};
use std::path::PathBuf;

/// Specsheet CLI - Turn price lists into a structured product catalog.
#[derive(Debug, Parser)]
#[command(name = "specsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SPECSHEET_CONFIG")]
    pub config: Option<String>,

    /// Profile (price-list layout) to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log per-row detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (models only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a catalog from a CSV price list
    Extract(ExtractArgs),

    /// Build a catalog from text lines of a laid-out document
    Lines(LinesArgs),

    /// Show the record for a single model
    Lookup(LookupArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Image output overrides shared by the catalog commands.
#[derive(Debug, Default, Args)]
pub struct ImageArgs {
    /// How images appear in the catalog
    #[arg(long, value_enum)]
    pub image_mode: Option<ImageModeArg>,

    /// Directory for image files (file mode)
    #[arg(long)]
    pub image_output_dir: Option<PathBuf>,

    /// URL prefix for image links (url mode)
    #[arg(long)]
    pub image_url_base: Option<String>,

    /// Keep original image bytes instead of re-encoding as PNG
    #[arg(long)]
    pub no_normalize_png: bool,
}

impl ImageArgs {
    /// Apply the overrides on top of profile options.
    pub fn apply(&self, mut options: ImageOptions) -> ImageOptions {
        if let Some(mode) = self.image_mode {
            options.mode = mode.into();
        }
        if let Some(dir) = &self.image_output_dir {
            options.output_dir = dir.clone();
        }
        if let Some(base) = &self.image_url_base {
            options.url_base = base.clone();
        }
        if self.no_normalize_png {
            options.normalize_png = false;
        }
        options
    }
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// CSV price list (defaults to the profile's input path)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Catalog JSON to write (defaults to the profile's output path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory of cell-named images (r{row}c{col}.png)
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Field delimiter
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Header rows to skip
    #[arg(long)]
    pub start_row: Option<usize>,

    #[command(flatten)]
    pub images: ImageArgs,
}

/// Arguments for the lines command.
#[derive(Debug, Parser)]
pub struct LinesArgs {
    /// Text file, one candidate record per line
    pub input: PathBuf,

    /// Catalog JSON to write (defaults to the profile's output path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Lines to skip at the top
    #[arg(long, default_value = "0")]
    pub start_line: usize,

    /// Keep lines that carry no unit token
    #[arg(long)]
    pub keep_unitless: bool,

    #[command(flatten)]
    pub images: ImageArgs,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Model to look for
    pub model: String,

    /// CSV price list (defaults to the profile's input path)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory of cell-named images (r{row}c{col}.png)
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Field delimiter
    #[arg(short, long)]
    pub delimiter: Option<char>,

    #[command(flatten)]
    pub images: ImageArgs,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },
}

/// Image mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ImageModeArg {
    /// No images
    None,
    /// Image files next to the catalog
    File,
    /// Base64 data URIs
    Inline,
    /// Conventional URLs derived from the model
    Url,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ImageModeArg> for ImageMode {
    fn from(mode: ImageModeArg) -> Self {
        match mode {
            ImageModeArg::None => ImageMode::None,
            ImageModeArg::File => ImageMode::File,
            ImageModeArg::Inline => ImageMode::Inline,
            ImageModeArg::Url => ImageMode::Url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "specsheet",
            "extract",
            "-i",
            "price.csv",
            "--image-mode",
            "inline",
            "--delimiter",
            ";",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.input, Some(PathBuf::from("price.csv")));
                assert_eq!(args.delimiter, Some(';'));
                assert!(matches!(args.images.image_mode, Some(ImageModeArg::Inline)));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_lookup_command_with_global_flags() {
        let cli = Cli::parse_from(["specsheet", "lookup", "NRG-TRADE-20-1000", "-f", "json", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Lookup(args) => assert_eq!(args.model, "NRG-TRADE-20-1000"),
            _ => panic!("Expected Lookup command"),
        }
    }

    #[test]
    fn test_image_args_override_profile() {
        let args = ImageArgs {
            image_mode: Some(ImageModeArg::Url),
            image_url_base: Some("https://cdn.example".to_string()),
            no_normalize_png: true,
            ..Default::default()
        };
        let options = args.apply(ImageOptions::default());
        assert_eq!(options.mode, ImageMode::Url);
        assert_eq!(options.url_base, "https://cdn.example");
        assert!(!options.normalize_png);
        assert_eq!(options.output_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["specsheet"]).is_err());
    }
}
