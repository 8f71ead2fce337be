use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dynfont")]
#[command(version)]
#[command(about = "Rasterize text into a dynamic glyph atlas", long_about = None)]
#[command(after_help = "\
CONFIGURATION:
    Defaults for every option are read from
    $XDG_CONFIG_HOME/dynfont/config.toml (or the platform config directory):

        [font]
        path = \"/path/to/font.ttf\"
        size = 32
        texture_width = 1024
        texture_height = 1024
        blur = 0
        spacing = 0.0
        use_kernings = true
        default_character = \"?\"

    Without a font path the embedded DejaVu Sans Mono is used.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw text and write every atlas page as a grayscale PNG
    Render {
        #[command(flatten)]
        font: FontArgs,

        /// Text to draw; `\n` starts a new line
        text: String,

        /// Directory for the atlas page images
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Blur radius applied to glyph bitmaps
        #[arg(long)]
        blur: Option<u32>,

        /// Width and height of each atlas page
        #[arg(long)]
        atlas_size: Option<u32>,
    },
    /// Print the measured size and bounds of text
    Measure {
        #[command(flatten)]
        font: FontArgs,

        /// Text to measure
        text: String,
    },
}

#[derive(Args, Debug)]
pub struct FontArgs {
    /// Font file (TTF/OTF); overrides the configured font
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Font size in pixels
    #[arg(short, long)]
    pub size: Option<u32>,
}

/// Turn the two-character sequence `\n` typed on a shell into a real newline.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
