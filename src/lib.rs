pub mod cli;
pub mod config;
pub mod constants;
pub mod event;
pub mod export;
pub mod font_loader;
pub mod renderer;
pub mod source;
pub mod sprite_font;

pub use event::{AtlasFullEvent, HandlerId};
pub use renderer::font::{FontError, FontSystem};
pub use renderer::{AtlasPage, Bounds, Color, GlyphBatch, GlyphQuad, QuadBatch, Rect, Vec2};
pub use source::{CharSource, ColorSource};
pub use sprite_font::DynamicSpriteFont;

use std::cell::Cell;
use std::rc::Rc;

use log::info;

use crate::cli::{Cli, Command, FontArgs};
use crate::config::{Config, FontSettings};

/// Merge command-line font options over the configured ones.
fn resolve_settings(config: &Config, args: &FontArgs) -> FontSettings {
    let mut settings = config.font.clone();
    if args.font.is_some() {
        settings.path = args.font.clone();
    }
    if args.size.is_some() {
        settings.size = args.size;
    }
    settings
}

fn load_font(settings: &FontSettings) -> Result<DynamicSpriteFont, FontError> {
    let ttf = font_loader::load_font_file(settings.path.as_deref())?;
    DynamicSpriteFont::from_settings(&ttf, settings)
}

pub fn run(cli: Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Render {
            font: font_args,
            text,
            out,
            blur,
            atlas_size,
        } => {
            let mut settings = resolve_settings(&config, &font_args);
            if blur.is_some() {
                settings.blur = blur;
            }
            if let Some(size) = atlas_size {
                settings.texture_width = Some(size);
                settings.texture_height = Some(size);
            }

            let mut font = load_font(&settings)?;
            let pages = Rc::new(Cell::new(0usize));
            let counter = Rc::clone(&pages);
            font.on_current_atlas_full(Box::new(move |_| counter.set(counter.get() + 1)));

            let text = cli::unescape_newlines(&text);
            let mut batch = QuadBatch::new();
            let end = font.draw_string(
                &mut batch,
                CharSource::Str(&text),
                Vec2::ZERO,
                ColorSource::Uniform(Color::WHITE),
            )?;

            info!(
                "Drew {} glyph quad(s), pen ended at x={:.1}, {} page(s) filled",
                batch.len(),
                end,
                pages.get()
            );

            let written = export::write_pages(font.textures(), &out)?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Command::Measure {
            font: font_args,
            text,
        } => {
            let settings = resolve_settings(&config, &font_args);
            let mut font = load_font(&settings)?;
            let text = cli::unescape_newlines(&text);

            let size = font.measure_string(&text)?;
            let bounds = font.text_bounds(Vec2::ZERO, &text)?;
            println!("size: {:.1} x {:.1}", size.x, size.y);
            println!(
                "bounds: x={} y={} width={} height={}",
                bounds.x, bounds.y, bounds.width, bounds.height
            );
        }
    }

    Ok(())
}
