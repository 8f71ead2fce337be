use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::renderer::AtlasPage;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Encode an atlas page's coverage as an 8-bit grayscale PNG.
pub fn encode_page<W: Write>(page: &AtlasPage, out: W) -> Result<(), ExportError> {
    let mut encoder = png::Encoder::new(out, page.width(), page.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(page.pixels())?;
    writer.finish()?;
    Ok(())
}

/// Write each page to `dir/atlas-<index>.png`, returning the written paths.
pub fn write_pages<'a, I>(pages: I, dir: &Path) -> Result<Vec<PathBuf>, ExportError>
where
    I: IntoIterator<Item = &'a AtlasPage>,
{
    let mut written = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        let path = dir.join(format!("atlas-{}.png", index));
        let file = File::create(&path).map_err(|source| ExportError::Create {
            path: path.clone(),
            source,
        })?;
        encode_page(page, BufWriter::new(file))?;
        log::info!(
            "Wrote {}x{} atlas page to {}",
            page.width(),
            page.height(),
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
