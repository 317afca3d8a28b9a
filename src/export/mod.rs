// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Export dispatcher.
//!
//! Three independent user-triggered exports of the rendered diagram region:
//! the SVG markup verbatim, a PNG rasterized from it, and a single-page
//! landscape A4 PDF embedding that raster. Each is a no-op returning
//! `Ok(None)` when the target holds no rendered SVG, and nothing is retained
//! in memory afterwards.

use std::fmt;
use std::fs;
use std::io;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use resvg::{tiny_skia, usvg};

use crate::render::RenderTarget;

pub const SVG_FILENAME: &str = "diagram.svg";
pub const PNG_FILENAME: &str = "diagram.png";
pub const PDF_FILENAME: &str = "diagram.pdf";

// A4 landscape.
const PDF_PAGE_WIDTH_MM: f64 = 297.0;
const PDF_PAGE_HEIGHT_MM: f64 = 210.0;
const MM_PER_INCH: f64 = 25.4;

#[derive(Debug)]
pub enum ExportError {
    Io { path: PathBuf, source: io::Error },
    SvgParse { source: usvg::Error },
    Raster { width: u32, height: u32 },
    Encode { message: String },
    Document { message: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::SvgParse { source } => write!(f, "cannot parse rendered SVG: {source}"),
            Self::Raster { width, height } => {
                write!(f, "cannot allocate {width}x{height} raster surface")
            }
            Self::Encode { message } => write!(f, "cannot encode bitmap: {message}"),
            Self::Document { message } => write!(f, "cannot assemble document: {message}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::SvgParse { source } => Some(source),
            Self::Raster { .. } | Self::Encode { .. } | Self::Document { .. } => None,
        }
    }
}

/// Serializes the rendered SVG markup verbatim to `diagram.svg`.
pub fn export_svg(target: &RenderTarget, out_dir: &Path) -> Result<Option<PathBuf>, ExportError> {
    let Some(svg) = target.rendered_svg() else {
        return Ok(None);
    };
    let path = out_dir.join(SVG_FILENAME);
    fs::write(&path, svg).map_err(|source| ExportError::Io { path: path.clone(), source })?;
    Ok(Some(path))
}

/// Captures the rendered region to a bitmap and writes `diagram.png`.
pub fn export_png(target: &RenderTarget, out_dir: &Path) -> Result<Option<PathBuf>, ExportError> {
    let Some(svg) = target.rendered_svg() else {
        return Ok(None);
    };
    let pixmap = rasterize(&svg)?;
    let path = out_dir.join(PNG_FILENAME);
    pixmap
        .save_png(&path)
        .map_err(|err| ExportError::Encode { message: err.to_string() })?;
    Ok(Some(path))
}

/// Captures the rendered region to a bitmap and embeds it into a new
/// landscape A4 document as `diagram.pdf`, scaled so the width fills the page
/// and the height keeps the bitmap's aspect ratio.
pub fn export_pdf(target: &RenderTarget, out_dir: &Path) -> Result<Option<PathBuf>, ExportError> {
    let Some(svg) = target.rendered_svg() else {
        return Ok(None);
    };
    let pixmap = rasterize(&svg)?;
    let png_bytes =
        pixmap.encode_png().map_err(|err| ExportError::Encode { message: err.to_string() })?;
    let bitmap = printpdf::image_crate::load_from_memory(&png_bytes)
        .map_err(|err| ExportError::Encode { message: err.to_string() })?;

    let (doc, page, layer) =
        PdfDocument::new("diagram", Mm(PDF_PAGE_WIDTH_MM), Mm(PDF_PAGE_HEIGHT_MM), "diagram");
    let image = Image::from_dynamic_image(&bitmap);
    // A dpi that maps the bitmap width onto the full page width; the height
    // then follows the aspect ratio.
    let dpi = pixmap.width() as f64 * MM_PER_INCH / PDF_PAGE_WIDTH_MM;
    image.add_to_layer(
        doc.get_page(page).get_layer(layer),
        ImageTransform { dpi: Some(dpi), ..Default::default() },
    );

    let path = out_dir.join(PDF_FILENAME);
    let file =
        fs::File::create(&path).map_err(|source| ExportError::Io { path: path.clone(), source })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|err| ExportError::Document { message: err.to_string() })?;
    Ok(Some(path))
}

fn rasterize(svg: &str) -> Result<tiny_skia::Pixmap, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
        .map_err(|source| ExportError::SvgParse { source })?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width().max(1), size.height().max(1));
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::Raster { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}
