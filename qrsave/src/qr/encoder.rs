//! QR matrix encoding and PNG rasterization

use crate::error::Result;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable
    L,
    /// ~15% of codewords recoverable
    #[default]
    M,
    /// ~25% of codewords recoverable
    Q,
    /// ~30% of codewords recoverable
    H,
}

impl ErrorCorrection {
    /// Parse an exact level letter
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "L" => Some(Self::L),
            "M" => Some(Self::M),
            "Q" => Some(Self::Q),
            "H" => Some(Self::H),
            _ => None,
        }
    }

    /// Parse a level letter, falling back to `M` for anything unrecognized
    pub fn parse_lenient(letter: &str) -> Self {
        Self::from_letter(letter).unwrap_or_else(|| {
            tracing::debug!(
                "Unrecognized error correction level '{}', using M",
                letter
            );
            Self::default()
        })
    }

    /// The level letter
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

impl std::fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raster geometry for a rendered code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixel width of one module ("box size")
    pub module_size: u32,
    /// Quiet zone width, in modules, on every side
    pub border: u32,
}

impl RenderOptions {
    /// Full-resolution geometry for a `size` knob: modules are `2 * size` pixels
    pub fn full_resolution(size: u32, border: u32) -> Self {
        Self {
            module_size: size * 2,
            border,
        }
    }
}

/// Encode `content` into a QR matrix.
///
/// The smallest version that fits the payload at the requested level is
/// chosen by the encoder. Payloads beyond version 40 fail with
/// [`crate::QrSaveError::Encoding`].
pub fn encode_matrix(content: &str, level: ErrorCorrection) -> Result<QrCode> {
    Ok(QrCode::with_error_correction_level(
        content.as_bytes(),
        level.ec_level(),
    )?)
}

/// Rasterize a matrix as black modules on a white background
pub fn rasterize(code: &QrCode, options: RenderOptions) -> GrayImage {
    let modules = code.width() as u32;
    let scale = options.module_size.max(1);
    let side = (modules + 2 * options.border) * scale;
    let offset = options.border * scale;

    let mut img = GrayImage::from_pixel(side, side, LIGHT);
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (i as u32) % modules;
        let y = (i as u32) / modules;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(offset + x * scale + dx, offset + y * scale + dy, DARK);
            }
        }
    }
    img
}

/// Encode and rasterize in one step
pub fn render(content: &str, level: ErrorCorrection, options: RenderOptions) -> Result<GrayImage> {
    let code = encode_matrix(content, level)?;
    Ok(rasterize(&code, options))
}

/// Write a raster to `path` as PNG
pub fn write_png(img: &GrayImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Encode a raster as PNG bytes in memory
pub fn encode_png(img: &GrayImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
