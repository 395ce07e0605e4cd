use crate::errors::AppError;
use qrcode::{EcLevel, QrCode};
use std::fmt::Write;

/// Pixels per QR module.
const BOX_SIZE: usize = 5;
/// Light modules around the symbol.
const BORDER: usize = 2;

/// Renders `url` as a black-on-white QR code, error correction level L, smallest fitting version.
pub fn qr_svg(url: &str) -> Result<String, AppError> {
    let code = QrCode::with_error_correction_level(url, EcLevel::L).map_err(AppError::internal)?;
    let width = code.width();
    let side = (width + 2 * BORDER) * BOX_SIZE;

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {side} {side}" width="{side}" height="{side}" shape-rendering="crispEdges"><rect width="{side}" height="{side}" fill="#ffffff"/>"##
    );
    for (index, module) in code.to_colors().into_iter().enumerate() {
        if module != qrcode::Color::Dark {
            continue;
        }
        let x = (index % width + BORDER) * BOX_SIZE;
        let y = (index / width + BORDER) * BOX_SIZE;
        let _ = write!(
            svg,
            r##"<rect x="{x}" y="{y}" width="{BOX_SIZE}" height="{BOX_SIZE}" fill="#000000"/>"##
        );
    }
    svg.push_str("</svg>");
    Ok(svg)
}
