use anyhow::{anyhow, Result};
use qrcode::render::svg;
use qrcode::QrCode;
use qwikcard_core::{HexColor, EXPORT_SIZE};

/// Encode `content` as a QR code rendered to SVG text.
pub(crate) fn render_svg(
    content: &str,
    foreground: HexColor,
    background: HexColor,
) -> Result<String> {
    let code = QrCode::new(content.as_bytes())
        .map_err(|e| anyhow!("encode {content:?} as QR code: {e}"))?;
    let dark = foreground.to_hex();
    let light = background.to_hex();
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(EXPORT_SIZE, EXPORT_SIZE)
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_uses_requested_colours() {
        let svg = render_svg(
            "http://localhost:5173/profile/abc",
            HexColor::rgb(0x12, 0x34, 0x56),
            HexColor::WHITE,
        )
        .expect("render");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#123456"));
        assert!(svg.contains("#FFFFFF"));
    }
}
