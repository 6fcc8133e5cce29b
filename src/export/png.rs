//! PNG版QR描画
//!
//! 白背景のキャンバス中央（余白25px）にQRを配置する。

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use mediscan_common::qr::encode;
use mediscan_common::{QrRenderer, Result};

/// QR周囲の余白(px)
const CANVAS_PADDING: u32 = 25;

const DARK: Rgb<u8> = Rgb([0x0c, 0x4a, 0x6e]);
const LIGHT: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

#[derive(Debug, Clone, Copy)]
pub struct PngQrRenderer {
    /// QR部分の一辺(px)
    pub size: u32,
}

impl PngQrRenderer {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl QrRenderer for PngQrRenderer {
    type Output = RgbImage;

    fn render(&self, payload: &str) -> Result<RgbImage> {
        let code = encode(payload)?;
        let qr = code
            .render::<Rgb<u8>>()
            .quiet_zone(true)
            .dark_color(DARK)
            .light_color(LIGHT)
            .min_dimensions(self.size, self.size)
            .build();
        let qr = imageops::resize(&qr, self.size, self.size, FilterType::Nearest);

        let side = self.size + CANVAS_PADDING * 2;
        let mut canvas = RgbImage::from_pixel(side, side, LIGHT);
        imageops::overlay(&mut canvas, &qr, CANVAS_PADDING as i64, CANVAS_PADDING as i64);
        Ok(canvas)
    }
}
