//! QRコードのURL規則と生成
//!
//! - 生成: `<base>/drug/<id>` を QR 画像にする
//! - 読取: ペイロードの最後の `/drug/` 以降を識別子として扱う

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

/// 識別子パスの区切り
pub const DRUG_PATH: &str = "/drug/";

/// QR前景色
pub const QR_DARK_COLOR: &str = "#0c4a6e";
/// QR背景色
pub const QR_LIGHT_COLOR: &str = "#ffffff";
/// QR最小サイズ(px)
pub const QR_SIZE: u32 = 200;

/// 医薬品ページのURL
pub fn drug_url(base_address: &str, id: &str) -> String {
    format!("{}{}{}", base_address, DRUG_PATH, id)
}

/// 読取結果から識別子候補を取り出す
///
/// URL形式なら最後の `/drug/` 以降、それ以外は全体をそのまま使う。
pub fn extract_drug_id(payload: &str) -> &str {
    let payload = payload.trim();
    match payload.rfind(DRUG_PATH) {
        Some(pos) => &payload[pos + DRUG_PATH.len()..],
        None => payload,
    }
}

/// QR画像の描画役
pub trait QrRenderer {
    type Output;

    fn render(&self, payload: &str) -> Result<Self::Output>;
}

/// SVG文字列として描画
#[derive(Debug, Clone)]
pub struct SvgQrRenderer {
    pub size: u32,
    pub dark_color: String,
    pub light_color: String,
}

impl Default for SvgQrRenderer {
    fn default() -> Self {
        Self {
            size: QR_SIZE,
            dark_color: QR_DARK_COLOR.to_string(),
            light_color: QR_LIGHT_COLOR.to_string(),
        }
    }
}

impl QrRenderer for SvgQrRenderer {
    type Output = String;

    fn render(&self, payload: &str) -> Result<String> {
        let code = encode(payload)?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(self.size, self.size)
            .quiet_zone(true)
            .dark_color(svg::Color(&self.dark_color))
            .light_color(svg::Color(&self.light_color))
            .build();
        Ok(image)
    }
}

/// 誤り訂正レベルHで符号化
pub fn encode(payload: &str) -> Result<QrCode> {
    QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| Error::QrRender(e.to_string()))
}

/// 生成結果
#[derive(Debug, Clone)]
pub struct GeneratedQr<T> {
    pub drug_id: String,
    pub url: String,
    pub image: T,
}

/// カタログから医薬品を引いてQRを生成
pub fn generate<R: QrRenderer>(
    catalog: &Catalog,
    id: &str,
    base_address: &str,
    renderer: &R,
) -> Result<GeneratedQr<R::Output>> {
    let drug = catalog
        .find_by_id(id)
        .ok_or_else(|| Error::DrugNotFound(id.to_string()))?;

    let url = drug_url(base_address, &drug.id);
    let image = renderer.render(&url)?;

    Ok(GeneratedQr {
        drug_id: drug.id.clone(),
        url,
        image,
    })
}
