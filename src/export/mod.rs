//! QRコードのファイル出力

pub mod png;

use crate::cli::QrFormat;
use crate::error::Result;
use mediscan_common::qr::{self, SvgQrRenderer};
use mediscan_common::Catalog;
use std::path::{Path, PathBuf};

/// 出力ファイルのパス（ディレクトリ指定なら `<id>-qrcode.<ext>`）
fn output_path_for_format(output: &Path, drug_id: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}-qrcode.{}", drug_id, extension))
    } else {
        output.to_path_buf()
    }
}

/// 出力結果
#[derive(Debug, Clone)]
pub struct ExportedQr {
    pub url: String,
    pub path: PathBuf,
}

pub fn export_qr(
    catalog: &Catalog,
    drug_id: &str,
    base_url: &str,
    format: QrFormat,
    output: &Path,
    size: u32,
) -> Result<ExportedQr> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let (url, path) = match format {
        QrFormat::Png => {
            let renderer = png::PngQrRenderer::new(size);
            let generated = qr::generate(catalog, drug_id, base_url, &renderer)?;
            let path = output_path_for_format(output, &generated.drug_id, "png");
            generated.image.save(&path)?;
            (generated.url, path)
        }
        QrFormat::Svg => {
            let renderer = SvgQrRenderer {
                size,
                ..Default::default()
            };
            let generated = qr::generate(catalog, drug_id, base_url, &renderer)?;
            let path = output_path_for_format(output, &generated.drug_id, "svg");
            std::fs::write(&path, generated.image)?;
            (generated.url, path)
        }
    };

    log::debug!("wrote QR for {} to {}", url, path.display());
    Ok(ExportedQr { url, path })
}
