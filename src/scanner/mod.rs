//! 画像ファイルからのQR読取
//!
//! カメラの代わりに画像ファイルを読取元（DecodeSource）として扱う。

use crate::error::{MediscanError, Result};
use mediscan_common::{DecodeSender, DecodeSource};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext)
}

/// フォルダ直下の画像ファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(MediscanError::FileNotFound(folder.display().to_string()));
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_image_extension(&ext.to_string_lossy()) {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                images.push(ImageInfo {
                    path: path.to_path_buf(),
                    file_name,
                });
            }
        }
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// 画像内の最初に読めたQRコードの内容を返す
pub fn decode_qr(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MediscanError::FileNotFound(path.display().to_string()));
    }

    let img = image::open(path)?.to_luma8();
    let (width, height) = img.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| img.get_pixel(x as u32, y as u32).0[0],
    );

    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_, content)) => return Ok(content),
            Err(e) => log::debug!("skipping unreadable grid in {}: {:?}", path.display(), e),
        }
    }

    Err(MediscanError::QrDecode(path.display().to_string()))
}

/// 画像ファイルの読取元
pub struct ImageFileSource {
    path: PathBuf,
    stopped: bool,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl DecodeSource for ImageFileSource {
    fn start(&mut self, sender: DecodeSender) -> std::result::Result<(), String> {
        let payload = decode_qr(&self.path).map_err(|e| e.to_string())?;
        sender.offer(payload);
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
