//! 標準エラー出力へのロガー（fern）
//!
//! 出力例: `[2026-10-19T09:12:03+09:00][WARN][mediscan_common::scan_counter] scan counts corrupt, ...`

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

/// 出力先を付ける前の共通設定
fn base_dispatch(verbose: bool) -> Dispatch {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level)
}

/// ロガーを登録（`verbose` で DEBUG まで出力）
pub fn init(verbose: bool) {
    // 二重登録（テスト等）は無視
    if let Err(e) = base_dispatch(verbose).chain(std::io::stderr()).apply() {
        eprintln!("logger already initialized: {}", e);
    }
}
