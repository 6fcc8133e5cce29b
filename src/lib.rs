//! MediScan CLI
//!
//! 医薬品QRの読取・検索、シリアル番号による真正性確認、QRコード生成

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod scanner;
pub mod session;
pub mod storage;
