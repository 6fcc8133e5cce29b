//! 読取セッション
//!
//! カメラや画像ファイルなどの読取元（DecodeSource）から、読取結果を
//! 容量1のチャネルで受け取る。最初の1件だけを保持し、取り出されるまで
//! 後続は捨てる。セッションを閉じる・破棄すると必ず読取元を停止する。

use crate::error::{Error, Result};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

/// 読取結果の送信口（読取元が保持する）
#[derive(Debug, Clone)]
pub struct DecodeSender {
    tx: SyncSender<String>,
}

impl DecodeSender {
    /// 読取結果を渡す。スロットが埋まっている・閉じている場合は false
    pub fn offer(&self, payload: impl Into<String>) -> bool {
        match self.tx.try_send(payload.into()) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                log::debug!("decode slot full, dropping {:?}", dropped);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// 読取元（カメラ・画像ファイル等）
pub trait DecodeSource {
    /// 読取を開始する。読取結果は `sender` に渡す
    fn start(&mut self, sender: DecodeSender) -> std::result::Result<(), String>;

    /// 読取を停止して資源を解放する
    fn stop(&mut self);
}

/// 読取セッション
pub struct ScanSession<S: DecodeSource> {
    source: S,
    rx: Receiver<String>,
    active: bool,
}

impl<S: DecodeSource> ScanSession<S> {
    /// 読取元を起動してセッションを開く
    pub fn open(mut source: S) -> Result<Self> {
        let (tx, rx) = mpsc::sync_channel(1);

        if let Err(reason) = source.start(DecodeSender { tx }) {
            source.stop();
            log::warn!("scanner acquisition failed: {}", reason);
            return Err(Error::ScannerAcquisitionFailed(reason));
        }

        log::debug!("scan session opened");
        Ok(Self {
            source,
            rx,
            active: true,
        })
    }

    /// 読取結果があれば取り出す（ブロックしない）
    pub fn poll(&self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(payload) => Some(payload),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 読取元を停止してセッションを閉じる
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.active {
            self.active = false;
            self.source.stop();
            log::debug!("scan session closed");
        }
    }
}

impl<S: DecodeSource> Drop for ScanSession<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
