//! 検証ワークフロー
//!
//! - file: 選択した画像
//! - preview: プレビュー用リソース（スコープ付きで解放）
//! - slot: アップロード欄（ファイル + プレビュー）
//! - state: 送信中フラグと結果
//! - session: 3ワークフローと履歴をまとめる

mod file;
mod preview;
mod session;
mod slot;
mod state;

pub use file::{guess_mime, SelectedFile};
pub use preview::PreviewHandle;
pub use session::{
    LookupView, UploadView, VerificationSession, MISSING_ANALYZE_FILE, MISSING_QR_FILE,
};
pub use slot::UploadSlot;
pub use state::{Ticket, WorkflowState};
