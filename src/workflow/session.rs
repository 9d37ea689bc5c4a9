//! 3つのワークフロー（Analyze / QR / Lookup）をまとめる
//!
//! ワークフローごとに別の Mutex を持ち、ロックは await をまたがない。
//! そのため3つを同時に送信でき、互いの状態には触れない。

use super::file::SelectedFile;
use super::slot::UploadSlot;
use super::state::WorkflowState;
use crate::api::VerificationApi;
use crate::error::{Result, VerifyError};
use aadhaar_verify_common::presenter::{
    analyze_history_label, lookup_history_label, qr_history_label,
};
use aadhaar_verify_common::{
    AnalyzeResponse, History, HistoryEntry, IdentifierInput, LookupResponse, OperationResult,
    QrResponse, WorkflowKind,
};
use std::future::Future;
use tokio::sync::Mutex;

pub const MISSING_ANALYZE_FILE: &str = "Select an image to analyze";
pub const MISSING_QR_FILE: &str = "Select a QR image to verify";

/// 画像アップロード系のペイロード
trait UploadPayload: Clone + Send {
    fn image_url(&self) -> Option<&str>;
    fn history_label(result: &OperationResult<Self>) -> String;
}

impl UploadPayload for AnalyzeResponse {
    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn history_label(result: &OperationResult<Self>) -> String {
        analyze_history_label(result)
    }
}

impl UploadPayload for QrResponse {
    fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    fn history_label(result: &OperationResult<Self>) -> String {
        qr_history_label(result)
    }
}

#[derive(Debug)]
struct UploadWorkflow<T> {
    slot: UploadSlot,
    state: WorkflowState<T>,
}

impl<T> Default for UploadWorkflow<T> {
    fn default() -> Self {
        Self {
            slot: UploadSlot::default(),
            state: WorkflowState::default(),
        }
    }
}

impl<T: Clone> UploadWorkflow<T> {
    fn view(&self) -> UploadView<T> {
        UploadView {
            file_name: self.slot.file().map(|f| f.name().to_string()),
            preview_url: self.slot.preview_url().map(str::to_string),
            in_flight: self.state.in_flight(),
            result: self.state.result().cloned(),
        }
    }
}

#[derive(Debug, Default)]
struct LookupWorkflow {
    input: IdentifierInput,
    state: WorkflowState<LookupResponse>,
}

/// 画像ワークフローのスナップショット
#[derive(Debug, Clone)]
pub struct UploadView<T> {
    pub file_name: Option<String>,
    pub preview_url: Option<String>,
    pub in_flight: bool,
    pub result: Option<OperationResult<T>>,
}

/// Lookupのスナップショット
#[derive(Debug, Clone)]
pub struct LookupView {
    pub input: String,
    pub in_flight: bool,
    pub result: Option<OperationResult<LookupResponse>>,
}

impl LookupView {
    /// レコードにサーバー側の画像URLがあればそれを表示に使う
    pub fn preview_url(&self) -> Option<&str> {
        self.result
            .as_ref()?
            .success()?
            .record()?
            .image_url
            .as_deref()
    }
}

pub struct VerificationSession<A> {
    api: A,
    analyze: Mutex<UploadWorkflow<AnalyzeResponse>>,
    qr: Mutex<UploadWorkflow<QrResponse>>,
    lookup: Mutex<LookupWorkflow>,
    history: Mutex<History>,
}

impl<A: VerificationApi> VerificationSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            analyze: Mutex::new(UploadWorkflow::default()),
            qr: Mutex::new(UploadWorkflow::default()),
            lookup: Mutex::new(LookupWorkflow::default()),
            history: Mutex::new(History::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ---- 入力 ----

    /// 画像を選び直すと前回の結果は消え、送信中のレスポンスも捨てられる
    pub async fn select_analyze_file(&self, file: Option<SelectedFile>) {
        let mut wf = self.analyze.lock().await;
        wf.state.reset();
        wf.slot.select(file);
    }

    pub async fn select_qr_file(&self, file: Option<SelectedFile>) {
        let mut wf = self.qr.lock().await;
        wf.state.reset();
        wf.slot.select(file);
    }

    /// 入力を保存するだけ（数字以外は除去、通信なし）
    pub async fn select_identifier(&self, raw: &str) {
        self.lookup.lock().await.input.set(raw);
    }

    pub async fn reset_analyze(&self) {
        let mut wf = self.analyze.lock().await;
        wf.state.reset();
        wf.slot.reset();
    }

    pub async fn reset_qr(&self) {
        let mut wf = self.qr.lock().await;
        wf.state.reset();
        wf.slot.reset();
    }

    pub async fn reset_lookup(&self) {
        let mut wf = self.lookup.lock().await;
        wf.state.reset();
        wf.input.clear();
    }

    /// 画面を閉じるときの後始末（プレビューを全部解放）
    pub async fn teardown(&self) {
        self.reset_analyze().await;
        self.reset_qr().await;
        self.reset_lookup().await;
        tracing::debug!("session torn down");
    }

    // ---- 送信 ----

    pub async fn submit_analyze(&self) -> OperationResult<AnalyzeResponse> {
        let api = &self.api;
        self.submit_upload(
            WorkflowKind::Analyze,
            &self.analyze,
            MISSING_ANALYZE_FILE,
            move |file| async move { api.analyze(&file).await },
        )
        .await
    }

    pub async fn submit_qr(&self) -> OperationResult<QrResponse> {
        let api = &self.api;
        self.submit_upload(
            WorkflowKind::Qr,
            &self.qr,
            MISSING_QR_FILE,
            move |file| async move { api.verify_qr(&file).await },
        )
        .await
    }

    /// 12桁でなければ通信せずに失敗。送信時に前回の結果は消す
    pub async fn submit_lookup(&self) -> OperationResult<LookupResponse> {
        let (number, ticket) = {
            let mut wf = self.lookup.lock().await;
            match wf.input.to_number().map_err(VerifyError::from) {
                Ok(number) => {
                    wf.state.clear_result();
                    (number, wf.state.begin())
                }
                Err(e) => {
                    let outcome = OperationResult::Failure(e.to_string());
                    wf.state.set_local(outcome.clone());
                    return outcome;
                }
            }
        };

        tracing::info!(workflow = %WorkflowKind::Lookup, aadhaar = %number, "dispatching");
        let outcome: OperationResult<LookupResponse> = self.api.lookup(&number).await.into();
        log_outcome(WorkflowKind::Lookup, &outcome);

        let applied = self.lookup.lock().await.state.settle(ticket, outcome.clone());
        if applied {
            let label = lookup_history_label(&outcome, number.as_str());
            self.history.lock().await.record(WorkflowKind::Lookup, label);
        }
        outcome
    }

    async fn submit_upload<T, F, Fut>(
        &self,
        kind: WorkflowKind,
        workflow: &Mutex<UploadWorkflow<T>>,
        missing: &str,
        call: F,
    ) -> OperationResult<T>
    where
        T: UploadPayload,
        F: FnOnce(SelectedFile) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let (file, ticket) = {
            let mut wf = workflow.lock().await;
            let Some(file) = wf.slot.file().cloned() else {
                let outcome = OperationResult::Failure(missing.to_string());
                wf.state.set_local(outcome.clone());
                return outcome;
            };
            (file, wf.state.begin())
        };

        tracing::info!(workflow = %kind, file = file.name(), "dispatching");
        let outcome: OperationResult<T> = call(file).await.into();
        log_outcome(kind, &outcome);

        let mut wf = workflow.lock().await;
        let server_preview = outcome
            .success()
            .and_then(|payload| payload.image_url())
            .map(str::to_string);
        if !wf.state.settle(ticket, outcome.clone()) {
            return outcome;
        }
        if let Some(url) = server_preview {
            wf.slot.adopt_server_preview(&url);
        }
        drop(wf);

        self.history
            .lock()
            .await
            .record(kind, T::history_label(&outcome));
        outcome
    }

    // ---- 参照 ----

    pub async fn analyze_view(&self) -> UploadView<AnalyzeResponse> {
        self.analyze.lock().await.view()
    }

    pub async fn qr_view(&self) -> UploadView<QrResponse> {
        self.qr.lock().await.view()
    }

    pub async fn lookup_view(&self) -> LookupView {
        let wf = self.lookup.lock().await;
        LookupView {
            input: wf.input.value().to_string(),
            in_flight: wf.state.in_flight(),
            result: wf.state.result().cloned(),
        }
    }

    /// 新しい順
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().await.entries().to_vec()
    }
}

fn log_outcome<T>(kind: WorkflowKind, outcome: &OperationResult<T>) {
    match outcome {
        OperationResult::Success(_) => tracing::info!(workflow = %kind, "completed"),
        OperationResult::Failure(message) => {
            tracing::warn!(workflow = %kind, %message, "failed")
        }
    }
}
