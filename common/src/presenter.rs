//! 結果表示用の派生値
//!
//! OperationResult から画面に出す値（バッジ、信頼度、明細行）を計算する。
//! 結果そのものは変更しない。

use crate::identifier::{mask_aadhaar, mask_optional, NOT_AVAILABLE};
use crate::types::{AnalyzeResponse, LookupResponse, OperationResult, QrResponse};

/// バッジの色調
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Warning,
    Info,
}

impl Tone {
    /// 失敗扱いの見た目かどうか
    pub fn is_error(&self) -> bool {
        matches!(self, Tone::Negative)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub tone: Tone,
}

impl Badge {
    const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

pub const VERIFIED: Badge = Badge::new("Verified", Tone::Positive);
pub const SUSPECT: Badge = Badge::new("Suspect", Tone::Negative);
pub const QR_OK: Badge = Badge::new("QR OK", Tone::Positive);
pub const QR_INVALID: Badge = Badge::new("QR Invalid", Tone::Negative);
pub const NOT_FOUND: Badge = Badge::new("Not found", Tone::Warning);
pub const RECORD: Badge = Badge::new("Record", Tone::Info);

/// Analyzeのバッジ（結果なし・失敗時はなし）
pub fn analyze_badge(result: Option<&OperationResult<AnalyzeResponse>>) -> Option<Badge> {
    let payload = result?.success()?;
    Some(if payload.verified { VERIFIED } else { SUSPECT })
}

pub fn qr_badge(result: Option<&OperationResult<QrResponse>>) -> Option<Badge> {
    let payload = result?.success()?;
    Some(if payload.verhoeff_ok { QR_OK } else { QR_INVALID })
}

pub fn lookup_badge(result: Option<&OperationResult<LookupResponse>>) -> Option<Badge> {
    match result?.success()? {
        LookupResponse::NotFound => Some(NOT_FOUND),
        LookupResponse::Found(_) => Some(RECORD),
    }
}

/// 信頼度を小数1桁のパーセントで表示（値なしは "N/A"、"0.0%" にはしない）
///
/// # Examples
/// ```
/// use aadhaar_verify_common::format_confidence;
///
/// assert_eq!(format_confidence(Some(0.873)), "87.3%");
/// assert_eq!(format_confidence(None), "N/A");
/// ```
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) if value.is_finite() => format!("{:.1}%", value * 100.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn display_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

/// 明細の1行（ラベル, 値）
pub type DetailRow = (&'static str, String);

pub fn analyze_headline(payload: &AnalyzeResponse) -> String {
    payload.predicted_label.clone()
}

pub fn analyze_details(payload: &AnalyzeResponse) -> Vec<DetailRow> {
    let ocr = &payload.ocr;
    vec![
        ("Name", display_or_na(ocr.name())),
        ("DOB / YOB", display_or_na(ocr.birth())),
        ("Gender", display_or_na(ocr.gender())),
        ("Aadhaar No.", mask_optional(ocr.aadhaar_number())),
    ]
}

/// 氏名がなければマスク済み番号
pub fn qr_headline(payload: &QrResponse) -> String {
    match payload.name() {
        Some(name) => name.to_string(),
        None => mask_optional(payload.aadhaar_number()),
    }
}

pub fn qr_details(payload: &QrResponse) -> Vec<DetailRow> {
    vec![
        ("Name", display_or_na(payload.name())),
        ("DOB / YOB", display_or_na(payload.birth())),
        ("Gender", display_or_na(payload.gender())),
        ("Aadhaar No.", mask_optional(payload.aadhaar_number())),
    ]
}

pub fn lookup_headline(payload: &LookupResponse) -> String {
    match payload {
        LookupResponse::NotFound => NOT_FOUND.label.to_string(),
        LookupResponse::Found(record) => display_or_na(record.name()),
    }
}

/// 該当なしのときは明細なし
pub fn lookup_details(payload: &LookupResponse) -> Vec<DetailRow> {
    let Some(record) = payload.record() else {
        return Vec::new();
    };
    vec![
        ("Aadhaar No.", mask_optional(record.aadhaar())),
        ("DOB", display_or_na(record.birth())),
        ("Gender", display_or_na(record.gender())),
        ("Address", display_or_na(record.address())),
    ]
}

/// 履歴に残すラベル
pub fn analyze_history_label(result: &OperationResult<AnalyzeResponse>) -> String {
    match result {
        OperationResult::Success(payload) if !payload.predicted_label.is_empty() => {
            payload.predicted_label.clone()
        }
        OperationResult::Success(_) => "Result".to_string(),
        OperationResult::Failure(message) => failure_label(message),
    }
}

pub fn qr_history_label(result: &OperationResult<QrResponse>) -> String {
    match result {
        OperationResult::Success(payload) => payload
            .aadhaar_number()
            .map(mask_aadhaar)
            .unwrap_or_else(|| "QR".to_string()),
        OperationResult::Failure(message) => failure_label(message),
    }
}

/// 氏名がなければ照会した番号（マスク済み）
pub fn lookup_history_label(result: &OperationResult<LookupResponse>, requested: &str) -> String {
    match result {
        OperationResult::Success(LookupResponse::Found(record)) => record
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| mask_aadhaar(requested)),
        OperationResult::Success(LookupResponse::NotFound) => mask_aadhaar(requested),
        OperationResult::Failure(message) => failure_label(message),
    }
}

fn failure_label(message: &str) -> String {
    format!("Failed: {}", message)
}
