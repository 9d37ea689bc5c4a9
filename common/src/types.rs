//! 検証サービスのレスポンス型
//!
//! エンドポイントごとの明示的なスキーマ。HTTP境界で一度だけデコードし、
//! 以降のロジックではフィールドの有無を再確認しない。
//! - AnalyzeResponse: POST /analyze
//! - QrResponse: POST /verify-qr
//! - LookupResponse: GET /lookup

use serde::{Deserialize, Serialize};
use std::fmt;

/// 空文字は「値なし」として扱う
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// 対象のワークフロー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Analyze,
    Qr,
    Lookup,
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowKind::Analyze => write!(f, "Analyze"),
            WorkflowKind::Qr => write!(f, "QR"),
            WorkflowKind::Lookup => write!(f, "Lookup"),
        }
    }
}

/// OCRで抽出した項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    /// サーバー側でOCRが失敗した
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ocr_error: bool,
}

impl OcrFields {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// 生年月日、なければ生年
    pub fn birth(&self) -> Option<&str> {
        non_empty(&self.dob).or_else(|| non_empty(&self.yob))
    }

    pub fn gender(&self) -> Option<&str> {
        non_empty(&self.gender)
    }

    pub fn aadhaar_number(&self) -> Option<&str> {
        non_empty(&self.aadhaar_number)
    }
}

/// POST /analyze のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub predicted_label: String,

    /// 0.0〜1.0
    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub verified: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,

    #[serde(default)]
    pub ocr: OcrFields,

    /// サーバーが返すプレビュー画像（任意）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// POST /verify-qr のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Verhoeffチェックサムの結果（計算はサーバー側）
    pub verhoeff_ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QrResponse {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn birth(&self) -> Option<&str> {
        non_empty(&self.dob).or_else(|| non_empty(&self.yob))
    }

    pub fn gender(&self) -> Option<&str> {
        non_empty(&self.gender)
    }

    pub fn aadhaar_number(&self) -> Option<&str> {
        non_empty(&self.aadhaar_number)
    }
}

/// Lookupで見つかったレコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PersonRecord {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn birth(&self) -> Option<&str> {
        non_empty(&self.dob).or_else(|| non_empty(&self.yob))
    }

    pub fn gender(&self) -> Option<&str> {
        non_empty(&self.gender)
    }

    pub fn address(&self) -> Option<&str> {
        non_empty(&self.address)
    }

    pub fn aadhaar(&self) -> Option<&str> {
        non_empty(&self.aadhaar)
    }
}

/// GET /lookup のレスポンス
///
/// `{ "not_found": true }` はエラーではなく「該当なし」という正常な結果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLookup", into = "RawLookup")]
pub enum LookupResponse {
    Found(PersonRecord),
    NotFound,
}

impl LookupResponse {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupResponse::NotFound)
    }

    pub fn record(&self) -> Option<&PersonRecord> {
        match self {
            LookupResponse::Found(record) => Some(record),
            LookupResponse::NotFound => None,
        }
    }
}

/// ワイヤ上の形（レコード or not_found フラグ）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawLookup {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    not_found: bool,
    #[serde(flatten)]
    record: PersonRecord,
}

impl From<RawLookup> for LookupResponse {
    fn from(raw: RawLookup) -> Self {
        if raw.not_found {
            LookupResponse::NotFound
        } else {
            LookupResponse::Found(raw.record)
        }
    }
}

impl From<LookupResponse> for RawLookup {
    fn from(response: LookupResponse) -> Self {
        match response {
            LookupResponse::Found(record) => RawLookup { not_found: false, record },
            LookupResponse::NotFound => RawLookup { not_found: true, ..Default::default() },
        }
    }
}

/// エラー時のボディ（FastAPIの `detail`、QRデコード失敗時の `error`）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub detail: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        non_empty(&self.detail).or_else(|| non_empty(&self.error))
    }
}

/// 1回の送信結果。新しい送信ごとに丸ごと置き換える
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "payload", rename_all = "snake_case")]
pub enum OperationResult<T> {
    Success(T),
    Failure(String),
}

impl<T> OperationResult<T> {
    pub fn is_failure(&self) -> bool {
        matches!(self, OperationResult::Failure(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            OperationResult::Success(payload) => Some(payload),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Failure(message) => Some(message),
        }
    }
}

impl<T, E: fmt::Display> From<std::result::Result<T, E>> for OperationResult<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(payload) => OperationResult::Success(payload),
            Err(e) => OperationResult::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_response_deserialize() {
        let json = r#"{
            "predicted_label": "real",
            "confidence": 0.873,
            "verified": true,
            "classes": ["fake", "real"],
            "ocr": { "name": "Aarav Sharma", "dob": "05/03/1990", "gender": "MALE", "aadhaar_number": "111122223333", "raw_text": "" }
        }"#;

        let response: AnalyzeResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(response.predicted_label, "real");
        assert_eq!(response.confidence, Some(0.873));
        assert!(response.verified);
        assert_eq!(response.ocr.name(), Some("Aarav Sharma"));
        assert_eq!(response.ocr.birth(), Some("05/03/1990"));
        assert!(response.image_url.is_none());
        assert!(!response.ocr.ocr_error);
    }

    #[test]
    fn test_ocr_birth_falls_back_to_yob() {
        let ocr: OcrFields = serde_json::from_str(r#"{ "dob": "", "yob": "1990" }"#).unwrap();
        assert_eq!(ocr.birth(), Some("1990"));

        let empty = OcrFields::default();
        assert_eq!(empty.birth(), None);
    }

    #[test]
    fn test_ocr_error_flag() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{ "predicted_label": "N/A", "confidence": 0.0, "verified": false, "ocr": { "ocr_error": true } }"#,
        )
        .unwrap();
        assert!(response.ocr.ocr_error);
        assert_eq!(response.ocr.name(), None);
    }

    #[test]
    fn test_qr_response_defaults() {
        let response: QrResponse = serde_json::from_str(
            r#"{ "source": "qr", "raw": null, "aadhaar_number": "111122223333", "name": null, "verhoeff_ok": true, "notes": [] }"#,
        )
        .unwrap();
        assert!(response.verhoeff_ok);
        assert_eq!(response.aadhaar_number(), Some("111122223333"));
        assert_eq!(response.name(), None);
        assert_eq!(response.confidence, None);
    }

    #[test]
    fn test_lookup_found() {
        let json = r#"{ "aadhaar": "111122223333", "name": "Aarav Sharma", "dob": "05/03/1990", "gender": "Male", "address": "12 MG Road" }"#;
        let response: LookupResponse = serde_json::from_str(json).unwrap();
        let record = response.record().expect("レコードがない");
        assert_eq!(record.name(), Some("Aarav Sharma"));
        assert_eq!(record.address(), Some("12 MG Road"));
        assert!(!response.is_not_found());
    }

    #[test]
    fn test_lookup_not_found() {
        let response: LookupResponse = serde_json::from_str(r#"{ "not_found": true }"#).unwrap();
        assert!(response.is_not_found());
        assert!(response.record().is_none());

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"not_found":true}"#);
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(r#"{ "detail": "Aadhaar not found or invalid number" }"#).unwrap();
        assert_eq!(body.message(), Some("Aadhaar not found or invalid number"));

        let body: ErrorBody = serde_json::from_str(r#"{ "error": "No QR code found" }"#).unwrap();
        assert_eq!(body.message(), Some("No QR code found"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_operation_result_from_result() {
        let ok: OperationResult<u8> = Ok::<u8, String>(1).into();
        assert_eq!(ok.success(), Some(&1));

        let err: OperationResult<u8> = Err::<u8, String>("boom".to_string()).into();
        assert!(err.is_failure());
        assert_eq!(err.failure(), Some("boom"));
    }

    #[test]
    fn test_operation_result_serialize() {
        let failure: OperationResult<u8> = OperationResult::Failure("Lookup failed".into());
        let json = serde_json::to_string(&failure).unwrap();
        assert_eq!(json, r#"{"status":"failure","payload":"Lookup failed"}"#);
    }

    #[test]
    fn test_workflow_kind_display() {
        assert_eq!(WorkflowKind::Analyze.to_string(), "Analyze");
        assert_eq!(WorkflowKind::Qr.to_string(), "QR");
        assert_eq!(WorkflowKind::Lookup.to_string(), "Lookup");
    }
}
