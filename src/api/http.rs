use super::VerificationApi;
use crate::error::{Result, VerifyError};
use crate::workflow::SelectedFile;
use aadhaar_verify_common::{
    AadhaarNumber, AnalyzeResponse, ErrorBody, LookupResponse, QrResponse,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

/// サーバーが detail を返さなかったときの文言
pub const ANALYZE_FAILED: &str = "Analysis failed";
pub const QR_FAILED: &str = "QR verification failed";
pub const LOOKUP_FAILED: &str = "Lookup failed";

/// reqwest によるHTTP実装（タイムアウトは設けない）
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base: String,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base))
    }

    pub fn with_client(client: reqwest::Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { client, base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// 画像を multipart の `file` フィールドで送る
    async fn post_image<T: DeserializeOwned>(
        &self,
        path: &str,
        file: &SelectedFile,
        fallback: &str,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, file = file.name(), bytes = file.len(), "uploading image");

        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        read_response(response, fallback).await
    }
}

#[async_trait]
impl VerificationApi for HttpApi {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalyzeResponse> {
        self.post_image("/analyze", file, ANALYZE_FAILED).await
    }

    async fn verify_qr(&self, file: &SelectedFile) -> Result<QrResponse> {
        self.post_image("/verify-qr", file, QR_FAILED).await
    }

    async fn lookup(&self, number: &AadhaarNumber) -> Result<LookupResponse> {
        let url = self.url("/lookup");
        tracing::debug!(%url, aadhaar = %number, "looking up record");

        let response = self
            .client
            .get(&url)
            .query(&[("aadhar", number.as_str())])
            .send()
            .await?;
        read_response(response, LOOKUP_FAILED).await
    }
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> Result<T> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    tracing::debug!(status, body_len = body.len(), "response received");
    decode_body(status, &body, fallback)
}

/// ステータスとボディから結果を組み立てる
///
/// - 2xx以外: `detail`（なければ `error`）、どちらもなければ fallback
/// - 2xxでも `error` 文字列を含む場合はサーバーエラー扱い（QRが見つからない等）
/// - JSONでない・スキーマ不一致は Decode
pub(crate) fn decode_body<T: DeserializeOwned>(status: u16, body: &str, fallback: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message().map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!(status, %message, "server reported an error");
        return Err(VerifyError::Server { status, message });
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| VerifyError::Decode(e.to_string()))?;

    if let Some(message) = value
        .get("error")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
    {
        tracing::warn!(status, %message, "server returned an error payload");
        return Err(VerifyError::Server {
            status,
            message: message.to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| VerifyError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let body = r#"{ "predicted_label": "real", "confidence": 0.9, "verified": true, "ocr": {} }"#;
        let response: AnalyzeResponse = decode_body(200, body, ANALYZE_FAILED).unwrap();
        assert!(response.verified);
    }

    #[test]
    fn test_decode_error_detail() {
        let body = r#"{ "detail": "Invalid image file format" }"#;
        let err = decode_body::<AnalyzeResponse>(400, body, ANALYZE_FAILED).unwrap_err();
        assert!(matches!(err, VerifyError::Server { status: 400, .. }));
        assert_eq!(err.to_string(), "Invalid image file format");
    }

    #[test]
    fn test_decode_error_fallback() {
        let err = decode_body::<LookupResponse>(500, "Internal Server Error", LOOKUP_FAILED).unwrap_err();
        assert_eq!(err.to_string(), "Lookup failed");

        // FastAPIのバリデーションエラーは detail が配列
        let body = r#"{ "detail": [ { "loc": ["query", "aadhar"], "msg": "field required" } ] }"#;
        let err = decode_body::<LookupResponse>(422, body, LOOKUP_FAILED).unwrap_err();
        assert_eq!(err.to_string(), "Lookup failed");
    }

    #[test]
    fn test_decode_error_payload_with_ok_status() {
        let err = decode_body::<QrResponse>(200, r#"{ "error": "No QR code found" }"#, QR_FAILED).unwrap_err();
        assert_eq!(err.to_string(), "No QR code found");
    }

    #[test]
    fn test_decode_not_json() {
        let err = decode_body::<QrResponse>(200, "<html>", QR_FAILED).unwrap_err();
        assert!(matches!(err, VerifyError::Decode(_)));
    }

    #[test]
    fn test_decode_schema_mismatch() {
        // predicted_label は必須
        let err = decode_body::<AnalyzeResponse>(200, r#"{ "verified": true }"#, ANALYZE_FAILED).unwrap_err();
        assert!(matches!(err, VerifyError::Decode(_)));
    }

    #[test]
    fn test_base_trailing_slash() {
        let api = HttpApi::with_client(reqwest::Client::new(), "http://127.0.0.1:8000/");
        assert_eq!(api.base(), "http://127.0.0.1:8000");
        assert_eq!(api.url("/lookup"), "http://127.0.0.1:8000/lookup");
    }
}
