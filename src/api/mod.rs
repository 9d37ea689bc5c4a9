//! 外部検証サービスとの通信
//!
//! OCR・QRデコード・照合はすべてサーバー側。ここではリクエストを送り、
//! レスポンスを型付きのスキーマに一度だけデコードする。

mod http;

pub use http::{HttpApi, ANALYZE_FAILED, LOOKUP_FAILED, QR_FAILED};

use crate::error::Result;
use crate::workflow::SelectedFile;
use aadhaar_verify_common::{AadhaarNumber, AnalyzeResponse, LookupResponse, QrResponse};
use async_trait::async_trait;

/// 検証サービスの3エンドポイント
#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// POST /analyze
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalyzeResponse>;

    /// POST /verify-qr
    async fn verify_qr(&self, file: &SelectedFile) -> Result<QrResponse>;

    /// GET /lookup?aadhar=<12桁>
    async fn lookup(&self, number: &AadhaarNumber) -> Result<LookupResponse>;
}
