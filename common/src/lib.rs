//! Aadhaar Verify Common Library
//!
//! CLIと他のフロントエンドで共有される型と表示ロジック（I/Oなし）

pub mod error;
pub mod history;
pub mod identifier;
pub mod presenter;
pub mod types;

pub use error::{Error, Result};
pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use identifier::{
    mask_aadhaar, mask_optional, normalize_digits, AadhaarNumber, IdentifierInput, AADHAAR_LEN,
    NOT_AVAILABLE,
};
pub use presenter::{format_confidence, Badge, Tone};
pub use types::{
    AnalyzeResponse, ErrorBody, LookupResponse, OcrFields, OperationResult, PersonRecord,
    QrResponse, WorkflowKind,
};
