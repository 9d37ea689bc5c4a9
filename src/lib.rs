//! aadhaar-verify
//!
//! 検証サービス（analyze / verify-qr / lookup）のクライアント。
//! 3つのワークフローは独立していて、同時に実行できる。

pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod render;
pub mod workflow;

pub use api::{HttpApi, VerificationApi};
pub use error::{Result, VerifyError};
pub use workflow::VerificationSession;
