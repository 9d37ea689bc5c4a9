use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 通信失敗（接続不可など）
    #[error("{0}")]
    Transport(String),

    /// サーバーが返したエラー（detail があればそれ、なければ既定文言）
    #[error("{message}")]
    Server { status: u16, message: String },

    /// JSONでない、またはスキーマ不一致のレスポンス
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Terminal interaction failed: {0}")]
    Interaction(String),

    #[error(transparent)]
    Common(#[from] aadhaar_verify_common::Error),
}

impl From<reqwest::Error> for VerifyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            VerifyError::Decode(e.to_string())
        } else {
            VerifyError::Transport(e.to_string())
        }
    }
}

impl From<dialoguer::Error> for VerifyError {
    fn from(e: dialoguer::Error) -> Self {
        VerifyError::Interaction(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;
