//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 12桁でない識別子（メッセージは画面表示にそのまま使う）
    #[error("Enter exactly 12 digits")]
    InvalidIdentifier,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_identifier() {
        assert_eq!(Error::InvalidIdentifier.to_string(), "Enter exactly 12 digits");
    }

    #[test]
    fn test_result_alias() {
        let result: Result<()> = Err(Error::InvalidIdentifier);
        assert!(matches!(result, Err(Error::InvalidIdentifier)));
    }
}
