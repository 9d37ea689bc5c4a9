//! Aadhaar番号（12桁識別子）の正規化・検証・マスク
//!
//! - 入力は編集のたびに数字以外を除去する
//! - 送信できるのはちょうど12桁のときだけ
//! - 表示時は下4桁のみを残してマスクする

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 識別子の桁数
pub const AADHAAR_LEN: usize = 12;

/// 値がない場合の表示
pub const NOT_AVAILABLE: &str = "N/A";

/// 数字以外をすべて取り除く（何度適用しても結果は変わらない）
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 下4桁だけを見せる固定形式のマスク
///
/// 数字だけにして12桁にならない入力は、そのまま返す。
///
/// # Examples
/// ```
/// use aadhaar_verify_common::mask_aadhaar;
///
/// assert_eq!(mask_aadhaar("123456789012"), "XXXX-XXXX-9012");
/// assert_eq!(mask_aadhaar("1234 5678 9012"), "XXXX-XXXX-9012");
/// assert_eq!(mask_aadhaar("12345"), "12345");
/// ```
pub fn mask_aadhaar(raw: &str) -> String {
    let clean = normalize_digits(raw);
    if clean.len() != AADHAAR_LEN {
        return raw.to_string();
    }
    format!("XXXX-XXXX-{}", &clean[AADHAAR_LEN - 4..])
}

/// 値がなければ "N/A"、あればマスク
pub fn mask_optional(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.is_empty() => mask_aadhaar(s),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// 検証済みの12桁識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AadhaarNumber(String);

impl AadhaarNumber {
    /// 数字以外を除去したうえで12桁かを確認
    pub fn parse(raw: &str) -> Result<Self> {
        let digits = normalize_digits(raw);
        if digits.len() != AADHAAR_LEN {
            return Err(Error::InvalidIdentifier);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_aadhaar(&self.0)
    }
}

impl TryFrom<String> for AadhaarNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<AadhaarNumber> for String {
    fn from(value: AadhaarNumber) -> Self {
        value.0
    }
}

/// ログや画面にはマスク済みの形だけを出す
impl fmt::Display for AadhaarNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

/// Lookup用の入力欄
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierInput {
    value: String,
}

impl IdentifierInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 編集内容を保存（数字以外は除去、検証や通信は行わない）
    pub fn set(&mut self, raw: &str) {
        self.value = normalize_digits(raw);
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// 送信前の検証
    pub fn to_number(&self) -> Result<AadhaarNumber> {
        AadhaarNumber::parse(&self.value)
    }
}
