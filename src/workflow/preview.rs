//! プレビュー用リソース
//!
//! 選択した画像の一時コピー（`file://` URL）か、サーバーが返したURL。
//! 一時ファイルは PreviewHandle を drop した時点で削除される。

use super::file::{extension_for_mime, SelectedFile};
use crate::error::{Result, VerifyError};
use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;

lazy_static! {
    /// data:[<mime>][;base64],<data>
    static ref DATA_URL: Regex = Regex::new(r"(?s)^data:([^;,]*)((?:;[^;,]*)*),(.*)$").unwrap();
}

#[derive(Debug)]
pub enum PreviewHandle {
    /// 手元に作った一時ファイル
    Local { path: TempPath, url: String },
    /// サーバー側のURL（解放するものはない）
    Remote(String),
}

impl PreviewHandle {
    pub fn from_file(file: &SelectedFile) -> Result<Self> {
        let suffix = file.extension().map(|e| format!(".{}", e)).unwrap_or_default();
        Self::write_temp(file.bytes(), &suffix)
    }

    /// サーバーの image_url から作る（data: URL は一時ファイルに展開）
    pub fn from_server_url(url: &str) -> Result<Self> {
        let Some(caps) = DATA_URL.captures(url) else {
            return Ok(PreviewHandle::Remote(url.to_string()));
        };

        let mime = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let params = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let data = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

        let bytes = if params.split(';').any(|p| p.eq_ignore_ascii_case("base64")) {
            base64::engine::general_purpose::STANDARD
                .decode(data.trim())
                .map_err(|e| VerifyError::Decode(format!("preview data URL: {}", e)))?
        } else {
            data.as_bytes().to_vec()
        };

        let suffix = extension_for_mime(mime)
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        Self::write_temp(&bytes, &suffix)
    }

    fn write_temp(bytes: &[u8], suffix: &str) -> Result<Self> {
        let mut tmp = tempfile::Builder::new()
            .prefix("aadhaar-preview-")
            .suffix(suffix)
            .tempfile()?;
        tmp.write_all(bytes)?;
        tmp.flush()?;

        let path = tmp.into_temp_path();
        let url = format!("file://{}", path.display());
        tracing::debug!(%url, "preview allocated");
        Ok(PreviewHandle::Local { path, url })
    }

    pub fn url(&self) -> &str {
        match self {
            PreviewHandle::Local { url, .. } => url.as_str(),
            PreviewHandle::Remote(url) => url.as_str(),
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            PreviewHandle::Local { path, .. } => Some(&**path),
            PreviewHandle::Remote(_) => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, PreviewHandle::Local { .. })
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        // 一時ファイル自体は TempPath の drop で消える
        tracing::debug!(url = self.url(), "preview released");
    }
}
