use super::file::SelectedFile;
use super::preview::PreviewHandle;

/// 画像アップロード欄
///
/// プレビューは常に最大1つ。新しいものを作る前に古いものを解放し、
/// reset や drop でも解放される。
#[derive(Debug, Default)]
pub struct UploadSlot {
    file: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを選択（None なら欄を空にする）
    ///
    /// プレビューが作れなくても選択自体は有効（プレビューなしになる）。
    pub fn select(&mut self, file: Option<SelectedFile>) {
        self.release_preview();

        if let Some(f) = &file {
            match PreviewHandle::from_file(f) {
                Ok(handle) => self.preview = Some(handle),
                Err(e) => tracing::warn!(file = f.name(), error = %e, "preview unavailable"),
            }
        }

        self.file = file;
    }

    /// サーバーが返した image_url をプレビューにする
    ///
    /// 使えないURLなら今のプレビューを残す。
    pub fn adopt_server_preview(&mut self, url: &str) {
        match PreviewHandle::from_server_url(url) {
            Ok(handle) => {
                self.release_preview();
                self.preview = Some(handle);
            }
            Err(e) => tracing::warn!(error = %e, "server preview unusable, keeping current"),
        }
    }

    pub fn reset(&mut self) {
        self.file = None;
        self.release_preview();
    }

    fn release_preview(&mut self) {
        // take してから drop するので、古いハンドルは必ずここで解放される
        drop(self.preview.take());
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn local_path(slot: &UploadSlot) -> PathBuf {
        slot.preview()
            .and_then(PreviewHandle::local_path)
            .expect("ローカルプレビューがない")
            .to_path_buf()
    }

    #[test]
    fn test_select_allocates_preview() {
        let mut slot = UploadSlot::new();
        assert!(slot.preview().is_none());

        slot.select(Some(SelectedFile::new("a.jpg", b"a".to_vec())));
        assert_eq!(slot.file().map(SelectedFile::name), Some("a.jpg"));
        assert!(local_path(&slot).exists());
    }

    #[test]
    fn test_reselect_releases_previous_preview() {
        let mut slot = UploadSlot::new();
        slot.select(Some(SelectedFile::new("a.jpg", b"a".to_vec())));
        let first = local_path(&slot);

        slot.select(Some(SelectedFile::new("b.png", b"b".to_vec())));
        let second = local_path(&slot);

        assert!(!first.exists());
        assert!(second.exists());
        assert_ne!(first, second);
    }

    #[test]
    fn test_repeated_selection_keeps_one_live_preview() {
        let mut slot = UploadSlot::new();
        let mut seen = Vec::new();
        for i in 0..10 {
            slot.select(Some(SelectedFile::new(format!("{}.jpg", i), vec![i as u8])));
            seen.push(local_path(&slot));
        }

        let live = seen.iter().filter(|p| p.exists()).count();
        assert_eq!(live, 1);
        assert!(seen.last().unwrap().exists());
    }

    #[test]
    fn test_select_none_clears_slot() {
        let mut slot = UploadSlot::new();
        slot.select(Some(SelectedFile::new("a.jpg", b"a".to_vec())));
        let path = local_path(&slot);

        slot.select(None);
        assert!(slot.file().is_none());
        assert!(slot.preview().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_reset_and_drop_release_preview() {
        let mut slot = UploadSlot::new();
        slot.select(Some(SelectedFile::new("a.jpg", b"a".to_vec())));
        let path = local_path(&slot);
        slot.reset();
        assert!(!path.exists());
        assert!(slot.file().is_none());

        let mut slot = UploadSlot::new();
        slot.select(Some(SelectedFile::new("b.jpg", b"b".to_vec())));
        let path = local_path(&slot);
        drop(slot);
        assert!(!path.exists());
    }

    #[test]
    fn test_server_preview_replaces_local() {
        let mut slot = UploadSlot::new();
        slot.select(Some(SelectedFile::new("a.jpg", b"a".to_vec())));
        let path = local_path(&slot);

        slot.adopt_server_preview("http://127.0.0.1:8000/preview/a.jpg");
        assert!(!path.exists());
        assert_eq!(slot.preview_url(), Some("http://127.0.0.1:8000/preview/a.jpg"));
        // ファイルの選択は残る
        assert!(slot.file().is_some());
    }

    #[test]
    fn test_bad_server_preview_keeps_local() {
        let mut slot = UploadSlot::new();
        slot.select(Some(SelectedFile::new("qr.png", b"qr".to_vec())));
        let path = local_path(&slot);

        slot.adopt_server_preview("data:image/png;base64,@@@");
        assert_eq!(local_path(&slot), path);
        assert!(path.exists());
        assert!(slot.file().is_some());
    }
}
