//! 操作履歴
//!
//! 完了した操作を新しい順に最大 HISTORY_LIMIT 件まで保持する。重複除去はしない。

use crate::types::WorkflowKind;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 保持する件数
pub const HISTORY_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: WorkflowKind,
    pub label: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    /// 先頭が最新
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在時刻で記録
    pub fn record(&mut self, kind: WorkflowKind, label: impl Into<String>) {
        self.record_at(kind, label, Local::now());
    }

    pub fn record_at(&mut self, kind: WorkflowKind, label: impl Into<String>, timestamp: DateTime<Local>) {
        self.entries.insert(
            0,
            HistoryEntry {
                kind,
                label: label.into(),
                timestamp,
            },
        );
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// 新しい順
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
