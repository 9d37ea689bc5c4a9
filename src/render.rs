//! 端末向けの表示
//!
//! presenter の派生値をテキストのパネルに整形する。

use crate::workflow::{LookupView, UploadView};
use aadhaar_verify_common::presenter::{
    analyze_badge, analyze_details, analyze_headline, lookup_badge, lookup_details,
    lookup_headline, qr_badge, qr_details, qr_headline, DetailRow,
};
use aadhaar_verify_common::{
    format_confidence, AnalyzeResponse, Badge, HistoryEntry, OperationResult, QrResponse, Tone,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;

/// 送信中はスピナーを出す
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    spinner.finish_and_clear();
    output
}

pub fn badge_text(badge: Badge) -> String {
    match badge.tone {
        Tone::Positive => format!("✅ {}", badge.label),
        Tone::Negative => format!("❌ {}", badge.label),
        Tone::Warning | Tone::Info => format!("[{}]", badge.label),
    }
}

fn push_details(out: &mut String, title: Option<&str>, rows: &[DetailRow]) {
    if let Some(title) = title {
        let _ = writeln!(out, "  {}", title);
    }
    for (label, value) in rows {
        let _ = writeln!(out, "    {:<12} {}", label, value);
    }
}

fn push_header(out: &mut String, title: &str, file: Option<&str>, preview: Option<&str>) {
    let _ = writeln!(out, "== {} ==", title);
    if let Some(file) = file {
        let _ = writeln!(out, "  File: {}", file);
    }
    if let Some(preview) = preview {
        let _ = writeln!(out, "  Preview: {}", preview);
    }
}

pub fn render_analyze(view: &UploadView<AnalyzeResponse>) -> String {
    let mut out = String::new();
    push_header(&mut out, "1) Analyze", view.file_name.as_deref(), view.preview_url.as_deref());

    if view.in_flight {
        let _ = writeln!(out, "  Analyzing…");
    }

    match &view.result {
        None => {
            let _ = writeln!(out, "  Results will show here after analysis.");
        }
        Some(OperationResult::Failure(message)) => {
            let _ = writeln!(out, "  Error: {}", message);
        }
        Some(OperationResult::Success(payload)) => {
            let badge = analyze_badge(view.result.as_ref()).map(badge_text).unwrap_or_default();
            let _ = writeln!(out, "  {}  {}", analyze_headline(payload), badge);
            let _ = writeln!(out, "  Confidence: {}", format_confidence(payload.confidence));
            if payload.ocr.ocr_error {
                let _ = writeln!(out, "  (OCR failed on the server)");
            }
            push_details(&mut out, Some("Extracted Details"), &analyze_details(payload));
        }
    }
    out
}

pub fn render_qr(view: &UploadView<QrResponse>) -> String {
    let mut out = String::new();
    push_header(&mut out, "2) Verify QR", view.file_name.as_deref(), view.preview_url.as_deref());

    if view.in_flight {
        let _ = writeln!(out, "  Decoding…");
    }

    match &view.result {
        None => {
            let _ = writeln!(out, "  Upload a QR image and press Verify to see decoded details.");
        }
        Some(OperationResult::Failure(message)) => {
            let _ = writeln!(out, "  Error: {}", message);
        }
        Some(OperationResult::Success(payload)) => {
            let badge = qr_badge(view.result.as_ref()).map(badge_text).unwrap_or_default();
            let _ = writeln!(out, "  {}  {}", qr_headline(payload), badge);
            // 信頼度はあるときだけ表示
            if payload.confidence.is_some() {
                let _ = writeln!(out, "  Confidence: {}", format_confidence(payload.confidence));
            }
            push_details(&mut out, Some("Extracted Details"), &qr_details(payload));
            for note in &payload.notes {
                let _ = writeln!(out, "  Note: {}", note);
            }
        }
    }
    out
}

pub fn render_lookup(view: &LookupView) -> String {
    let mut out = String::new();
    push_header(&mut out, "3) Lookup", None, view.preview_url());
    if !view.input.is_empty() {
        let _ = writeln!(out, "  Input: {}", view.input);
    }

    if view.in_flight {
        let _ = writeln!(out, "  Looking…");
    }

    match &view.result {
        None => {
            let _ = writeln!(out, "  Lookup a 12-digit Aadhaar to show the stored record.");
        }
        Some(OperationResult::Failure(message)) => {
            let _ = writeln!(out, "  Error: {}", message);
        }
        Some(OperationResult::Success(payload)) => {
            let badge = lookup_badge(view.result.as_ref()).map(badge_text).unwrap_or_default();
            let _ = writeln!(out, "  {}  {}", lookup_headline(payload), badge);
            if payload.is_not_found() {
                let _ = writeln!(out, "  No record in demo DB.");
            } else {
                push_details(&mut out, None, &lookup_details(payload));
            }
        }
    }
    out
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    let mut out = String::from("== Recent actions ==\n");
    if entries.is_empty() {
        out.push_str("  No recent actions\n");
        return out;
    }
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<8} {} • {}",
            entry.kind.to_string(),
            entry.label,
            entry.timestamp.format("%H:%M:%S")
        );
    }
    out
}
