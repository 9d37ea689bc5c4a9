//! 対話モード
//!
//! 3つのパネルを持つ画面を端末のメニューで再現する。
//! どの経路で終了してもプレビューを解放する。

use crate::api::VerificationApi;
use crate::error::Result;
use crate::render::{render_analyze, render_history, render_lookup, render_qr, with_spinner};
use crate::workflow::{SelectedFile, VerificationSession};
use dialoguer::{Input, Select};
use std::path::Path;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    SelectImage,
    Analyze,
    SelectQrImage,
    VerifyQr,
    EnterAadhaar,
    Lookup,
    ResetAll,
    ShowAll,
    History,
    Quit,
}

impl ConsoleAction {
    pub const ALL: [ConsoleAction; 10] = [
        ConsoleAction::SelectImage,
        ConsoleAction::Analyze,
        ConsoleAction::SelectQrImage,
        ConsoleAction::VerifyQr,
        ConsoleAction::EnterAadhaar,
        ConsoleAction::Lookup,
        ConsoleAction::ResetAll,
        ConsoleAction::ShowAll,
        ConsoleAction::History,
        ConsoleAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConsoleAction::SelectImage => "Select image to analyze",
            ConsoleAction::Analyze => "Analyze",
            ConsoleAction::SelectQrImage => "Select QR image",
            ConsoleAction::VerifyQr => "Verify QR",
            ConsoleAction::EnterAadhaar => "Enter 12-digit Aadhaar",
            ConsoleAction::Lookup => "Lookup",
            ConsoleAction::ResetAll => "Reset all panels",
            ConsoleAction::ShowAll => "Show all panels",
            ConsoleAction::History => "Recent actions",
            ConsoleAction::Quit => "Quit",
        }
    }
}

pub async fn run_console<A: VerificationApi>(session: &VerificationSession<A>) -> Result<()> {
    println!("🪪 aadhaar-verify - console\n");
    let result = console_loop(session).await;
    session.teardown().await;
    result
}

async fn console_loop<A: VerificationApi>(session: &VerificationSession<A>) -> Result<()> {
    let labels: Vec<&str> = ConsoleAction::ALL.iter().map(ConsoleAction::label).collect();

    loop {
        let index = Select::new()
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        match ConsoleAction::ALL[index] {
            ConsoleAction::SelectImage => {
                if let Some(file) = prompt_file("Image path (empty to clear)")? {
                    session.select_analyze_file(file).await;
                    println!("{}", render_analyze(&session.analyze_view().await));
                }
            }
            ConsoleAction::Analyze => {
                with_spinner("Analyzing…", session.submit_analyze()).await;
                println!("{}", render_analyze(&session.analyze_view().await));
            }
            ConsoleAction::SelectQrImage => {
                if let Some(file) = prompt_file("QR image path (empty to clear)")? {
                    session.select_qr_file(file).await;
                    println!("{}", render_qr(&session.qr_view().await));
                }
            }
            ConsoleAction::VerifyQr => {
                with_spinner("Decoding…", session.submit_qr()).await;
                println!("{}", render_qr(&session.qr_view().await));
            }
            ConsoleAction::EnterAadhaar => {
                let raw: String = Input::new()
                    .with_prompt("Enter 12-digit Aadhaar")
                    .allow_empty(true)
                    .interact_text()?;
                session.select_identifier(&raw).await;
                println!("  → {}\n", session.lookup_view().await.input);
            }
            ConsoleAction::Lookup => {
                with_spinner("Looking…", session.submit_lookup()).await;
                println!("{}", render_lookup(&session.lookup_view().await));
            }
            ConsoleAction::ResetAll => {
                session.reset_analyze().await;
                session.reset_qr().await;
                session.reset_lookup().await;
                println!("  ✔ cleared\n");
            }
            ConsoleAction::ShowAll => {
                println!("{}", render_analyze(&session.analyze_view().await));
                println!("{}", render_qr(&session.qr_view().await));
                println!("{}", render_lookup(&session.lookup_view().await));
            }
            ConsoleAction::History => {
                println!("{}", render_history(&session.history().await));
            }
            ConsoleAction::Quit => return Ok(()),
        }
    }
}

/// パスを入力させて読み込む
///
/// - 空入力: Some(None)（欄をクリア）
/// - 読み込み失敗: メッセージを出して None（状態は変えない）
fn prompt_file(prompt: &str) -> Result<Option<Option<SelectedFile>>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Some(None));
    }

    match SelectedFile::open(Path::new(trimmed)) {
        Ok(file) => Ok(Some(Some(file))),
        Err(e) => {
            println!("  ✗ {}\n", e);
            Ok(None)
        }
    }
}
