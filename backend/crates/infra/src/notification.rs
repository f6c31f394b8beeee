//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（Mailtrap / 任意の SMTP リレー）、Noop（ローカル開発用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **リトライしない**: 失敗はそのまま呼び出し元に返す

mod noop;
mod smtp;

use async_trait::async_trait;
use easybizness_domain::notification::{EmailMessage, NotificationError};
pub use noop::NoopNotificationSender;
pub use smtp::{SmtpNotificationSender, SmtpSettings};

/// メール送信トレイト
///
/// 送信 1 回につき外部への配送を 1 回試みる。失敗時は
/// [`NotificationError::Delivery`] に下層のエラー内容を載せて返す。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
