//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! SMTP 認証情報を持たないローカル開発で使用する。

use async_trait::async_trait;
use easybizness_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = %email.recipient_list(),
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
