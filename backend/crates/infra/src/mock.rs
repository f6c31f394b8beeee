//! # テスト用モック送信アダプタ
//!
//! 送信したメールをメモリに記録する `NotificationSender` 実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! easybizness-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use easybizness_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信内容を記録するモック
///
/// クローンは記録領域を共有するため、テスト側でクローンを保持しておけば
/// サービスに渡した後でも送信内容を検証できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent:     Arc<Mutex<Vec<EmailMessage>>>,
    attempts: Arc<Mutex<usize>>,
    failure:  Option<String>,
}

impl MockNotificationSender {
    /// 常に送信成功するモック
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に `NotificationError::Delivery(detail)` を返すモック
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            failure: Some(detail.into()),
            ..Self::default()
        }
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 成功・失敗を問わず `send_email` が呼ばれた回数
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        *self.attempts.lock().unwrap() += 1;

        if let Some(detail) = &self.failure {
            return Err(NotificationError::Delivery(detail.clone()));
        }

        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
