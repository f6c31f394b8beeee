//! # Mail Service 設定
//!
//! 環境変数からメールサービスの設定を読み込む。
//! 起動時に一度だけ読み込み、以後は不変のオブジェクトとして各コンポーネントに渡す。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `HOST` | `0.0.0.0` | バインドアドレス |
//! | `PORT` | `5174` | ポート番号 |
//! | `NOTIFICATION_BACKEND` | `smtp` | `smtp` または `noop` |
//! | `MAILTRAP_HOST` | `sandbox.smtp.mailtrap.io` | SMTP ホスト |
//! | `MAILTRAP_PORT` | `2525` | SMTP ポート |
//! | `MAILTRAP_USER` | なし | SMTP 認証ユーザー名 |
//! | `MAILTRAP_PASS` | なし | SMTP 認証パスワード |
//! | `MAILTRAP_FROM_EMAIL` | `no-reply@example.com` | 送信元アドレス |
//! | `MAILTRAP_FROM_NAME` | `EasyBizness` | 送信元表示名 |
//! | `DASHBOARD_BASE_URL` | なし | メール内リンクのベース URL（未設定ならリクエストから導出） |
//!
//! 空文字列が設定された変数は未設定として扱う。

use std::env;

use easybizness_domain::notification::EmailAddress;
use easybizness_infra::notification::SmtpSettings;
use strum::EnumString;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5174;
const DEFAULT_SMTP_HOST: &str = "sandbox.smtp.mailtrap.io";
const DEFAULT_SMTP_PORT: u16 = 2525;
const DEFAULT_FROM_EMAIL: &str = "no-reply@example.com";
const DEFAULT_FROM_NAME: &str = "EasyBizness";

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { key: &'static str, value: String },

    #[error("NOTIFICATION_BACKEND は smtp または noop である必要があります: {0:?}")]
    UnknownBackend(String),
}

/// メール送信バックエンド
///
/// - `smtp`: SMTP リレー（Mailtrap 等）経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationBackend {
    Smtp,
    Noop,
}

/// メールサービスの設定
#[derive(Debug, Clone)]
pub struct MailServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知機能の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:            NotificationBackend,
    /// SMTP 接続設定（backend=smtp の場合に使用）
    pub smtp:               SmtpSettings,
    /// 既定の送信元
    pub from:               EmailAddress,
    /// メール内リンクのベース URL の固定値
    pub dashboard_base_url: Option<String>,
}

impl MailServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    ///
    /// テストではプロセスの環境変数を汚さずに設定を組み立てるために使う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let backend = match get("NOTIFICATION_BACKEND") {
            Some(value) => value
                .parse::<NotificationBackend>()
                .map_err(|_| ConfigError::UnknownBackend(value))?,
            None => NotificationBackend::Smtp,
        };

        let smtp = SmtpSettings {
            host:     get("MAILTRAP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port:     parse_port("MAILTRAP_PORT", get("MAILTRAP_PORT"), DEFAULT_SMTP_PORT)?,
            username: get("MAILTRAP_USER"),
            password: get("MAILTRAP_PASS"),
        };

        let from = EmailAddress::new(
            get("MAILTRAP_FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            Some(get("MAILTRAP_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string())),
        );

        Ok(Self {
            host:         get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:         parse_port("PORT", get("PORT"), DEFAULT_PORT)?,
            notification: NotificationConfig {
                backend,
                smtp,
                from,
                dashboard_base_url: get("DASHBOARD_BASE_URL"),
            },
        })
    }
}

fn parse_port(key: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };

    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort { key, value })
}
