//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 既定の接続先は Mailtrap のサンドボックス SMTP。

use async_trait::async_trait;
use easybizness_domain::notification::{EmailAddress, EmailMessage, NotificationError};
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};

use super::NotificationSender;

/// SMTP 接続設定
///
/// 起動時に一度だけ読み込み、以後は変更しない。
#[derive(Clone)]
pub struct SmtpSettings {
    pub host:     String,
    pub port:     u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 接続はメール送信のたびに張る（コネクションプールは使わない）。
pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// サーバーが STARTTLS を提示した場合のみ TLS に切り替える（opportunistic TLS）。
    /// 認証情報はユーザー名とパスワードが両方揃っている場合のみ使う。
    /// この時点ではまだ接続しない。
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotificationError> {
        let tls = TlsParameters::new(settings.host.clone())
            .map_err(|e| NotificationError::Delivery(format!("TLS 設定の構築失敗: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(Tls::Opportunistic(tls));

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Delivery(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}

/// `EmailMessage` から multipart/alternative（text + HTML）のメッセージを組み立てる
fn build_message(email: &EmailMessage) -> Result<Message, NotificationError> {
    let mut builder = Message::builder()
        .from(to_mailbox(&email.from)?)
        .subject(email.subject.clone());

    for recipient in &email.to {
        builder = builder.to(to_mailbox(recipient)?);
    }

    builder
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(email.text_body.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )
        .map_err(|e| NotificationError::Delivery(format!("メッセージ構築失敗: {e}")))
}

fn to_mailbox(address: &EmailAddress) -> Result<Mailbox, NotificationError> {
    let parsed: Address = address.address.parse().map_err(|e| {
        NotificationError::Delivery(format!("メールアドレス不正 ({}): {e}", address.address))
    })?;

    Ok(Mailbox::new(address.name.clone(), parsed))
}
