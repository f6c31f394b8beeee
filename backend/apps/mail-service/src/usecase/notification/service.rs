//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → ログ記録を統合するサービス。
//!
//! ## 設計方針
//!
//! - **失敗を呼び出し元に返す**: 送信結果は HTTP レスポンスに反映するため、
//!   レンダリング・送信の失敗は `NotificationError` として返す
//! - **再送しない**: 1 回の呼び出しで送信は 1 回だけ試みる
//! - **依存性注入**: `NotificationSender` と `Clock` は trait で抽象化

use std::sync::Arc;

use easybizness_domain::{
    clock::Clock,
    notification::{EmailAddress, EmailMessage, NotificationError, ShopApprovalNotification},
};
use easybizness_infra::notification::NotificationSender;
use easybizness_shared::{event_log::event, log_business_event};

use super::TemplateRenderer;

/// 通知サービス
///
/// 店舗承認メールの生成から送信までを担う。
pub struct NotificationService {
    sender:            Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    clock:             Arc<dyn Clock>,
    from:              EmailAddress,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        clock: Arc<dyn Clock>,
        from: EmailAddress,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            clock,
            from,
        }
    }

    /// 店舗承認メールを送信する
    ///
    /// 承認日時は注入された `Clock` から取得する。
    pub async fn send_shop_approval(
        &self,
        notification: &ShopApprovalNotification,
        dashboard_url: &str,
    ) -> Result<(), NotificationError> {
        let rendered = self.template_renderer.render_shop_approved(
            notification,
            dashboard_url,
            self.clock.now(),
        )?;

        let email = EmailMessage {
            from:      self.from.clone(),
            to:        vec![notification.recipient()],
            subject:   rendered.subject,
            html_body: rendered.html_body,
            text_body: rendered.text_body,
        };

        match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::SHOP,
                    event.entity_id = notification.shop_name(),
                    event.result = event::result::SUCCESS,
                    notification.recipient = %email.recipient_list(),
                    "店舗承認メール送信成功"
                );
                Ok(())
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::SHOP,
                    event.entity_id = notification.shop_name(),
                    event.result = event::result::FAILURE,
                    notification.recipient = %email.recipient_list(),
                    error = %e,
                    "店舗承認メール送信失敗"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use easybizness_domain::clock::FixedClock;
    use easybizness_infra::mock::MockNotificationSender;
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_service(sender: MockNotificationSender) -> NotificationService {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap());
        NotificationService::new(
            Arc::new(sender),
            TemplateRenderer::new().unwrap(),
            Arc::new(clock),
            EmailAddress::new("no-reply@example.com", Some("EasyBizness".to_string())),
        )
    }

    fn make_notification(to_name: Option<&str>) -> ShopApprovalNotification {
        ShopApprovalNotification::new("a@b.com", to_name.map(str::to_string), "Acme").unwrap()
    }

    #[tokio::test]
    async fn 送信元と宛先を付けて1通送信する() {
        let sender = MockNotificationSender::new();
        let service = make_service(sender.clone());

        service
            .send_shop_approval(
                &make_notification(Some("  Jane  ")),
                "http://shop.example.com/dashboard",
            )
            .await
            .unwrap();

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].from,
            EmailAddress::new("no-reply@example.com", Some("EasyBizness".to_string()))
        );
        assert_eq!(
            sent[0].to,
            vec![EmailAddress::new("a@b.com", Some("Jane".to_string()))]
        );
        assert_eq!(sent[0].subject, "Your business \"Acme\" has been approved");
        assert!(sent[0].text_body.contains("October 19, 2026 at 09:30 UTC"));
    }

    #[tokio::test]
    async fn 表示名がなければ宛先に表示名を付けない() {
        let sender = MockNotificationSender::new();
        let service = make_service(sender.clone());

        service
            .send_shop_approval(&make_notification(None), "http://localhost/dashboard")
            .await
            .unwrap();

        assert_eq!(
            sender.sent_emails()[0].to,
            vec![EmailAddress::new("a@b.com", None)]
        );
    }

    #[tokio::test]
    async fn 送信失敗はそのままエラーとして返し再送しない() {
        let sender = MockNotificationSender::failing("connection refused");
        let service = make_service(sender.clone());

        let result = service
            .send_shop_approval(&make_notification(None), "http://localhost/dashboard")
            .await;

        assert!(matches!(
            result,
            Err(NotificationError::Delivery(detail)) if detail == "connection refused"
        ));
        assert_eq!(sender.attempts(), 1);
        assert!(sender.sent_emails().is_empty());
    }
}
