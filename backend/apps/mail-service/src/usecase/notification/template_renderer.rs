//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで店舗承認メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `Your business "{shop_name}" has been approved`
//! - **HTML のみエスケープ**: `.html` テンプレートは tera の autoescape が効く。
//!   plaintext 本文と件名はそのまま埋め込む
//! - **承認日時**: `October 19, 2026 at 09:30 UTC` 形式の英語表記

use chrono::{DateTime, Utc};
use easybizness_domain::notification::{NotificationError, ShopApprovalNotification};
use tera::{Context, Tera};

const SHOP_APPROVED_HTML: &str = "shop_approved.html";
const SHOP_APPROVED_TXT: &str = "shop_approved.txt";

/// 承認日時の表示形式
const APPROVED_AT_FORMAT: &str = "%B %-d, %Y at %H:%M UTC";

/// レンダリング結果
///
/// 送信元・宛先はまだ付いていない。`NotificationService` が
/// `EmailMessage` に組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject:   String,
    pub html_body: String,
    pub text_body: String,
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`ShopApprovalNotification` から
/// メールの件名と本文を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    SHOP_APPROVED_HTML,
                    include_str!("../../../templates/notifications/shop_approved.html"),
                ),
                (
                    SHOP_APPROVED_TXT,
                    include_str!("../../../templates/notifications/shop_approved.txt"),
                ),
            ])
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        engine.set_escape_fn(escape_html);

        Ok(Self { engine })
    }

    /// 店舗承認メールを生成する
    ///
    /// # 引数
    ///
    /// - `notification`: 店舗承認通知
    /// - `dashboard_url`: メール内リンクの URL（例: `http://shop.example.com/dashboard`）
    /// - `approved_at`: 承認日時
    pub fn render_shop_approved(
        &self,
        notification: &ShopApprovalNotification,
        dashboard_url: &str,
        approved_at: DateTime<Utc>,
    ) -> Result<RenderedEmail, NotificationError> {
        let subject = format!(
            "Your business \"{}\" has been approved",
            notification.shop_name()
        );

        let mut context = Context::new();
        context.insert("subject", &subject);
        context.insert("greeting_name", notification.greeting_name());
        context.insert("shop_name", notification.shop_name());
        context.insert("dashboard_url", dashboard_url);
        context.insert(
            "approved_at",
            &approved_at.format(APPROVED_AT_FORMAT).to_string(),
        );

        let html_body = self
            .engine
            .render(SHOP_APPROVED_HTML, &context)
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        let text_body = self
            .engine
            .render(SHOP_APPROVED_TXT, &context)
            .map_err(|e| NotificationError::Template(e.to_string()))?;

        Ok(RenderedEmail {
            subject,
            html_body,
            text_body,
        })
    }
}

/// HTML の特殊文字をエスケープする
///
/// tera 標準の `escape_html` は `/` も `&#x2F;` に置き換えるため、
/// 本文中に表示するダッシュボード URL が読めなくなる。
/// ここでは `/` を除いた `& < > " '` だけを置き換える。
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn approved_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn render(to_name: Option<&str>, shop_name: &str) -> RenderedEmail {
        let renderer = TemplateRenderer::new().unwrap();
        let notification = ShopApprovalNotification::new(
            "owner@example.com",
            to_name.map(str::to_string),
            shop_name,
        )
        .unwrap();

        renderer
            .render_shop_approved(
                &notification,
                "http://shop.example.com/dashboard",
                approved_at(),
            )
            .unwrap()
    }

    #[test]
    fn newが正常に初期化される() {
        let renderer = TemplateRenderer::new();
        assert!(renderer.is_ok());
    }

    #[test]
    fn 件名に店舗名が含まれる() {
        let email = render(Some("Jane"), "Acme");

        assert_eq!(email.subject, "Your business \"Acme\" has been approved");
    }

    #[test]
    fn 両方の本文に店舗名とダッシュボードurlが含まれる() {
        let email = render(Some("Jane"), "Acme");

        for body in [&email.html_body, &email.text_body] {
            assert!(body.contains("Acme"));
            assert!(body.contains("http://shop.example.com/dashboard"));
            assert!(body.contains("Hi Jane,"));
        }
    }

    #[test]
    fn 表示名がなければthereで呼びかける() {
        let email = render(None, "Acme");

        assert!(email.html_body.contains("Hi there,"));
        assert!(email.text_body.contains("Hi there,"));
    }

    #[test]
    fn 承認日時が英語表記で含まれる() {
        let email = render(None, "Acme");

        assert!(email.html_body.contains("October 19, 2026 at 09:30 UTC"));
        assert!(email.text_body.contains("October 19, 2026 at 09:30 UTC"));
    }

    #[test]
    fn htmlでは特殊文字がエスケープされplaintextではそのまま残る() {
        let email = render(Some("<b>Jane</b>"), "Tom & Jerry's");

        assert!(email.html_body.contains("Tom &amp; Jerry&#x27;s"));
        assert!(email.html_body.contains("Hi &lt;b&gt;Jane&lt;/b&gt;,"));
        assert!(email.text_body.contains("Hi <b>Jane</b>,"));
        assert!(email.text_body.contains("Tom & Jerry's"));
        assert_eq!(
            email.subject,
            "Your business \"Tom & Jerry's\" has been approved"
        );
    }

    #[test]
    fn escape_htmlはスラッシュをエスケープしない() {
        assert_eq!(
            escape_html("https://a.example.com/x?y=1&z=\"2\""),
            "https://a.example.com/x?y=1&amp;z=&quot;2&quot;"
        );
    }
}
