//! # 店舗承認通知 API ハンドラ
//!
//! 店舗オーナーに承認完了メールを送るエンドポイントを実装する。
//!
//! ## エンドポイント
//!
//! ```text
//! POST /api/send-approval
//! ```
//!
//! ## リクエスト例
//!
//! ```json
//! { "toEmail": "owner@example.com", "toName": "Jane", "shopName": "Acme" }
//! ```
//!
//! JSON として解釈できないボディは必須項目の欠落と同じ 400 で応答する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use easybizness_domain::notification::ShopApprovalNotification;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{error::MailServiceError, usecase::NotificationService};

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const DASHBOARD_PATH: &str = "/dashboard";

/// 店舗承認通知ハンドラーの State
pub struct ApprovalState {
    pub notification_service: NotificationService,
    /// 設定されていればリクエストから導出せずにこのベース URL を使う
    pub dashboard_base_url:   Option<String>,
}

/// 店舗承認通知リクエスト
///
/// 必須項目の検証はドメインモデルの生成時に行うため、ここではすべて任意で受ける。
/// `toName` は検証対象外なので、文字列以外の値は未指定として扱う。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendApprovalRequest {
    pub to_email:  Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub to_name:   Option<String>,
    pub shop_name: Option<String>,
}

/// 店舗承認通知レスポンス
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendApprovalResponse {
    pub ok: bool,
}

/// 店舗承認メールを送信する
///
/// ## エンドポイント
/// POST /api/send-approval
#[tracing::instrument(skip_all)]
pub async fn send_approval(
    State(state): State<Arc<ApprovalState>>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<SendApprovalRequest>, JsonRejection>,
) -> Result<Response, MailServiceError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "リクエストボディを解釈できないため空として扱う");
            SendApprovalRequest::default()
        }
    };

    let notification = ShopApprovalNotification::new(
        request.to_email.unwrap_or_default(),
        request.to_name,
        request.shop_name.unwrap_or_default(),
    )?;

    let url = dashboard_url(&headers, &uri, state.dashboard_base_url.as_deref());

    state
        .notification_service
        .send_shop_approval(&notification, &url)
        .await?;

    Ok((StatusCode::OK, Json(SendApprovalResponse { ok: true })).into_response())
}

/// メール内リンクに使うダッシュボード URL を組み立てる
///
/// `base_override` があればそれを優先する。なければリクエストから
/// `{scheme}://{host}/dashboard` を導出する。
///
/// - scheme: `X-Forwarded-Proto` の先頭の値 → URI のスキーム → `http`
/// - host: `Host` ヘッダ → URI のオーソリティ → `localhost`
pub fn dashboard_url(headers: &HeaderMap, uri: &Uri, base_override: Option<&str>) -> String {
    if let Some(base) = base_override {
        return format!("{}{DASHBOARD_PATH}", base.trim_end_matches('/'));
    }

    let scheme = header_value(headers, FORWARDED_PROTO)
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");

    let host = header_value(headers, header::HOST.as_str())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}{DASHBOARD_PATH}")
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(*value));
        }
        headers
    }

    #[rstest]
    #[case::hostヘッダからhttpで組み立てる(
        &[("host", "shop.example.com")],
        "/api/send-approval",
        "http://shop.example.com/dashboard"
    )]
    #[case::forwarded_protoを優先する(
        &[("host", "shop.example.com"), ("x-forwarded-proto", "https")],
        "/api/send-approval",
        "https://shop.example.com/dashboard"
    )]
    #[case::forwarded_protoが複数なら先頭を使う(
        &[("host", "shop.example.com"), ("x-forwarded-proto", "https, http")],
        "/api/send-approval",
        "https://shop.example.com/dashboard"
    )]
    #[case::ポート付きのhostをそのまま使う(
        &[("host", "localhost:5174")],
        "/api/send-approval",
        "http://localhost:5174/dashboard"
    )]
    #[case::絶対形式のuriからスキームとホストを使う(
        &[],
        "https://api.example.com/api/send-approval",
        "https://api.example.com/dashboard"
    )]
    #[case::何もなければlocalhost(&[], "/api/send-approval", "http://localhost/dashboard")]
    fn test_リクエストからダッシュボードurlを導出する(
        #[case] pairs: &[(&'static str, &'static str)],
        #[case] uri: &str,
        #[case] expected: &str,
    ) {
        let uri: Uri = uri.parse().unwrap();

        assert_eq!(dashboard_url(&headers(pairs), &uri, None), expected);
    }

    #[test]
    fn 固定のベースurlがあればリクエストより優先する() {
        let uri: Uri = "/api/send-approval".parse().unwrap();

        let url = dashboard_url(
            &headers(&[("host", "shop.example.com")]),
            &uri,
            Some("https://app.example.com/"),
        );

        assert_eq!(url, "https://app.example.com/dashboard");
    }

    #[test]
    fn リクエストのキーはキャメルケースで受け取る() {
        let request: SendApprovalRequest = serde_json::from_str(
            r#"{"toEmail":"a@b.com","toName":null,"shopName":"Acme"}"#,
        )
        .unwrap();

        assert_eq!(request.to_email.as_deref(), Some("a@b.com"));
        assert_eq!(request.to_name, None);
        assert_eq!(request.shop_name.as_deref(), Some("Acme"));
    }

    #[rstest]
    #[case::数値(r#"{"toEmail":"a@b.com","toName":5,"shopName":"Acme"}"#)]
    #[case::真偽値(r#"{"toEmail":"a@b.com","toName":true,"shopName":"Acme"}"#)]
    #[case::オブジェクト(r#"{"toEmail":"a@b.com","toName":{"first":"Jane"},"shopName":"Acme"}"#)]
    fn test_文字列でない表示名は未指定として受け取る(#[case] body: &str) {
        let request: SendApprovalRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.to_email.as_deref(), Some("a@b.com"));
        assert_eq!(request.to_name, None);
        assert_eq!(request.shop_name.as_deref(), Some("Acme"));
    }
}
