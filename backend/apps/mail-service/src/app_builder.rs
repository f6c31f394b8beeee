//! # Mail Service アプリケーション構築
//!
//! DI（送信アダプタ・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use easybizness_domain::{clock::Clock, notification::NotificationError};
use easybizness_infra::notification::{
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
};
use easybizness_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{NotificationBackend, NotificationConfig},
    handler::{ApprovalState, health_check, send_approval},
    usecase::{NotificationService, TemplateRenderer},
};

/// 設定に応じた送信アダプタを生成する
pub fn build_sender(
    config: &NotificationConfig,
) -> Result<Arc<dyn NotificationSender>, NotificationError> {
    let sender: Arc<dyn NotificationSender> = match config.backend {
        NotificationBackend::Smtp => {
            tracing::info!(
                smtp.host = %config.smtp.host,
                smtp.port = config.smtp.port,
                "SMTP 送信アダプタを使用します"
            );
            Arc::new(SmtpNotificationSender::new(&config.smtp)?)
        }
        NotificationBackend::Noop => {
            tracing::warn!("Noop 送信アダプタを使用します（メールは送信されません）");
            Arc::new(NoopNotificationSender)
        }
    };

    Ok(sender)
}

/// ハンドラーの State を組み立てる
pub fn build_state(
    config: &NotificationConfig,
    sender: Arc<dyn NotificationSender>,
    clock: Arc<dyn Clock>,
) -> Result<Arc<ApprovalState>, NotificationError> {
    let notification_service =
        NotificationService::new(sender, TemplateRenderer::new()?, clock, config.from.clone());

    Ok(Arc::new(ApprovalState {
        notification_service,
        dashboard_base_url: config.dashboard_base_url.clone(),
    }))
}

/// ルーターを構築する
///
/// すべてのオリジン・メソッド・ヘッダからのクロスオリジン呼び出しを許可する。
pub fn build_app(state: Arc<ApprovalState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/send-approval", post(send_approval))
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
