//! # Mail Service エラー定義
//!
//! Mail Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 送信経路の詳細（SMTP サーバーの応答など）はログにのみ出力し、
//! レスポンスには固定メッセージだけを返す。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use easybizness_domain::{DomainError, notification::NotificationError};
use easybizness_shared::event_log::error::{category, kind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 必須項目が欠けている場合のメッセージ
pub const VALIDATION_MESSAGE: &str = "toEmail and shopName are required";

/// 送信に失敗した場合のメッセージ
pub const DELIVERY_FAILURE_MESSAGE: &str = "Failed to send email";

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
   pub error: String,
}

/// Mail Service で発生するエラー
#[derive(Debug, Error)]
pub enum MailServiceError {
   /// 入力不備
   #[error(transparent)]
   Validation(#[from] DomainError),

   /// レンダリングまたは送信の失敗
   #[error(transparent)]
   Notification(#[from] NotificationError),
}

impl IntoResponse for MailServiceError {
   fn into_response(self) -> Response {
      let (status, message) = match &self {
         MailServiceError::Validation(e) => {
            tracing::debug!(error = %e, "リクエストの検証に失敗");
            (StatusCode::BAD_REQUEST, VALIDATION_MESSAGE)
         }
         MailServiceError::Notification(e @ NotificationError::Delivery(_)) => {
            tracing::error!(
               error.category = category::EXTERNAL_SERVICE,
               error.kind = kind::MAIL_DELIVERY,
               "メール送信エラー: {}",
               e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, DELIVERY_FAILURE_MESSAGE)
         }
         MailServiceError::Notification(e @ NotificationError::Template(_)) => {
            tracing::error!(
               error.category = category::INTERNAL,
               error.kind = kind::TEMPLATE,
               "メール生成エラー: {}",
               e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, DELIVERY_FAILURE_MESSAGE)
         }
      };

      (
         status,
         Json(ErrorBody {
            error: message.to_string(),
         }),
      )
         .into_response()
   }
}
