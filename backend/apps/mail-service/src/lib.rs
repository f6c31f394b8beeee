//! # Mail Service ライブラリ
//!
//! 店舗承認メールの生成・送信を担うトランザクションメールサービス。
//! ルーター構築を公開し、結合テストから HTTP レベルで呼び出せるようにする。
//!
//! ```text
//! POST /api/send-approval
//!   → handler::approval  (入力検証・ダッシュボード URL 導出)
//!   → usecase::notification (テンプレートレンダリング・送信)
//!   → NotificationSender (SMTP / Noop)
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
