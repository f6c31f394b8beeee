//! # EasyBizness ドメイン層
//!
//! メール通知のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（SMTP、HTTP）に一切依存しない。
//! ユーザーや店舗そのものは外部サービスが所有し、ここではモデル化しない。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`notification`] - 店舗承認通知とメールメッセージ
//!
//! ## 使用例
//!
//! ```rust
//! use easybizness_domain::notification::ShopApprovalNotification;
//!
//! let notification =
//!     ShopApprovalNotification::new("owner@example.com", None, "Acme").unwrap();
//! assert_eq!(notification.greeting_name(), "there");
//! ```

pub mod clock;
pub mod error;
pub mod notification;

pub use error::DomainError;
