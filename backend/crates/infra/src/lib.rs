//! # EasyBizness インフラ層
//!
//! 外部システム（SMTP リレー）との通信を担当するインフラストラクチャ層。
//!
//! ## 依存関係
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信アダプタ（SMTP / Noop）
//! - `mock` - テスト用の記録型送信アダプタ（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
