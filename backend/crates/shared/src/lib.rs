//! # EasyBizness 共有ユーティリティ
//!
//! メールサービスと将来のサービス群で共通に使うユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, apps）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - tracing / tower 系の依存は `observability` feature の内側に閉じ込める

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod event_log;
pub mod health;
pub mod observability;

pub use health::HealthResponse;
