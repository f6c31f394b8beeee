//! # ユースケース層
//!
//! Mail Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: 送信アダプタと時刻を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod notification;

pub use notification::{NotificationService, RenderedEmail, TemplateRenderer};
