//! # Mail Service サーバー
//!
//! 店舗の審査が通ったときにオーナーへ承認メールを送る内部サービス。
//!
//! ## 環境変数
//!
//! 設定項目の一覧は [`easybizness_mail_service::config`] を参照。
//! ログ出力は `RUST_LOG` と `LOG_FORMAT`（`json` / `pretty`）で制御する。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（メールを送信しない）
//! NOTIFICATION_BACKEND=noop cargo run -p easybizness-mail-service
//!
//! # Mailtrap 経由で送信
//! MAILTRAP_USER=... MAILTRAP_PASS=... cargo run -p easybizness-mail-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use easybizness_domain::clock::SystemClock;
use easybizness_mail_service::{
   app_builder::{build_app, build_sender, build_state},
   config::MailServiceConfig,
};
use easybizness_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal};

/// Mail Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("mail-service");
   init_tracing(&tracing_config);
   let _tracing_guard = tracing::info_span!("app", service = "mail-service").entered();

   // 設定読み込み
   let config = MailServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Mail Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // 依存コンポーネントを初期化
   let sender =
      build_sender(&config.notification).context("送信アダプタの初期化に失敗しました")?;
   let state = build_state(&config.notification, sender, Arc::new(SystemClock))
      .context("通知サービスの初期化に失敗しました")?;
   let app = build_app(state);

   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!("Mail Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("Mail Service サーバーを停止しました");

   Ok(())
}

/// Ctrl-C または SIGTERM を待つ
///
/// シグナルハンドラの登録に失敗した場合、そのシグナルでは停止しない。
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗");
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match signal::unix::signal(signal::unix::SignalKind::terminate()) {
         Ok(mut sigterm) => {
            sigterm.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => tracing::info!("Ctrl-C を受信しました。シャットダウンします"),
      () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
   }
}
