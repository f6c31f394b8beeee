//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`ShopApprovalNotification`] | 店舗承認通知 | 審査を通過した店舗オーナーへの通知依頼 |
//! | [`EmailAddress`] | メールボックス | アドレスと任意の表示名の組 |
//! | [`EmailMessage`] | メールメッセージ | 送信アダプタに渡す完成済みメール |
//!
//! ## 設計方針
//!
//! - **生成時バリデーション**: 必須項目が欠けた通知は作成できない
//! - **永続化しない**: 1 リクエストの間だけ存在する値オブジェクト
//! - **テンプレート分離**: 通知とメール本文の生成は分離（TemplateRenderer は mail-service）

use thiserror::Error;

use crate::DomainError;

/// 宛先の表示名がない場合の挨拶の呼びかけ
pub const GREETING_FALLBACK: &str = "there";

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗（接続・認証・宛先不正など送信経路の失敗すべて）
    #[error("メール送信に失敗: {0}")]
    Delivery(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    Template(String),
}

/// メールアドレスと表示名の組
///
/// アドレスの書式は検証しない。不正なアドレスは送信時に
/// [`NotificationError::Delivery`] として表面化する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub address: String,
    pub name:    Option<String>,
}

impl EmailAddress {
    pub fn new(address: impl Into<String>, name: Option<String>) -> Self {
        Self {
            address: address.into(),
            name,
        }
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力に送信元・宛先を付けたもの。
/// `NotificationSender` に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信元
    pub from:      EmailAddress,
    /// 宛先（1 件以上）
    pub to:        Vec<EmailAddress>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

impl EmailMessage {
    /// ログ出力用に宛先アドレスをカンマ区切りで返す
    pub fn recipient_list(&self) -> String {
        self.to
            .iter()
            .map(|recipient| recipient.address.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 店舗承認通知
///
/// 店舗が承認されたことをオーナーに知らせるメールの入力。
///
/// # 不変条件
///
/// - `to_email` と `shop_name` は空文字列ではない
/// - `to_name` は前後の空白を除去済みで、空なら `None`
///
/// 空白のみの `to_email` / `shop_name` は空扱いにしない（空文字列のみ拒否する）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopApprovalNotification {
    to_email:  String,
    to_name:   Option<String>,
    shop_name: String,
}

impl ShopApprovalNotification {
    /// 店舗承認通知を作成する
    ///
    /// # エラー
    ///
    /// `to_email` または `shop_name` が空の場合は `DomainError::Validation` を返す。
    pub fn new(
        to_email: impl Into<String>,
        to_name: Option<String>,
        shop_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let to_email = to_email.into();
        let shop_name = shop_name.into();

        if to_email.is_empty() || shop_name.is_empty() {
            return Err(DomainError::Validation(
                "送信先メールアドレスと店舗名は必須です".to_string(),
            ));
        }

        let to_name = to_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(Self {
            to_email,
            to_name,
            shop_name,
        })
    }

    pub fn to_name(&self) -> Option<&str> {
        self.to_name.as_deref()
    }

    pub fn shop_name(&self) -> &str {
        &self.shop_name
    }

    /// 挨拶に使う呼びかけ名
    ///
    /// 表示名があればそれを、なければ [`GREETING_FALLBACK`] を返す。
    pub fn greeting_name(&self) -> &str {
        self.to_name().unwrap_or(GREETING_FALLBACK)
    }

    /// 宛先メールボックス（表示名付き）
    pub fn recipient(&self) -> EmailAddress {
        EmailAddress::new(self.to_email.clone(), self.to_name.clone())
    }
}
