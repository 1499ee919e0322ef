//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::StoreError;

/// スレッド参加のエラー
#[derive(Debug, Error, PartialEq)]
pub enum JoinThreadError {
    /// threadId が欠落しているか不正（エラー ACK で返す）
    #[error("Thread ID is required")]
    MissingThreadId,
}

/// メッセージ送信のエラー
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// 永続化が行を返さなかった（配信は行われない）
    #[error("Failed to send message")]
    NotRecorded,
    /// 耐久ストアの失敗
    #[error(transparent)]
    Store(#[from] StoreError),
}
