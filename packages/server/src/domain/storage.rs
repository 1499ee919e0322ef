//! FileStorage trait 定義
//!
//! オブジェクトストレージ（本番では S3）への狭いインターフェース。
//! コアはアップロード済みファイルの URL を受け取るだけで、バケット
//! 管理や削除には関知しません。

use async_trait::async_trait;
use thiserror::Error;

/// オブジェクトストレージのエラー
#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),
}

/// FileStorage trait
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// ファイルを保存し、参照用の URL を返す
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, FileStorageError>;
}
