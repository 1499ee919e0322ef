//! InMemory FileStorage 実装
//!
//! アップロードされたファイルをプロセス内の HashMap に保持し、
//! `memory://` スキームの参照 URL を返します。外部オブジェクト
//! ストレージと同じく「アップロード済みファイルは URL で参照する」
//! 契約だけを再現します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{FileStorage, FileStorageError};

struct StoredFile {
    #[allow(dead_code)]
    content_type: String,
    data: Vec<u8>,
}

/// インメモリ FileStorage 実装
pub struct InMemoryFileStorage {
    files: Mutex<HashMap<String, StoredFile>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    /// URL のファイルが保存済みかどうか（テスト用の観測点）
    pub async fn contains(&self, url: &str) -> bool {
        let files = self.files.lock().await;
        files.contains_key(url)
    }

    /// 保存済みファイルのサイズを取得する（テスト用の観測点）
    pub async fn size_of(&self, url: &str) -> Option<usize> {
        let files = self.files.lock().await;
        files.get(url).map(|f| f.data.len())
    }
}

impl Default for InMemoryFileStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, FileStorageError> {
        let url = format!("memory://chat-files/{}/{}", Uuid::new_v4(), file_name);
        let mut files = self.files.lock().await;
        files.insert(
            url.clone(),
            StoredFile {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(url)
    }
}
