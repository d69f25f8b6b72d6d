use crate::domain::model::{BookmarkedPost, PersistedProfile, ProfileUpdate};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端個人檔案／收藏服務
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// 尚未建立檔案時回傳 `ServiceError`，其 code 為 `APPLICANT_002`
    async fn fetch_profile(&self) -> Result<PersistedProfile>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()>;
    async fn fetch_bookmarks(&self) -> Result<Vec<BookmarkedPost>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn token(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
}
