use crate::domain::model::{
    BookmarkList, BookmarkedPost, PersistedProfile, ProfileUpdate, ServiceErrorBody,
};
use crate::domain::ports::{ConfigProvider, ProfileService};
use crate::utils::error::{ApplicantError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const PROFILE_PATH: &str = "/api/applicant/me";
pub const BOOKMARKS_PATH: &str = "/api/post/bookmarks";

/// 透過 HTTP 存取個人檔案／收藏服務
pub struct HttpProfileService {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    client: Client,
}

impl HttpProfileService {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: config.token().map(str::to_string),
            timeout: Duration::from_secs(config.timeout_seconds()),
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("📡 {} {}", method, url);

        let mut request = self.client.request(method, url).timeout(self.timeout);

        // 有設定 token 時加上授權標頭
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        request
    }

    /// 非 2xx 回應轉成 `ServiceError`，保留服務端的錯誤代碼
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ServiceErrorBody = serde_json::from_str(&text).unwrap_or_default();

        Err(ApplicantError::ServiceError {
            status: status.as_u16(),
            code: body.code,
            message: body.message.unwrap_or_else(|| {
                if text.is_empty() {
                    status.to_string()
                } else {
                    text
                }
            }),
        })
    }

    /// 2xx 回應的內容不符預期格式時回報 `SerializationError`
    async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("⚠️ Unexpected response body: {}", e);
            ApplicantError::SerializationError(e)
        })
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn fetch_profile(&self) -> Result<PersistedProfile> {
        let response = self.request(Method::GET, PROFILE_PATH).send().await?;
        let response = Self::check(response).await?;
        Self::parse_body(response).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        let response = self
            .request(Method::PUT, PROFILE_PATH)
            .json(update)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_bookmarks(&self) -> Result<Vec<BookmarkedPost>> {
        let response = self.request(Method::GET, BOOKMARKS_PATH).send().await?;
        let response = Self::check(response).await?;
        let list: BookmarkList = Self::parse_body(response).await?;
        Ok(list.posts)
    }
}
