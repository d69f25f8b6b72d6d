use serde::{Deserialize, Serialize};

/// 服務端保存的申請者檔案 (`GET /api/applicant/me`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProfile {
    pub enroll_year: i32,
    /// 以逗號串接的學系清單
    pub department: String,
    pub cv_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `PUT /api/applicant/me` 的請求主體
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub enroll_year: i32,
    pub department: String,
    pub cv_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkedPost {
    pub id: String,
    pub company_name: String,
    pub position_title: String,
    /// ISO 日期、`"상시"`、null 或缺省
    #[serde(default)]
    pub employment_end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkList {
    #[serde(default)]
    pub posts: Vec<BookmarkedPost>,
}

/// 服務端錯誤回應，例如 `{"code": "APPLICANT_002", "message": "..."}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
