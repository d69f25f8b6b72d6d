use crate::core::attachment::CvAttachment;
use crate::core::departments::DepartmentList;
use crate::domain::model::PersistedProfile;
use crate::utils::error::FormError;

/// 表單開啟期間持有的可編輯資料
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    /// 使用者輸入的兩位數學號（入學年度後兩碼）
    pub enroll_year_digits: String,
    pub departments: DepartmentList,
    pub cv: CvAttachment,
    pub form_error: Option<FormError>,
}

impl ProfileDraft {
    /// 學系數超過上限時，表單上會顯示被截斷的提示
    pub fn from_persisted(profile: &PersistedProfile) -> Self {
        let form_error = (DepartmentList::overflow_of(&profile.department) > 0)
            .then_some(FormError::DepartmentsTruncated);

        Self {
            enroll_year_digits: year_suffix(profile.enroll_year),
            departments: DepartmentList::from_joined(&profile.department),
            cv: CvAttachment::from_stored_key(&profile.cv_key),
            form_error,
        }
    }
}

/// 年度字串的最後兩個字元，例如 2024 -> "24"
pub fn year_suffix(year: i32) -> String {
    let text = year.to_string();
    let start = text.len().saturating_sub(2);
    text[start..].to_string()
}
