use crate::core::draft::ProfileDraft;
use crate::utils::error::FormError;

/// 送出前的檢查，依固定順序，只回報第一個失敗的規則
pub fn validate(draft: &ProfileDraft) -> Result<(), FormError> {
    if !is_two_digits(&draft.enroll_year_digits) {
        return Err(FormError::InvalidEnrollYear);
    }
    if draft.departments.has_blank() {
        return Err(FormError::EmptyDepartment);
    }
    if draft.departments.has_duplicates() {
        return Err(FormError::DuplicateDepartment);
    }
    if draft.cv.is_none() {
        return Err(FormError::MissingCv);
    }
    Ok(())
}

fn is_two_digits(text: &str) -> bool {
    text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit())
}
