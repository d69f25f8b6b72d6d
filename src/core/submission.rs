use crate::core::attachment::CvAttachment;
use crate::core::draft::ProfileDraft;
use crate::core::validator::validate;
use crate::domain::model::ProfileUpdate;
use crate::utils::error::FormError;
use chrono::NaiveDate;
use rand::Rng;

/// 新上傳 CV 的存放前綴
pub const CV_KEY_PREFIX: &str = "static/private/CV";

/// 兩位數年度的分界：小於此值視為 20xx
pub const CENTURY_PIVOT: i32 = 50;

const TOKEN_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 16;

/// "23" -> 2023, "50" -> 1950
pub fn full_enroll_year(digits: &str) -> Result<i32, FormError> {
    let value: i32 = digits
        .parse()
        .map_err(|_| FormError::InvalidEnrollYear)?;
    if !(0..100).contains(&value) {
        return Err(FormError::InvalidEnrollYear);
    }
    Ok(if value < CENTURY_PIVOT {
        2000 + value
    } else {
        1900 + value
    })
}

pub fn random_token() -> String {
    let mut rng = rand::thread_rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// `static/private/CV/<token>_<YYYYMMDD>/<file_name>`
pub fn cv_storage_key(file_name: &str, date: NaiveDate, token: &str) -> String {
    format!(
        "{}/{}_{}/{}",
        CV_KEY_PREFIX,
        token,
        date.format("%Y%m%d"),
        file_name
    )
}

/// 驗證草稿並組出送往服務端的內容；`date` 用於新檔案的 key
pub fn build_update(draft: &ProfileDraft, date: NaiveDate) -> Result<ProfileUpdate, FormError> {
    validate(draft)?;

    let cv_key = match &draft.cv {
        CvAttachment::PendingFile(file) => cv_storage_key(&file.name, date, &random_token()),
        CvAttachment::ExistingKey(key) => key.clone(),
        CvAttachment::None => return Err(FormError::MissingCv),
    };

    Ok(ProfileUpdate {
        enroll_year: full_enroll_year(&draft.enroll_year_digits)?,
        department: draft.departments.joined(),
        cv_key,
    })
}
