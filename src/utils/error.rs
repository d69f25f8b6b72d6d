use thiserror::Error;

/// 服務端回報「尚未建立個人檔案」時使用的錯誤代碼
pub const PROFILE_NOT_FOUND_CODE: &str = "APPLICANT_002";

#[derive(Error, Debug)]
pub enum ApplicantError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Service responded with status {status}: {message}")]
    ServiceError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    FormError(#[from] FormError),
}

/// 表單上顯示給使用者的訊息，每次驗證只保留一則
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Student ID must be a two-digit number.")]
    InvalidEnrollYear,

    #[error("All department fields must be filled.")]
    EmptyDepartment,

    #[error("Duplicate departments are not allowed.")]
    DuplicateDepartment,

    #[error("CV is required.")]
    MissingCv,

    #[error("Only PDF files are allowed for CV.")]
    CvNotPdf,

    #[error("CV file size cannot exceed 5MB.")]
    CvTooLarge,

    #[error("Failed to load profile data.")]
    LoadFailed,

    /// 載入的檔案超過 7 個學系時只保留前 7 個
    #[error("Only the first 7 departments could be loaded. Saving will drop the rest.")]
    DepartmentsTruncated,

    #[error("Failed to save profile. Please try again.")]
    SaveFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ApplicantError {
    /// 是否為「尚未建立個人檔案」這種預期中的缺席
    pub fn is_profile_not_found(&self) -> bool {
        matches!(
            self,
            ApplicantError::ServiceError { code: Some(code), .. } if code == PROFILE_NOT_FOUND_CODE
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApplicantError::ApiError(_) => ErrorCategory::Network,
            ApplicantError::ServiceError { .. } => ErrorCategory::Service,
            ApplicantError::ConfigValidationError { .. }
            | ApplicantError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ApplicantError::FormError(_) => ErrorCategory::Input,
            ApplicantError::IoError(_) | ApplicantError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApplicantError::FormError(_) => ErrorSeverity::Low,
            ApplicantError::ApiError(_) | ApplicantError::ServiceError { .. } => {
                ErrorSeverity::Medium
            }
            ApplicantError::ConfigValidationError { .. }
            | ApplicantError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ApplicantError::IoError(_) | ApplicantError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ApplicantError::ApiError(_) => {
                "Check your network connection and the service base URL".to_string()
            }
            ApplicantError::ServiceError { status: 401, .. }
            | ApplicantError::ServiceError { status: 403, .. } => {
                "Log in again and pass a fresh token with --token or SNUINTERN_TOKEN".to_string()
            }
            ApplicantError::ServiceError { .. } => {
                "Try again later; the service rejected the request".to_string()
            }
            ApplicantError::ConfigValidationError { .. }
            | ApplicantError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments".to_string()
            }
            ApplicantError::FormError(_) => "Correct the highlighted field and submit again".to_string(),
            ApplicantError::IoError(_) => "Check that the file exists and is readable".to_string(),
            ApplicantError::SerializationError(_) => {
                "The service returned an unexpected payload".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ApplicantError::FormError(e) => e.to_string(),
            ApplicantError::ApiError(_) => "Could not reach the internship service.".to_string(),
            ApplicantError::ServiceError { message, .. } => {
                format!("The internship service returned an error: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApplicantError>;
