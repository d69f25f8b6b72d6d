pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::HttpProfileService;
pub use crate::config::ClientConfig;
pub use crate::core::attachment::{CvAttachment, PendingFile};
pub use crate::core::departments::DepartmentList;
pub use crate::core::draft::ProfileDraft;
pub use crate::core::form::{FormMode, LoadState, ProfileForm};
pub use crate::core::my_page::{Deadline, MyPage, MyPageTab};
pub use crate::utils::error::{ApplicantError, FormError, Result};
