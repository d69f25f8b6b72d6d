use crate::core::attachment::PendingFile;
use crate::core::draft::ProfileDraft;
use crate::core::submission::build_update;
use crate::core::validator;
use crate::domain::model::{PersistedProfile, ProfileUpdate};
use crate::domain::ports::ProfileService;
use crate::utils::error::{FormError, Result};
use chrono::{Local, NaiveDate};

/// 遠端個人檔案的載入結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotStarted,
    Loading,
    Found(PersistedProfile),
    /// 服務端回報尚未建立檔案
    Absent,
    Failed,
}

impl LoadState {
    pub fn profile_exists(&self) -> bool {
        matches!(self, LoadState::Found(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// `begin_load` 時的編輯世代；結果回來時若已過期就不覆寫草稿
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// 個人檔案編輯表單
#[derive(Debug, Default)]
pub struct ProfileForm {
    draft: ProfileDraft,
    load_state: LoadState,
    generation: u64,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&FormError> {
        self.draft.form_error.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn mode(&self) -> FormMode {
        if self.load_state.profile_exists() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_state = LoadState::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// 套用載入結果，回傳草稿是否被更新
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<PersistedProfile>) -> bool {
        let stale = ticket.generation != self.generation;

        match outcome {
            Ok(profile) => {
                let applied = if stale {
                    tracing::info!("Discarding loaded profile: the form was edited while loading");
                    false
                } else {
                    tracing::debug!("Seeding form from stored profile");
                    self.draft = ProfileDraft::from_persisted(&profile);
                    true
                };
                self.load_state = LoadState::Found(profile);
                applied
            }
            Err(e) if e.is_profile_not_found() => {
                tracing::info!("No profile stored yet, starting in create mode");
                self.load_state = LoadState::Absent;
                false
            }
            Err(e) => {
                tracing::warn!("Failed to fetch profile: {}", e);
                if !stale {
                    self.draft.form_error = Some(FormError::LoadFailed);
                }
                self.load_state = LoadState::Failed;
                false
            }
        }
    }

    pub async fn load<S>(&mut self, service: &S) -> bool
    where
        S: ProfileService + ?Sized,
    {
        let ticket = self.begin_load();
        let outcome = service.fetch_profile().await;
        self.finish_load(ticket, outcome)
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    pub fn set_enroll_year(&mut self, digits: impl Into<String>) {
        self.touch();
        self.draft.enroll_year_digits = digits.into();
    }

    pub fn set_department(&mut self, index: usize, text: impl Into<String>) {
        self.touch();
        self.draft.departments = self.draft.departments.set_at(index, text);
    }

    pub fn add_department(&mut self) {
        self.touch();
        self.draft.departments = self.draft.departments.add();
    }

    pub fn remove_department(&mut self, index: usize) {
        self.touch();
        self.draft.departments = self.draft.departments.remove_at(index);
    }

    /// 被拒絕時錯誤訊息會留在表單上
    pub fn select_cv(&mut self, file: PendingFile) -> std::result::Result<(), FormError> {
        self.touch();
        match self.draft.cv.select_file(file) {
            Ok(()) => {
                self.draft.form_error = None;
                Ok(())
            }
            Err(e) => {
                self.draft.form_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn clear_cv(&mut self) {
        self.touch();
        self.draft.cv.clear();
    }

    pub fn validate(&mut self) -> std::result::Result<(), FormError> {
        let result = validator::validate(&self.draft);
        self.draft.form_error = result.clone().err();
        result
    }

    pub async fn submit<S>(&mut self, service: &S) -> std::result::Result<ProfileUpdate, FormError>
    where
        S: ProfileService + ?Sized,
    {
        self.submit_on(service, Local::now().date_naive()).await
    }

    /// 送出表單；失敗時保留所有已輸入的內容
    pub async fn submit_on<S>(
        &mut self,
        service: &S,
        date: NaiveDate,
    ) -> std::result::Result<ProfileUpdate, FormError>
    where
        S: ProfileService + ?Sized,
    {
        let update = match build_update(&self.draft, date) {
            Ok(update) => update,
            Err(e) => {
                tracing::debug!("Profile form rejected: {}", e);
                self.draft.form_error = Some(e.clone());
                return Err(e);
            }
        };
        self.draft.form_error = None;

        tracing::debug!(
            "Submitting profile: enroll_year={}, departments={}, cv_key={}",
            update.enroll_year,
            update.department,
            update.cv_key
        );

        if let Err(e) = service.update_profile(&update).await {
            tracing::warn!("Failed to save profile: {}", e);
            self.draft.form_error = Some(FormError::SaveFailed);
            return Err(FormError::SaveFailed);
        }

        tracing::info!("Profile saved");
        let (name, email) = match &self.load_state {
            LoadState::Found(previous) => (previous.name.clone(), previous.email.clone()),
            _ => (None, None),
        };
        self.load_state = LoadState::Found(PersistedProfile {
            enroll_year: update.enroll_year,
            department: update.department.clone(),
            cv_key: update.cv_key.clone(),
            name,
            email,
        });
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attachment::{CvAttachment, PDF_MIME_TYPE};
    use crate::domain::model::BookmarkedPost;
    use crate::utils::error::{ApplicantError, PROFILE_NOT_FOUND_CODE};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockService {
        profile: Option<PersistedProfile>,
        fail_fetch_with: Option<u16>,
        fail_update: bool,
        updates: Mutex<Vec<ProfileUpdate>>,
    }

    #[async_trait]
    impl ProfileService for MockService {
        async fn fetch_profile(&self) -> Result<PersistedProfile> {
            if let Some(status) = self.fail_fetch_with {
                return Err(ApplicantError::ServiceError {
                    status,
                    code: None,
                    message: "server exploded".to_string(),
                });
            }
            self.profile.clone().ok_or_else(|| ApplicantError::ServiceError {
                status: 404,
                code: Some(PROFILE_NOT_FOUND_CODE.to_string()),
                message: "applicant not found".to_string(),
            })
        }

        async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
            if self.fail_update {
                return Err(ApplicantError::ServiceError {
                    status: 500,
                    code: None,
                    message: "write failed".to_string(),
                });
            }
            self.updates.lock().unwrap().push(update.clone());
            Ok(())
        }

        async fn fetch_bookmarks(&self) -> Result<Vec<BookmarkedPost>> {
            Ok(vec![])
        }
    }

    fn stored() -> PersistedProfile {
        PersistedProfile {
            enroll_year: 2022,
            department: "CS,Math".to_string(),
            cv_key: "static/private/CV/abc_20240101/cv.pdf".to_string(),
            name: Some("Lee".to_string()),
            email: None,
        }
    }

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn test_load_existing_profile_enters_edit_mode() {
        let service = MockService {
            profile: Some(stored()),
            ..Default::default()
        };
        let mut form = ProfileForm::new();
        assert!(form.load(&service).await);

        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.draft().enroll_year_digits, "22");
        assert_eq!(form.draft().departments.joined(), "CS,Math");
        assert_eq!(form.draft().cv.display_name(), Some("cv.pdf"));
        assert!(form.error().is_none());
    }

    #[tokio::test]
    async fn test_missing_profile_is_create_mode_without_error() {
        let service = MockService::default();
        let mut form = ProfileForm::new();
        assert!(!form.load(&service).await);

        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.load_state(), &LoadState::Absent);
        assert!(form.error().is_none());
        assert_eq!(form.draft(), &ProfileDraft::default());
    }

    #[tokio::test]
    async fn test_failed_load_sets_error_and_keeps_empty_draft() {
        let service = MockService {
            fail_fetch_with: Some(500),
            ..Default::default()
        };
        let mut form = ProfileForm::new();
        form.load(&service).await;

        assert_eq!(form.error(), Some(&FormError::LoadFailed));
        assert_eq!(form.draft().enroll_year_digits, "");
        assert_eq!(form.draft().departments.entries(), &[String::new()]);
        assert!(form.draft().cv.is_none());
        assert_eq!(form.mode(), FormMode::Create);
    }

    #[test]
    fn test_load_driven_outside_a_runtime() {
        let service = MockService {
            profile: Some(stored()),
            ..Default::default()
        };
        let mut form = ProfileForm::new();
        assert!(tokio_test::block_on(form.load(&service)));
        assert_eq!(form.draft().enroll_year_digits, "22");
    }

    #[test]
    fn test_stale_load_does_not_overwrite_edits() {
        let mut form = ProfileForm::new();
        let ticket = form.begin_load();
        form.set_enroll_year("19");

        assert!(!form.finish_load(ticket, Ok(stored())));
        assert_eq!(form.draft().enroll_year_digits, "19");
        assert!(form.load_state().profile_exists());
    }

    #[test]
    fn test_stale_failed_load_keeps_edits_without_message() {
        let mut form = ProfileForm::new();
        let ticket = form.begin_load();
        form.set_enroll_year("19");

        let outcome = Err(ApplicantError::ServiceError {
            status: 500,
            code: None,
            message: "server exploded".to_string(),
        });
        assert!(!form.finish_load(ticket, outcome));
        assert_eq!(form.draft().enroll_year_digits, "19");
        assert!(form.error().is_none());
        assert_eq!(form.load_state(), &LoadState::Failed);
    }

    #[test]
    fn test_stale_not_found_keeps_edits_and_create_mode() {
        let mut form = ProfileForm::new();
        let ticket = form.begin_load();
        form.set_enroll_year("19");
        form.set_department(0, "CS");

        let outcome = Err(ApplicantError::ServiceError {
            status: 404,
            code: Some(PROFILE_NOT_FOUND_CODE.to_string()),
            message: "applicant not found".to_string(),
        });
        assert!(!form.finish_load(ticket, outcome));
        assert_eq!(form.draft().enroll_year_digits, "19");
        assert_eq!(form.draft().departments.joined(), "CS");
        assert!(form.error().is_none());
        assert_eq!(form.load_state(), &LoadState::Absent);
        assert_eq!(form.mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn test_load_with_too_many_departments_shows_message() {
        let service = MockService {
            profile: Some(PersistedProfile {
                department: "A,B,C,D,E,F,G,H".to_string(),
                ..stored()
            }),
            ..Default::default()
        };
        let mut form = ProfileForm::new();
        assert!(form.load(&service).await);

        assert_eq!(form.draft().departments.len(), 7);
        assert_eq!(form.error(), Some(&FormError::DepartmentsTruncated));
        assert_eq!(form.mode(), FormMode::Edit);
    }

    #[tokio::test]
    async fn test_submit_with_existing_key() {
        let service = MockService {
            profile: Some(stored()),
            ..Default::default()
        };
        let mut form = ProfileForm::new();
        form.load(&service).await;
        form.add_department();
        form.set_department(2, "Physics");

        let update = form.submit_on(&service, may_first()).await.unwrap();
        assert_eq!(update.enroll_year, 2022);
        assert_eq!(update.department, "CS,Math,Physics");
        assert_eq!(update.cv_key, "static/private/CV/abc_20240101/cv.pdf");
        assert_eq!(service.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_validation_failure_skips_service() {
        let service = MockService::default();
        let mut form = ProfileForm::new();
        form.set_enroll_year("24");
        form.set_department(0, "CS");

        assert_eq!(
            form.submit_on(&service, may_first()).await,
            Err(FormError::MissingCv)
        );
        assert_eq!(form.error(), Some(&FormError::MissingCv));
        assert!(service.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_input() {
        let service = MockService {
            fail_update: true,
            ..Default::default()
        };
        let mut form = ProfileForm::new();
        form.set_enroll_year("24");
        form.set_department(0, "CS");
        form.select_cv(PendingFile::new("cv.pdf", 1000, PDF_MIME_TYPE, "/tmp/cv.pdf"))
            .unwrap();
        let before = form.draft().clone();

        assert_eq!(
            form.submit_on(&service, may_first()).await,
            Err(FormError::SaveFailed)
        );
        assert_eq!(form.error(), Some(&FormError::SaveFailed));
        assert_eq!(form.draft().departments, before.departments);
        assert_eq!(form.draft().cv, before.cv);
        assert_eq!(form.draft().enroll_year_digits, "24");
    }

    #[tokio::test]
    async fn test_successful_create_switches_to_edit_mode() {
        let service = MockService::default();
        let mut form = ProfileForm::new();
        form.load(&service).await;
        form.set_enroll_year("49");
        form.set_department(0, "CS");
        form.select_cv(PendingFile::new("resume.pdf", 10, PDF_MIME_TYPE, "/tmp/resume.pdf"))
            .unwrap();

        let update = form.submit_on(&service, may_first()).await.unwrap();
        assert_eq!(update.enroll_year, 2049);
        assert!(update.cv_key.ends_with("_20240501/resume.pdf"));
        assert_eq!(form.mode(), FormMode::Edit);
    }

    #[test]
    fn test_rejected_cv_sets_error_then_valid_cv_clears_it() {
        let mut form = ProfileForm::new();
        let png = PendingFile::new("me.png", 10, "image/png", "/tmp/me.png");
        assert_eq!(form.select_cv(png), Err(FormError::CvNotPdf));
        assert_eq!(form.error(), Some(&FormError::CvNotPdf));
        assert_eq!(form.draft().cv, CvAttachment::None);

        let pdf = PendingFile::new("cv.pdf", 10, PDF_MIME_TYPE, "/tmp/cv.pdf");
        assert!(form.select_cv(pdf).is_ok());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_validate_replaces_previous_message() {
        let mut form = ProfileForm::new();
        assert_eq!(form.validate(), Err(FormError::InvalidEnrollYear));
        form.set_enroll_year("23");
        assert_eq!(form.validate(), Err(FormError::EmptyDepartment));
        assert_eq!(form.error(), Some(&FormError::EmptyDepartment));
    }
}
