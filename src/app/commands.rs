use crate::core::attachment::PendingFile;
use crate::core::departments::MAX_DEPARTMENTS;
use crate::core::form::{FormMode, LoadState, ProfileForm};
use crate::core::my_page::{BookmarkCard, MyPage, MyPageTab};
use crate::domain::model::ProfileUpdate;
use crate::domain::ports::ProfileService;
use crate::utils::error::{FormError, Result};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::PathBuf;

/// 命令列要套用到表單上的修改
#[derive(Debug, Clone, Default)]
pub struct ProfileEdits {
    pub enroll_year: Option<String>,
    /// 非空時取代整份學系清單
    pub departments: Vec<String>,
    pub cv: Option<PathBuf>,
    pub clear_cv: bool,
}

/// 以表單操作逐一套用修改，行為與手動編輯相同
pub async fn apply_edits(form: &mut ProfileForm, edits: &ProfileEdits) -> Result<()> {
    if let Some(year) = &edits.enroll_year {
        form.set_enroll_year(year.clone());
    }

    if !edits.departments.is_empty() {
        if edits.departments.len() > MAX_DEPARTMENTS {
            tracing::warn!(
                "Only the first {} of {} departments will be kept",
                MAX_DEPARTMENTS,
                edits.departments.len()
            );
        }
        while form.draft().departments.len() < edits.departments.len()
            && form.draft().departments.can_add()
        {
            form.add_department();
        }
        while form.draft().departments.len() > edits.departments.len() {
            let last = form.draft().departments.len() - 1;
            form.remove_department(last);
        }
        for (index, department) in edits.departments.iter().take(MAX_DEPARTMENTS).enumerate() {
            form.set_department(index, department.clone());
        }
    }

    if edits.clear_cv {
        form.clear_cv();
    }

    if let Some(path) = &edits.cv {
        let file = PendingFile::from_path(path).await?;
        form.select_cv(file)?;
    }

    Ok(())
}

/// 載入 → 編輯 → 送出
pub async fn save_profile<S>(
    service: &S,
    edits: &ProfileEdits,
    today: NaiveDate,
) -> Result<ProfileUpdate>
where
    S: ProfileService + ?Sized,
{
    let mut form = ProfileForm::new();
    form.load(service).await;
    if *form.load_state() == LoadState::Failed {
        return Err(FormError::LoadFailed.into());
    }
    tracing::info!("Editing profile in {:?} mode", form.mode());

    apply_edits(&mut form, edits).await?;
    Ok(form.submit_on(service, today).await?)
}

pub fn render_form(form: &ProfileForm) -> String {
    let draft = form.draft();
    let mut out = String::new();

    let title = match form.mode() {
        FormMode::Create => "프로필 생성",
        FormMode::Edit => "프로필 수정",
    };
    let _ = writeln!(out, "{}", title);
    if let Some(error) = form.error() {
        let _ = writeln!(out, "! {}", error);
    }
    let _ = writeln!(out, "학번 *    {}", draft.enroll_year_digits);
    for (index, department) in draft.departments.entries().iter().enumerate() {
        let label = if index == 0 { "학과 *" } else { "" };
        let _ = writeln!(out, "{:<9} {}", label, department);
    }
    let _ = writeln!(
        out,
        "이력서 *  {}",
        draft.cv.display_name().unwrap_or("(none)")
    );
    out
}

pub fn render_bookmarks(cards: &[BookmarkCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let marker = if card.deadline.is_closed() { "!" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<8} {} | {}",
            marker, card.deadline, card.company_name, card.position_title
        );
    }
    out
}

pub async fn show_bookmarks<S>(service: &S, today: NaiveDate) -> String
where
    S: ProfileService + ?Sized,
{
    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Bookmarks, service).await;
    render_bookmarks(&page.bookmark_cards(today))
}

pub async fn show_me<S>(service: &S) -> String
where
    S: ProfileService + ?Sized,
{
    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Info, service).await;

    if !page.profile_exists() {
        return "아직 프로필이 등록되지 않았어요!\n기업에 소개할 나의 정보를 작성해서 나를 소개해보세요.\n"
            .to_string();
    }

    let mut out = String::new();
    if let Some(name) = page.profile_name() {
        let _ = writeln!(out, "{}", name);
    }
    if let Some(email) = page.profile_email() {
        let _ = writeln!(out, "{}", email);
    }
    if let Some(summary) = page.summary_line() {
        let _ = writeln!(out, "{}", summary);
    }
    if page.can_edit_profile() {
        let _ = writeln!(out, "(edit with `snuintern profile save`)");
    }
    out
}
