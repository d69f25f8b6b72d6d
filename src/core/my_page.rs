use crate::core::draft::year_suffix;
use crate::core::form::LoadState;
use crate::domain::model::BookmarkedPost;
use crate::domain::ports::ProfileService;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::fmt;

/// 服務端用來表示「常時招募」的值
pub const ALWAYS_OPEN_MARKER: &str = "상시";

/// 收藏公告的截止顯示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    AlwaysOpen,
    Closed,
    Today,
    DaysLeft(i64),
}

impl Deadline {
    pub fn is_closed(&self) -> bool {
        matches!(self, Deadline::Closed)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::AlwaysOpen => write!(f, "{}", ALWAYS_OPEN_MARKER),
            Deadline::Closed => write!(f, "마감"),
            Deadline::Today => write!(f, "D-day"),
            Deadline::DaysLeft(days) => write!(f, "D-{}", days),
        }
    }
}

/// 以日曆日計算與 `today` 的差距
pub fn deadline(end_date: Option<&str>, today: NaiveDate) -> Deadline {
    let raw = match end_date.map(str::trim) {
        None | Some("") | Some(ALWAYS_OPEN_MARKER) => return Deadline::AlwaysOpen,
        Some(raw) => raw,
    };

    let Some(end) = parse_end_date(raw) else {
        tracing::debug!("Unparseable employment end date '{}', treating as always open", raw);
        return Deadline::AlwaysOpen;
    };

    match (end - today).num_days() {
        d if d < 0 => Deadline::Closed,
        0 => Deadline::Today,
        d => Deadline::DaysLeft(d),
    }
}

fn parse_end_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkCard {
    pub company_name: String,
    pub position_title: String,
    pub deadline: Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MyPageTab {
    #[default]
    Bookmarks,
    Info,
}

/// 「我的頁面」：收藏公告與個人資訊兩個分頁
#[derive(Debug, Default)]
pub struct MyPage {
    active_tab: MyPageTab,
    bookmarks: Vec<BookmarkedPost>,
    profile: LoadState,
}

impl MyPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> MyPageTab {
        self.active_tab
    }

    /// 切換分頁並抓取該分頁需要的資料
    pub async fn select_tab<S>(&mut self, tab: MyPageTab, service: &S)
    where
        S: ProfileService + ?Sized,
    {
        self.active_tab = tab;
        match tab {
            MyPageTab::Bookmarks => match service.fetch_bookmarks().await {
                Ok(posts) => {
                    tracing::debug!("Fetched {} bookmarked posts", posts.len());
                    self.bookmarks = posts;
                }
                Err(e) => tracing::warn!("Failed to fetch bookmarked posts: {}", e),
            },
            MyPageTab::Info => match service.fetch_profile().await {
                Ok(profile) => self.profile = LoadState::Found(profile),
                Err(e) if e.is_profile_not_found() => self.profile = LoadState::Absent,
                Err(e) => {
                    tracing::warn!("Failed to fetch profile: {}", e);
                    self.profile = LoadState::Failed;
                }
            },
        }
    }

    pub fn bookmark_cards(&self, today: NaiveDate) -> Vec<BookmarkCard> {
        self.bookmarks
            .iter()
            .map(|post| BookmarkCard {
                company_name: post.company_name.clone(),
                position_title: post.position_title.clone(),
                deadline: deadline(post.employment_end_date.as_deref(), today),
            })
            .collect()
    }

    pub fn profile_exists(&self) -> bool {
        self.profile.profile_exists()
    }

    /// 只有在個人資訊分頁且已有檔案時才提供編輯入口
    pub fn can_edit_profile(&self) -> bool {
        self.active_tab == MyPageTab::Info && self.profile_exists()
    }

    /// 例如 `Computer Science 23학번`
    pub fn summary_line(&self) -> Option<String> {
        match &self.profile {
            LoadState::Found(profile) => Some(format!(
                "{} {}학번",
                profile.department,
                year_suffix(profile.enroll_year)
            )),
            _ => None,
        }
    }

    pub fn profile_name(&self) -> Option<&str> {
        match &self.profile {
            LoadState::Found(profile) => profile.name.as_deref(),
            _ => None,
        }
    }

    pub fn profile_email(&self) -> Option<&str> {
        match &self.profile {
            LoadState::Found(profile) => profile.email.as_deref(),
            _ => None,
        }
    }
}
