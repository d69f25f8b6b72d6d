use std::collections::HashSet;

pub const MAX_DEPARTMENTS: usize = 7;
pub const MIN_DEPARTMENTS: usize = 1;

/// 學系輸入欄位清單，長度固定在 1..=7
///
/// 每個編輯操作都回傳新的清單，不修改原本的值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentList {
    entries: Vec<String>,
}

impl Default for DepartmentList {
    fn default() -> Self {
        Self {
            entries: vec![String::new()],
        }
    }
}

impl DepartmentList {
    /// 以逗號串接的字串裡超出上限的項目數
    pub fn overflow_of(joined: &str) -> usize {
        joined.split(',').count().saturating_sub(MAX_DEPARTMENTS)
    }

    /// 從服務端以逗號串接的字串還原
    pub fn from_joined(joined: &str) -> Self {
        let mut entries: Vec<String> = joined.split(',').map(str::to_string).collect();
        if entries.len() > MAX_DEPARTMENTS {
            tracing::warn!(
                "Stored profile has {} departments, keeping the first {}",
                entries.len(),
                MAX_DEPARTMENTS
            );
            entries.truncate(MAX_DEPARTMENTS);
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.entries.len() < MAX_DEPARTMENTS
    }

    pub fn can_remove(&self) -> bool {
        self.entries.len() > MIN_DEPARTMENTS
    }

    /// 原樣寫入（不 trim），保留輸入中的內容
    pub fn set_at(&self, index: usize, text: impl Into<String>) -> Self {
        let mut entries = self.entries.clone();
        match entries.get_mut(index) {
            Some(slot) => *slot = text.into(),
            None => tracing::debug!("Ignoring department edit at out-of-range index {}", index),
        }
        Self { entries }
    }

    pub fn add(&self) -> Self {
        let mut entries = self.entries.clone();
        if self.can_add() {
            entries.push(String::new());
        }
        Self { entries }
    }

    /// 任何有效索引（包含 0）都可以刪除，只要刪除後至少還有一欄
    pub fn remove_at(&self, index: usize) -> Self {
        let mut entries = self.entries.clone();
        if self.can_remove() && index < entries.len() {
            entries.remove(index);
        }
        Self { entries }
    }

    pub fn has_blank(&self) -> bool {
        self.entries.iter().any(|d| d.trim().is_empty())
    }

    /// 以原始字串比較（區分大小寫、不 trim）
    pub fn has_duplicates(&self) -> bool {
        let distinct: HashSet<&str> = self.entries.iter().map(String::as_str).collect();
        distinct.len() != self.entries.len()
    }

    pub fn joined(&self) -> String {
        self.entries.join(",")
    }
}

impl From<Vec<String>> for DepartmentList {
    fn from(entries: Vec<String>) -> Self {
        if entries.is_empty() {
            return Self::default();
        }
        let mut entries = entries;
        entries.truncate(MAX_DEPARTMENTS);
        Self { entries }
    }
}
