use crate::utils::error::{FormError, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const MAX_CV_BYTES: u64 = 5 * 1024 * 1024;

/// 內容偵測所需讀取的檔頭長度
const SNIFF_LEN: usize = 8192;

/// 使用者剛選擇、尚未上傳的 CV 檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    /// 原始檔案位置，上傳時再由外部讀取
    pub source: PathBuf,
}

impl PendingFile {
    pub fn new(
        name: impl Into<String>,
        byte_size: u64,
        mime_type: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            byte_size,
            mime_type: mime_type.into(),
            source: source.into(),
        }
    }

    /// 從磁碟讀取檔名、大小，並以檔頭偵測 MIME 類型
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;

        let mut file = tokio::fs::File::open(path).await?;
        let mut head = Vec::with_capacity(SNIFF_LEN);
        (&mut file).take(SNIFF_LEN as u64).read_to_end(&mut head).await?;

        let mime_type = infer::get(&head)
            .map(|t| t.mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(
            "Read CV candidate '{}' ({} bytes, {})",
            name,
            metadata.len(),
            mime_type
        );

        Ok(Self::new(name, metadata.len(), mime_type, path))
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
    }
}

/// CV 欄位的三種互斥狀態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CvAttachment {
    #[default]
    None,
    PendingFile(PendingFile),
    /// 已儲存在服務端的 key，原樣保留以便重送
    ExistingKey(String),
}

impl CvAttachment {
    /// 由服務端的 key 還原；空字串視為沒有附件
    pub fn from_stored_key(cv_key: &str) -> Self {
        if stored_file_name(cv_key).is_empty() {
            CvAttachment::None
        } else {
            CvAttachment::ExistingKey(cv_key.to_string())
        }
    }

    /// 檢查類型與大小後接受檔案。
    ///
    /// 被拒絕時會清掉待上傳的檔案，但保留既有的 key。
    pub fn select_file(&mut self, file: PendingFile) -> std::result::Result<(), FormError> {
        let rejection = if !file.is_pdf() {
            Some(FormError::CvNotPdf)
        } else if file.byte_size > MAX_CV_BYTES {
            Some(FormError::CvTooLarge)
        } else {
            None
        };

        if let Some(error) = rejection {
            tracing::debug!("Rejected CV '{}': {}", file.name, error);
            if matches!(self, CvAttachment::PendingFile(_)) {
                *self = CvAttachment::None;
            }
            return Err(error);
        }

        *self = CvAttachment::PendingFile(file);
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = CvAttachment::None;
    }

    pub fn is_none(&self) -> bool {
        matches!(self, CvAttachment::None)
    }

    /// 畫面上顯示的檔名
    pub fn display_name(&self) -> Option<&str> {
        match self {
            CvAttachment::None => None,
            CvAttachment::PendingFile(file) => Some(file.name.as_str()),
            CvAttachment::ExistingKey(key) => Some(stored_file_name(key)),
        }
    }
}

/// key 的最後一個路徑片段
pub fn stored_file_name(cv_key: &str) -> &str {
    cv_key.rsplit('/').next().unwrap_or_default()
}
