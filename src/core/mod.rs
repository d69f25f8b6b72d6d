pub mod attachment;
pub mod departments;
pub mod draft;
pub mod form;
pub mod my_page;
pub mod submission;
pub mod validator;

pub use crate::domain::model::{BookmarkedPost, PersistedProfile, ProfileUpdate};
pub use crate::domain::ports::{ConfigProvider, ProfileService};
pub use crate::utils::error::Result;
