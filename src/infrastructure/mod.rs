pub mod lms_session;

pub use lms_session::{normalize_base_url, LmsSession};
