use crate::models::credentials::Credentials;
use crate::models::report_type::ReportType;
use serde::Deserialize;

/// 外部请求层传入的批量请求
#[derive(Clone, Deserialize)]
pub struct BatchRequest {
    pub email: String,
    pub password: String,
    pub lms_url: String,
    pub report_type: ReportType,
    #[serde(default)]
    pub pasted_course_text: String,
    #[serde(default)]
    pub uploaded_file_bytes: Option<Vec<u8>>,
}

impl BatchRequest {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.email, &self.password, &self.lms_url)
    }
}
