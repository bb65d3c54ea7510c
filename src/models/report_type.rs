use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 报表类型枚举
///
/// 名称与 LMS 讲师面板中的报表一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// 学员资料导出
    #[serde(rename = "get_students_profile")]
    StudentsProfile,
    /// 待注册学员导出
    #[serde(rename = "get_students_who_may_enroll")]
    StudentsWhoMayEnroll,
    /// 匿名 ID 导出
    #[serde(rename = "get_student_anonymized_ids")]
    StudentAnonymizedIds,
    /// 成绩计算
    CalculateGrades,
    /// 题目成绩报表
    ProblemGradeReport,
    /// ORA 原始数据
    OraDataReport,
    /// ORA 汇总
    OraSummaryReport,
    /// 题目作答报表（需要 block id）
    #[serde(rename = "get_problem_responses")]
    ProblemResponses,
    /// 证书导出 (CSV)
    ExportCourseCertificates,
    /// 证书导出 (PDF)
    ExportCourseCertificatesPdfs,
}

impl ReportType {
    pub const ALL: [ReportType; 10] = [
        ReportType::StudentsProfile,
        ReportType::StudentsWhoMayEnroll,
        ReportType::StudentAnonymizedIds,
        ReportType::CalculateGrades,
        ReportType::ProblemGradeReport,
        ReportType::OraDataReport,
        ReportType::OraSummaryReport,
        ReportType::ProblemResponses,
        ReportType::ExportCourseCertificates,
        ReportType::ExportCourseCertificatesPdfs,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            ReportType::StudentsProfile => "get_students_profile",
            ReportType::StudentsWhoMayEnroll => "get_students_who_may_enroll",
            ReportType::StudentAnonymizedIds => "get_student_anonymized_ids",
            ReportType::CalculateGrades => "calculate_grades",
            ReportType::ProblemGradeReport => "problem_grade_report",
            ReportType::OraDataReport => "ora_data_report",
            ReportType::OraSummaryReport => "ora_summary_report",
            ReportType::ProblemResponses => "get_problem_responses",
            ReportType::ExportCourseCertificates => "export_course_certificates",
            ReportType::ExportCourseCertificatesPdfs => "export_course_certificates_pdfs",
        }
    }

    /// 是否接受 block id
    pub fn accepts_block_id(self) -> bool {
        matches!(self, ReportType::ProblemResponses)
    }

    /// 构建该报表在指定课程下的触发地址
    ///
    /// # 参数
    /// - `base_url`: 已去除末尾斜杠的 LMS 地址
    /// - `course_id`: 课程 ID（原样拼接，不做编码）
    pub fn endpoint(self, base_url: &str, course_id: &str) -> String {
        let instructor_api = |sub_path: &str| {
            format!("{}/courses/{}/instructor/api/{}", base_url, course_id, sub_path)
        };
        let certificate_export = |format: &str| {
            format!(
                "{}/nau-openedx-extensions/certificate-export/courses/{}/{}",
                base_url, course_id, format
            )
        };

        match self {
            ReportType::StudentsProfile => instructor_api("get_students_features/csv"),
            ReportType::StudentsWhoMayEnroll => instructor_api("get_students_who_may_enroll"),
            ReportType::StudentAnonymizedIds => instructor_api("get_anon_ids"),
            ReportType::CalculateGrades => instructor_api("calculate_grades_csv"),
            ReportType::ProblemGradeReport => instructor_api("problem_grade_report"),
            ReportType::OraDataReport => instructor_api("export_ora2_data"),
            ReportType::OraSummaryReport => instructor_api("export_ora2_summary"),
            ReportType::ProblemResponses => instructor_api("get_problem_responses"),
            ReportType::ExportCourseCertificates => certificate_export("csv"),
            ReportType::ExportCourseCertificatesPdfs => certificate_export("pdf"),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ReportType::ALL
            .into_iter()
            .find(|report| report.name() == wanted)
            .ok_or_else(|| ConfigError::UnsupportedReport {
                name: wanted.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for report in ReportType::ALL {
            assert_eq!(report.name().parse::<ReportType>().unwrap(), report);
        }
        assert!("get_everything".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for report in ReportType::ALL {
            let json = serde_json::to_string(&report).unwrap();
            assert_eq!(json, format!("\"{}\"", report.name()));
        }
    }

    #[test]
    fn test_endpoints() {
        let base = "https://lms.example.com";
        let course = "course-v1:FCT+TPag+2024_T3";

        assert_eq!(
            ReportType::StudentsProfile.endpoint(base, course),
            "https://lms.example.com/courses/course-v1:FCT+TPag+2024_T3/instructor/api/get_students_features/csv"
        );
        assert_eq!(
            ReportType::StudentAnonymizedIds.endpoint(base, course),
            "https://lms.example.com/courses/course-v1:FCT+TPag+2024_T3/instructor/api/get_anon_ids"
        );
        assert_eq!(
            ReportType::ExportCourseCertificatesPdfs.endpoint(base, course),
            "https://lms.example.com/nau-openedx-extensions/certificate-export/courses/course-v1:FCT+TPag+2024_T3/pdf"
        );
    }

    #[test]
    fn test_only_problem_responses_accepts_block() {
        let accepting: Vec<_> = ReportType::ALL
            .into_iter()
            .filter(|r| r.accepts_block_id())
            .collect();
        assert_eq!(accepting, vec![ReportType::ProblemResponses]);
    }
}
