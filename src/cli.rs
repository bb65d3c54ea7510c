use crate::models::ReportType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "edx-report-submit")]
#[command(about = "Submit Open edX instructor report tasks for many courses at once")]
#[command(
    after_help = "Report types: get_students_profile, get_students_who_may_enroll, \
get_student_anonymized_ids, calculate_grades, problem_grade_report, ora_data_report, \
ora_summary_report, get_problem_responses, export_course_certificates, \
export_course_certificates_pdfs\n\nWarning: submitting too often may lock the LMS account for a while."
)]
pub struct Args {
    /// Course team email with data researcher permissions.
    #[arg(long, visible_alias = "user")]
    pub email: String,

    /// Course team password.
    #[arg(long, visible_alias = "pass", env = "LMS_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// LMS URL (e.g. https://lms.example.com).
    #[arg(long = "lms-url", visible_alias = "lms_url")]
    pub lms_url: String,

    /// Course id, optionally followed by a block id. Repeatable.
    #[arg(long = "course-id", visible_alias = "course_id")]
    pub course_ids: Vec<String>,

    /// File with one course per line (optionally "course block").
    #[arg(long = "course-ids-file", visible_alias = "course_ids_file")]
    pub course_ids_file: Option<PathBuf>,

    /// Report type to generate.
    #[arg(long)]
    pub report: ReportType,

    /// Path to config TOML.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the batch summary as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 命令行上的课程作为"粘贴文本"通道
    pub fn pasted_text(&self) -> String {
        self.course_ids.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_legacy_flags() {
        let args = Args::try_parse_from([
            "edx-report-submit",
            "--user",
            "staff@example.com",
            "--pass",
            "secret",
            "--lms_url",
            "https://lms.example.com",
            "--course_id",
            "course-v1:FCT+TPag+2024_T3",
            "--course-id",
            "course-v1:FCT+Teste+2024_T3",
            "--report",
            "get_students_profile",
        ])
        .unwrap();

        assert_eq!(args.email, "staff@example.com");
        assert_eq!(args.report, ReportType::StudentsProfile);
        assert_eq!(
            args.pasted_text(),
            "course-v1:FCT+TPag+2024_T3\ncourse-v1:FCT+Teste+2024_T3"
        );
        assert!(args.course_ids_file.is_none());
    }

    #[test]
    fn test_unknown_report_rejected() {
        let result = Args::try_parse_from([
            "edx-report-submit",
            "--email",
            "a@b.c",
            "--password",
            "x",
            "--lms-url",
            "https://lms.example.com",
            "--report",
            "everything",
        ]);
        assert!(result.is_err());
    }
}
