//! 课程列表解析
//!
//! 把粘贴文本和上传文件合并成去重、保序的任务列表

use crate::error::{AppResult, BatchError};
use crate::models::job::JobDescriptor;
use crate::models::report_type::ReportType;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

/// 行内分隔符：空白、逗号、分号
fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[,;\s]+").expect("分隔符正则非法"))
}

/// 解析课程列表
///
/// # 参数
/// - `pasted_text`: 粘贴的文本，先处理
/// - `uploaded`: 上传文件的原始字节（可选），后处理
/// - `report_type`: 报表类型，决定是否保留 block id
///
/// # 返回
/// 返回去重后的任务列表；没有任何有效行时返回 `BatchError::Validation`
pub fn parse_course_list(
    pasted_text: &str,
    uploaded: Option<&[u8]>,
    report_type: ReportType,
) -> AppResult<Vec<JobDescriptor>> {
    let uploaded_text = uploaded.map(decode_upload);

    let lines = pasted_text
        .lines()
        .chain(uploaded_text.iter().flat_map(|text| text.lines()));

    let mut seen = HashSet::new();
    let mut jobs = Vec::new();

    for line in lines {
        let Some(job) = parse_line(line, report_type) else {
            continue;
        };
        if seen.insert(job.clone()) {
            jobs.push(job);
        }
    }

    if jobs.is_empty() {
        return Err(BatchError::Validation(
            "请至少提供一个课程 ID".to_string(),
        ));
    }

    Ok(jobs)
}

/// 解析单行；空行返回 None
fn parse_line(line: &str, report_type: ReportType) -> Option<JobDescriptor> {
    let mut tokens = separators()
        .split(line.trim())
        .filter(|token| !token.is_empty());

    let course_id = tokens.next()?;
    let block_id = tokens.next().filter(|_| report_type.accepts_block_id());

    Some(JobDescriptor {
        course_id: course_id.to_string(),
        block_id: block_id.map(str::to_string),
    })
}

/// 上传文件按 UTF-8 解码，丢弃非法字节和开头的 BOM
///
/// 只丢弃无法解码的字节序列，文件中原本就有的 U+FFFD 保留
pub fn decode_upload(bytes: &[u8]) -> String {
    let text = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => e
            .as_bytes()
            .utf8_chunks()
            .map(|chunk| chunk.valid())
            .collect(),
    };
    match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// 读取课程文件的全部内容
pub async fn load_course_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取课程文件: {}", path.display()))?;

    tracing::debug!("课程文件 {} 共 {} 字节", path.display(), bytes.len());

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course_ids(jobs: &[JobDescriptor]) -> Vec<&str> {
        jobs.iter().map(|j| j.course_id.as_str()).collect()
    }

    #[test]
    fn test_dedup_across_sources_keeps_first_seen_order() {
        let jobs = parse_course_list(
            "A\nB\nA",
            Some(b"B\nC".as_slice()),
            ReportType::StudentsProfile,
        )
        .unwrap();
        assert_eq!(course_ids(&jobs), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_block_id_kept_for_problem_responses() {
        let jobs = parse_course_list(
            "course-v1:X+Y+Z block-v1:abc",
            None,
            ReportType::ProblemResponses,
        )
        .unwrap();
        assert_eq!(
            jobs,
            vec![JobDescriptor::with_block("course-v1:X+Y+Z", "block-v1:abc")]
        );
    }

    #[test]
    fn test_block_id_ignored_for_other_reports() {
        let jobs = parse_course_list(
            "course-v1:X+Y+Z block-v1:abc",
            None,
            ReportType::CalculateGrades,
        )
        .unwrap();
        assert_eq!(jobs, vec![JobDescriptor::new("course-v1:X+Y+Z")]);
    }

    #[test]
    fn test_ignored_block_ids_collapse_into_one_job() {
        let jobs = parse_course_list(
            "A;block-1\nA,block-2",
            None,
            ReportType::OraDataReport,
        )
        .unwrap();
        assert_eq!(jobs, vec![JobDescriptor::new("A")]);
    }

    #[test]
    fn test_same_course_different_blocks_are_distinct() {
        let jobs = parse_course_list(
            "A block-1\nA block-2\nA block-1",
            None,
            ReportType::ProblemResponses,
        )
        .unwrap();
        assert_eq!(
            jobs,
            vec![
                JobDescriptor::with_block("A", "block-1"),
                JobDescriptor::with_block("A", "block-2"),
            ]
        );
    }

    #[test]
    fn test_separators_and_blank_lines() {
        let text = "\n   \n  A , blk  \r\nB;\t\nC\tblk2\n;;\n";
        let jobs = parse_course_list(text, None, ReportType::ProblemResponses).unwrap();
        assert_eq!(
            jobs,
            vec![
                JobDescriptor::with_block("A", "blk"),
                JobDescriptor::new("B"),
                JobDescriptor::with_block("C", "blk2"),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_validation_error() {
        let err = parse_course_list("", None, ReportType::StudentsProfile).unwrap_err();
        assert!(matches!(err, BatchError::Validation(_)));

        let err = parse_course_list(" \n\t\n", Some(b"\n\n".as_slice()), ReportType::StudentsProfile)
            .unwrap_err();
        assert!(matches!(err, BatchError::Validation(_)));
    }

    #[test]
    fn test_upload_only() {
        let jobs = parse_course_list("", Some(b"X\nY".as_slice()), ReportType::StudentsProfile).unwrap();
        assert_eq!(course_ids(&jobs), vec!["X", "Y"]);
    }

    #[test]
    fn test_decode_upload_drops_bom_and_invalid_bytes() {
        let mut bytes = "\u{feff}A\n".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, b'B', b'\n']);
        assert_eq!(decode_upload(&bytes), "A\nB\n");
    }

    #[test]
    fn test_decode_upload_keeps_literal_replacement_char() {
        let bytes = "\u{feff}course-v1:A\u{fffd}+1\n".as_bytes();
        assert_eq!(decode_upload(bytes), "course-v1:A\u{fffd}+1\n");

        let mut mixed = "A\u{fffd}".as_bytes().to_vec();
        mixed.extend_from_slice(&[0xc3, b'\n']);
        assert_eq!(decode_upload(&mixed), "A\u{fffd}\n");
    }

    #[test]
    fn test_ids_are_not_validated_locally() {
        let jobs = parse_course_list("not a course", None, ReportType::StudentsProfile).unwrap();
        assert_eq!(course_ids(&jobs), vec!["not"]);
    }
}
