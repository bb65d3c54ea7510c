pub mod report_submitter;

pub use report_submitter::ReportSubmitter;
