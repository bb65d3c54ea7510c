pub mod credentials;
pub mod job;
pub mod loaders;
pub mod outcome;
pub mod report_type;
pub mod request;

pub use credentials::Credentials;
pub use job::JobDescriptor;
pub use loaders::{load_course_file, parse_course_list};
pub use outcome::{BatchResult, Outcome, OutcomeKind, DOWNLOAD_NOTE};
pub use report_type::ReportType;
pub use request::BatchRequest;
