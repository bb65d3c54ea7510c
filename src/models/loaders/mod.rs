pub mod course_list;

pub use course_list::{decode_upload, load_course_file, parse_course_list};
