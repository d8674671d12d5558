mod parser;

pub use parser::{parse_log_files, LogRecord};
