mod format;
mod path;

pub use format::{file_stamp, format_size, format_timestamp, parse_size};
pub use path::{display_trail, shorten_path};
