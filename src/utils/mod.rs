pub mod filename;
pub mod normalize;
pub mod text;

pub use filename::{date_dir_name, sanitize_filename, MAX_NAME_BYTES, MAX_NAME_LEN};
pub use normalize::{normalize_contribution, normalize_event};
pub use text::{ellipsize, truncate_bytes, truncate_chars};
