//! Shared formatting helpers used by the view layer

mod date;
mod html;
mod url;

pub use date::format_date;
pub use html::escape_html;
pub use url::{decode_component, encode_component};
