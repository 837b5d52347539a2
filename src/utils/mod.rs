pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{absolutize_href, absolutize_protocol_relative, is_valid_url, site_origin};
