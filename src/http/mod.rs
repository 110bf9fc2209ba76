//! HTTP protocol layer module
//!
//! Response building shared by every endpoint.

pub mod response;

pub use response::{
    build_404_response, build_405_response, build_html_response, build_options_response,
    build_text_response,
};
