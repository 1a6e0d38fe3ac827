//! Campaign link generation and QR codes
//!
//! [`url_generator`] expands a base URL and query parameter value lists into
//! every combination of campaign URLs. [`api`] serves a small web front end
//! that turns a submitted URL into a QR code page, plus JSON endpoints for the
//! generator.

pub mod api;
pub mod qr;
pub mod url_generator;
pub mod utils;
