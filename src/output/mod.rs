//! Run reports
//!
//! - **text**: console table of expected vs observed shares
//! - **json**: machine-readable summary, to stdout or a file

pub mod json;
pub mod text;
