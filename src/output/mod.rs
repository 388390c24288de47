mod cli;
mod json;

pub use cli::{
    classify_update, print_outdated, print_report_saved, print_scan, print_unused, UpdateType,
};
pub use json::write_report;

#[cfg(test)]
pub(crate) use json::read_report;
