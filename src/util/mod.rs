pub mod format;

pub use format::{NumberFormat, format_number, format_short, title_case};

/// Singular or plural noun for a count (`1 order`, `3 orders`).
pub fn plural(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}
