// src/utils/log.rs

//! Console formatting helpers on top of the `log` facade.
//!
//! Used by the CLI to print banners and indented listings with the same
//! timestamps and levels as ordinary log lines.

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(60);
    ::log::info!("{}", border);
    ::log::info!("  {}", title);
    ::log::info!("{}", border);
}

/// Log a separator line
pub fn separator() {
    ::log::info!("{}", "─".repeat(60));
}

/// Log a sub-item (indented)
pub fn sub_item(message: &str) {
    ::log::info!("    {}", message);
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    ::log::info!("[SUMMARY] {}", title);
    for (key, value) in items {
        ::log::info!("    {}: {}", key, value);
    }
}
