//! Human-readable rendering of sizes, counts and histogram rows.

use dirinfo_core::{ExtensionStat, percentage};

const MB: f64 = 1024.0 * 1024.0;

/// Format a byte count in megabytes, or gigabytes from 1024 MB upwards.
///
/// Zero is always `"0 MB"`; nothing smaller than a hundredth of a megabyte
/// is ever shown.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 MB".to_string();
    }

    let size_mb = bytes as f64 / MB;
    if size_mb >= 1024.0 {
        format!("{:.2} GB", size_mb / 1024.0)
    } else {
        format!("{size_mb:.2} MB")
    }
}

/// Format a count with comma thousand separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

/// Render one ranked histogram line.
///
/// `total` is the count across the whole histogram, so the percentage is the
/// global share of this extension.
pub fn render_histogram_row(rank: usize, extension: &str, count: u64, total: u64) -> String {
    format!(
        "  {rank:>2}. {extension:<15} {:>8} files ({:.1}%)",
        format_count(count),
        percentage(count, total)
    )
}

/// Render a ranked entry; its stored percentage is used as is.
pub fn render_stat(stat: &ExtensionStat) -> String {
    format!(
        "  {:>2}. {:<15} {:>8} files ({:.1}%)",
        stat.rank,
        stat.extension.as_str(),
        format_count(stat.count),
        stat.percentage
    )
}
