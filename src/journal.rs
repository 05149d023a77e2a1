//! Session order journal.
//!
//! Every submitted order appends one JSON line to `orders.jsonl` under the
//! journal directory. Append-only; `recent_orders` reads newest-first. The
//! journal is the shop's local paper trail independent of the backend sheet.

use crate::core::types::OrderSummary;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const JOURNAL_FILE: &str = "orders.jsonl";

/// Current time as an ISO-8601 UTC string, without a chrono dependency.
pub fn now_iso8601() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    // Civil-from-days (Howard Hinnant's algorithm), epoch 1970-01-01
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { year + 1 } else { year };

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hour, minute, second
    )
}

pub fn journal_path(dir: &Path) -> PathBuf {
    dir.join(JOURNAL_FILE)
}

/// Append one order summary to the journal, creating the directory and file
/// as needed.
pub fn append_order(dir: &Path, summary: &OrderSummary) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("failed to create journal dir {}: {}", dir.display(), e))?;
    let path = journal_path(dir);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
    let line = serde_json::to_string(summary)
        .map_err(|e| format!("failed to serialize order summary: {}", e))?;
    writeln!(file, "{}", line).map_err(|e| format!("failed to append to journal: {}", e))?;
    Ok(())
}

/// Read the most recent `limit` entries, newest first. A missing journal is
/// an empty journal, not an error.
pub fn recent_orders(dir: &Path, limit: usize) -> Result<Vec<OrderSummary>, String> {
    let path = journal_path(dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(format!("failed to read {}: {}", path.display(), e)),
    };

    let mut entries = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let summary: OrderSummary = serde_json::from_str(line)
            .map_err(|e| format!("corrupt journal line {}: {}", number + 1, e))?;
        entries.push(summary);
    }
    entries.reverse();
    entries.truncate(limit);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, total: u32) -> OrderSummary {
        OrderSummary {
            id: id.to_string(),
            customer_name: "王小明".to_string(),
            total_amount: total,
            timestamp: now_iso8601(),
        }
    }

    #[test]
    fn test_now_iso8601_shape() {
        let ts = now_iso8601();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
        let year: u32 = ts[..4].parse().unwrap();
        assert!(year >= 2024);
    }

    #[test]
    fn test_append_then_read_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        append_order(dir.path(), &summary("OD-1", 399)).unwrap();
        append_order(dir.path(), &summary("OD-2", 798)).unwrap();
        append_order(dir.path(), &summary("OD-3", 99)).unwrap();

        let recent = recent_orders(dir.path(), 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "OD-3");
        assert_eq!(recent[1].id, "OD-2");
    }

    #[test]
    fn test_missing_journal_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(recent_orders(dir.path(), 10).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_line_reported_with_number() {
        let dir = tempfile::tempdir().unwrap();
        append_order(dir.path(), &summary("OD-1", 399)).unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(journal_path(dir.path()))
            .unwrap()
            .write_all(b"not json\n")
            .unwrap();

        let err = recent_orders(dir.path(), 10).unwrap_err();
        assert!(err.contains("corrupt journal line 2"));
    }

    #[test]
    fn test_journal_creates_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        append_order(&nested, &summary("OD-1", 399)).unwrap();
        assert_eq!(recent_orders(&nested, 1).unwrap()[0].id, "OD-1");
    }
}
