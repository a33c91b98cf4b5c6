use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use super::{io_error, text, write_json, write_staged, ExportContext};
use crate::error::ExportError;
use crate::models::Contribution;
use crate::report::HarvestReport;
use crate::utils::date_dir_name;

/// Bucket for contributions without a start date
pub const UNKNOWN_DATE: &str = "Unknown";

#[derive(Debug, Serialize)]
struct DateDocument<'a> {
    date: &'a str,
    count: usize,
    contributions: &'a [&'a Contribution],
}

/// Group contributions by start date, ascending by date string.
///
/// Each bucket keeps the iteration order of `contributions`.
pub fn group_by_date<'a, I>(contributions: I) -> BTreeMap<&'a str, Vec<&'a Contribution>>
where
    I: IntoIterator<Item = &'a Contribution>,
{
    let mut buckets: BTreeMap<&str, Vec<&Contribution>> = BTreeMap::new();
    for contribution in contributions {
        let date = match contribution.start_date.as_str() {
            "" => UNKNOWN_DATE,
            date => date,
        };
        buckets.entry(date).or_default().push(contribution);
    }
    buckets
}

/// Write `By_Date/<date>/` for every bucket. Each failed file counts as one error.
pub fn write_by_date(ctx: &ExportContext<'_>, report: &mut HarvestReport) {
    let root = ctx.output_dir.join("By_Date");
    let mut taken = HashSet::new();
    for (date, contributions) in group_by_date(ctx.categorized.all()) {
        let base = date_dir_name(date);
        let name = unique_dir_name(&mut taken, base.clone());
        if name != base {
            warn!(date, dir = %name, "Date directory already used by another bucket");
        }
        let dir = root.join(&name);
        if let Err(source) = std::fs::create_dir_all(&dir) {
            error!(error = %source, dir = %dir.display(), "Failed to create date directory");
            report.record_error();
            continue;
        }

        let json_path = dir.join(format!("{}_contributions.json", name));
        let document = DateDocument {
            date,
            count: contributions.len(),
            contributions: &contributions,
        };
        if let Err(e) = write_json(&json_path, &document) {
            error!(error = %e, date, "Failed to save date JSON");
            report.record_error();
        }

        let summary_path = dir.join(format!("{}_summary.txt", name));
        if let Err(e) = write_date_summary_file(ctx.prefix, date, &contributions, &summary_path) {
            error!(error = %e, date, "Failed to save date summary");
            report.record_error();
        }

        info!("  {}: {} contributions", date, contributions.len());
    }
}

/// `name`, or `name_2`, `name_3`, ... if an earlier bucket already claimed it.
/// Comparison ignores case so buckets stay apart on case-insensitive filesystems.
fn unique_dir_name(taken: &mut HashSet<String>, name: String) -> String {
    let mut candidate = name.clone();
    let mut n = 1;
    while !taken.insert(candidate.to_lowercase()) {
        n += 1;
        candidate = format!("{}_{}", name, n);
    }
    candidate
}

fn write_date_summary_file(
    prefix: &str,
    date: &str,
    contributions: &[&Contribution],
    path: &Path,
) -> Result<(), ExportError> {
    write_staged(path, |out| {
        text::write_date_summary(out, prefix, date, contributions).map_err(io_error(path))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Categorized;
    use crate::models::Event;
    use chrono::Local;

    fn on(id: &str, date: &str) -> Contribution {
        Contribution {
            id: id.into(),
            start_date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_buckets_sum_to_total() {
        let input = vec![
            on("1", "2025-10-14"),
            on("2", "2025-10-13"),
            on("3", ""),
            on("4", "2025-10-14"),
            on("5", "2025/10/15"),
        ];
        let buckets = group_by_date(&input);

        assert_eq!(buckets.values().map(Vec::len).sum::<usize>(), input.len());
        assert_eq!(
            buckets.keys().copied().collect::<Vec<_>>(),
            vec!["2025-10-13", "2025-10-14", "2025/10/15", UNKNOWN_DATE]
        );
        let ids: Vec<_> = buckets["2025-10-14"].iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_unique_dir_name() {
        let mut taken = HashSet::new();
        assert_eq!(unique_dir_name(&mut taken, "2025-10-13".into()), "2025-10-13");
        assert_eq!(unique_dir_name(&mut taken, "2025-10-13".into()), "2025-10-13_2");
        assert_eq!(unique_dir_name(&mut taken, "2025-10-13".into()), "2025-10-13_3");
        assert_eq!(unique_dir_name(&mut taken, "Unknown".into()), "Unknown");
        assert_eq!(unique_dir_name(&mut taken, "unknown".into()), "unknown_2");
    }

    #[test]
    fn test_colliding_dates_keep_separate_directories() {
        let input = vec![on("1", "2025-10-13"), on("2", "2025/10/13"), on("3", "..")];
        let event = Event::default();
        let categorized = Categorized::partition(&input);
        let out = tempfile::tempdir().unwrap();
        let ctx = ExportContext {
            event: &event,
            categorized: &categorized,
            output_dir: out.path(),
            prefix: "LLRF2025",
            scrape_time: Local::now(),
        };
        let mut report = HarvestReport::default();
        write_by_date(&ctx, &mut report);
        assert_eq!(report.errors, 0);

        let root = out.path().join("By_Date");
        let first = root.join("2025-10-13").join("2025-10-13_contributions.json");
        let second = root.join("2025-10-13_2").join("2025-10-13_2_contributions.json");
        let first: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(first).unwrap()).unwrap();
        let second: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(second).unwrap()).unwrap();
        assert_eq!(first["date"], "2025-10-13");
        assert_eq!(second["date"], "2025/10/13");

        // ".." stays inside By_Date
        assert!(root.join("Unknown").join("Unknown_contributions.json").is_file());
        assert!(!out.path().join("Unknown_contributions.json").exists());
    }

    #[test]
    fn test_empty_date_goes_to_unknown() {
        let input = vec![on("1", ""), on("2", "")];
        let buckets = group_by_date(&input);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[UNKNOWN_DATE].len(), 2);
    }
}
