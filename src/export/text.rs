//! Plain-text reports: the full summary and the per-date summaries.

use std::io::{self, Write};
use std::path::Path;

use super::{io_error, write_staged, ExportContext};
use crate::classify::Category;
use crate::error::ExportError;
use crate::models::{join_names, Contribution};
use crate::report::HarvestReport;
use crate::utils::ellipsize;

/// Characters of the description shown in a contribution block
pub const DESCRIPTION_PREVIEW: usize = 200;

const RULE_WIDTH: usize = 80;

fn placeholder(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

/// Write one numbered contribution block, followed by a blank line.
pub fn write_contribution<W: Write>(out: &mut W, c: &Contribution, index: usize) -> io::Result<()> {
    writeln!(
        out,
        "{}. [{}] {}",
        index,
        c.display_id().unwrap_or("N/A"),
        c.title
    )?;
    writeln!(out, "   Type: {}", placeholder(&c.kind))?;
    writeln!(
        out,
        "   Date/Time: {} {} ({} min)",
        c.start_date, c.start_time, c.duration
    )?;

    for (label, people) in [
        ("Speakers", &c.speakers),
        ("Primary Authors", &c.primary_authors),
        ("Co-authors", &c.coauthors),
    ] {
        if !people.is_empty() {
            writeln!(out, "   {}: {}", label, join_names(people, ", "))?;
        }
    }

    if !c.attachments.is_empty() {
        writeln!(out, "   Attachments ({}):", c.attachments.len())?;
        for attachment in &c.attachments {
            writeln!(out, "     - {} ({} bytes)", attachment.filename, attachment.size)?;
        }
    }

    writeln!(out, "   URL: {}", c.url)?;
    if !c.description.is_empty() {
        writeln!(
            out,
            "   Description: {}",
            ellipsize(&c.description, DESCRIPTION_PREVIEW)
        )?;
    }
    writeln!(out)
}

/// Write the complete report: header, statistics, then one section per
/// non-empty category.
pub fn write_summary<W: Write>(
    out: &mut W,
    ctx: &ExportContext<'_>,
    report: &HarvestReport,
) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    let categorized = ctx.categorized;

    writeln!(out, "{} Conference Complete Scraping Report", ctx.prefix)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Event: {}", ctx.event.title)?;
    writeln!(out, "Event ID: {}", ctx.event.id)?;
    writeln!(out, "URL: {}", ctx.event.url)?;
    writeln!(out, "Scrape time: {}", ctx.scrape_time_display())?;
    writeln!(out)?;

    writeln!(out, "Statistics:")?;
    writeln!(out, "  Total contributions: {}", categorized.total())?;
    writeln!(out, "  Oral presentations: {}", categorized.oral.len())?;
    writeln!(out, "  Posters: {}", categorized.posters.len())?;
    writeln!(out, "  Others: {}", categorized.others.len())?;
    writeln!(out, "  Downloaded files: {}", report.downloaded_files)?;
    writeln!(out, "  Errors: {}", report.errors)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    for category in Category::ALL {
        let contributions = categorized.get(category);
        if contributions.is_empty() {
            continue;
        }
        writeln!(out, "{}", category.heading())?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for (i, contribution) in contributions.iter().enumerate() {
            write_contribution(out, contribution, i + 1)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the report for the contributions held on one date.
pub fn write_date_summary<W: Write>(
    out: &mut W,
    prefix: &str,
    date: &str,
    contributions: &[&Contribution],
) -> io::Result<()> {
    writeln!(out, "{} - Contributions on {}", prefix, date)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Total contributions: {}", contributions.len())?;
    writeln!(out)?;
    for (i, contribution) in contributions.iter().enumerate() {
        write_contribution(out, contribution, i + 1)?;
    }
    Ok(())
}

pub fn write_summary_file(
    ctx: &ExportContext<'_>,
    report: &HarvestReport,
    path: &Path,
) -> Result<(), ExportError> {
    write_staged(path, |out| write_summary(out, ctx, report).map_err(io_error(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, Person};

    fn render(c: &Contribution) -> String {
        let mut buf = Vec::new();
        write_contribution(&mut buf, c, 3).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_minimal_block() {
        let c = Contribution {
            id: "42".into(),
            title: "Cavity detuning".into(),
            url: "https://example.org/c/42".into(),
            ..Default::default()
        };
        assert_eq!(
            render(&c),
            "3. [42] Cavity detuning\n   Type: N/A\n   Date/Time:   (0 min)\n   URL: https://example.org/c/42\n\n"
        );
    }

    #[test]
    fn test_full_block() {
        let c = Contribution {
            id: "42".into(),
            friendly_id: "7".into(),
            title: "Cavity detuning".into(),
            kind: "Poster".into(),
            start_date: "2025-10-13".into(),
            start_time: "09:00:00".into(),
            duration: 15,
            speakers: vec![
                Person { name: "Jane Doe".into(), ..Default::default() },
                Person { name: "John Roe".into(), ..Default::default() },
            ],
            coauthors: vec![Person { name: "Bo Chen".into(), ..Default::default() }],
            attachments: vec![Attachment {
                filename: "poster.pdf".into(),
                size: 1024,
                ..Default::default()
            }],
            description: "d".repeat(DESCRIPTION_PREVIEW + 1),
            ..Default::default()
        };
        let text = render(&c);

        assert!(text.starts_with("3. [7] Cavity detuning\n   Type: Poster\n"));
        assert!(text.contains("   Date/Time: 2025-10-13 09:00:00 (15 min)\n"));
        assert!(text.contains("   Speakers: Jane Doe, John Roe\n"));
        assert!(!text.contains("Primary Authors"));
        assert!(text.contains("   Co-authors: Bo Chen\n"));
        assert!(text.contains("   Attachments (1):\n     - poster.pdf (1024 bytes)\n"));
        let expected = format!("   Description: {}...\n\n", "d".repeat(DESCRIPTION_PREVIEW));
        assert!(text.ends_with(&expected));
    }

    #[test]
    fn test_date_summary_header() {
        let c = Contribution { id: "1".into(), title: "A".into(), ..Default::default() };
        let mut buf = Vec::new();
        write_date_summary(&mut buf, "LLRF2025", "2025-10-13", &[&c]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("LLRF2025 - Contributions on 2025-10-13"));
        assert_eq!(lines.next(), Some("=".repeat(80).as_str()));
        assert_eq!(lines.next(), Some("Total contributions: 1"));
        assert_eq!(lines.next(), Some(""));
        assert_eq!(lines.next(), Some("1. [1] A"));
    }
}
