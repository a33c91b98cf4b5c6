use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::{write_staged, ExportContext};
use crate::error::ExportError;
use crate::models::{join_names, Contribution};
use crate::utils::truncate_chars;

/// UTF-8 byte order mark so spreadsheet applications pick the right encoding
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Longest description kept in a CSV cell, in characters
pub const CSV_DESCRIPTION_LIMIT: usize = 500;

/// Header row, matching the field order of [`CsvRow`]
pub const COLUMNS: [&str; 17] = [
    "id",
    "friendly_id",
    "title",
    "type",
    "start_date",
    "start_time",
    "duration",
    "speakers",
    "primary_authors",
    "coauthors",
    "affiliations",
    "description",
    "attachment_count",
    "url",
    "session",
    "location",
    "room",
];

/// One CSV row
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    pub id: &'a str,
    pub friendly_id: &'a str,
    pub title: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub start_date: &'a str,
    pub start_time: &'a str,
    pub duration: i64,
    pub speakers: String,
    pub primary_authors: String,
    pub coauthors: String,
    pub affiliations: String,
    pub description: &'a str,
    pub attachment_count: usize,
    pub url: &'a str,
    pub session: &'a str,
    pub location: &'a str,
    pub room: &'a str,
}

impl<'a> From<&'a Contribution> for CsvRow<'a> {
    fn from(c: &'a Contribution) -> Self {
        Self {
            id: &c.id,
            friendly_id: &c.friendly_id,
            title: &c.title,
            kind: &c.kind,
            start_date: &c.start_date,
            start_time: &c.start_time,
            duration: c.duration,
            speakers: join_names(&c.speakers, "; "),
            primary_authors: join_names(&c.primary_authors, "; "),
            coauthors: join_names(&c.coauthors, "; "),
            affiliations: c.affiliations().join("; "),
            description: truncate_chars(&c.description, CSV_DESCRIPTION_LIMIT),
            attachment_count: c.attachment_count,
            url: &c.url,
            session: &c.session,
            location: &c.location,
            room: &c.room,
        }
    }
}

/// Write CSV rows (BOM, header, CRLF records) for `contributions` into `out`.
pub fn write_csv<'a, W, I>(out: W, contributions: I) -> Result<(), ::csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Contribution>,
{
    let mut out = out;
    out.write_all(UTF8_BOM)?;

    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(::csv::Terminator::CRLF)
        .from_writer(out);
    writer.write_record(COLUMNS)?;
    for contribution in contributions {
        writer.serialize(CsvRow::from(contribution))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_contributions_csv(ctx: &ExportContext<'_>, path: &Path) -> Result<(), ExportError> {
    write_staged(path, |out| {
        write_csv(&mut *out, ctx.categorized.all()).map_err(|source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        })
    })
}
