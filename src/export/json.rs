use std::path::Path;

use serde::Serialize;

use super::{write_json, ExportContext};
use crate::error::ExportError;
use crate::models::{Contribution, Event};

/// Aggregate counts in the full JSON export
#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_contributions: usize,
    pub oral_presentations: usize,
    pub posters: usize,
    pub others: usize,
}

#[derive(Debug, Serialize)]
pub struct ContributionsByCategory<'a> {
    pub oral_presentations: &'a [&'a Contribution],
    pub posters: &'a [&'a Contribution],
    pub others: &'a [&'a Contribution],
}

/// Document written to `<prefix>_All_Contributions.json`
#[derive(Debug, Serialize)]
pub struct AllContributions<'a> {
    pub event_info: &'a Event,
    pub statistics: Statistics,
    pub contributions: ContributionsByCategory<'a>,
    pub scrape_time: String,
}

impl<'a> AllContributions<'a> {
    pub fn new(ctx: &'a ExportContext<'a>) -> Self {
        let categorized = ctx.categorized;
        Self {
            event_info: ctx.event,
            statistics: Statistics {
                total_contributions: categorized.total(),
                oral_presentations: categorized.oral.len(),
                posters: categorized.posters.len(),
                others: categorized.others.len(),
            },
            contributions: ContributionsByCategory {
                oral_presentations: &categorized.oral,
                posters: &categorized.posters,
                others: &categorized.others,
            },
            scrape_time: ctx.scrape_time_iso(),
        }
    }
}

pub fn write_all_contributions(ctx: &ExportContext<'_>, path: &Path) -> Result<(), ExportError> {
    write_json(path, &AllContributions::new(ctx))
}
