use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::person::{Attachment, Person};

/// Canonical contribution record produced by the normalizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub db_id: String,
    pub friendly_id: String,
    pub title: String,
    /// Free-text type label, e.g. "Oral presentation"
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    /// Duration in minutes
    pub duration: i64,
    pub location: String,
    pub room: String,
    pub url: String,
    pub session: String,
    pub track: String,
    pub board_number: String,
    pub code: String,
    pub keywords: Vec<String>,
    pub speakers: Vec<Person>,
    pub primary_authors: Vec<Person>,
    pub coauthors: Vec<Person>,
    pub attachments: Vec<Attachment>,
    pub attachment_count: usize,
}

impl Contribution {
    /// Human-facing identifier: `friendly_id`, or `id` when that is empty.
    ///
    /// Returns `None` when both are empty so each caller can pick its own placeholder.
    pub fn display_id(&self) -> Option<&str> {
        [self.friendly_id.as_str(), self.id.as_str()]
            .into_iter()
            .find(|id| !id.is_empty())
    }

    /// Replace the attachment list, keeping `attachment_count` in step.
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.attachment_count = attachments.len();
        self.attachments = attachments;
    }

    /// Every person across speakers, primary authors and co-authors, in that order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.speakers
            .iter()
            .chain(self.primary_authors.iter())
            .chain(self.coauthors.iter())
    }

    /// Sorted, deduplicated non-empty affiliations of everyone on the contribution.
    pub fn affiliations(&self) -> Vec<&str> {
        self.people()
            .map(|p| p.affiliation.as_str())
            .filter(|a| !a.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Join the display names of `people` with `separator`.
pub fn join_names(people: &[Person], separator: &str) -> String {
    people
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
