//! Oral / poster / other classification of contributions.

use crate::models::Contribution;

/// Presentation category, decided once from the contribution type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Oral,
    Poster,
    Other,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Oral, Category::Poster, Category::Other];

    /// Classify a free-text type label.
    ///
    /// # Examples
    /// ```
    /// use indico_harvest::classify::Category;
    ///
    /// assert_eq!(Category::of("Invited Talk"), Category::Oral);
    /// assert_eq!(Category::of("Poster Session"), Category::Poster);
    /// assert_eq!(Category::of(""), Category::Other);
    /// ```
    pub fn of(kind: &str) -> Self {
        let kind = kind.to_lowercase();
        if kind.contains("oral") || kind.contains("talk") {
            Category::Oral
        } else if kind.contains("poster") {
            Category::Poster
        } else {
            Category::Other
        }
    }

    /// Directory under the output root holding this category's attachments
    pub fn folder(self) -> &'static str {
        match self {
            Category::Oral => "Oral_Presentations",
            Category::Poster => "Posters",
            Category::Other => "Attachments",
        }
    }

    /// Section heading in text reports
    pub fn heading(self) -> &'static str {
        match self {
            Category::Oral => "ORAL PRESENTATIONS",
            Category::Poster => "POSTERS",
            Category::Other => "OTHER CONTRIBUTIONS",
        }
    }
}

/// Contributions split by category, each list in fetch order.
#[derive(Debug, Default)]
pub struct Categorized<'a> {
    pub oral: Vec<&'a Contribution>,
    pub posters: Vec<&'a Contribution>,
    pub others: Vec<&'a Contribution>,
}

impl<'a> Categorized<'a> {
    /// Stable partition in one pass over `contributions`.
    pub fn partition<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = &'a Contribution>,
    {
        let mut categorized = Self::default();
        for contribution in contributions {
            match Category::of(&contribution.kind) {
                Category::Oral => categorized.oral.push(contribution),
                Category::Poster => categorized.posters.push(contribution),
                Category::Other => categorized.others.push(contribution),
            }
        }
        categorized
    }

    pub fn get(&self, category: Category) -> &[&'a Contribution] {
        match category {
            Category::Oral => &self.oral,
            Category::Poster => &self.posters,
            Category::Other => &self.others,
        }
    }

    /// Oral, then poster, then other contributions.
    pub fn all(&self) -> impl Iterator<Item = &'a Contribution> + '_ {
        self.oral
            .iter()
            .chain(self.posters.iter())
            .chain(self.others.iter())
            .copied()
    }

    pub fn total(&self) -> usize {
        self.oral.len() + self.posters.len() + self.others.len()
    }
}
