use serde::{Deserialize, Serialize, Serializer};

use super::contribution::Contribution;

/// Date/time triple as delivered by the API for `startDate`/`endDate`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub date: String,
    pub time: String,
    pub tz: String,
}

/// Top-level event with its normalized contributions
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub title: String,
    pub id: String,
    pub start_date: Schedule,
    pub end_date: Schedule,
    pub location: String,
    pub url: String,
    pub contributions: Vec<Contribution>,
}

impl Event {
    /// Title for log lines, with a placeholder for untitled events
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Unknown"
        } else {
            &self.title
        }
    }
}

// Serializes the event metadata only; contributions are exported per category.
impl Serialize for Event {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Event", 6)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("start_date", &self.start_date)?;
        state.serialize_field("end_date", &self.end_date)?;
        state.serialize_field("location", &self.location)?;
        state.serialize_field("url", &self.url)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_skips_contributions() {
        let event = Event {
            title: "LLRF 2025".into(),
            id: "939".into(),
            contributions: vec![Contribution::default()],
            ..Default::default()
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["title"], "LLRF 2025");
        assert_eq!(value["start_date"]["date"], "");
        assert!(value.get("contributions").is_none());
    }

    #[test]
    fn test_display_title_placeholder() {
        assert_eq!(Event::default().display_title(), "Unknown");
    }
}
