use std::collections::BTreeMap;

use indexmap::IndexMap;

/// One row of the input table: a single scheduled event.
///
/// Fields are the raw strings from the source file. Nothing is trimmed,
/// coerced, or validated at this level; `date` in particular stays exactly
/// as written because grouping and file naming key off the literal text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventRecord {
    pub date: String,
    pub title: String,
    pub time: String,
    /// Columns the renderer does not consume, passed through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Events partitioned by their raw date string.
///
/// Buckets keep first-occurrence order across the input and insertion order
/// within each bucket. Keys are compared by exact string equality: two dates
/// differing only in whitespace or case form separate buckets (and therefore
/// separate output cards). That mirrors the source data faithfully rather
/// than guessing at a normalization.
#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(transparent)]
pub struct DaySchedule {
    groups: IndexMap<String, Vec<EventRecord>>,
}

impl DaySchedule {
    pub fn from_records(records: impl IntoIterator<Item = EventRecord>) -> Self {
        let mut schedule = Self::default();
        for record in records {
            schedule.insert(record);
        }
        schedule
    }

    /// Appends to the record's day bucket, creating the bucket at the back
    /// on first sight of the key.
    pub fn insert(&mut self, record: EventRecord) {
        self.groups
            .entry(record.date.clone())
            .or_default()
            .push(record);
    }

    /// Number of distinct date keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Buckets in first-occurrence order of their date key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EventRecord])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, date: &str) -> Option<&[EventRecord]> {
        self.groups.get(date).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, title: &str) -> EventRecord {
        EventRecord {
            date: date.to_string(),
            title: title.to_string(),
            time: "10:00".to_string(),
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn groups_follow_first_occurrence_order() {
        let schedule = DaySchedule::from_records([
            record("3 June", "a"),
            record("5 June", "b"),
            record("3 June", "c"),
        ]);

        let keys: Vec<&str> = schedule.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["3 June", "5 June"]);
        assert_eq!(schedule.get("3 June").unwrap().len(), 2);
        assert_eq!(schedule.get("5 June").unwrap().len(), 1);
    }

    #[test]
    fn within_group_order_is_input_order() {
        let schedule = DaySchedule::from_records([
            record("3 June", "first"),
            record("4 June", "other"),
            record("3 June", "second"),
            record("3 June", "third"),
        ]);

        let titles: Vec<&str> = schedule
            .get("3 June")
            .unwrap()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn every_record_lands_in_exactly_one_group() {
        let records = vec![
            record("1 May", "a"),
            record("2 May", "b"),
            record("1 May", "c"),
            record("3 May", "d"),
        ];
        let total = records.len();
        let schedule = DaySchedule::from_records(records);

        let grouped: usize = schedule.iter().map(|(_, events)| events.len()).sum();
        assert_eq!(grouped, total);
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn keys_are_compared_verbatim() {
        let schedule = DaySchedule::from_records([
            record("3 June", "a"),
            record("3 June ", "b"),
            record("3 june", "c"),
        ]);

        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn identical_events_are_not_deduplicated() {
        let schedule = DaySchedule::from_records([record("3 June", "a"), record("3 June", "a")]);
        assert_eq!(schedule.get("3 June").unwrap().len(), 2);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let schedule =
            DaySchedule::from_records([record("9 July", "later"), record("1 July", "earlier")]);
        let json = serde_json::to_string(&schedule).unwrap();
        let nine = json.find("9 July").unwrap();
        let one = json.find("1 July").unwrap();
        assert!(nine < one);
    }
}
