//! Month-grouped journal view.
//!
//! Groups appear in order of their first entry; entries keep snapshot order
//! (ascending date) inside a group. Month labels carry no year, so entries
//! from the same month of different years land in one group.

use crate::model::date::DayKey;
use crate::repo::collection::JournalEntries;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalItem {
    pub date: DayKey,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// Full month name, e.g. `March`.
    pub label: String,
    pub entries: Vec<JournalItem>,
}

pub fn group_by_month(journal: &JournalEntries) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for (date, text) in journal.iter() {
        let label = date.month_label();
        let item = JournalItem {
            date,
            text: text.clone(),
        };
        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.entries.push(item),
            None => groups.push(MonthGroup {
                label,
                entries: vec![item],
            }),
        }
    }
    groups
}
