//! Mood use-case service for categorical and slider moods.

use crate::model::date::DayKey;
use crate::model::mood::{DimensionalMood, MoodSymbol};
use crate::repo::collection::{MoodEntries, SliderMoodEntries};
use crate::repo::record_store::RecordStore;
use crate::repo::StoreResult;
use crate::storage::KvStore;

/// Facade over the categorical and dimensional mood stores.
pub struct MoodService<S: KvStore> {
    moods: RecordStore<MoodEntries, S>,
    slider_moods: RecordStore<SliderMoodEntries, S>,
}

impl<S: KvStore> MoodService<S> {
    pub fn new(
        moods: RecordStore<MoodEntries, S>,
        slider_moods: RecordStore<SliderMoodEntries, S>,
    ) -> Self {
        Self {
            moods,
            slider_moods,
        }
    }

    pub fn set_mood(&self, date: &str, mood: MoodSymbol) -> StoreResult<MoodEntries> {
        let date = DayKey::parse_input(date)?;
        self.moods.upsert(date, mood)
    }

    pub fn clear_mood(&self, date: &str) -> StoreResult<MoodEntries> {
        let date = DayKey::parse_input(date)?;
        self.moods.remove(&date)
    }

    pub fn mood_on(&self, date: DayKey) -> Option<MoodSymbol> {
        self.moods.snapshot().get(date).copied()
    }

    /// Saves all three slider dimensions together.
    pub fn set_slider_mood(
        &self,
        date: &str,
        tiredness: i64,
        happiness: i64,
        stress: i64,
    ) -> StoreResult<SliderMoodEntries> {
        let date = DayKey::parse_input(date)?;
        let mood = DimensionalMood::new(tiredness, happiness, stress)?;
        self.slider_moods.upsert(date, mood)
    }

    pub fn clear_slider_mood(&self, date: &str) -> StoreResult<SliderMoodEntries> {
        let date = DayKey::parse_input(date)?;
        self.slider_moods.remove(&date)
    }

    pub fn slider_mood_on(&self, date: DayKey) -> Option<DimensionalMood> {
        self.slider_moods.snapshot().get(date).copied()
    }

    pub fn moods(&self) -> MoodEntries {
        self.moods.snapshot()
    }

    pub fn slider_moods(&self) -> SliderMoodEntries {
        self.slider_moods.snapshot()
    }
}
