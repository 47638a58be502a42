//! Date-keyed daily health records.
//!
//! Every operation reads the whole map from storage and, when it writes,
//! saves the whole map back before returning. Days with no stored record are
//! filled with randomized placeholder values.

use crate::clock::{date_key, Clock};
use crate::errors::AppError;
use crate::models::{
    DailyRecord, MealType, Nutrient, Nutrition, RecordMap, RecordPatch, MAX_NUTRIENT,
};
use crate::random::RandomSource;
use crate::storage::Storage;
use chrono::{Duration, NaiveDate};
use tracing::{debug, warn};

pub const MAX_STEPS: u32 = 12_000;
pub const STEP_INCREMENT: (u32, u32) = (50, 150);
pub const WEEK_LEN: usize = 7;

pub struct DailyDataStore {
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    persist_defaults: bool,
}

impl DailyDataStore {
    pub fn new(
        storage: impl Storage + 'static,
        clock: impl Clock + 'static,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self {
            storage: Box::new(storage),
            clock: Box::new(clock),
            rng: Box::new(rng),
            persist_defaults: false,
        }
    }

    /// Save synthesized defaults as soon as they are read, so an unwritten
    /// day reads the same twice.
    pub fn persist_defaults(mut self, enabled: bool) -> Self {
        self.persist_defaults = enabled;
        self
    }

    pub fn today(&mut self) -> DailyRecord {
        let today = self.clock.today();
        let mut records = self.storage.load();
        let (record, created) = self.resolve(&mut records, today);
        if created {
            self.store_defaults(&records);
        }
        record
    }

    /// The seven days ending today, oldest first.
    pub fn week(&mut self) -> Vec<DailyRecord> {
        let today = self.clock.today();
        let mut records = self.storage.load();
        let mut created_any = false;

        let week = (0..WEEK_LEN as i64)
            .rev()
            .map(|offset| {
                let (record, created) = self.resolve(&mut records, today - Duration::days(offset));
                created_any |= created;
                record
            })
            .collect();

        if created_any {
            self.store_defaults(&records);
        }
        week
    }

    pub fn update(&mut self, date: NaiveDate, patch: RecordPatch) -> Result<(), AppError> {
        self.update_record(date, patch).map(|_| ())
    }

    /// Same as [`update`](Self::update) but hands back the merged record.
    pub fn update_record(
        &mut self,
        date: NaiveDate,
        patch: RecordPatch,
    ) -> Result<DailyRecord, AppError> {
        let key = date_key(date);
        let mut records = self.storage.load();
        let mut record = match records.remove(&key) {
            Some(record) => record,
            None => default_record(date, self.rng.as_mut()),
        };
        patch.apply_to(&mut record);
        records.insert(key, record.clone());
        self.storage.save(&records)?;
        Ok(record)
    }

    pub fn simulate_step_increment(&mut self) -> Result<DailyRecord, AppError> {
        let current = self.today();
        let increment = self.rng.in_range(STEP_INCREMENT.0, STEP_INCREMENT.1);
        let steps = current.steps.saturating_add(increment).min(MAX_STEPS);
        debug!(increment, steps, "step increment");

        self.update_record(
            self.clock.today(),
            RecordPatch {
                steps: Some(steps),
                ..RecordPatch::default()
            },
        )
    }

    pub fn simulate_nutrition_boost(&mut self, meal: MealType) -> Result<DailyRecord, AppError> {
        let current = self.today();
        let nutrition = boosted(current.nutrition, meal);
        debug!(%meal, ?nutrition, "nutrition boost");

        self.update_record(
            self.clock.today(),
            RecordPatch {
                nutrition: Some(nutrition),
                ..RecordPatch::default()
            },
        )
    }

    fn resolve(&mut self, records: &mut RecordMap, date: NaiveDate) -> (DailyRecord, bool) {
        let key = date_key(date);
        if let Some(record) = records.get(&key) {
            return (record.clone(), false);
        }
        let record = default_record(date, self.rng.as_mut());
        if self.persist_defaults {
            records.insert(key, record.clone());
        }
        (record, true)
    }

    fn store_defaults(&self, records: &RecordMap) {
        if !self.persist_defaults {
            return;
        }
        if let Err(err) = self.storage.save(records) {
            warn!("failed to persist default daily data: {err}");
        }
    }
}

/// Placeholder values for a day with no stored record.
pub fn default_record(date: NaiveDate, rng: &mut dyn RandomSource) -> DailyRecord {
    DailyRecord {
        date: date_key(date),
        tiredness: rng.in_range(3, 7),
        steps: rng.in_range(6000, 10_999),
        calories_consumed: rng.in_range(1600, 1999),
        calories_burned: rng.in_range(2000, 2399),
        nutrition: Nutrition {
            protein: rng.in_range(70, 99),
            carbs: rng.in_range(60, 99),
            fats: rng.in_range(65, 94),
            fiber: rng.in_range(40, 89),
            vitamin_c: rng.in_range(80, 99),
            iron: rng.in_range(50, 89),
        },
    }
}

pub fn meal_boost(meal: MealType) -> &'static [(Nutrient, u32)] {
    match meal {
        MealType::Breakfast => &[
            (Nutrient::Protein, 15),
            (Nutrient::Carbs, 20),
            (Nutrient::VitaminC, 10),
        ],
        MealType::Lunch => &[
            (Nutrient::Protein, 25),
            (Nutrient::Carbs, 25),
            (Nutrient::Fiber, 15),
        ],
        MealType::Dinner => &[
            (Nutrient::Protein, 20),
            (Nutrient::Carbs, 20),
            (Nutrient::Iron, 15),
            (Nutrient::Fats, 15),
        ],
    }
}

fn boosted(mut nutrition: Nutrition, meal: MealType) -> Nutrition {
    for &(nutrient, delta) in meal_boost(meal) {
        let value = nutrition.get_mut(nutrient);
        *value = value.saturating_add(delta).min(MAX_NUTRIENT);
    }
    nutrition
}
