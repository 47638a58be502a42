use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Persisted shape: ISO date key to the record for that day.
pub type RecordMap = BTreeMap<String, DailyRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub fiber: u32,
    pub vitamin_c: u32,
    pub iron: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Protein,
    Carbs,
    Fats,
    Fiber,
    VitaminC,
    Iron,
}

impl Nutrition {
    pub fn get(&self, nutrient: Nutrient) -> u32 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fats => self.fats,
            Nutrient::Fiber => self.fiber,
            Nutrient::VitaminC => self.vitamin_c,
            Nutrient::Iron => self.iron,
        }
    }

    pub fn get_mut(&mut self, nutrient: Nutrient) -> &mut u32 {
        match nutrient {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fats => &mut self.fats,
            Nutrient::Fiber => &mut self.fiber,
            Nutrient::VitaminC => &mut self.vitamin_c,
            Nutrient::Iron => &mut self.iron,
        }
    }
}

impl Nutrient {
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fats,
        Nutrient::Fiber,
        Nutrient::VitaminC,
        Nutrient::Iron,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbs",
            Nutrient::Fats => "Fats",
            Nutrient::Fiber => "Fiber",
            Nutrient::VitaminC => "Vitamin C",
            Nutrient::Iron => "Iron",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: String,
    pub tiredness: u32,
    pub steps: u32,
    pub calories_consumed: u32,
    pub calories_burned: u32,
    pub nutrition: Nutrition,
}

/// Partial update for a day. There is no `date`: a record's key never
/// changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecordPatch {
    pub tiredness: Option<u32>,
    pub steps: Option<u32>,
    pub calories_consumed: Option<u32>,
    pub calories_burned: Option<u32>,
    pub nutrition: Option<Nutrition>,
}

pub const MAX_TIREDNESS: u32 = 10;
pub const MAX_NUTRIENT: u32 = 100;

impl RecordPatch {
    /// Rejects values outside the record's ranges: tiredness 0-10, each
    /// nutrient 0-100.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(tiredness) = self.tiredness.filter(|t| *t > MAX_TIREDNESS) {
            return Err(AppError::bad_request(format!(
                "tiredness must be between 0 and {MAX_TIREDNESS} (got {tiredness})"
            )));
        }
        if let Some(nutrition) = &self.nutrition {
            for nutrient in Nutrient::ALL {
                let value = nutrition.get(nutrient);
                if value > MAX_NUTRIENT {
                    return Err(AppError::bad_request(format!(
                        "{} must be between 0 and {MAX_NUTRIENT} (got {value})",
                        nutrient.label()
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn apply_to(self, record: &mut DailyRecord) {
        if let Some(tiredness) = self.tiredness {
            record.tiredness = tiredness;
        }
        if let Some(steps) = self.steps {
            record.steps = steps;
        }
        if let Some(consumed) = self.calories_consumed {
            record.calories_consumed = consumed;
        }
        if let Some(burned) = self.calories_burned {
            record.calories_burned = burned;
        }
        if let Some(nutrition) = self.nutrition {
            record.nutrition = nutrition;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            _ => Err(format!(
                "meal must be one of: breakfast, lunch, dinner (got '{value}')"
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub meal: String,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    pub connected: bool,
}

#[derive(Debug, Deserialize)]
pub struct HeartRateRequest {
    pub bpm: u32,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub day: String,
    pub date: String,
    pub tiredness: u32,
}

#[derive(Debug, Serialize)]
pub struct StepProgress {
    pub completed: u32,
    pub goal: u32,
    pub remaining: u32,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct CalorieBalance {
    pub consumed: u32,
    pub burned: u32,
    pub net: i64,
}

#[derive(Debug, Serialize)]
pub struct NutritionBar {
    pub name: &'static str,
    pub value: u32,
    pub max: u32,
}

#[derive(Debug, Serialize)]
pub struct WeeklyAverages {
    pub tiredness: f64,
    pub steps: f64,
    pub calories_consumed: f64,
    pub calories_burned: f64,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub date: String,
    pub tiredness_trend: Vec<TrendPoint>,
    pub steps: StepProgress,
    pub calories: CalorieBalance,
    pub nutrition: Vec<NutritionBar>,
    pub weekly: WeeklyAverages,
}

#[derive(Debug, Clone, Serialize)]
pub struct Doctor {
    pub name: &'static str,
    pub specialty: &'static str,
    pub distance: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertStatus {
    pub active: bool,
    pub heart_rate: u32,
    pub message: Option<String>,
    pub nearby_doctors: Vec<Doctor>,
}

#[derive(Debug, Serialize)]
pub struct VitalsResponse {
    pub connected: bool,
    pub device: Option<&'static str>,
    pub heart_rate: u32,
    pub blood_pressure: &'static str,
    pub glucose: u32,
    pub oxygen_saturation: u32,
    pub alert: AlertStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Patient {
    pub name: &'static str,
    pub age: u32,
    pub room: &'static str,
    pub condition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MedicalEvent {
    pub date: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub doctor: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub patient: Patient,
    pub events: Vec<MedicalEvent>,
}
