use crate::clock::parse_date_key;
use crate::models::{
    CalorieBalance, DailyRecord, MetricsResponse, NutritionBar, Nutrient, StepProgress,
    TrendPoint, WeeklyAverages, MAX_NUTRIENT,
};

pub const STEP_GOAL: u32 = 10_000;

pub fn build_metrics(today: &DailyRecord, week: &[DailyRecord]) -> MetricsResponse {
    let tiredness_trend = week
        .iter()
        .map(|record| TrendPoint {
            day: weekday_label(&record.date),
            date: record.date.clone(),
            tiredness: record.tiredness,
        })
        .collect();

    let nutrition = Nutrient::ALL
        .iter()
        .map(|&nutrient| NutritionBar {
            name: nutrient.label(),
            value: today.nutrition.get(nutrient),
            max: MAX_NUTRIENT,
        })
        .collect();

    MetricsResponse {
        date: today.date.clone(),
        tiredness_trend,
        steps: step_progress(today.steps),
        calories: CalorieBalance {
            consumed: today.calories_consumed,
            burned: today.calories_burned,
            net: i64::from(today.calories_consumed) - i64::from(today.calories_burned),
        },
        nutrition,
        weekly: weekly_averages(week),
    }
}

pub fn step_progress(completed: u32) -> StepProgress {
    StepProgress {
        completed,
        goal: STEP_GOAL,
        remaining: STEP_GOAL.saturating_sub(completed),
        percent: (u64::from(completed) * 100 / u64::from(STEP_GOAL)).min(100) as u32,
    }
}

fn weekly_averages(week: &[DailyRecord]) -> WeeklyAverages {
    let denom = if week.is_empty() { 1.0 } else { week.len() as f64 };
    let sum = |field: fn(&DailyRecord) -> u32| -> f64 {
        week.iter().map(|record| f64::from(field(record))).sum::<f64>() / denom
    };

    WeeklyAverages {
        tiredness: sum(|r| r.tiredness),
        steps: sum(|r| r.steps),
        calories_consumed: sum(|r| r.calories_consumed),
        calories_burned: sum(|r| r.calories_burned),
    }
}

fn weekday_label(date: &str) -> String {
    parse_date_key(date)
        .map(|date| date.format("%a").to_string())
        .unwrap_or_else(|| date.to_string())
}
