use crate::state::AppState;
use crate::vitals::is_emergency;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, warn};

/// Background refresh task. Dropping the handle cancels it.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn spawn_step_ticker(state: AppState, period: Duration) -> TickerHandle {
    let task = tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticks.tick().await;
        loop {
            ticks.tick().await;
            match state
                .with_store(|store| store.simulate_step_increment())
                .await
                .and_then(|result| result)
            {
                Ok(record) => debug!(date = %record.date, steps = record.steps, "step tick"),
                Err(err) => error!("step tick failed: {err}"),
            }
        }
    });
    TickerHandle { task }
}

pub fn spawn_vitals_ticker(state: AppState, period: Duration) -> TickerHandle {
    let task = tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticks.tick().await;
        loop {
            ticks.tick().await;
            let mut vitals = state.vitals.lock().await;
            if vitals.tick() && is_emergency(vitals.heart_rate()) {
                warn!(bpm = vitals.heart_rate(), "emergency heart rate reading");
            }
        }
    });
    TickerHandle { task }
}
