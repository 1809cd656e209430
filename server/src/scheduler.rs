//! Periodic analysis loop
//!
//! On every tick the analyzer runs for each identity that created a trigger.
//! Reports are logged and then dropped; nothing is persisted.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use campaign_manager_core::{
    analysis,
    core::{factory::ConfiguredAppState, AppState},
    log_debug, log_info,
    storage::StorageImpl,
};

/// Run the analyzer once for every registered identity; returns how many ran
pub fn run_scheduled_analysis<S: StorageImpl>(app_state: &AppState<S>) -> usize {
    let users = app_state.triggers.registered();
    for user in &users {
        let report = analysis::analyze(&app_state.space(user.clone()));
        log_info!("Scheduled analysis for {}: {}", user, report.summary());
        log_debug!("Scheduled analysis report for {}: {:?}", user, report);
    }
    users.len()
}

/// Spawn the interval task for one concrete state. The first run happens one
/// full period after startup.
pub fn spawn_analysis_loop<S: StorageImpl>(app_state: Arc<AppState<S>>) -> Option<JoinHandle<()>> {
    let scheduler = &app_state.config.scheduler;
    if !scheduler.enabled {
        log_info!("Periodic analysis disabled");
        return None;
    }

    let period = Duration::from_secs(scheduler.interval_secs);
    log_info!("Periodic analysis every {}s", period.as_secs());
    Some(tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let ran = run_scheduled_analysis(&app_state);
            log_debug!("Periodic analysis tick finished for {} identities", ran);
        }
    }))
}

/// Spawn the interval task for whichever backend is configured
pub fn spawn_scheduler(configured_app_state: &ConfiguredAppState) -> Option<JoinHandle<()>> {
    match configured_app_state {
        ConfiguredAppState::Memory { app_state } => spawn_analysis_loop(app_state.clone()),
        ConfiguredAppState::File { app_state } => spawn_analysis_loop(app_state.clone()),
    }
}
