use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::{sleep_until, Instant};

use crate::engine::{BreakOracle, Probe, SearchState, Stage, Step, ThresholdSearchEngine};

/// Keeps at least `interval` between two drops
pub struct Pacer {
    next_drop: Instant,
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Pacer { next_drop: Instant::now(), interval }
    }

    pub async fn tick(&mut self) {
        if self.interval.is_zero() {
            return;
        }
        sleep_until(self.next_drop).await;
        self.next_drop = Instant::now() + self.interval;
    }
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos:>4}/{len:4} drops {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");
    progress.set_style(style);
    progress
}

pub fn describe(probe: &Probe) -> String {
    let probe_name = match probe.stage {
        Stage::Descent => "first",
        Stage::Scan => "second",
    };
    let outcome = if probe.broke { "broke" } else { "survived" };
    format!("the {} probe {} a drop from floor {}", probe_name, outcome, probe.floor)
}

/// Steps the search to its end, showing every drop on the progress bar
pub async fn play<'a, O: BreakOracle>(
    engine: &'a mut ThresholdSearchEngine<O>,
    interval: Duration,
    progress: &ProgressBar,
) -> &'a SearchState {
    let mut pacer = Pacer::new(interval);
    progress.set_length(engine.plan().worst_case_drops());
    loop {
        pacer.tick().await;
        match engine.advance() {
            Step::Dropped(probe) => {
                progress.inc(1);
                progress.set_message(describe(&probe));
            }
            Step::Finished(_) => break,
        }
    }
    progress.finish_with_message(engine.state().to_string());
    engine.state()
}
