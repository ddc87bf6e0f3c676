use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::{format_game_time, OverlayState, TeamRecord, TeamSide, ViewModel};

/// Worker that logs a one-line match summary for each published overlay state
pub struct SummaryLoggerWorker {
    state_rx: watch::Receiver<OverlayState>,
    last_refresh: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

enum Line {
    Summary(String),
    Error(String),
}

impl SummaryLoggerWorker {
    /// Create a new summary logger
    pub fn new(state_rx: watch::Receiver<OverlayState>) -> Self {
        Self {
            state_rx,
            last_refresh: None,
            last_error: None,
        }
    }

    /// Run the worker loop
    pub async fn run(mut self) {
        info!("Summary logger started");

        while self.state_rx.changed().await.is_ok() {
            let state = self.state_rx.borrow_and_update().clone();
            match self.next_line(&state) {
                Some(Line::Summary(line)) => info!("{}", line),
                Some(Line::Error(message)) => warn!("{}", message),
                None => {}
            }
        }

        warn!("Overlay state channel closed");
    }

    /// Decide what, if anything, a state change is worth logging.
    ///
    /// Loading flips are skipped, a repeated error is logged once and a
    /// summary is logged once per refresh.
    fn next_line(&mut self, state: &OverlayState) -> Option<Line> {
        if state.loading {
            return None;
        }

        if let Some(error) = &state.error {
            if self.last_error.as_ref() == Some(error) {
                return None;
            }
            self.last_error = Some(error.clone());
            return Some(Line::Error(error.clone()));
        }
        self.last_error = None;

        if state.last_refresh == self.last_refresh {
            return None;
        }
        self.last_refresh = state.last_refresh;

        state.game_data.as_deref().map(|view| Line::Summary(summarize(view)))
    }
}

/// One-line summary of a view model
pub fn summarize(view: &ViewModel) -> String {
    let mut line = format!(
        "[{}] {} | {} | gold lead {:+.0}",
        format_game_time(view.game_time()),
        team_summary(view.team(TeamSide::Blue)),
        team_summary(view.team(TeamSide::Red)),
        view.gold_lead()
    );

    if let Some(event) = view.recent_events(1).first() {
        line.push_str(&format!(
            " | last: {} @ {}",
            event.event_name,
            format_game_time(event.event_time)
        ));
    }

    line
}

fn team_summary(team: &TeamRecord) -> String {
    format!(
        "{} {}/{}/{} {:.0}g {}drg {}twr",
        team.team.as_str(),
        team.score.kills,
        team.score.deaths,
        team.score.assists,
        team.total_gold,
        team.objectives.dragons,
        team.objectives.turrets
    )
}
