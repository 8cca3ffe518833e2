use sayaw_core::feedback::DisplayBoard;
use sayaw_core::gameplay::performance::PerformanceSummary;
use sayaw_core::input::{EventProducer, EventQueue};
use sayaw_core::player::{NameEntry, NameError};
use sayaw_core::time::timeline::SpawnTimeline;
use sayaw_core::{ScoreSession, ScoringConfig, SpawnerConfig};
use score_ledger::ScoreLedger;
use wall_schema::SessionScript;

pub struct SessionReport {
    pub rows: Vec<String>,
    pub summary: PerformanceSummary,
}

/// Types `raw` on the virtual keyboard: spaces and letters only, capped in length.
pub fn enter_name(raw: &str) -> Result<String, NameError> {
    let mut entry = NameEntry::new();
    for c in raw.chars() {
        if c == ' ' {
            entry.push_space();
        } else {
            entry.push_letter(c);
        }
    }
    entry.confirm()
}

/// Replays a recorded session: spawns walls on schedule, feeds strikes in time
/// order, reports timed-out walls as missed and saves the final score.
pub fn run_session(
    script: &SessionScript,
    config: ScoringConfig,
    spawner: SpawnerConfig,
    player_name: &str,
    ledger: &dyn ScoreLedger,
) -> anyhow::Result<SessionReport> {
    let (mut board, handle) = DisplayBoard::new();
    let mut session = ScoreSession::new(config, handle)?.with_player_name(player_name);
    let queue = EventQueue::new();
    let spawner_events = queue.producer();
    let collider_events = queue.producer();
    let mut timeline = SpawnTimeline::new(script.walls.clone(), spawner)?;

    let mut strikes = script.strikes.clone();
    strikes.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut rows = Vec::new();
    rows.push("Time(s)  | Event                          | Score | Feedback".to_string());
    rows.push("---------|--------------------------------|-------|------------------".to_string());

    for strike in &strikes {
        advance(
            &mut timeline,
            &queue,
            &spawner_events,
            &mut session,
            &mut board,
            &mut rows,
            strike.time,
            false,
        );

        collider_events.strike(strike.wall, strike.body_part, strike.position);
        let resolved = session.pump(&queue);
        board.process(strike.time);

        let event = format!("{} strikes {}", strike.body_part, strike.wall);
        rows.push(row(strike.time, &event, &session, &board));

        for resolution in resolved {
            timeline.retire(resolution.wall);
            let step = if resolution.step_correct {
                "Correct Step!"
            } else {
                "Wrong Step!"
            };
            let event = format!("{} resolved: {}", resolution.wall, step);
            rows.push(row(strike.time, &event, &session, &board));
        }
    }

    // Let the rest of the level play out untouched.
    while let Some(next) = timeline.next_event_time() {
        advance(
            &mut timeline,
            &queue,
            &spawner_events,
            &mut session,
            &mut board,
            &mut rows,
            next,
            true,
        );
    }

    let summary = session.finish(ledger, &script.mode);
    Ok(SessionReport { rows, summary })
}

#[allow(clippy::too_many_arguments)]
fn advance(
    timeline: &mut SpawnTimeline,
    queue: &EventQueue,
    spawner: &EventProducer,
    session: &mut ScoreSession,
    board: &mut DisplayBoard,
    rows: &mut Vec<String>,
    now: f64,
    through: bool,
) {
    for wall in timeline.due(now) {
        spawner.spawn(wall);
    }
    // After the last strike a deadline of exactly `now` counts as expired.
    let expired = if through {
        timeline.expired_through(now)
    } else {
        timeline.expired(now)
    };
    for wall in &expired {
        spawner.missed(*wall);
    }

    session.pump(queue);
    board.process(now);

    for wall in expired {
        rows.push(row(now, &format!("{wall} missed"), session, board));
    }
}

fn row(time: f64, event: &str, session: &ScoreSession, board: &DisplayBoard) -> String {
    let feedback = board.feedback_text().unwrap_or("").replace('\n', " ");
    format!(
        "{:8.3} | {:<30} | {:>5} | {}",
        time,
        event,
        session.total_score(),
        feedback
    )
    .trim_end()
    .to_string()
}
