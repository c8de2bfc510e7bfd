use crate::clock::ManualClock;
use crate::game::{Game, PlayerSnapshot, SetupError};
use crate::journal::{InputJournal, InputPayload, JOURNAL_FORMAT_VERSION};
use crate::types::{Direction, GameError, TurnPhase};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("unsupported journal format version {found} (expected {JOURNAL_FORMAT_VERSION})")]
    UnsupportedVersion { found: u16 },
    #[error("journal setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error("input {seq} is not a valid direction ({dx}, {dy})")]
    InvalidDirection { seq: u64, dx: i8, dy: i8 },
    #[error("input {seq} moves the clock back from {previous_ms} ms to {clock_ms} ms")]
    ClockWentBackwards { seq: u64, previous_ms: u64, clock_ms: u64 },
    #[error("input {seq} was rejected: {error}")]
    Rejected { seq: u64, error: GameError },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_snapshot_hash: u64,
    pub final_turn: u64,
    pub phase: TurnPhase,
    pub player: PlayerSnapshot,
    pub enemies_remaining: usize,
}

/// Rebuilds the session from the journal's seed and config, then applies
/// every input in order. Each turn's enemy phase runs on the clock sample
/// recorded with it, so cooldowns resolve exactly as they did live.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: journal.format_version });
    }
    let clock = ManualClock::new();
    let mut game = Game::with_clock(journal.seed, &journal.config, Box::new(clock.clone()))?;
    let mut previous_ms = 0;

    for record in &journal.inputs {
        match record.payload {
            InputPayload::Direction { dx, dy, clock_ms } => {
                let seq = record.seq;
                let direction =
                    Direction::new(dx, dy).ok_or(ReplayError::InvalidDirection { seq, dx, dy })?;
                if clock_ms < previous_ms {
                    return Err(ReplayError::ClockWentBackwards { seq, previous_ms, clock_ms });
                }
                previous_ms = clock_ms;
                clock.set(clock_ms);
                game.submit_direction(direction)
                    .map_err(|error| ReplayError::Rejected { seq, error })?;
            }
            InputPayload::Restart => game.restart(),
        }
    }

    Ok(ReplayResult {
        final_snapshot_hash: game.snapshot_hash(),
        final_turn: game.turn(),
        phase: game.phase(),
        player: game.player_snapshot(),
        enemies_remaining: game.state().roster.len(),
    })
}
