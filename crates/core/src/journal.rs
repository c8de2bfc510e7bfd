use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::types::Direction;

pub const JOURNAL_FORMAT_VERSION: u16 = 2;

/// Everything needed to rebuild a session: seed, config and the ordered
/// player inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub seed: u64,
    #[serde(default)]
    pub config: GameConfig,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    /// `clock_ms` is the sample the turn's enemy phase ran on.
    Direction { dx: i8, dy: i8, clock_ms: u64 },
    Restart,
}

impl InputJournal {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: env!("CARGO_PKG_VERSION").to_string(),
            seed,
            config,
            inputs: Vec::new(),
        }
    }

    pub fn append_direction(&mut self, direction: Direction, clock_ms: u64) {
        let offset = direction.offset();
        self.append(InputPayload::Direction { dx: offset.dx(), dy: offset.dy(), clock_ms });
    }

    pub fn append_restart(&mut self) {
        self.append(InputPayload::Restart);
    }

    pub fn append(&mut self, payload: InputPayload) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_numbered_in_append_order() {
        let mut journal = InputJournal::new(7, GameConfig::default());
        journal.append_direction(Direction::LEFT, 1000);
        journal.append_restart();

        assert_eq!(
            journal.inputs,
            vec![
                InputRecord {
                    seq: 0,
                    payload: InputPayload::Direction { dx: -1, dy: 0, clock_ms: 1000 },
                },
                InputRecord { seq: 1, payload: InputPayload::Restart },
            ]
        );
    }

    #[test]
    fn journal_without_config_uses_defaults() {
        let raw = r#"{"format_version":2,"build_id":"dev","seed":3,"inputs":[]}"#;
        let journal: InputJournal = serde_json::from_str(raw).expect("valid journal");
        assert_eq!(journal.config, GameConfig::default());
    }
}
