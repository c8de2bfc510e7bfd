use crate::types::{Reward, UnitKind};

pub const XP_PER_LEVEL: u32 = 100;
pub const LEVEL_UP_MAX_HP: i32 = 10;
pub const LEVEL_UP_ATTACK: i32 = 2;
pub const LEVEL_UP_DEFENSE: i32 = 1;

pub struct UnitStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub vision_range: u32,
    pub move_delay_ms: u64,
    pub symbol: char,
}

pub fn get_unit_stats(kind: UnitKind) -> UnitStats {
    match kind {
        UnitKind::Player => UnitStats {
            hp: 100,
            attack: 20,
            defense: 5,
            vision_range: 0,
            move_delay_ms: 0,
            symbol: '@',
        },
        UnitKind::Warrior => UnitStats {
            hp: 50,
            attack: 15,
            defense: 8,
            vision_range: 4,
            move_delay_ms: 1200,
            symbol: 'W',
        },
        UnitKind::Archer => UnitStats {
            hp: 30,
            attack: 18,
            defense: 4,
            vision_range: 6,
            move_delay_ms: 1000,
            symbol: 'A',
        },
    }
}

/// Experience and gold granted to the player for a kill. The player itself
/// carries no bounty.
pub fn kill_reward(kind: UnitKind) -> Option<Reward> {
    match kind {
        UnitKind::Player => None,
        UnitKind::Warrior => Some(Reward { experience: 20, gold: 10 }),
        UnitKind::Archer => Some(Reward { experience: 15, gold: 8 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archers_see_farther_and_act_sooner_than_warriors() {
        let warrior = get_unit_stats(UnitKind::Warrior);
        let archer = get_unit_stats(UnitKind::Archer);
        assert!(archer.vision_range > warrior.vision_range);
        assert!(archer.move_delay_ms < warrior.move_delay_ms);
    }

    #[test]
    fn rewards_are_keyed_by_enemy_kind() {
        assert_eq!(kill_reward(UnitKind::Warrior), Some(Reward { experience: 20, gold: 10 }));
        assert_eq!(kill_reward(UnitKind::Archer), Some(Reward { experience: 15, gold: 8 }));
        assert_eq!(kill_reward(UnitKind::Player), None);
    }
}
