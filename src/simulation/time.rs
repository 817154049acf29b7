use std::fmt;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// In-game calendar. One schedule run is one day.
#[derive(Resource, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GameTime {
    pub day: u32,
    pub week: u32,
    pub month: u32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self {
            day: 1,
            week: 1,
            month: 1,
        }
    }
}

impl GameTime {
    pub fn advance_day(&mut self) {
        self.day += 1;
        if self.day % 7 == 0 {
            self.week += 1;
        }
        if self.day % 28 == 0 {
            self.month += 1;
        }
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Day {}, Week {}, Month {}", self.day, self.week, self.month)
    }
}

/// System: advances the calendar by one day.
pub fn advance_day_system(mut time: ResMut<GameTime>) {
    time.advance_day();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weeks_and_months_roll_over() {
        let mut time = GameTime::default();
        for _ in 0..27 {
            time.advance_day();
        }
        assert_eq!(time.day, 28);
        assert_eq!(time.week, 5);
        assert_eq!(time.month, 2);
        assert_eq!(time.to_string(), "Day 28, Week 5, Month 2");
    }
}
