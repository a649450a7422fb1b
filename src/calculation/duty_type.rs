//! Duty type resolution.
//!
//! Splits the work block of a cycle evenly into a day-shift sub-block followed
//! by a night-shift sub-block; every later position is collective rest.

use serde::{Deserialize, Serialize};

/// The duty of a crew on a given date.
///
/// # Example
///
/// ```
/// use shift_rota::calculation::DutyType;
///
/// assert!(DutyType::NightShift.is_working());
/// assert!(!DutyType::RestDay.is_working());
/// assert_eq!(serde_json::to_string(&DutyType::DayShift).unwrap(), "\"DAY_SHIFT\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyType {
    /// First half of the work block.
    DayShift,
    /// Second half of the work block.
    NightShift,
    /// Collective rest after the work block.
    RestDay,
}

impl DutyType {
    /// Returns true on day and night shifts.
    pub fn is_working(self) -> bool {
        match self {
            DutyType::DayShift | DutyType::NightShift => true,
            DutyType::RestDay => false,
        }
    }
}

impl std::fmt::Display for DutyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DutyType::DayShift => write!(f, "DAY_SHIFT"),
            DutyType::NightShift => write!(f, "NIGHT_SHIFT"),
            DutyType::RestDay => write!(f, "REST_DAY"),
        }
    }
}

/// Result of resolving a cycle position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyResolution {
    /// The duty type.
    pub duty_type: DutyType,
    /// 1-based day inside the work block; 0 on rest days.
    pub day_in_block: u32,
}

/// Resolves the duty type for a position inside a cycle.
///
/// `work_days` is even and no larger than `cycle_length`; both come from
/// crew configuration, so shapes such as 4-on/4-off need no code change.
///
/// # Example
///
/// ```
/// use shift_rota::calculation::{resolve_duty, DutyType};
///
/// let day = resolve_duty(2, 6, 9);
/// assert_eq!(day.duty_type, DutyType::DayShift);
/// assert_eq!(day.day_in_block, 3);
///
/// let night = resolve_duty(3, 6, 9);
/// assert_eq!(night.duty_type, DutyType::NightShift);
/// assert_eq!(night.day_in_block, 4);
///
/// let rest = resolve_duty(8, 6, 9);
/// assert_eq!(rest.duty_type, DutyType::RestDay);
/// assert_eq!(rest.day_in_block, 0);
/// ```
pub fn resolve_duty(position: u32, work_days: u32, cycle_length: u32) -> DutyResolution {
    debug_assert!(position < cycle_length, "position outside cycle");

    let day_block = work_days / 2;

    let duty_type = if position < day_block {
        DutyType::DayShift
    } else if position < work_days {
        DutyType::NightShift
    } else {
        DutyType::RestDay
    };

    let day_in_block = match duty_type {
        DutyType::DayShift | DutyType::NightShift => position + 1,
        DutyType::RestDay => 0,
    };

    DutyResolution {
        duty_type,
        day_in_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_nine_day_cycle_layout() {
        let expected = [
            (DutyType::DayShift, 1),
            (DutyType::DayShift, 2),
            (DutyType::DayShift, 3),
            (DutyType::NightShift, 4),
            (DutyType::NightShift, 5),
            (DutyType::NightShift, 6),
            (DutyType::RestDay, 0),
            (DutyType::RestDay, 0),
            (DutyType::RestDay, 0),
        ];

        for (position, (duty_type, day_in_block)) in expected.into_iter().enumerate() {
            let resolved = resolve_duty(position as u32, 6, 9);
            assert_eq!(resolved.duty_type, duty_type, "position {}", position);
            assert_eq!(resolved.day_in_block, day_in_block, "position {}", position);
        }
    }

    #[test]
    fn test_four_on_four_off() {
        assert_eq!(resolve_duty(1, 4, 8).duty_type, DutyType::DayShift);
        assert_eq!(resolve_duty(2, 4, 8).duty_type, DutyType::NightShift);
        assert_eq!(resolve_duty(3, 4, 8).day_in_block, 4);
        assert_eq!(resolve_duty(4, 4, 8).duty_type, DutyType::RestDay);
        assert_eq!(resolve_duty(7, 4, 8).duty_type, DutyType::RestDay);
    }

    #[test]
    fn test_block_without_collective_rest() {
        assert_eq!(resolve_duty(5, 6, 6).duty_type, DutyType::NightShift);
    }

    #[test]
    fn test_display() {
        assert_eq!(DutyType::DayShift.to_string(), "DAY_SHIFT");
        assert_eq!(DutyType::NightShift.to_string(), "NIGHT_SHIFT");
        assert_eq!(DutyType::RestDay.to_string(), "REST_DAY");
    }

    proptest! {
        #[test]
        fn rest_day_iff_day_in_block_is_zero(half in 1u32..10, rest in 0u32..10, seed in 0u32..1000) {
            let work_days = half * 2;
            let cycle_length = work_days + rest;
            let position = seed % cycle_length;

            let resolved = resolve_duty(position, work_days, cycle_length);
            prop_assert_eq!(resolved.day_in_block == 0, resolved.duty_type == DutyType::RestDay);
            prop_assert!(resolved.day_in_block <= work_days);
        }
    }
}
