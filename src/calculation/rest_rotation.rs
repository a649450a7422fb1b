//! Individual rest rotation.
//!
//! During the back half of each work block exactly one crew member rests
//! individually per day. The resting member is looked up in a permutation
//! table keyed by `((cycle_number - 1) mod period, slot)`, so the answer is a
//! pure function of the crew configuration, the cycle number and the slot.
//!
//! The generated table walks the roster in one unbroken sequence: row `r`,
//! slot `s` holds member `(r * slots + s) mod n`. Consecutive eligible dates,
//! including the last slot of one block and the first slot of the next, always
//! name successive members, so nobody rests twice in a row while `n >= 2`.
//! Over one period of `n` cycles every member rests exactly `slots` times.
//!
//! The first rotation slot of cycle 1 has no resting member: there is no
//! earlier rotation to continue from.

use crate::models::{Crew, RotationRule};

/// Maps a block day onto a rotation slot index.
///
/// Returns `None` for rest days (`day_in_block == 0`) and for block days
/// before the crew's rest window opens.
///
/// # Example
///
/// ```
/// use shift_rota::calculation::rest_slot;
///
/// // 6-day block, window opens on block day 4
/// assert_eq!(rest_slot(3, 4, 6), None);
/// assert_eq!(rest_slot(4, 4, 6), Some(0));
/// assert_eq!(rest_slot(6, 4, 6), Some(2));
/// assert_eq!(rest_slot(0, 4, 6), None);
/// ```
pub fn rest_slot(day_in_block: u32, window_start_day: u32, work_days: u32) -> Option<u32> {
    if day_in_block == 0 || day_in_block < window_start_day || day_in_block > work_days {
        return None;
    }
    Some(day_in_block - window_start_day)
}

/// Returns the roster index of the member resting in `slot` of `cycle_number`.
///
/// `None` when the slot is outside the crew's rest window, or for the first
/// slot of cycle 1.
pub fn resting_member_index(crew: &Crew, cycle_number: i64, slot: u32) -> Option<usize> {
    if slot >= crew.rest_slot_count() || crew.roster.is_empty() {
        return None;
    }
    if cycle_number == 1 && slot == 0 {
        return None;
    }

    match crew.rotation_rule {
        RotationRule::PermutationTable => {
            let period = crew.rotation_table.len() as i64;
            if period == 0 {
                return None;
            }
            let row = (cycle_number - 1).rem_euclid(period) as usize;
            crew.rotation_table[row].get(slot as usize).copied()
        }
        RotationRule::LegacyModulo => {
            let roster_len = crew.roster.len() as i64;
            let slots = i64::from(crew.rest_slot_count());
            let sequence = (cycle_number - 1) * slots + i64::from(slot);
            Some(sequence.rem_euclid(roster_len) as usize)
        }
    }
}

/// Builds the default permutation table for a roster.
///
/// # Example
///
/// ```
/// use shift_rota::calculation::sequential_rotation_table;
///
/// let table = sequential_rotation_table(4, 3);
/// assert_eq!(table, vec![
///     vec![0, 1, 2],
///     vec![3, 0, 1],
///     vec![2, 3, 0],
///     vec![1, 2, 3],
/// ]);
/// ```
pub fn sequential_rotation_table(roster_len: usize, slots: u32) -> Vec<Vec<usize>> {
    let slots = slots as usize;
    (0..roster_len)
        .map(|row| {
            (0..slots)
                .map(|slot| (row * slots + slot) % roster_len)
                .collect()
        })
        .collect()
}

/// Checks a hand-authored table against a roster and rest window.
///
/// Every row must have one entry per slot and entries must index the roster.
/// No member may rest on two consecutive eligible dates: adjacent slots in a
/// row must differ, and so must the last slot of each row and the first slot
/// of the row after it, wrapping from the last row back to the first. The
/// first-cycle exception only ever removes a rest, so it is not considered.
pub fn validate_rotation_table(
    table: &[Vec<usize>],
    roster_len: usize,
    slots: u32,
) -> Result<(), String> {
    if table.is_empty() {
        return Err("rotation_table must have at least one row".to_string());
    }

    for (row_index, row) in table.iter().enumerate() {
        if row.len() != slots as usize {
            return Err(format!(
                "rotation_table row {} has {} entries, expected {}",
                row_index,
                row.len(),
                slots
            ));
        }
        if let Some(&member) = row.iter().find(|&&m| m >= roster_len) {
            return Err(format!(
                "rotation_table row {} references member {} but the roster has {} members",
                row_index, member, roster_len
            ));
        }
        if row.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(format!(
                "rotation_table row {} rests the same member on consecutive slots",
                row_index
            ));
        }
    }

    for (row_index, row) in table.iter().enumerate() {
        let next_index = (row_index + 1) % table.len();
        if let (Some(last), Some(first)) = (row.last(), table[next_index].first()) {
            if last == first {
                return Err(format!(
                    "rotation_table rests member {} on consecutive eligible dates across rows {} and {}",
                    last, row_index, next_index
                ));
            }
        }
    }

    Ok(())
}

/// Returns true if every roster member appears equally often in the table.
pub fn is_balanced(table: &[Vec<usize>], roster_len: usize) -> bool {
    let mut counts = vec![0usize; roster_len];
    for &member in table.iter().flatten() {
        if let Some(count) = counts.get_mut(member) {
            *count += 1;
        }
    }
    counts.windows(2).all(|pair| pair[0] == pair[1])
}
