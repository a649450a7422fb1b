//! Responsibility assignment.
//!
//! On a working day the individually resting member is removed from the
//! roster and the remaining members receive the configured responsibility
//! labels in roster order. Members past the end of the label list get none.

use crate::calculation::DutyType;
use crate::models::{CrewMember, MemberDuty};

/// Assigns responsibilities for one crew on one date.
///
/// Returns one [`MemberDuty`] per roster member, in roster order. On
/// collective rest days nobody holds a responsibility.
///
/// # Example
///
/// ```
/// use shift_rota::calculation::{assign_responsibilities, DutyType};
/// use shift_rota::models::CrewMember;
///
/// let roster: Vec<CrewMember> = ["a", "b", "c"]
///     .iter()
///     .map(|id| CrewMember { id: id.to_string(), name: id.to_uppercase(), email: None })
///     .collect();
/// let labels = vec!["primary_contact".to_string(), "monitoring".to_string()];
///
/// let duties = assign_responsibilities(&roster, Some(0), DutyType::NightShift, &labels);
/// assert!(duties[0].is_resting);
/// assert_eq!(duties[0].responsibility, None);
/// assert_eq!(duties[1].responsibility.as_deref(), Some("primary_contact"));
/// assert_eq!(duties[2].responsibility.as_deref(), Some("monitoring"));
/// ```
pub fn assign_responsibilities(
    roster: &[CrewMember],
    resting: Option<usize>,
    duty_type: DutyType,
    labels: &[String],
) -> Vec<MemberDuty> {
    let mut next_label = labels.iter();

    roster
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let is_resting = resting == Some(index);
            let responsibility = match duty_type {
                DutyType::DayShift | DutyType::NightShift if !is_resting => {
                    next_label.next().cloned()
                }
                DutyType::DayShift | DutyType::NightShift | DutyType::RestDay => None,
            };

            MemberDuty {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                responsibility,
                is_resting,
            }
        })
        .collect()
}
