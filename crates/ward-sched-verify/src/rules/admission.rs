// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Patient admission scheduling rules: room capacity, gender and age mixing,
//! room compatibility. All of them read the per-room-per-day occupancy
//! aggregates, which already include the fixed occupants.

use crate::rules::{RuleTrace, ScheduleRule};
use ward_sched_model::prelude::{Cost, Instance, Roster};

/// Hard: occupancy beyond a room's capacity, per room and day.
pub struct RoomCapacity;

impl ScheduleRule for RoomCapacity {
    fn name(&self) -> &'static str {
        "RoomCapacity"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for r in instance.room_indices() {
            for d in 0..instance.days() {
                let occupancy = roster.people_in(r, d).len();
                let capacity = instance.room(r).capacity();
                if occupancy > capacity {
                    cost += (occupancy - capacity) as Cost;
                    trace.note(|| {
                        format!(
                            "Room {} is overloaded by {} on day {}",
                            instance.room(r).id(),
                            occupancy - capacity,
                            d
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Hard: per room and day, the number of people of the minority gender.
/// Magnitude-valued, not boolean.
pub struct RoomGenderMix;

impl ScheduleRule for RoomGenderMix {
    fn name(&self) -> &'static str {
        "RoomGenderMix"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for r in instance.room_indices() {
            for d in 0..instance.days() {
                let a = roster.gender_a_count(r, d);
                let b = roster.gender_b_count(r, d);
                cost += a.min(b) as Cost;
                if a > 0 && b > 0 {
                    trace.note(|| {
                        format!(
                            "Room {} is gender-mixed {}/{} on day {}",
                            instance.room(r).id(),
                            a,
                            b,
                            d
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Hard: a patient placed in a room from their incompatible set.
pub struct PatientRoomCompatibility;

impl ScheduleRule for PatientRoomCompatibility {
    fn name(&self) -> &'static str {
        "PatientRoomCompatibility"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for p in instance.patient_indices() {
            let Some(room) = roster.room_of(p) else {
                continue;
            };
            if instance.patient(p).is_room_incompatible(room) {
                cost += 1;
                trace.note(|| {
                    format!(
                        "Room {} is incompatible with patient {}",
                        instance.room(room).id(),
                        instance.patient(p).id()
                    )
                });
            }
        }
        cost
    }
}

/// Soft: per occupied room and day, the spread between the youngest and
/// oldest age groups present.
pub struct RoomAgeMix;

impl ScheduleRule for RoomAgeMix {
    fn name(&self) -> &'static str {
        "RoomAgeMix"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for r in instance.room_indices() {
            for d in 0..instance.days() {
                let people = roster.people_in(r, d);
                let Some(&first) = people.first() else {
                    continue;
                };
                let mut min = instance.person_age_group(first).get();
                let mut max = min;
                for &person in &people[1..] {
                    let g = instance.person_age_group(person).get();
                    if g < min {
                        min = g;
                    } else if g > max {
                        max = g;
                    }
                }
                if max > min {
                    cost += (max - min) as Cost;
                    trace.note(|| {
                        format!(
                            "Room {} is age-mixed {}/{} on day {}",
                            instance.room(r).id(),
                            min,
                            max,
                            d
                        )
                    });
                }
            }
        }
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixture::{instance, p, r, t};
    use ward_sched_model::prelude::RosterBuilder;

    #[test]
    fn test_room_capacity_charges_exactly_the_excess() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        // R1 holds one person; P2 and P3 both stay there on day 1.
        b.assign_patient(p(2), 1, r(1), t(0)).unwrap();
        b.assign_patient(p(3), 1, r(1), t(0)).unwrap();
        let roster = b.finish();
        let mut trace = RuleTrace::enabled();
        assert_eq!(RoomCapacity.evaluate(&inst, &roster, &mut trace), 1);
        assert_eq!(trace.lines().len(), 1);
        assert!(trace.lines()[0].contains("R1"));
    }

    #[test]
    fn test_gender_mix_counts_the_minority() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        // Two gender-A patients join the gender-B occupant in R0 on day 0;
        // both stays end before day 1, where the occupant is alone again.
        b.assign_patient(p(1), 0, r(0), t(0)).unwrap();
        b.assign_patient(p(3), 0, r(0), t(0)).unwrap();
        let roster = b.finish();
        assert_eq!(roster.gender_a_count(r(0), 0), 2);
        assert_eq!(roster.gender_b_count(r(0), 0), 1);
        let mut trace = RuleTrace::disabled();
        assert_eq!(RoomGenderMix.evaluate(&inst, &roster, &mut trace), 1);
    }

    #[test]
    fn test_single_gender_room_is_free() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        // R2 sees only gender-A patients.
        b.assign_patient(p(1), 0, r(2), t(0)).unwrap();
        b.assign_patient(p(3), 0, r(2), t(0)).unwrap();
        let roster = b.finish();
        let mut trace = RuleTrace::disabled();
        // The occupant's room R0 stays single-gender too.
        assert_eq!(RoomGenderMix.evaluate(&inst, &roster, &mut trace), 0);
    }

    #[test]
    fn test_room_compatibility_flags_forbidden_room() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        // P1 must not go to R1.
        b.assign_patient(p(1), 0, r(1), t(0)).unwrap();
        b.assign_patient(p(3), 0, r(2), t(0)).unwrap();
        let roster = b.finish();
        let mut trace = RuleTrace::enabled();
        assert_eq!(
            PatientRoomCompatibility.evaluate(&inst, &roster, &mut trace),
            1
        );
        assert!(trace.lines()[0].contains("P1"));
    }

    #[test]
    fn test_age_mix_spread_per_room_day() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        // Day 0 in R0: elderly occupant (group 2) and child patient (group
        // 0) spread 2; day 1 the occupant is alone.
        b.assign_patient(p(1), 0, r(0), t(0)).unwrap();
        let roster = b.finish();
        let mut trace = RuleTrace::disabled();
        assert_eq!(RoomAgeMix.evaluate(&inst, &roster, &mut trace), 2);
    }

    #[test]
    fn test_empty_rooms_score_zero() {
        let inst = instance();
        let roster = RosterBuilder::new(&inst).finish();
        let mut trace = RuleTrace::disabled();
        assert_eq!(RoomCapacity.evaluate(&inst, &roster, &mut trace), 0);
        assert_eq!(RoomGenderMix.evaluate(&inst, &roster, &mut trace), 0);
        assert_eq!(
            PatientRoomCompatibility.evaluate(&inst, &roster, &mut trace),
            0
        );
        // A lone occupant never mixes ages.
        assert_eq!(RoomAgeMix.evaluate(&inst, &roster, &mut trace), 0);
    }
}
