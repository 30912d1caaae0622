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

//! Nurse-to-room assignment rules: qualification, presence, coverage,
//! workload and continuity of care.

use crate::rules::{RuleTrace, ScheduleRule};
use fixedbitset::FixedBitSet;
use ward_sched_model::common::NurseIdx;
use ward_sched_model::prelude::{Cost, Instance, Person, Roster};

/// Soft: per covered room/shift and present person, the gap between the
/// skill level required and the covering nurse's level. Shifts with no
/// covering nurse contribute nothing here; UncoveredRoom prices absence.
pub struct RoomSkillLevel;

impl ScheduleRule for RoomSkillLevel {
    fn name(&self) -> &'static str {
        "RoomSkillLevel"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for r in instance.room_indices() {
            for s in 0..instance.shifts() {
                let Some(n) = roster.nurse_in(r, s) else {
                    continue;
                };
                let nurse_skill = instance.nurse(n).skill_level();
                let d = instance.calendar().day_of(s);
                for &person in roster.people_in(r, d) {
                    let required = roster.skill_required_at(instance, person, s);
                    if required > nurse_skill {
                        cost += required - nurse_skill;
                        trace.note(|| {
                            let kind = match person {
                                Person::Patient(_) => "patient",
                                Person::Occupant(_) => "occupant",
                            };
                            format!(
                                "Nurse {} is underqualified for {} {} in room {} in shift {}",
                                instance.nurse(n).id(),
                                kind,
                                instance.person_id(person),
                                instance.room(r).id(),
                                instance.shift_description(s)
                            )
                        });
                    }
                }
            }
        }
        cost
    }
}

/// Hard: a room/shift covered by a nurse who does not work that shift.
/// Counted independently of whether the room holds anyone.
pub struct NursePresence;

impl ScheduleRule for NursePresence {
    fn name(&self) -> &'static str {
        "NursePresence"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for r in instance.room_indices() {
            for s in 0..instance.shifts() {
                let Some(n) = roster.nurse_in(r, s) else {
                    continue;
                };
                if !instance.nurse(n).is_working(s) {
                    cost += 1;
                    trace.note(|| {
                        format!(
                            "Nurse {} assigned in a non-working shift: {}@{}",
                            instance.nurse(n).id(),
                            instance.calendar().day_of(s),
                            instance.shift_name(instance.calendar().shift_of_day(s))
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Hard: a shift of an occupied room/day with no covering nurse.
pub struct UncoveredRoom;

impl ScheduleRule for UncoveredRoom {
    fn name(&self) -> &'static str {
        "UncoveredRoom"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for r in instance.room_indices() {
            for s in 0..instance.shifts() {
                let d = instance.calendar().day_of(s);
                if roster.nurse_in(r, s).is_none() && !roster.people_in(r, d).is_empty() {
                    cost += 1;
                    trace.note(|| {
                        format!(
                            "Room {} is uncovered in shift {}",
                            instance.room(r).id(),
                            instance.shift_description(s)
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Soft: per nurse and working shift, accumulated workload beyond the
/// shift's maximum load.
pub struct ExcessiveNurseWorkload;

impl ScheduleRule for ExcessiveNurseWorkload {
    fn name(&self) -> &'static str {
        "ExcessiveNurseWorkload"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for n in instance.nurse_indices() {
            for &s in instance.nurse(n).working_shifts() {
                let load = roster.nurse_load(n, s);
                let max = instance.nurse(n).max_load(s);
                if load > max {
                    cost += load - max;
                    trace.note(|| {
                        format!(
                            "Excessive workload {} for nurse {} in shift {}",
                            load - max,
                            instance.nurse(n).id(),
                            instance.shift_description(s)
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Soft: per occupant and per scheduled patient, the number of distinct
/// nurses who ever cared for them. Uncovered shifts are ignored; a patient
/// stay running past the horizon only counts the on-calendar part.
pub struct ContinuityOfCare;

impl ContinuityOfCare {
    fn distinct_carers(slots: &[Option<NurseIdx>], limit: usize, num_nurses: usize) -> Cost {
        let mut seen = FixedBitSet::with_capacity(num_nurses);
        let mut count = 0;
        for slot in &slots[..limit.min(slots.len())] {
            if let Some(n) = slot
                && !seen.contains(n.get())
            {
                seen.insert(n.get());
                count += 1;
            }
        }
        count
    }
}

impl ScheduleRule for ContinuityOfCare {
    fn name(&self) -> &'static str {
        "ContinuityOfCare"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for o in instance.occupant_indices() {
            let person = Person::Occupant(o);
            let slots = roster.carers_of(person);
            let count = Self::distinct_carers(slots, slots.len(), instance.num_nurses());
            if count > 0 {
                cost += count;
                trace.note(|| {
                    format!(
                        "{} distinct nurses for occupant {}",
                        count,
                        instance.occupant(o).id()
                    )
                });
            }
        }
        for p in instance.patient_indices() {
            let Some(day) = roster.admission_day(p) else {
                continue;
            };
            let person = Person::Patient(p);
            let limit = (instance.days() - day) * instance.shifts_per_day();
            let count =
                Self::distinct_carers(roster.carers_of(person), limit, instance.num_nurses());
            if count > 0 {
                cost += count;
                trace.note(|| {
                    format!(
                        "{} distinct nurses for patient {}",
                        count,
                        instance.patient(p).id()
                    )
                });
            }
        }
        cost
    }
}
