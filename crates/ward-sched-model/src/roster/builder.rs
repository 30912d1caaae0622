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

//! The only write path into a [`Roster`]. Every mutator updates all affected
//! derived aggregates in the same call, so patient and nurse assignments for
//! the same room/shift may arrive in either order: whichever lands second
//! finds the first already recorded in the occupancy list or the coverage
//! grid and completes the workload/carer bookkeeping itself.

use crate::common::{NurseIdx, PatientIdx, Person, RoomIdx, TheaterIdx};
use crate::instance::Instance;
use crate::people::Gender;
use crate::roster::err::{
    AdmissionOutOfCalendarError, AssignPatientError, DuplicateAssignmentError,
    InvalidNurseAssignmentError,
};
use crate::roster::state::Roster;

pub struct RosterBuilder<'i> {
    instance: &'i Instance,
    roster: Roster,
}

impl<'i> RosterBuilder<'i> {
    /// A fresh roster with the fixed occupants already seeded into their
    /// rooms.
    pub fn new(instance: &'i Instance) -> Self {
        let mut builder = Self {
            instance,
            roster: Roster::sized_for(instance),
        };
        builder.reset();
        builder
    }

    /// Clears every patient decision and every aggregate, then re-seeds room
    /// occupancy and gender counts for the fixed occupants. Occupants are
    /// present from day 0 regardless of any patient assignment.
    pub fn reset(&mut self) {
        let r = &mut self.roster;
        r.admission_day.fill(None);
        r.room_of.fill(None);
        r.theater_of.fill(None);
        for list in &mut r.room_day_people {
            list.clear();
        }
        r.room_day_gender_a.fill(0);
        r.room_day_gender_b.fill(0);
        r.room_shift_nurse.fill(None);
        for list in &mut r.nurse_shift_rooms {
            list.clear();
        }
        r.nurse_shift_load.fill(0);
        for list in &mut r.theater_day_patients {
            list.clear();
        }
        r.theater_day_load.fill(0);
        r.surgeon_day_load.fill(0);
        r.surgeon_day_theater_ops.fill(0);
        for slots in &mut r.carers {
            slots.fill(None);
        }

        for o in self.instance.occupant_indices() {
            let occupant = self.instance.occupant(o);
            let room = occupant.room();
            let last = occupant.length_of_stay().min(self.instance.days());
            for d in 0..last {
                let cell = self.roster.rd(room, d);
                self.roster.room_day_people[cell].push(Person::Occupant(o));
                match occupant.gender() {
                    Gender::A => self.roster.room_day_gender_a[cell] += 1,
                    Gender::B => self.roster.room_day_gender_b[cell] += 1,
                }
            }
        }

        tracing::debug!(
            occupants = self.instance.num_occupants(),
            "roster reset and re-seeded"
        );
    }

    /// Records one patient admission: the decision triple, the occupancy and
    /// gender aggregates for every day of the (horizon-truncated) stay, the
    /// theater and surgeon day loads, and — for every shift of the stay
    /// already covered by a nurse — that nurse's workload and the patient's
    /// carer slot.
    pub fn assign_patient(
        &mut self,
        p: PatientIdx,
        admission_day: usize,
        room: RoomIdx,
        theater: TheaterIdx,
    ) -> Result<(), AssignPatientError> {
        if self.roster.admission_day[p.get()].is_some() {
            return Err(DuplicateAssignmentError::new(p).into());
        }
        if admission_day >= self.instance.days() {
            return Err(
                AdmissionOutOfCalendarError::new(p, admission_day, self.instance.days()).into(),
            );
        }

        let cal = self.instance.calendar();
        let patient = self.instance.patient(p);

        self.roster.admission_day[p.get()] = Some(admission_day);
        self.roster.room_of[p.get()] = Some(room);
        self.roster.theater_of[p.get()] = Some(theater);

        let last = cal.days().min(admission_day + patient.length_of_stay());
        for d in admission_day..last {
            let cell = self.roster.rd(room, d);
            self.roster.room_day_people[cell].push(Person::Patient(p));
            match patient.gender() {
                Gender::A => self.roster.room_day_gender_a[cell] += 1,
                Gender::B => self.roster.room_day_gender_b[cell] += 1,
            }
            for s in cal.shifts_of_day(d) {
                if let Some(n) = self.roster.nurse_in(room, s) {
                    let s1 = cal.local_shift(s, admission_day);
                    let slot = self.roster.person_slot(Person::Patient(p));
                    self.roster.carers[slot][s1] = Some(n);
                    let ns = self.roster.ns(n, s);
                    self.roster.nurse_shift_load[ns] += patient.workload_produced(s1);
                }
            }
        }

        let td = self.roster.td(theater, admission_day);
        self.roster.theater_day_patients[td].push(p);
        self.roster.theater_day_load[td] += patient.surgery_duration();
        let u = patient.surgeon();
        let ud = self.roster.ud(u, admission_day);
        self.roster.surgeon_day_load[ud] += patient.surgery_duration();
        let udt = self.roster.udt(u, admission_day, theater);
        self.roster.surgeon_day_theater_ops[udt] += 1;

        tracing::trace!(patient = %p, admission_day, room = %room, theater = %theater, "patient assigned");
        Ok(())
    }

    /// Records one nurse covering `room` in `shift`, and charges the nurse
    /// with the workload of everyone already occupying that room on that
    /// shift's day while recording the nurse in their carer slots.
    pub fn assign_nurse(
        &mut self,
        n: NurseIdx,
        room: RoomIdx,
        shift: usize,
    ) -> Result<(), InvalidNurseAssignmentError> {
        if !self.instance.nurse(n).is_working(shift) {
            return Err(InvalidNurseAssignmentError::new(n, shift));
        }

        let rs = self.roster.rs(room, shift);
        self.roster.room_shift_nurse[rs] = Some(n);
        let ns = self.roster.ns(n, shift);
        self.roster.nurse_shift_rooms[ns].push(room);

        let d = self.instance.calendar().day_of(shift);
        let cell = self.roster.rd(room, d);
        for i in 0..self.roster.room_day_people[cell].len() {
            let person = self.roster.room_day_people[cell][i];
            let workload = self.roster.workload_at(self.instance, person, shift);
            self.roster.nurse_shift_load[ns] += workload;
            let s1 = self.roster.local_shift(person, shift);
            let slot = self.roster.person_slot(person);
            self.roster.carers[slot][s1] = Some(n);
        }

        tracing::trace!(nurse = %n, room = %room, shift, "nurse assigned");
        Ok(())
    }

    /// Read-only view of the state built so far.
    #[inline]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Releases the roster. No further mutation is possible afterwards; the
    /// evaluators take it from here.
    #[inline]
    pub fn finish(self) -> Roster {
        self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceBuilder;
    use crate::people::{Occupant, Patient};
    use crate::staff::{Nurse, OperatingTheater, Room, Surgeon};
    use crate::weights::Weights;
    use fixedbitset::FixedBitSet;

    // Three days of three shifts, two rooms, one surgeon/theater, two nurses,
    // one gender-B occupant in R0 for two days.
    fn instance() -> Instance {
        let mut b = InstanceBuilder::new();
        b.days(3)
            .shift_types(["early", "late", "night"])
            .age_groups(["adult", "elderly"])
            .skill_levels(3)
            .weights(Weights::uniform(1));
        b.add_room(Room::new("R0", 2));
        b.add_room(Room::new("R1", 1));
        b.add_surgeon(Surgeon::new("S0", vec![480, 480, 480]));
        b.add_operating_theater(OperatingTheater::new("T0", vec![480, 480, 480]));
        let shifts = b.calendar().shifts();
        b.add_nurse(Nurse::new("N0", 2, shifts, (0..shifts).map(|s| (s, 50))));
        b.add_nurse(Nurse::new("N1", 1, shifts, [(0, 50), (1, 50)]));
        b.add_occupant(Occupant::new(
            "A0",
            Gender::B,
            b.find_age_group("elderly").unwrap(),
            2,
            vec![2; 6],
            vec![0; 6],
            b.find_room("R0").unwrap(),
        ));
        b.add_patient(Patient::new(
            "P0",
            Gender::A,
            b.find_age_group("adult").unwrap(),
            2,
            vec![3; 6],
            vec![1; 6],
            true,
            0,
            Some(1),
            90,
            b.find_surgeon("S0").unwrap(),
            FixedBitSet::with_capacity(2),
        ));
        b.build()
    }

    #[inline]
    fn p(i: usize) -> PatientIdx {
        PatientIdx::new(i)
    }
    #[inline]
    fn r(i: usize) -> RoomIdx {
        RoomIdx::new(i)
    }
    #[inline]
    fn n(i: usize) -> NurseIdx {
        NurseIdx::new(i)
    }
    #[inline]
    fn t(i: usize) -> TheaterIdx {
        TheaterIdx::new(i)
    }

    #[test]
    fn test_reset_seeds_occupants_every_day_of_their_stay() {
        let inst = instance();
        let builder = RosterBuilder::new(&inst);
        let roster = builder.finish();
        assert_eq!(roster.people_in(r(0), 0), &[Person::Occupant(crate::common::OccupantIdx::new(0))]);
        assert_eq!(roster.people_in(r(0), 1).len(), 1);
        // The stay is two days; day 2 is empty.
        assert!(roster.people_in(r(0), 2).is_empty());
        assert_eq!(roster.gender_b_count(r(0), 0), 1);
        assert_eq!(roster.gender_a_count(r(0), 0), 0);
    }

    #[test]
    fn test_assign_patient_fills_all_aggregates() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        builder.assign_patient(p(0), 1, r(0), t(0)).unwrap();
        let roster = builder.finish();

        assert_eq!(roster.admission_day(p(0)), Some(1));
        assert_eq!(roster.room_of(p(0)), Some(r(0)));
        assert_eq!(roster.theater_of(p(0)), Some(t(0)));
        // Present on days 1 and 2 (stay of two days from day 1).
        assert_eq!(roster.people_in(r(0), 1).len(), 2);
        assert_eq!(roster.people_in(r(0), 2), &[Person::Patient(p(0))]);
        assert_eq!(roster.gender_a_count(r(0), 1), 1);
        // Surgery bookkeeping lands on the admission day.
        assert_eq!(roster.theater_patients(t(0), 1), &[p(0)]);
        assert_eq!(roster.theater_load(t(0), 1), 90);
        assert_eq!(roster.surgeon_load(crate::common::SurgeonIdx::new(0), 1), 90);
        assert_eq!(
            roster.surgeon_theater_ops(crate::common::SurgeonIdx::new(0), 1, t(0)),
            1
        );
    }

    #[test]
    fn test_stay_is_truncated_at_the_horizon() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        // Two-day stay admitted on the last day: only day 2 is occupied.
        builder.assign_patient(p(0), 2, r(1), t(0)).unwrap();
        let roster = builder.finish();
        assert_eq!(roster.people_in(r(1), 2), &[Person::Patient(p(0))]);
        assert!(roster.people_in(r(1), 0).is_empty());
        assert!(roster.people_in(r(1), 1).is_empty());
    }

    #[test]
    fn test_duplicate_assignment_rejected_and_state_preserved() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        builder.assign_patient(p(0), 0, r(0), t(0)).unwrap();
        let snapshot = builder.roster().clone();

        let err = builder.assign_patient(p(0), 1, r(1), t(0)).unwrap_err();
        assert_eq!(
            err,
            AssignPatientError::Duplicate(DuplicateAssignmentError::new(p(0)))
        );
        assert_eq!(builder.roster(), &snapshot);
    }

    #[test]
    fn test_admission_beyond_calendar_rejected() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        let err = builder.assign_patient(p(0), 3, r(0), t(0)).unwrap_err();
        assert!(matches!(err, AssignPatientError::OutOfCalendar(_)));
        // Nothing was recorded.
        assert_eq!(builder.roster().admission_day(p(0)), None);
    }

    #[test]
    fn test_assign_nurse_rejects_non_working_shift() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        // N1 works only shifts 0 and 1.
        let err = builder.assign_nurse(n(1), r(0), 4).unwrap_err();
        assert_eq!(err, InvalidNurseAssignmentError::new(n(1), 4));
        assert_eq!(builder.roster().nurse_in(r(0), 4), None);
    }

    #[test]
    fn test_nurse_then_patient_equals_patient_then_nurse() {
        let inst = instance();

        let mut ab = RosterBuilder::new(&inst);
        ab.assign_nurse(n(0), r(0), 3).unwrap();
        ab.assign_patient(p(0), 1, r(0), t(0)).unwrap();
        let first = ab.finish();

        let mut ba = RosterBuilder::new(&inst);
        ba.assign_patient(p(0), 1, r(0), t(0)).unwrap();
        ba.assign_nurse(n(0), r(0), 3).unwrap();
        let second = ba.finish();

        // Workload bookkeeping is symmetric in assignment order. Shift 3 is
        // local shift 0 of the patient admitted on day 1: workload 3 from the
        // patient plus 2 from the occupant.
        assert_eq!(first.nurse_load(n(0), 3), 5);
        assert_eq!(second.nurse_load(n(0), 3), 5);
        assert_eq!(first.carer_at(Person::Patient(p(0)), 0), Some(n(0)));
        assert_eq!(second.carer_at(Person::Patient(p(0)), 0), Some(n(0)));
    }

    #[test]
    fn test_occupant_carers_use_absolute_shifts() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        builder.assign_nurse(n(0), r(0), 4).unwrap();
        let roster = builder.finish();
        let occupant = Person::Occupant(crate::common::OccupantIdx::new(0));
        assert_eq!(roster.carer_at(occupant, 4), Some(n(0)));
        // The occupant's workload in shift 4 was charged to the nurse.
        assert_eq!(roster.nurse_load(n(0), 4), 2);
    }

    #[test]
    fn test_reset_then_replay_rebuilds_identical_state() {
        let inst = instance();
        let mut builder = RosterBuilder::new(&inst);
        builder.assign_patient(p(0), 0, r(0), t(0)).unwrap();
        builder.assign_nurse(n(0), r(0), 0).unwrap();
        builder.assign_nurse(n(1), r(1), 1).unwrap();
        let first = builder.roster().clone();

        builder.reset();
        builder.assign_patient(p(0), 0, r(0), t(0)).unwrap();
        builder.assign_nurse(n(0), r(0), 0).unwrap();
        builder.assign_nurse(n(1), r(1), 1).unwrap();
        assert_eq!(builder.roster(), &first);
    }
}
