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

//! The roster: one candidate schedule plus every derived aggregate the rule
//! evaluators read. Two-dimensional grids are stored flat
//! (`outer * extent + inner`); all mutation goes through the builder in this
//! module's sibling, so after any successful builder call every aggregate is
//! exactly the sum/list of the raw assignments applied so far.

use crate::common::{Cost, NurseIdx, PatientIdx, Person, RoomIdx, SurgeonIdx, TheaterIdx};
use crate::instance::Instance;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub(crate) days: usize,
    pub(crate) shifts_per_day: usize,
    pub(crate) num_patients: usize,
    pub(crate) num_theaters: usize,

    // raw patient decisions; None = unscheduled
    pub(crate) admission_day: Vec<Option<usize>>,
    pub(crate) room_of: Vec<Option<RoomIdx>>,
    pub(crate) theater_of: Vec<Option<TheaterIdx>>,

    // room aggregates
    pub(crate) room_day_people: Vec<Vec<Person>>,
    pub(crate) room_day_gender_a: Vec<u32>,
    pub(crate) room_day_gender_b: Vec<u32>,
    pub(crate) room_shift_nurse: Vec<Option<NurseIdx>>,

    // nurse aggregates
    pub(crate) nurse_shift_rooms: Vec<Vec<RoomIdx>>,
    pub(crate) nurse_shift_load: Vec<Cost>,

    // theater and surgeon aggregates
    pub(crate) theater_day_patients: Vec<Vec<PatientIdx>>,
    pub(crate) theater_day_load: Vec<Cost>,
    pub(crate) surgeon_day_load: Vec<Cost>,
    pub(crate) surgeon_day_theater_ops: Vec<u32>,

    // per person, per local shift: the nurse who covered their room. Local
    // shifts are admission-relative for patients, absolute for occupants.
    pub(crate) carers: Vec<Vec<Option<NurseIdx>>>,
}

impl Roster {
    /// An empty roster dimensioned for `instance`. Occupants are not seeded
    /// here; the builder's reset does that.
    pub(crate) fn sized_for(instance: &Instance) -> Self {
        let days = instance.days();
        let shifts = instance.shifts();
        let rooms = instance.num_rooms();
        let nurses = instance.num_nurses();
        let theaters = instance.num_operating_theaters();
        let surgeons = instance.num_surgeons();
        let patients = instance.num_patients();
        let occupants = instance.num_occupants();

        let mut carers = Vec::with_capacity(patients + occupants);
        for p in instance.patient_indices() {
            let slots = instance.patient(p).length_of_stay() * instance.shifts_per_day();
            carers.push(vec![None; slots]);
        }
        for o in instance.occupant_indices() {
            let slots = instance.occupant(o).length_of_stay() * instance.shifts_per_day();
            carers.push(vec![None; slots]);
        }

        Self {
            days,
            shifts_per_day: instance.shifts_per_day(),
            num_patients: patients,
            num_theaters: theaters,
            admission_day: vec![None; patients],
            room_of: vec![None; patients],
            theater_of: vec![None; patients],
            room_day_people: vec![Vec::new(); rooms * days],
            room_day_gender_a: vec![0; rooms * days],
            room_day_gender_b: vec![0; rooms * days],
            room_shift_nurse: vec![None; rooms * shifts],
            nurse_shift_rooms: vec![Vec::new(); nurses * shifts],
            nurse_shift_load: vec![0; nurses * shifts],
            theater_day_patients: vec![Vec::new(); theaters * days],
            theater_day_load: vec![0; theaters * days],
            surgeon_day_load: vec![0; surgeons * days],
            surgeon_day_theater_ops: vec![0; surgeons * days * theaters],
            carers,
        }
    }

    #[inline]
    pub(crate) fn rd(&self, r: RoomIdx, d: usize) -> usize {
        r.get() * self.days + d
    }

    #[inline]
    pub(crate) fn rs(&self, r: RoomIdx, s: usize) -> usize {
        r.get() * self.days * self.shifts_per_day + s
    }

    #[inline]
    pub(crate) fn ns(&self, n: NurseIdx, s: usize) -> usize {
        n.get() * self.days * self.shifts_per_day + s
    }

    #[inline]
    pub(crate) fn td(&self, t: TheaterIdx, d: usize) -> usize {
        t.get() * self.days + d
    }

    #[inline]
    pub(crate) fn ud(&self, u: SurgeonIdx, d: usize) -> usize {
        u.get() * self.days + d
    }

    #[inline]
    pub(crate) fn udt(&self, u: SurgeonIdx, d: usize, t: TheaterIdx) -> usize {
        (u.get() * self.days + d) * self.num_theaters + t.get()
    }

    /// Storage slot of a person's carer array: patients first, occupants
    /// after. Private detail; the public surface only speaks [`Person`].
    #[inline]
    pub(crate) fn person_slot(&self, person: Person) -> usize {
        match person {
            Person::Patient(p) => p.get(),
            Person::Occupant(o) => self.num_patients + o.get(),
        }
    }

    #[inline]
    pub fn admission_day(&self, p: PatientIdx) -> Option<usize> {
        self.admission_day[p.get()]
    }

    #[inline]
    pub fn is_scheduled(&self, p: PatientIdx) -> bool {
        self.admission_day[p.get()].is_some()
    }

    #[inline]
    pub fn room_of(&self, p: PatientIdx) -> Option<RoomIdx> {
        self.room_of[p.get()]
    }

    #[inline]
    pub fn theater_of(&self, p: PatientIdx) -> Option<TheaterIdx> {
        self.theater_of[p.get()]
    }

    /// Everyone present in room `r` on day `d`, occupants and scheduled
    /// patients alike.
    #[inline]
    pub fn people_in(&self, r: RoomIdx, d: usize) -> &[Person] {
        &self.room_day_people[self.rd(r, d)]
    }

    #[inline]
    pub fn gender_a_count(&self, r: RoomIdx, d: usize) -> u32 {
        self.room_day_gender_a[self.rd(r, d)]
    }

    #[inline]
    pub fn gender_b_count(&self, r: RoomIdx, d: usize) -> u32 {
        self.room_day_gender_b[self.rd(r, d)]
    }

    /// The nurse covering room `r` in shift `s`, if any.
    #[inline]
    pub fn nurse_in(&self, r: RoomIdx, s: usize) -> Option<NurseIdx> {
        self.room_shift_nurse[self.rs(r, s)]
    }

    /// Rooms nurse `n` covers in shift `s`, in assignment order.
    #[inline]
    pub fn rooms_covered(&self, n: NurseIdx, s: usize) -> &[RoomIdx] {
        &self.nurse_shift_rooms[self.ns(n, s)]
    }

    /// Accumulated workload of nurse `n` in shift `s`.
    #[inline]
    pub fn nurse_load(&self, n: NurseIdx, s: usize) -> Cost {
        self.nurse_shift_load[self.ns(n, s)]
    }

    #[inline]
    pub fn theater_patients(&self, t: TheaterIdx, d: usize) -> &[PatientIdx] {
        &self.theater_day_patients[self.td(t, d)]
    }

    #[inline]
    pub fn theater_load(&self, t: TheaterIdx, d: usize) -> Cost {
        self.theater_day_load[self.td(t, d)]
    }

    #[inline]
    pub fn surgeon_load(&self, u: SurgeonIdx, d: usize) -> Cost {
        self.surgeon_day_load[self.ud(u, d)]
    }

    /// Number of operations surgeon `u` performs in theater `t` on day `d`.
    #[inline]
    pub fn surgeon_theater_ops(&self, u: SurgeonIdx, d: usize, t: TheaterIdx) -> u32 {
        self.surgeon_day_theater_ops[self.udt(u, d, t)]
    }

    /// The carer slots of a person across their stay, one per local shift.
    #[inline]
    pub fn carers_of(&self, person: Person) -> &[Option<NurseIdx>] {
        &self.carers[self.person_slot(person)]
    }

    #[inline]
    pub fn carer_at(&self, person: Person, local_shift: usize) -> Option<NurseIdx> {
        self.carers[self.person_slot(person)][local_shift]
    }

    /// Translates a global shift index into the person's local index:
    /// admission-relative for patients, identity for occupants.
    #[inline]
    pub fn local_shift(&self, person: Person, shift: usize) -> usize {
        match person {
            Person::Patient(p) => {
                // Anyone reachable through an occupancy list is scheduled.
                let ad = self.admission_day[p.get()].expect("patient present in a room is scheduled");
                shift - ad * self.shifts_per_day
            }
            Person::Occupant(_) => shift,
        }
    }

    /// Workload `person` produces in global shift `shift`.
    #[inline]
    pub fn workload_at(&self, instance: &Instance, person: Person, shift: usize) -> Cost {
        let s1 = self.local_shift(person, shift);
        match person {
            Person::Patient(p) => instance.patient(p).workload_produced(s1),
            Person::Occupant(o) => instance.occupant(o).workload_produced(s1),
        }
    }

    /// Skill level `person` requires in global shift `shift`.
    #[inline]
    pub fn skill_required_at(&self, instance: &Instance, person: Person, shift: usize) -> i64 {
        let s1 = self.local_shift(person, shift);
        match person {
            Person::Patient(p) => instance.patient(p).skill_level_required(s1),
            Person::Occupant(o) => instance.occupant(o).skill_level_required(s1),
        }
    }
}
