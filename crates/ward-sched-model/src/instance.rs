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

//! The immutable problem instance. A pure lookup surface: indexed accessors
//! over the entity vectors plus id-to-index resolution. No structural
//! validation happens here; a malformed instance is the supplier's problem,
//! an unresolvable id is ours.

use crate::calendar::Calendar;
use crate::common::{AgeGroupIdx, NurseIdx, OccupantIdx, PatientIdx, Person, RoomIdx, SurgeonIdx, TheaterIdx};
use crate::err::UnknownIdError;
use crate::people::{Gender, Occupant, Patient};
use crate::staff::{Nurse, OperatingTheater, Room, Surgeon};
use crate::weights::Weights;
use fxhash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Instance {
    calendar: Calendar,
    skill_levels: usize,
    shift_names: Vec<String>,
    age_group_names: Vec<String>,
    weights: Weights,
    rooms: Vec<Room>,
    operating_theaters: Vec<OperatingTheater>,
    surgeons: Vec<Surgeon>,
    nurses: Vec<Nurse>,
    occupants: Vec<Occupant>,
    patients: Vec<Patient>,
    room_index: FxHashMap<String, RoomIdx>,
    theater_index: FxHashMap<String, TheaterIdx>,
    surgeon_index: FxHashMap<String, SurgeonIdx>,
    nurse_index: FxHashMap<String, NurseIdx>,
    patient_index: FxHashMap<String, PatientIdx>,
}

impl Instance {
    #[inline]
    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    #[inline]
    pub fn days(&self) -> usize {
        self.calendar.days()
    }

    #[inline]
    pub fn shifts_per_day(&self) -> usize {
        self.calendar.shifts_per_day()
    }

    #[inline]
    pub fn shifts(&self) -> usize {
        self.calendar.shifts()
    }

    #[inline]
    pub fn num_skill_levels(&self) -> usize {
        self.skill_levels
    }

    #[inline]
    pub fn num_age_groups(&self) -> usize {
        self.age_group_names.len()
    }

    #[inline]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    #[inline]
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn num_operating_theaters(&self) -> usize {
        self.operating_theaters.len()
    }

    #[inline]
    pub fn num_surgeons(&self) -> usize {
        self.surgeons.len()
    }

    #[inline]
    pub fn num_nurses(&self) -> usize {
        self.nurses.len()
    }

    #[inline]
    pub fn num_occupants(&self) -> usize {
        self.occupants.len()
    }

    #[inline]
    pub fn num_patients(&self) -> usize {
        self.patients.len()
    }

    #[inline]
    pub fn room(&self, r: RoomIdx) -> &Room {
        &self.rooms[r.get()]
    }

    #[inline]
    pub fn operating_theater(&self, t: TheaterIdx) -> &OperatingTheater {
        &self.operating_theaters[t.get()]
    }

    #[inline]
    pub fn surgeon(&self, u: SurgeonIdx) -> &Surgeon {
        &self.surgeons[u.get()]
    }

    #[inline]
    pub fn nurse(&self, n: NurseIdx) -> &Nurse {
        &self.nurses[n.get()]
    }

    #[inline]
    pub fn occupant(&self, o: OccupantIdx) -> &Occupant {
        &self.occupants[o.get()]
    }

    #[inline]
    pub fn patient(&self, p: PatientIdx) -> &Patient {
        &self.patients[p.get()]
    }

    #[inline]
    pub fn room_indices(&self) -> impl Iterator<Item = RoomIdx> {
        (0..self.rooms.len()).map(RoomIdx::new)
    }

    #[inline]
    pub fn theater_indices(&self) -> impl Iterator<Item = TheaterIdx> {
        (0..self.operating_theaters.len()).map(TheaterIdx::new)
    }

    #[inline]
    pub fn surgeon_indices(&self) -> impl Iterator<Item = SurgeonIdx> {
        (0..self.surgeons.len()).map(SurgeonIdx::new)
    }

    #[inline]
    pub fn nurse_indices(&self) -> impl Iterator<Item = NurseIdx> {
        (0..self.nurses.len()).map(NurseIdx::new)
    }

    #[inline]
    pub fn occupant_indices(&self) -> impl Iterator<Item = OccupantIdx> {
        (0..self.occupants.len()).map(OccupantIdx::new)
    }

    #[inline]
    pub fn patient_indices(&self) -> impl Iterator<Item = PatientIdx> {
        (0..self.patients.len()).map(PatientIdx::new)
    }

    /// Latest day a patient may still be admitted: the due day for mandatory
    /// patients, the end of the horizon otherwise.
    #[inline]
    pub fn last_possible_day(&self, p: PatientIdx) -> usize {
        self.patient(p)
            .due_day()
            .unwrap_or(self.calendar.days() - 1)
    }

    #[inline]
    pub fn shift_name(&self, shift_of_day: usize) -> &str {
        &self.shift_names[shift_of_day]
    }

    #[inline]
    pub fn age_group_name(&self, g: AgeGroupIdx) -> &str {
        &self.age_group_names[g.get()]
    }

    /// Human-readable form of a global shift index, e.g. `7 (day2@early)`.
    pub fn shift_description(&self, shift: usize) -> String {
        format!(
            "{} (day{}@{})",
            shift,
            self.calendar.day_of(shift),
            self.shift_names[self.calendar.shift_of_day(shift)]
        )
    }

    #[inline]
    pub fn person_id(&self, person: Person) -> &str {
        match person {
            Person::Patient(p) => self.patient(p).id(),
            Person::Occupant(o) => self.occupant(o).id(),
        }
    }

    #[inline]
    pub fn person_gender(&self, person: Person) -> Gender {
        match person {
            Person::Patient(p) => self.patient(p).gender(),
            Person::Occupant(o) => self.occupant(o).gender(),
        }
    }

    #[inline]
    pub fn person_age_group(&self, person: Person) -> AgeGroupIdx {
        match person {
            Person::Patient(p) => self.patient(p).age_group(),
            Person::Occupant(o) => self.occupant(o).age_group(),
        }
    }

    #[inline]
    pub fn person_length_of_stay(&self, person: Person) -> usize {
        match person {
            Person::Patient(p) => self.patient(p).length_of_stay(),
            Person::Occupant(o) => self.occupant(o).length_of_stay(),
        }
    }

    pub fn find_room(&self, id: &str) -> Result<RoomIdx, UnknownIdError> {
        self.room_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("room", id))
    }

    pub fn find_operating_theater(&self, id: &str) -> Result<TheaterIdx, UnknownIdError> {
        self.theater_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("operating theater", id))
    }

    pub fn find_surgeon(&self, id: &str) -> Result<SurgeonIdx, UnknownIdError> {
        self.surgeon_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("surgeon", id))
    }

    pub fn find_nurse(&self, id: &str) -> Result<NurseIdx, UnknownIdError> {
        self.nurse_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("nurse", id))
    }

    pub fn find_patient(&self, id: &str) -> Result<PatientIdx, UnknownIdError> {
        self.patient_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("patient", id))
    }

    /// Resolves a shift-type name to its within-day position.
    pub fn find_shift(&self, name: &str) -> Result<usize, UnknownIdError> {
        self.shift_names
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| UnknownIdError::new("shift", name))
    }

    pub fn find_age_group(&self, name: &str) -> Result<AgeGroupIdx, UnknownIdError> {
        self.age_group_names
            .iter()
            .position(|s| s == name)
            .map(AgeGroupIdx::new)
            .ok_or_else(|| UnknownIdError::new("age group", name))
    }
}

/// Assembles an [`Instance`] piecewise. The loader and the tests both build
/// instances through this type; cross-references between parts added earlier
/// can be resolved with the `find_*` methods while later parts are still
/// being added.
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    days: usize,
    skill_levels: usize,
    shift_names: Vec<String>,
    age_group_names: Vec<String>,
    weights: Option<Weights>,
    rooms: Vec<Room>,
    operating_theaters: Vec<OperatingTheater>,
    surgeons: Vec<Surgeon>,
    nurses: Vec<Nurse>,
    occupants: Vec<Occupant>,
    patients: Vec<Patient>,
    room_index: FxHashMap<String, RoomIdx>,
    theater_index: FxHashMap<String, TheaterIdx>,
    surgeon_index: FxHashMap<String, SurgeonIdx>,
    nurse_index: FxHashMap<String, NurseIdx>,
    patient_index: FxHashMap<String, PatientIdx>,
}

impl InstanceBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn days(&mut self, days: usize) -> &mut Self {
        self.days = days;
        self
    }

    #[inline]
    pub fn skill_levels(&mut self, levels: usize) -> &mut Self {
        self.skill_levels = levels;
        self
    }

    #[inline]
    pub fn shift_types<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.shift_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn age_groups<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.age_group_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn weights(&mut self, weights: Weights) -> &mut Self {
        self.weights = Some(weights);
        self
    }

    /// The calendar implied by the parts added so far.
    #[inline]
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.days, self.shift_names.len())
    }

    #[inline]
    pub fn add_room(&mut self, room: Room) -> &mut Self {
        let idx = RoomIdx::new(self.rooms.len());
        self.room_index.insert(room.id().to_owned(), idx);
        self.rooms.push(room);
        self
    }

    #[inline]
    pub fn add_operating_theater(&mut self, theater: OperatingTheater) -> &mut Self {
        let idx = TheaterIdx::new(self.operating_theaters.len());
        self.theater_index.insert(theater.id().to_owned(), idx);
        self.operating_theaters.push(theater);
        self
    }

    #[inline]
    pub fn add_surgeon(&mut self, surgeon: Surgeon) -> &mut Self {
        let idx = SurgeonIdx::new(self.surgeons.len());
        self.surgeon_index.insert(surgeon.id().to_owned(), idx);
        self.surgeons.push(surgeon);
        self
    }

    #[inline]
    pub fn add_nurse(&mut self, nurse: Nurse) -> &mut Self {
        let idx = NurseIdx::new(self.nurses.len());
        self.nurse_index.insert(nurse.id().to_owned(), idx);
        self.nurses.push(nurse);
        self
    }

    #[inline]
    pub fn add_occupant(&mut self, occupant: Occupant) -> &mut Self {
        self.occupants.push(occupant);
        self
    }

    #[inline]
    pub fn add_patient(&mut self, patient: Patient) -> &mut Self {
        let idx = PatientIdx::new(self.patients.len());
        self.patient_index.insert(patient.id().to_owned(), idx);
        self.patients.push(patient);
        self
    }

    pub fn find_room(&self, id: &str) -> Result<RoomIdx, UnknownIdError> {
        self.room_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("room", id))
    }

    pub fn find_surgeon(&self, id: &str) -> Result<SurgeonIdx, UnknownIdError> {
        self.surgeon_index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownIdError::new("surgeon", id))
    }

    pub fn find_shift(&self, name: &str) -> Result<usize, UnknownIdError> {
        self.shift_names
            .iter()
            .position(|s| s == name)
            .ok_or_else(|| UnknownIdError::new("shift", name))
    }

    pub fn find_age_group(&self, name: &str) -> Result<AgeGroupIdx, UnknownIdError> {
        self.age_group_names
            .iter()
            .position(|s| s == name)
            .map(AgeGroupIdx::new)
            .ok_or_else(|| UnknownIdError::new("age group", name))
    }

    pub fn build(self) -> Instance {
        Instance {
            calendar: Calendar::new(self.days, self.shift_names.len()),
            skill_levels: self.skill_levels,
            shift_names: self.shift_names,
            age_group_names: self.age_group_names,
            weights: self.weights.unwrap_or(Weights::uniform(1)),
            rooms: self.rooms,
            operating_theaters: self.operating_theaters,
            surgeons: self.surgeons,
            nurses: self.nurses,
            occupants: self.occupants,
            patients: self.patients,
            room_index: self.room_index,
            theater_index: self.theater_index,
            surgeon_index: self.surgeon_index,
            nurse_index: self.nurse_index,
            patient_index: self.patient_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;

    fn tiny_instance() -> Instance {
        let mut b = InstanceBuilder::new();
        b.days(3)
            .shift_types(["early", "late", "night"])
            .age_groups(["adult", "elderly"])
            .skill_levels(3)
            .weights(Weights::uniform(1));
        b.add_room(Room::new("R0", 2));
        b.add_room(Room::new("R1", 1));
        b.add_surgeon(Surgeon::new("S0", vec![120, 120, 120]));
        b.add_operating_theater(OperatingTheater::new("T0", vec![480, 480, 480]));
        let shifts = b.calendar().shifts();
        b.add_nurse(Nurse::new("N0", 2, shifts, [(0, 10), (3, 10)]));
        b.add_occupant(Occupant::new(
            "A0",
            Gender::B,
            b.find_age_group("elderly").unwrap(),
            1,
            vec![1, 1, 1],
            vec![0, 0, 0],
            b.find_room("R0").unwrap(),
        ));
        b.add_patient(Patient::new(
            "P0",
            Gender::A,
            b.find_age_group("adult").unwrap(),
            2,
            vec![1; 6],
            vec![0; 6],
            true,
            0,
            Some(1),
            60,
            b.find_surgeon("S0").unwrap(),
            FixedBitSet::with_capacity(2),
        ));
        b.add_patient(Patient::new(
            "P1",
            Gender::A,
            b.find_age_group("adult").unwrap(),
            1,
            vec![1; 3],
            vec![0; 3],
            false,
            1,
            None,
            30,
            b.find_surgeon("S0").unwrap(),
            FixedBitSet::with_capacity(2),
        ));
        b.build()
    }

    #[test]
    fn test_resolvers_hit_and_miss() {
        let inst = tiny_instance();
        assert_eq!(inst.find_room("R1").unwrap(), RoomIdx::new(1));
        assert_eq!(inst.find_patient("P1").unwrap(), PatientIdx::new(1));
        assert_eq!(inst.find_shift("late").unwrap(), 1);
        let err = inst.find_nurse("N9").unwrap_err();
        assert_eq!(err.entity(), "nurse");
        assert_eq!(err.id(), "N9");
    }

    #[test]
    fn test_last_possible_day_mandatory_vs_elective() {
        let inst = tiny_instance();
        // Mandatory patient: the due day binds.
        assert_eq!(inst.last_possible_day(PatientIdx::new(0)), 1);
        // Elective patient: anything up to the end of the horizon.
        assert_eq!(inst.last_possible_day(PatientIdx::new(1)), 2);
    }

    #[test]
    fn test_person_dispatch_reads_the_right_entity() {
        let inst = tiny_instance();
        let occ = Person::Occupant(OccupantIdx::new(0));
        let pat = Person::Patient(PatientIdx::new(0));
        assert_eq!(inst.person_gender(occ), Gender::B);
        assert_eq!(inst.person_gender(pat), Gender::A);
        assert_eq!(inst.person_id(occ), "A0");
        assert_eq!(inst.person_length_of_stay(pat), 2);
    }

    #[test]
    fn test_shift_description_format() {
        let inst = tiny_instance();
        assert_eq!(inst.shift_description(4), "4 (day1@late)");
    }
}
