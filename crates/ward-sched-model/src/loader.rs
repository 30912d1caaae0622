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

//! JSON loaders for the two input documents. The instance loader resolves
//! every cross-reference (room ids, surgeon ids, shift names, age groups)
//! into typed indices while reading; rooms, surgeons and theaters are read
//! before the people that reference them. The solution loader only parses —
//! its ids stay names until the records are applied against an instance.

use crate::common::Cost;
use crate::err::UnknownIdError;
use crate::instance::{Instance, InstanceBuilder};
use crate::people::{Gender, Occupant, Patient};
use crate::solution::SolutionDoc;
use crate::staff::{Nurse, OperatingTheater, Room, Surgeon};
use crate::weights::{CostComponent, Weights};
use fixedbitset::FixedBitSet;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

#[derive(Debug)]
pub enum LoaderError {
    Io(std::io::Error),
    Json(serde_json::Error),
    UnknownId(UnknownIdError),
    MissingField {
        record: String,
        field: &'static str,
    },
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<UnknownIdError> for LoaderError {
    fn from(e: UnknownIdError) -> Self {
        Self::UnknownId(e)
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Json(e) => write!(f, "JSON error: {e}"),
            UnknownId(e) => write!(f, "{e}"),
            MissingField { record, field } => {
                write!(f, "record \"{record}\" is missing field \"{field}\"")
            }
        }
    }
}

impl std::error::Error for LoaderError {}

#[derive(Deserialize)]
struct RawWeights {
    room_mixed_age: Cost,
    room_nurse_skill: Cost,
    continuity_of_care: Cost,
    nurse_eccessive_workload: Cost,
    open_operating_theater: Cost,
    surgeon_transfer: Cost,
    patient_delay: Cost,
    unscheduled_optional: Cost,
}

impl RawWeights {
    fn into_weights(self) -> Weights {
        Weights::new(|c| match c {
            CostComponent::RoomMixedAge => self.room_mixed_age,
            CostComponent::RoomNurseSkill => self.room_nurse_skill,
            CostComponent::ContinuityOfCare => self.continuity_of_care,
            CostComponent::NurseExcessiveWorkload => self.nurse_eccessive_workload,
            CostComponent::OpenOperatingTheater => self.open_operating_theater,
            CostComponent::SurgeonTransfer => self.surgeon_transfer,
            CostComponent::PatientDelay => self.patient_delay,
            CostComponent::UnscheduledOptional => self.unscheduled_optional,
        })
    }
}

#[derive(Deserialize)]
struct RawRoom {
    id: String,
    capacity: usize,
}

#[derive(Deserialize)]
struct RawSurgeon {
    id: String,
    max_surgery_time: Vec<Cost>,
}

#[derive(Deserialize)]
struct RawTheater {
    id: String,
    availability: Vec<Cost>,
}

#[derive(Deserialize)]
struct RawOccupant {
    id: String,
    gender: String,
    age_group: String,
    length_of_stay: usize,
    workload_produced: Vec<Cost>,
    skill_level_required: Vec<i64>,
    room_id: String,
}

#[derive(Deserialize)]
struct RawPatient {
    id: String,
    mandatory: bool,
    gender: String,
    age_group: String,
    length_of_stay: usize,
    surgery_release_day: usize,
    #[serde(default)]
    surgery_due_day: Option<usize>,
    surgery_duration: Cost,
    surgeon_id: String,
    #[serde(default)]
    incompatible_room_ids: Option<Vec<String>>,
    workload_produced: Vec<Cost>,
    skill_level_required: Vec<i64>,
}

#[derive(Deserialize)]
struct RawWorkingShift {
    day: usize,
    shift: String,
    max_load: Cost,
}

#[derive(Deserialize)]
struct RawNurse {
    id: String,
    skill_level: i64,
    working_shifts: Vec<RawWorkingShift>,
}

#[derive(Deserialize)]
struct RawInstance {
    days: usize,
    skill_levels: usize,
    shift_types: Vec<String>,
    age_groups: Vec<String>,
    weights: RawWeights,
    occupants: Vec<RawOccupant>,
    patients: Vec<RawPatient>,
    surgeons: Vec<RawSurgeon>,
    operating_theaters: Vec<RawTheater>,
    rooms: Vec<RawRoom>,
    nurses: Vec<RawNurse>,
}

fn parse_gender(s: &str) -> Gender {
    if s == "A" { Gender::A } else { Gender::B }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceLoader;

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_str(&self, s: &str) -> Result<Instance, LoaderError> {
        let raw: RawInstance = serde_json::from_str(s)?;
        self.resolve(raw)
    }

    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, LoaderError> {
        let raw: RawInstance = serde_json::from_reader(r)?;
        self.resolve(raw)
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Instance, LoaderError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    fn resolve(&self, raw: RawInstance) -> Result<Instance, LoaderError> {
        let mut b = InstanceBuilder::new();
        b.days(raw.days)
            .skill_levels(raw.skill_levels)
            .shift_types(raw.shift_types)
            .age_groups(raw.age_groups)
            .weights(raw.weights.into_weights());

        for s in raw.surgeons {
            b.add_surgeon(Surgeon::new(s.id, s.max_surgery_time));
        }
        for t in raw.operating_theaters {
            b.add_operating_theater(OperatingTheater::new(t.id, t.availability));
        }
        // Rooms go in before the people that reference them.
        let num_rooms = raw.rooms.len();
        for r in raw.rooms {
            b.add_room(Room::new(r.id, r.capacity));
        }

        for o in raw.occupants {
            let room = b.find_room(&o.room_id)?;
            let age_group = b.find_age_group(&o.age_group)?;
            b.add_occupant(Occupant::new(
                o.id,
                parse_gender(&o.gender),
                age_group,
                o.length_of_stay,
                o.workload_produced,
                o.skill_level_required,
                room,
            ));
        }

        for p in raw.patients {
            let surgeon = b.find_surgeon(&p.surgeon_id)?;
            let age_group = b.find_age_group(&p.age_group)?;
            let due_day = if p.mandatory {
                Some(
                    p.surgery_due_day
                        .ok_or_else(|| LoaderError::MissingField {
                            record: p.id.clone(),
                            field: "surgery_due_day",
                        })?,
                )
            } else {
                None
            };
            let mut incompatible = FixedBitSet::with_capacity(num_rooms);
            for room_id in p.incompatible_room_ids.iter().flatten() {
                incompatible.insert(b.find_room(room_id)?.get());
            }
            b.add_patient(Patient::new(
                p.id,
                parse_gender(&p.gender),
                age_group,
                p.length_of_stay,
                p.workload_produced,
                p.skill_level_required,
                p.mandatory,
                p.surgery_release_day,
                due_day,
                p.surgery_duration,
                surgeon,
                incompatible,
            ));
        }

        let shifts = b.calendar().shifts();
        let shifts_per_day = b.calendar().shifts_per_day();
        for n in raw.nurses {
            let mut working = Vec::with_capacity(n.working_shifts.len());
            for w in &n.working_shifts {
                let shift = w.day * shifts_per_day + b.find_shift(&w.shift)?;
                working.push((shift, w.max_load));
            }
            b.add_nurse(Nurse::new(n.id, n.skill_level, shifts, working));
        }

        let instance = b.build();
        tracing::debug!(
            days = instance.days(),
            patients = instance.num_patients(),
            occupants = instance.num_occupants(),
            rooms = instance.num_rooms(),
            nurses = instance.num_nurses(),
            "instance loaded"
        );
        Ok(instance)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionLoader;

impl SolutionLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_str(&self, s: &str) -> Result<SolutionDoc, LoaderError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: Read>(&self, r: R) -> Result<SolutionDoc, LoaderError> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<SolutionDoc, LoaderError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RoomIdx;
    use crate::solution::AdmissionDay;

    const INSTANCE: &str = r#"{
        "days": 2,
        "skill_levels": 2,
        "shift_types": ["early", "late"],
        "age_groups": ["adult", "elderly"],
        "weights": {
            "room_mixed_age": 5,
            "room_nurse_skill": 1,
            "continuity_of_care": 1,
            "nurse_eccessive_workload": 1,
            "open_operating_theater": 10,
            "surgeon_transfer": 1,
            "patient_delay": 2,
            "unscheduled_optional": 100
        },
        "occupants": [
            {
                "id": "A0", "gender": "B", "age_group": "elderly",
                "length_of_stay": 1, "workload_produced": [1, 1],
                "skill_level_required": [0, 0], "room_id": "R1"
            }
        ],
        "patients": [
            {
                "id": "P0", "mandatory": true, "gender": "A",
                "age_group": "adult", "length_of_stay": 1,
                "surgery_release_day": 0, "surgery_due_day": 1,
                "surgery_duration": 60, "surgeon_id": "S0",
                "incompatible_room_ids": ["R0"],
                "workload_produced": [2, 2],
                "skill_level_required": [1, 1]
            },
            {
                "id": "P1", "mandatory": false, "gender": "B",
                "age_group": "adult", "length_of_stay": 1,
                "surgery_release_day": 0,
                "surgery_duration": 30, "surgeon_id": "S0",
                "workload_produced": [1, 1],
                "skill_level_required": [0, 0]
            }
        ],
        "surgeons": [{"id": "S0", "max_surgery_time": [240, 240]}],
        "operating_theaters": [{"id": "T0", "availability": [480, 480]}],
        "rooms": [{"id": "R0", "capacity": 1}, {"id": "R1", "capacity": 2}],
        "nurses": [
            {
                "id": "N0", "skill_level": 1,
                "working_shifts": [
                    {"day": 0, "shift": "early", "max_load": 10},
                    {"day": 1, "shift": "late", "max_load": 10}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_instance_loads_and_resolves() {
        let inst = InstanceLoader::new().from_str(INSTANCE).unwrap();
        assert_eq!(inst.days(), 2);
        assert_eq!(inst.shifts_per_day(), 2);
        assert_eq!(inst.num_patients(), 2);
        assert_eq!(inst.num_occupants(), 1);

        // Cross-references came back as typed indices.
        let p0 = inst.find_patient("P0").unwrap();
        assert!(inst.patient(p0).is_room_incompatible(RoomIdx::new(0)));
        assert!(!inst.patient(p0).is_room_incompatible(RoomIdx::new(1)));
        assert_eq!(inst.occupant(inst.occupant_indices().next().unwrap()).room(), RoomIdx::new(1));

        // Nurse working shifts became global shift indices: day1@late = 3.
        let n0 = inst.find_nurse("N0").unwrap();
        assert!(inst.nurse(n0).is_working(0));
        assert!(inst.nurse(n0).is_working(3));
        assert!(!inst.nurse(n0).is_working(1));

        // Weights are keyed, not positional.
        assert_eq!(inst.weights().get(CostComponent::OpenOperatingTheater), 10);
        assert_eq!(inst.weights().get(CostComponent::UnscheduledOptional), 100);
    }

    #[test]
    fn test_elective_due_day_defaults_open() {
        let inst = InstanceLoader::new().from_str(INSTANCE).unwrap();
        let p1 = inst.find_patient("P1").unwrap();
        assert_eq!(inst.patient(p1).due_day(), None);
        assert_eq!(inst.last_possible_day(p1), 1);
    }

    #[test]
    fn test_unknown_room_reference_fails() {
        let bad = INSTANCE.replace("\"room_id\": \"R1\"", "\"room_id\": \"R9\"");
        let err = InstanceLoader::new().from_str(&bad).unwrap_err();
        match err {
            LoaderError::UnknownId(e) => {
                assert_eq!(e.entity(), "room");
                assert_eq!(e.id(), "R9");
            }
            other => panic!("expected UnknownId, got {other}"),
        }
    }

    #[test]
    fn test_mandatory_patient_without_due_day_fails() {
        let bad = INSTANCE.replace("\"surgery_due_day\": 1,", "");
        let err = InstanceLoader::new().from_str(&bad).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingField {
                field: "surgery_due_day",
                ..
            }
        ));
    }

    #[test]
    fn test_solution_parses_records() {
        let doc = SolutionLoader::new()
            .from_str(
                r#"{
                    "patients": [
                        {"id": "P0", "admission_day": 0, "room": "R1", "operating_theater": "T0"},
                        {"id": "P1", "admission_day": "none"}
                    ],
                    "nurses": [
                        {"id": "N0", "assignments": [
                            {"day": 0, "shift": "early", "rooms": ["R0", "R1"]}
                        ]}
                    ]
                }"#,
            )
            .unwrap();
        assert_eq!(doc.patients.len(), 2);
        assert_eq!(doc.patients[0].admission_day, AdmissionDay::Day(0));
        assert_eq!(doc.patients[1].admission_day, AdmissionDay::Unscheduled);
        assert_eq!(doc.nurses[0].assignments[0].rooms, vec!["R0", "R1"]);
    }
}
