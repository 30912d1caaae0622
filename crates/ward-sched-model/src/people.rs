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

use crate::common::{AgeGroupIdx, Cost, RoomIdx, SurgeonIdx};
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    A,
    B,
}

/// A person already present in a fixed room on day 0. Occupants are never
/// rescheduled; their per-shift workload and required skill arrays are
/// addressed by absolute shift index and cover `length_of_stay *
/// shifts_per_day` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    id: String,
    gender: Gender,
    age_group: AgeGroupIdx,
    length_of_stay: usize,
    workload_produced: Vec<Cost>,
    skill_level_required: Vec<i64>,
    room: RoomIdx,
}

impl Occupant {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        gender: Gender,
        age_group: AgeGroupIdx,
        length_of_stay: usize,
        workload_produced: Vec<Cost>,
        skill_level_required: Vec<i64>,
        room: RoomIdx,
    ) -> Self {
        Self {
            id: id.into(),
            gender,
            age_group,
            length_of_stay,
            workload_produced,
            skill_level_required,
            room,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[inline]
    pub fn age_group(&self) -> AgeGroupIdx {
        self.age_group
    }

    #[inline]
    pub fn length_of_stay(&self) -> usize {
        self.length_of_stay
    }

    /// Workload produced in absolute shift `shift` of the stay.
    #[inline]
    pub fn workload_produced(&self, shift: usize) -> Cost {
        self.workload_produced[shift]
    }

    /// Minimum nurse skill level required in absolute shift `shift`.
    #[inline]
    pub fn skill_level_required(&self, shift: usize) -> i64 {
        self.skill_level_required[shift]
    }

    #[inline]
    pub fn room(&self) -> RoomIdx {
        self.room
    }
}

/// A person awaiting surgery whose admission day, room and operating theater
/// are decided by the schedule under verification. Per-shift arrays are
/// addressed relative to the admission day (local shift 0 is the first shift
/// of the admission day).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: String,
    gender: Gender,
    age_group: AgeGroupIdx,
    length_of_stay: usize,
    workload_produced: Vec<Cost>,
    skill_level_required: Vec<i64>,
    mandatory: bool,
    release_day: usize,
    due_day: Option<usize>,
    surgery_duration: Cost,
    surgeon: SurgeonIdx,
    incompatible_rooms: FixedBitSet,
}

impl Patient {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        gender: Gender,
        age_group: AgeGroupIdx,
        length_of_stay: usize,
        workload_produced: Vec<Cost>,
        skill_level_required: Vec<i64>,
        mandatory: bool,
        release_day: usize,
        due_day: Option<usize>,
        surgery_duration: Cost,
        surgeon: SurgeonIdx,
        incompatible_rooms: FixedBitSet,
    ) -> Self {
        Self {
            id: id.into(),
            gender,
            age_group,
            length_of_stay,
            workload_produced,
            skill_level_required,
            mandatory,
            release_day,
            due_day,
            surgery_duration,
            surgeon,
            incompatible_rooms,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[inline]
    pub fn age_group(&self) -> AgeGroupIdx {
        self.age_group
    }

    #[inline]
    pub fn length_of_stay(&self) -> usize {
        self.length_of_stay
    }

    /// Workload produced in stay-relative shift `local_shift`.
    #[inline]
    pub fn workload_produced(&self, local_shift: usize) -> Cost {
        self.workload_produced[local_shift]
    }

    /// Minimum nurse skill level required in stay-relative shift `local_shift`.
    #[inline]
    pub fn skill_level_required(&self, local_shift: usize) -> i64 {
        self.skill_level_required[local_shift]
    }

    #[inline]
    pub fn mandatory(&self) -> bool {
        self.mandatory
    }

    /// Earliest admissible admission day.
    #[inline]
    pub fn release_day(&self) -> usize {
        self.release_day
    }

    /// Latest admissible admission day; only present for mandatory patients.
    #[inline]
    pub fn due_day(&self) -> Option<usize> {
        self.due_day
    }

    #[inline]
    pub fn surgery_duration(&self) -> Cost {
        self.surgery_duration
    }

    #[inline]
    pub fn surgeon(&self) -> SurgeonIdx {
        self.surgeon
    }

    #[inline]
    pub fn is_room_incompatible(&self, room: RoomIdx) -> bool {
        self.incompatible_rooms.contains(room.get())
    }
}
