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

use crate::common::Cost;
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: String,
    capacity: usize,
}

impl Room {
    #[inline]
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum number of simultaneous occupants and patients.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatingTheater {
    id: String,
    availability: Vec<Cost>,
}

impl OperatingTheater {
    #[inline]
    pub fn new(id: impl Into<String>, availability: Vec<Cost>) -> Self {
        Self {
            id: id.into(),
            availability,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Minutes of surgery this theater can host on `day`.
    #[inline]
    pub fn availability(&self, day: usize) -> Cost {
        self.availability[day]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surgeon {
    id: String,
    max_surgery_time: Vec<Cost>,
}

impl Surgeon {
    #[inline]
    pub fn new(id: impl Into<String>, max_surgery_time: Vec<Cost>) -> Self {
        Self {
            id: id.into(),
            max_surgery_time,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Minutes of surgery this surgeon may perform on `day`.
    #[inline]
    pub fn max_surgery_time(&self, day: usize) -> Cost {
        self.max_surgery_time[day]
    }
}

/// A nurse with a skill level and a set of working shifts. The maximum load
/// array spans every shift of the horizon and is zero outside the working
/// set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nurse {
    id: String,
    skill_level: i64,
    working_shifts: Vec<usize>,
    is_working: FixedBitSet,
    max_loads: Vec<Cost>,
}

impl Nurse {
    /// Builds a nurse from `(shift, max_load)` pairs over a horizon of
    /// `shifts` shift indices.
    pub fn new<I>(id: impl Into<String>, skill_level: i64, shifts: usize, working: I) -> Self
    where
        I: IntoIterator<Item = (usize, Cost)>,
    {
        let mut working_shifts = Vec::new();
        let mut is_working = FixedBitSet::with_capacity(shifts);
        let mut max_loads = vec![0; shifts];
        for (s, max_load) in working {
            working_shifts.push(s);
            is_working.insert(s);
            max_loads[s] = max_load;
        }
        Self {
            id: id.into(),
            skill_level,
            working_shifts,
            is_working,
            max_loads,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn skill_level(&self) -> i64 {
        self.skill_level
    }

    #[inline]
    pub fn is_working(&self, shift: usize) -> bool {
        self.is_working.contains(shift)
    }

    /// The working shifts in the order they were declared.
    #[inline]
    pub fn working_shifts(&self) -> &[usize] {
        &self.working_shifts
    }

    /// Maximum workload in `shift`; zero when the nurse is absent.
    #[inline]
    pub fn max_load(&self, shift: usize) -> Cost {
        self.max_loads[shift]
    }
}
