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

//! Plain record types mirroring the solution document. Ids are still names
//! here; resolution against the instance happens when the records are
//! applied through the roster builder.

use serde::{Deserialize, Deserializer, de};

/// The admission day of a patient record: a day index, or the literal
/// `"none"` for a patient the schedule leaves unscheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDay {
    Unscheduled,
    Day(usize),
}

impl<'de> Deserialize<'de> for AdmissionDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Day(usize),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Day(d) => Ok(AdmissionDay::Day(d)),
            Raw::Text(s) if s == "none" => Ok(AdmissionDay::Unscheduled),
            Raw::Text(s) => Err(de::Error::custom(format!(
                "admission_day must be a day index or \"none\", got \"{s}\""
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdmissionRecord {
    pub id: String,
    pub admission_day: AdmissionDay,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub operating_theater: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShiftAssignment {
    pub day: usize,
    pub shift: String,
    pub rooms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NurseRecord {
    pub id: String,
    pub assignments: Vec<ShiftAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolutionDoc {
    pub patients: Vec<AdmissionRecord>,
    pub nurses: Vec<NurseRecord>,
}
