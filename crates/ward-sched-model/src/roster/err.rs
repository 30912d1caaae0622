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

use crate::common::{NurseIdx, PatientIdx};

/// A patient appeared with a second admission while already scheduled. The
/// first assignment stays in effect; the roster is untouched by the failed
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateAssignmentError {
    patient: PatientIdx,
}

impl DuplicateAssignmentError {
    pub fn new(patient: PatientIdx) -> Self {
        Self { patient }
    }

    pub fn patient(&self) -> PatientIdx {
        self.patient
    }
}

impl std::fmt::Display for DuplicateAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Patient {} assigned twice in the solution", self.patient)
    }
}

impl std::error::Error for DuplicateAssignmentError {}

/// An admission day at or beyond the end of the planning horizon. Such a
/// record cannot be represented in the roster at all; late-but-on-calendar
/// admissions are a scored rule, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdmissionOutOfCalendarError {
    patient: PatientIdx,
    day: usize,
    days: usize,
}

impl AdmissionOutOfCalendarError {
    pub fn new(patient: PatientIdx, day: usize, days: usize) -> Self {
        Self {
            patient,
            day,
            days,
        }
    }

    pub fn patient(&self) -> PatientIdx {
        self.patient
    }

    pub fn day(&self) -> usize {
        self.day
    }
}

impl std::fmt::Display for AdmissionOutOfCalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patient {} admitted on day {} outside the {}-day calendar",
            self.patient, self.day, self.days
        )
    }
}

impl std::error::Error for AdmissionOutOfCalendarError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignPatientError {
    Duplicate(DuplicateAssignmentError),
    OutOfCalendar(AdmissionOutOfCalendarError),
}

impl std::fmt::Display for AssignPatientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignPatientError::Duplicate(e) => write!(f, "{}", e),
            AssignPatientError::OutOfCalendar(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AssignPatientError {}

impl From<DuplicateAssignmentError> for AssignPatientError {
    fn from(err: DuplicateAssignmentError) -> Self {
        AssignPatientError::Duplicate(err)
    }
}

impl From<AdmissionOutOfCalendarError> for AssignPatientError {
    fn from(err: AdmissionOutOfCalendarError) -> Self {
        AssignPatientError::OutOfCalendar(err)
    }
}

/// A nurse was assigned to cover a room in a shift outside their working
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidNurseAssignmentError {
    nurse: NurseIdx,
    shift: usize,
}

impl InvalidNurseAssignmentError {
    pub fn new(nurse: NurseIdx, shift: usize) -> Self {
        Self { nurse, shift }
    }

    pub fn nurse(&self) -> NurseIdx {
        self.nurse
    }

    pub fn shift(&self) -> usize {
        self.shift
    }
}

impl std::fmt::Display for InvalidNurseAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Assigning non-working nurse {} to shift {}",
            self.nurse, self.shift
        )
    }
}

impl std::error::Error for InvalidNurseAssignmentError {}

/// Any ingestion failure: the schedule cannot be represented and therefore
/// cannot be scored. Rule violations are never reported through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterError {
    DuplicateAssignment(DuplicateAssignmentError),
    AdmissionOutOfCalendar(AdmissionOutOfCalendarError),
    InvalidNurseAssignment(InvalidNurseAssignmentError),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::DuplicateAssignment(e) => write!(f, "{}", e),
            RosterError::AdmissionOutOfCalendar(e) => write!(f, "{}", e),
            RosterError::InvalidNurseAssignment(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<DuplicateAssignmentError> for RosterError {
    fn from(err: DuplicateAssignmentError) -> Self {
        RosterError::DuplicateAssignment(err)
    }
}

impl From<AdmissionOutOfCalendarError> for RosterError {
    fn from(err: AdmissionOutOfCalendarError) -> Self {
        RosterError::AdmissionOutOfCalendar(err)
    }
}

impl From<InvalidNurseAssignmentError> for RosterError {
    fn from(err: InvalidNurseAssignmentError) -> Self {
        RosterError::InvalidNurseAssignment(err)
    }
}

impl From<AssignPatientError> for RosterError {
    fn from(err: AssignPatientError) -> Self {
        match err {
            AssignPatientError::Duplicate(e) => RosterError::DuplicateAssignment(e),
            AssignPatientError::OutOfCalendar(e) => RosterError::AdmissionOutOfCalendar(e),
        }
    }
}
