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

//! Data model for the ward-sched hospital schedule verifier: the immutable
//! problem instance (calendar, rooms, occupants, patients, surgeons,
//! operating theaters, nurses, cost weights), the mutable roster state a
//! candidate schedule is ingested into, and the JSON loaders for both
//! documents.

pub mod calendar;
pub mod common;
pub mod err;
pub mod instance;
pub mod loader;
pub mod people;
pub mod roster;
pub mod solution;
pub mod staff;
pub mod weights;

pub mod prelude {
    pub use crate::calendar::Calendar;
    pub use crate::common::{
        AgeGroupIdx, Cost, NurseIdx, OccupantIdx, PatientIdx, Person, RoomIdx, SurgeonIdx,
        TheaterIdx,
    };
    pub use crate::err::UnknownIdError;
    pub use crate::instance::{Instance, InstanceBuilder};
    pub use crate::loader::{InstanceLoader, LoaderError, SolutionLoader};
    pub use crate::people::{Gender, Occupant, Patient};
    pub use crate::roster::builder::RosterBuilder;
    pub use crate::roster::err::{
        AdmissionOutOfCalendarError, AssignPatientError, DuplicateAssignmentError,
        InvalidNurseAssignmentError, RosterError,
    };
    pub use crate::roster::state::Roster;
    pub use crate::solution::{AdmissionDay, AdmissionRecord, NurseRecord, SolutionDoc};
    pub use crate::staff::{Nurse, OperatingTheater, Room, Surgeon};
    pub use crate::weights::{CostComponent, Weights};
}
