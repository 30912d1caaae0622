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

//! Applies a parsed solution document to a fresh roster, record by record
//! and in document order: admissions first, then nurse assignments. Any
//! failure here means the schedule cannot be scored at all; rule violations
//! are never errors.

use crate::report::ScoreReport;
use ward_sched_model::prelude::{
    Instance, Roster, RosterBuilder, RosterError, SolutionDoc, UnknownIdError,
};
use ward_sched_model::solution::AdmissionDay;

#[derive(Debug)]
pub enum IngestError {
    UnknownId(UnknownIdError),
    Roster(RosterError),
    MissingField {
        record: String,
        field: &'static str,
    },
}

impl From<UnknownIdError> for IngestError {
    fn from(e: UnknownIdError) -> Self {
        Self::UnknownId(e)
    }
}

impl From<RosterError> for IngestError {
    fn from(e: RosterError) -> Self {
        Self::Roster(e)
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::UnknownId(e) => write!(f, "{e}"),
            IngestError::Roster(e) => write!(f, "{e}"),
            IngestError::MissingField { record, field } => {
                write!(f, "solution record \"{record}\" is missing field \"{field}\"")
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Builds the roster a solution document describes. Unscheduled admission
/// records are skipped entirely; their room and theater fields, if any, are
/// ignored.
pub fn apply_solution(instance: &Instance, doc: &SolutionDoc) -> Result<Roster, IngestError> {
    let mut builder = RosterBuilder::new(instance);

    for record in &doc.patients {
        let AdmissionDay::Day(day) = record.admission_day else {
            continue;
        };
        let patient = instance.find_patient(&record.id)?;
        let room_id = record.room.as_deref().ok_or_else(|| IngestError::MissingField {
            record: record.id.clone(),
            field: "room",
        })?;
        let theater_id =
            record
                .operating_theater
                .as_deref()
                .ok_or_else(|| IngestError::MissingField {
                    record: record.id.clone(),
                    field: "operating_theater",
                })?;
        let room = instance.find_room(room_id)?;
        let theater = instance.find_operating_theater(theater_id)?;
        builder
            .assign_patient(patient, day, room, theater)
            .map_err(RosterError::from)?;
    }

    for record in &doc.nurses {
        let nurse = instance.find_nurse(&record.id)?;
        for assignment in &record.assignments {
            let shift = instance
                .calendar()
                .shift_at(assignment.day, instance.find_shift(&assignment.shift)?);
            for room_id in &assignment.rooms {
                let room = instance.find_room(room_id)?;
                builder
                    .assign_nurse(nurse, room, shift)
                    .map_err(RosterError::from)?;
            }
        }
    }

    Ok(builder.finish())
}

/// Ingests and scores in one step.
pub fn score_solution(
    instance: &Instance,
    doc: &SolutionDoc,
    verbose: bool,
) -> Result<ScoreReport, IngestError> {
    let roster = apply_solution(instance, doc)?;
    let report = ScoreReport::compute(instance, &roster, verbose);
    tracing::info!(
        total_violations = report.total_violations(),
        total_cost = report.total_cost(),
        "solution scored"
    );
    Ok(report)
}
