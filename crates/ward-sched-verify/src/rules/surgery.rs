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

//! Surgical case planning rules: theater and surgeon capacity, scheduling
//! windows, unscheduled patients, theater openings and surgeon transfers.

use crate::rules::{RuleTrace, ScheduleRule};
use ward_sched_model::prelude::{Cost, Instance, Roster};

/// Hard: minutes of surgery in a theater beyond its daily availability.
pub struct OperatingTheaterOvertime;

impl ScheduleRule for OperatingTheaterOvertime {
    fn name(&self) -> &'static str {
        "OperatingTheaterOvertime"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for t in instance.theater_indices() {
            for d in 0..instance.days() {
                let time = roster.theater_load(t, d);
                let available = instance.operating_theater(t).availability(d);
                if time > available {
                    cost += time - available;
                    trace.note(|| {
                        format!(
                            "Operating theater {} has {} minutes of overtime on day {}",
                            instance.operating_theater(t).id(),
                            time - available,
                            d
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Hard: minutes of surgery performed by a surgeon beyond their daily
/// maximum.
pub struct SurgeonOvertime;

impl ScheduleRule for SurgeonOvertime {
    fn name(&self) -> &'static str {
        "SurgeonOvertime"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for u in instance.surgeon_indices() {
            for d in 0..instance.days() {
                let load = roster.surgeon_load(u, d);
                let max = instance.surgeon(u).max_surgery_time(d);
                if load > max {
                    cost += load - max;
                    trace.note(|| {
                        format!(
                            "Surgeon {} has {} minutes of overtime on day {}",
                            instance.surgeon(u).id(),
                            load - max,
                            d
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Hard: a mandatory patient the schedule leaves unscheduled.
pub struct MandatoryUnscheduledPatients;

impl ScheduleRule for MandatoryUnscheduledPatients {
    fn name(&self) -> &'static str {
        "MandatoryUnscheduledPatients"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for p in instance.patient_indices() {
            if !roster.is_scheduled(p) && instance.patient(p).mandatory() {
                cost += 1;
                trace.note(|| {
                    format!(
                        "Mandatory patient {} is unscheduled",
                        instance.patient(p).id()
                    )
                });
            }
        }
        cost
    }
}

/// Hard: a scheduled admission day outside the patient's admissible window
/// `[release_day, last_possible_day]`.
pub struct AdmissionDay;

impl ScheduleRule for AdmissionDay {
    fn name(&self) -> &'static str {
        "AdmissionDay"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for p in instance.patient_indices() {
            let Some(day) = roster.admission_day(p) else {
                continue;
            };
            let release = instance.patient(p).release_day();
            let last = instance.last_possible_day(p);
            if day < release || day > last {
                cost += 1;
                trace.note(|| {
                    if day < release {
                        format!(
                            "Patient {} is admitted at {} before the release date {}",
                            instance.patient(p).id(),
                            day,
                            release
                        )
                    } else {
                        format!(
                            "Patient {} is admitted at {} after the last possible date {}",
                            instance.patient(p).id(),
                            day,
                            last
                        )
                    }
                });
            }
        }
        cost
    }
}

/// Soft: an elective (non-mandatory) patient the schedule leaves
/// unscheduled.
pub struct ElectiveUnscheduledPatients;

impl ScheduleRule for ElectiveUnscheduledPatients {
    fn name(&self) -> &'static str {
        "ElectiveUnscheduledPatients"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for p in instance.patient_indices() {
            if !roster.is_scheduled(p) && !instance.patient(p).mandatory() {
                cost += 1;
                trace.note(|| {
                    format!(
                        "Elective patient {} is unscheduled",
                        instance.patient(p).id()
                    )
                });
            }
        }
        cost
    }
}

/// Soft: days between a patient's release day and their actual admission.
pub struct PatientDelay;

impl ScheduleRule for PatientDelay {
    fn name(&self) -> &'static str {
        "PatientDelay"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for p in instance.patient_indices() {
            let Some(day) = roster.admission_day(p) else {
                continue;
            };
            let release = instance.patient(p).release_day();
            if day > release {
                cost += (day - release) as Cost;
                trace.note(|| {
                    format!(
                        "Patient {} has been delayed for {} days",
                        instance.patient(p).id(),
                        day - release
                    )
                });
            }
        }
        cost
    }
}

/// Soft: every theater/day pair with at least one operation counts once.
pub struct OpenOperatingTheater;

impl ScheduleRule for OpenOperatingTheater {
    fn name(&self) -> &'static str {
        "OpenOperatingTheater"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for t in instance.theater_indices() {
            for d in 0..instance.days() {
                if !roster.theater_patients(t, d).is_empty() {
                    cost += 1;
                    trace.note(|| {
                        format!(
                            "Operating theater {} is open on day {}",
                            instance.operating_theater(t).id(),
                            d
                        )
                    });
                }
            }
        }
        cost
    }
}

/// Soft: per surgeon and day, every distinct theater beyond the first.
pub struct SurgeonTransfer;

impl ScheduleRule for SurgeonTransfer {
    fn name(&self) -> &'static str {
        "SurgeonTransfer"
    }

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost {
        let mut cost = 0;
        for u in instance.surgeon_indices() {
            for d in 0..instance.days() {
                let theaters = instance
                    .theater_indices()
                    .filter(|&t| roster.surgeon_theater_ops(u, d, t) > 0)
                    .count() as Cost;
                if theaters > 1 {
                    cost += theaters - 1;
                    trace.note(|| {
                        format!(
                            "Surgeon {} operates in {} distinct operating theaters",
                            instance.surgeon(u).id(),
                            theaters
                        )
                    });
                }
            }
        }
        cost
    }
}
