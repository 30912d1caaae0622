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

//! Report aggregation: the fixed hard and soft rule registries, the scored
//! report with its totals, and the rendered violations/costs table.

use crate::rules::admission::{PatientRoomCompatibility, RoomAgeMix, RoomCapacity, RoomGenderMix};
use crate::rules::nursing::{
    ContinuityOfCare, ExcessiveNurseWorkload, NursePresence, RoomSkillLevel, UncoveredRoom,
};
use crate::rules::surgery::{
    AdmissionDay, ElectiveUnscheduledPatients, MandatoryUnscheduledPatients, OpenOperatingTheater,
    OperatingTheaterOvertime, PatientDelay, SurgeonOvertime, SurgeonTransfer,
};
use crate::rules::{RuleTrace, ScheduleRule};
use ward_sched_model::prelude::{Cost, Instance, Roster};
use ward_sched_model::weights::CostComponent;

/// The nine unweighted hard rules, in report order.
pub const HARD_RULES: [&(dyn ScheduleRule + Sync); 9] = [
    &RoomGenderMix,
    &PatientRoomCompatibility,
    &SurgeonOvertime,
    &OperatingTheaterOvertime,
    &MandatoryUnscheduledPatients,
    &AdmissionDay,
    &RoomCapacity,
    &NursePresence,
    &UncoveredRoom,
];

/// The eight weighted soft rules, each tied to the cost component whose
/// weight scales it. The pairing is by name here, never by position in the
/// weight vector.
pub const SOFT_RULES: [(CostComponent, &(dyn ScheduleRule + Sync)); 8] = [
    (CostComponent::RoomMixedAge, &RoomAgeMix),
    (CostComponent::RoomNurseSkill, &RoomSkillLevel),
    (CostComponent::ContinuityOfCare, &ContinuityOfCare),
    (CostComponent::NurseExcessiveWorkload, &ExcessiveNurseWorkload),
    (CostComponent::OpenOperatingTheater, &OpenOperatingTheater),
    (CostComponent::SurgeonTransfer, &SurgeonTransfer),
    (CostComponent::PatientDelay, &PatientDelay),
    (CostComponent::UnscheduledOptional, &ElectiveUnscheduledPatients),
];

/// One hard rule's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    name: &'static str,
    count: Cost,
    details: Vec<String>,
}

impl Violation {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn count(&self) -> Cost {
        self.count
    }

    #[inline]
    pub fn details(&self) -> &[String] {
        &self.details
    }
}

/// One soft rule's result together with its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftCost {
    name: &'static str,
    component: CostComponent,
    count: Cost,
    weight: Cost,
    details: Vec<String>,
}

impl SoftCost {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn component(&self) -> CostComponent {
        self.component
    }

    #[inline]
    pub fn count(&self) -> Cost {
        self.count
    }

    #[inline]
    pub fn weight(&self) -> Cost {
        self.weight
    }

    #[inline]
    pub fn weighted(&self) -> Cost {
        self.count * self.weight
    }

    #[inline]
    pub fn details(&self) -> &[String] {
        &self.details
    }
}

/// The full scoring of one roster: every hard violation count, every
/// weighted soft cost, and (when requested) the per-violation detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    violations: Vec<Violation>,
    costs: Vec<SoftCost>,
}

impl ScoreReport {
    /// Runs every rule over the roster. `verbose` controls whether detail
    /// lines are collected.
    pub fn compute(instance: &Instance, roster: &Roster, verbose: bool) -> Self {
        let violations = HARD_RULES
            .iter()
            .map(|rule| {
                let mut trace = if verbose {
                    RuleTrace::enabled()
                } else {
                    RuleTrace::disabled()
                };
                let count = rule.evaluate(instance, roster, &mut trace);
                Violation {
                    name: rule.name(),
                    count,
                    details: trace.into_lines(),
                }
            })
            .collect();

        let costs = SOFT_RULES
            .iter()
            .map(|(component, rule)| {
                let mut trace = if verbose {
                    RuleTrace::enabled()
                } else {
                    RuleTrace::disabled()
                };
                let count = rule.evaluate(instance, roster, &mut trace);
                SoftCost {
                    name: rule.name(),
                    component: *component,
                    count,
                    weight: instance.weights().get(*component),
                    details: trace.into_lines(),
                }
            })
            .collect();

        Self { violations, costs }
    }

    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[inline]
    pub fn costs(&self) -> &[SoftCost] {
        &self.costs
    }

    #[inline]
    pub fn total_violations(&self) -> Cost {
        self.violations.iter().map(|v| v.count).sum()
    }

    #[inline]
    pub fn total_cost(&self) -> Cost {
        self.costs.iter().map(|c| c.weighted()).sum()
    }

    /// Count of a single rule by name; handy for callers that only care
    /// about one number.
    pub fn rule_count(&self, name: &str) -> Option<Cost> {
        self.violations
            .iter()
            .map(|v| (v.name, v.count))
            .chain(self.costs.iter().map(|c| (c.name, c.count)))
            .find(|(n, _)| *n == name)
            .map(|(_, count)| count)
    }

    /// Every collected detail line, paired with its rule name.
    pub fn iter_details(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.violations
            .iter()
            .flat_map(|v| v.details.iter().map(|l| (v.name, l.as_str())))
            .chain(
                self.costs
                    .iter()
                    .flat_map(|c| c.details.iter().map(|l| (c.name, l.as_str()))),
            )
    }
}

impl std::fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "VIOLATIONS:")?;
        for v in &self.violations {
            writeln!(f, "{:.<30}{:.>5}", v.name, v.count)?;
        }
        writeln!(f, "Total violations = {}", self.total_violations())?;
        writeln!(f)?;
        writeln!(f, "COSTS (weight X cost):")?;
        for c in &self.costs {
            writeln!(
                f,
                "{:.<30}{:.>10} ({:>3} X {:>3})",
                c.name,
                c.weighted(),
                c.weight,
                c.count
            )?;
        }
        write!(f, "Total cost = {}", self.total_cost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixture::{instance, n, p, r, t, u};
    use ward_sched_model::prelude::{Person, RosterBuilder};

    #[test]
    fn test_empty_schedule_scores_zero_everywhere_except_unscheduled() {
        let mut b = ward_sched_model::instance::InstanceBuilder::new();
        b.days(2)
            .shift_types(["early", "late"])
            .age_groups(["adult"])
            .skill_levels(1);
        b.add_room(ward_sched_model::staff::Room::new("R0", 1));
        let inst = b.build();
        let roster = RosterBuilder::new(&inst).finish();

        // No occupants, no patients: every rule reports zero.
        let report = ScoreReport::compute(&inst, &roster, false);
        assert_eq!(report.total_violations(), 0);
        assert_eq!(report.total_cost(), 0);
        for v in report.violations() {
            assert_eq!(v.count(), 0, "{} expected zero", v.name());
        }
        for c in report.costs() {
            assert_eq!(c.count(), 0, "{} expected zero", c.name());
        }
    }

    #[test]
    fn test_totals_are_the_sums_of_the_parts() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        b.assign_patient(p(0), 2, r(0), t(1)).unwrap();
        b.assign_patient(p(1), 0, r(1), t(1)).unwrap();
        b.assign_nurse(n(1), r(0), 0).unwrap();
        let roster = b.finish();

        let report = ScoreReport::compute(&inst, &roster, false);
        let hard_sum: i64 = report.violations().iter().map(|v| v.count()).sum();
        let weighted_sum: i64 = report.costs().iter().map(|c| c.weighted()).sum();
        assert_eq!(report.total_violations(), hard_sum);
        assert_eq!(report.total_cost(), weighted_sum);
        assert!(report.total_violations() >= 0);
        assert!(report.total_cost() >= 0);
        assert_eq!(report.violations().len(), 9);
        assert_eq!(report.costs().len(), 8);
    }

    #[test]
    fn test_report_order_is_fixed() {
        let inst = instance();
        let roster = RosterBuilder::new(&inst).finish();
        let report = ScoreReport::compute(&inst, &roster, false);
        let names: Vec<_> = report.violations().iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec![
                "RoomGenderMix",
                "PatientRoomCompatibility",
                "SurgeonOvertime",
                "OperatingTheaterOvertime",
                "MandatoryUnscheduledPatients",
                "AdmissionDay",
                "RoomCapacity",
                "NursePresence",
                "UncoveredRoom",
            ]
        );
        let names: Vec<_> = report.costs().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "RoomAgeMix",
                "RoomSkillLevel",
                "ContinuityOfCare",
                "ExcessiveNurseWorkload",
                "OpenOperatingTheater",
                "SurgeonTransfer",
                "PatientDelay",
                "ElectiveUnscheduledPatients",
            ]
        );
    }

    #[test]
    fn test_verbose_report_carries_detail_lines() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        // P1 in its incompatible room.
        b.assign_patient(p(1), 0, r(1), t(0)).unwrap();
        let roster = b.finish();

        let verbose = ScoreReport::compute(&inst, &roster, true);
        assert!(
            verbose
                .iter_details()
                .any(|(rule, line)| rule == "PatientRoomCompatibility" && line.contains("P1"))
        );

        let quiet = ScoreReport::compute(&inst, &roster, false);
        assert_eq!(quiet.iter_details().count(), 0);
        // Verbosity never changes the numbers.
        assert_eq!(quiet.total_violations(), verbose.total_violations());
        assert_eq!(quiet.total_cost(), verbose.total_cost());
    }

    #[test]
    fn test_rendered_table_shape() {
        let inst = instance();
        let roster = RosterBuilder::new(&inst).finish();
        let report = ScoreReport::compute(&inst, &roster, false);
        let text = report.to_string();
        assert!(text.starts_with("VIOLATIONS:"));
        // Two mandatory patients unscheduled plus four uncovered occupant
        // shifts.
        assert!(text.contains("Total violations = 6"));
        assert!(text.contains("COSTS (weight X cost):"));
        assert!(text.contains("Total cost = 2"));
        assert!(text.contains("RoomGenderMix"));
        assert!(text.contains("ElectiveUnscheduledPatients"));
    }

    // Every aggregate the rules read must equal a from-scratch recomputation
    // from the raw assignments.
    #[test]
    fn test_aggregates_match_raw_recomputation() {
        let inst = instance();
        let mut b = RosterBuilder::new(&inst);
        b.assign_nurse(n(0), r(0), 2).unwrap();
        b.assign_patient(p(0), 0, r(0), t(0)).unwrap();
        b.assign_patient(p(1), 0, r(0), t(1)).unwrap();
        b.assign_patient(p(2), 1, r(1), t(0)).unwrap();
        b.assign_nurse(n(1), r(0), 0).unwrap();
        b.assign_nurse(n(2), r(1), 3).unwrap();
        let roster = b.finish();

        // Surgeon and theater loads from the raw patient decisions.
        for su in [u(0), u(1)] {
            for d in 0..inst.days() {
                let expected: i64 = inst
                    .patient_indices()
                    .filter(|&pi| {
                        roster.admission_day(pi) == Some(d)
                            && inst.patient(pi).surgeon() == su
                    })
                    .map(|pi| inst.patient(pi).surgery_duration())
                    .sum();
                assert_eq!(roster.surgeon_load(su, d), expected);
            }
        }
        for th in [t(0), t(1)] {
            for d in 0..inst.days() {
                let expected: i64 = roster
                    .theater_patients(th, d)
                    .iter()
                    .map(|&pi| inst.patient(pi).surgery_duration())
                    .sum();
                assert_eq!(roster.theater_load(th, d), expected);
            }
        }

        // Nurse loads from the coverage lists and occupancy lists.
        for ni in [n(0), n(1), n(2)] {
            for s in 0..inst.shifts() {
                let d = inst.calendar().day_of(s);
                let expected: i64 = roster
                    .rooms_covered(ni, s)
                    .iter()
                    .flat_map(|&ri| roster.people_in(ri, d).iter())
                    .map(|&person| roster.workload_at(&inst, person, s))
                    .sum();
                assert_eq!(roster.nurse_load(ni, s), expected, "nurse {ni} shift {s}");
            }
        }

        // Gender counters from the occupancy lists.
        for ri in [r(0), r(1), r(2)] {
            for d in 0..inst.days() {
                let a = roster
                    .people_in(ri, d)
                    .iter()
                    .filter(|&&person| {
                        inst.person_gender(person) == ward_sched_model::people::Gender::A
                    })
                    .count() as u32;
                assert_eq!(roster.gender_a_count(ri, d), a);
            }
        }

        // Carer slots against coverage: each covered shift of P0's stay
        // names the covering nurse.
        assert_eq!(roster.carer_at(Person::Patient(p(0)), 0), Some(n(1)));
        assert_eq!(roster.carer_at(Person::Patient(p(0)), 2), Some(n(0)));
    }
}
