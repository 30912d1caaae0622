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

/// The eight weighted soft-cost components, in the order the instance
/// document declares their weights. Every weight lookup goes through this
/// enum; there is no positional pairing between weights and evaluators
/// anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CostComponent {
    RoomMixedAge,
    RoomNurseSkill,
    ContinuityOfCare,
    NurseExcessiveWorkload,
    OpenOperatingTheater,
    SurgeonTransfer,
    PatientDelay,
    UnscheduledOptional,
}

impl CostComponent {
    pub const ALL: [CostComponent; 8] = [
        CostComponent::RoomMixedAge,
        CostComponent::RoomNurseSkill,
        CostComponent::ContinuityOfCare,
        CostComponent::NurseExcessiveWorkload,
        CostComponent::OpenOperatingTheater,
        CostComponent::SurgeonTransfer,
        CostComponent::PatientDelay,
        CostComponent::UnscheduledOptional,
    ];

    /// The weight key used by the instance document.
    #[inline]
    pub fn key(&self) -> &'static str {
        match self {
            CostComponent::RoomMixedAge => "room_mixed_age",
            CostComponent::RoomNurseSkill => "room_nurse_skill",
            CostComponent::ContinuityOfCare => "continuity_of_care",
            CostComponent::NurseExcessiveWorkload => "nurse_eccessive_workload",
            CostComponent::OpenOperatingTheater => "open_operating_theater",
            CostComponent::SurgeonTransfer => "surgeon_transfer",
            CostComponent::PatientDelay => "patient_delay",
            CostComponent::UnscheduledOptional => "unscheduled_optional",
        }
    }

    #[inline]
    fn slot(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for CostComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The instance-supplied weight of each soft-cost component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    by_component: [Cost; 8],
}

impl Weights {
    #[inline]
    pub fn new(assign: impl Fn(CostComponent) -> Cost) -> Self {
        let mut by_component = [0; 8];
        for c in CostComponent::ALL {
            by_component[c.slot()] = assign(c);
        }
        Self { by_component }
    }

    /// All components weighted equally; convenient in tests.
    #[inline]
    pub fn uniform(w: Cost) -> Self {
        Self::new(|_| w)
    }

    #[inline]
    pub fn get(&self, component: CostComponent) -> Cost {
        self.by_component[component.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_are_keyed_not_positional() {
        let w = Weights::new(|c| match c {
            CostComponent::PatientDelay => 7,
            CostComponent::SurgeonTransfer => 3,
            _ => 1,
        });
        assert_eq!(w.get(CostComponent::PatientDelay), 7);
        assert_eq!(w.get(CostComponent::SurgeonTransfer), 3);
        assert_eq!(w.get(CostComponent::RoomMixedAge), 1);
    }

    #[test]
    fn test_component_keys_match_document_spelling() {
        // The document spells this key with the original's misspelling.
        assert_eq!(
            CostComponent::NurseExcessiveWorkload.key(),
            "nurse_eccessive_workload"
        );
        assert_eq!(CostComponent::ALL.len(), 8);
    }
}
