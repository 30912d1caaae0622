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

/// Violation counts and weighted soft costs are summed in this type.
pub type Cost = i64;

pub trait IndexMarkerName: Copy {
    const NAME: &'static str;
}

/// A typed position into one of the instance entity vectors. The marker
/// prevents mixing, say, a nurse index into a room lookup.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Idx<U>(usize, core::marker::PhantomData<U>);

impl<U> Idx<U> {
    #[inline]
    pub fn new(i: usize) -> Self {
        Self(i, core::marker::PhantomData)
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }
}

impl<U: IndexMarkerName> std::fmt::Display for Idx<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

macro_rules! index_marker {
    ($marker:ident, $alias:ident, $name:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $marker;

        impl IndexMarkerName for $marker {
            const NAME: &'static str = $name;
        }

        pub type $alias = Idx<$marker>;
    };
}

index_marker!(PatientIdxMarker, PatientIdx, "PatientIdx");
index_marker!(OccupantIdxMarker, OccupantIdx, "OccupantIdx");
index_marker!(RoomIdxMarker, RoomIdx, "RoomIdx");
index_marker!(NurseIdxMarker, NurseIdx, "NurseIdx");
index_marker!(SurgeonIdxMarker, SurgeonIdx, "SurgeonIdx");
index_marker!(TheaterIdxMarker, TheaterIdx, "TheaterIdx");
index_marker!(AgeGroupIdxMarker, AgeGroupIdx, "AgeGroupIdx");

/// Someone present in a room on a given day. Occupants were already in the
/// hospital on day 0 with a fixed room and stay; patients enter through the
/// schedule under verification. The tag decides whether per-shift data is
/// addressed relative to the admission day (patients) or absolutely
/// (occupants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Person {
    Patient(PatientIdx),
    Occupant(OccupantIdx),
}

impl Person {
    #[inline]
    pub fn is_patient(&self) -> bool {
        matches!(self, Person::Patient(_))
    }

    #[inline]
    pub fn is_occupant(&self) -> bool {
        matches!(self, Person::Occupant(_))
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Person::Patient(p) => write!(f, "{}", p),
            Person::Occupant(o) => write!(f, "{}", o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idx_round_trip_and_display() {
        let p = PatientIdx::new(7);
        assert_eq!(p.get(), 7);
        assert_eq!(p.to_string(), "PatientIdx(7)");
    }

    #[test]
    fn test_idx_ordering_follows_inner_value() {
        assert!(RoomIdx::new(1) < RoomIdx::new(2));
        assert_eq!(NurseIdx::new(3), NurseIdx::new(3));
    }

    #[test]
    fn test_person_tags() {
        let a = Person::Patient(PatientIdx::new(0));
        let b = Person::Occupant(OccupantIdx::new(0));
        assert!(a.is_patient() && !a.is_occupant());
        assert!(b.is_occupant() && !b.is_patient());
        assert_ne!(a, b);
    }
}
