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

//! The planning calendar. A *shift index* `s` in `[0, shifts)` encodes
//! `(day, shift_of_day) = (s / shifts_per_day, s % shifts_per_day)`; all
//! shift arithmetic in the workspace goes through this type.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Calendar {
    days: usize,
    shifts_per_day: usize,
}

impl Calendar {
    #[inline]
    pub fn new(days: usize, shifts_per_day: usize) -> Self {
        Self {
            days,
            shifts_per_day,
        }
    }

    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    #[inline]
    pub fn shifts_per_day(&self) -> usize {
        self.shifts_per_day
    }

    /// Total number of shift indices on the horizon.
    #[inline]
    pub fn shifts(&self) -> usize {
        self.days * self.shifts_per_day
    }

    #[inline]
    pub fn day_of(&self, shift: usize) -> usize {
        shift / self.shifts_per_day
    }

    #[inline]
    pub fn shift_of_day(&self, shift: usize) -> usize {
        shift % self.shifts_per_day
    }

    /// Global shift index of `shift_of_day` on `day`.
    #[inline]
    pub fn shift_at(&self, day: usize, shift_of_day: usize) -> usize {
        day * self.shifts_per_day + shift_of_day
    }

    /// First global shift index of `day`.
    #[inline]
    pub fn first_shift_of(&self, day: usize) -> usize {
        day * self.shifts_per_day
    }

    /// Iterates the global shift indices of `day`.
    #[inline]
    pub fn shifts_of_day(&self, day: usize) -> std::ops::Range<usize> {
        self.first_shift_of(day)..self.first_shift_of(day + 1)
    }

    /// Translates a global shift index into the stay-relative index of a
    /// patient admitted on `admission_day`. The caller guarantees `shift`
    /// does not precede the admission.
    #[inline]
    pub fn local_shift(&self, shift: usize, admission_day: usize) -> usize {
        shift - admission_day * self.shifts_per_day
    }
}
