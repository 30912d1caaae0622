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

//! The rule evaluators. Every rule is a pure read of `(Instance, Roster)`
//! returning a non-negative count; none mutates state or depends on any
//! other rule, so they may run in any order. Rules never fail — a schedule
//! that reached a roster is always scorable.
//!
//! Grouping follows the three planning layers: surgical case planning
//! ([`surgery`]), patient admission scheduling ([`admission`]) and
//! nurse-to-room assignment ([`nursing`]).

pub mod admission;
pub mod nursing;
pub mod surgery;

use ward_sched_model::prelude::{Cost, Instance, Roster};

/// Collects one human-readable line per violated unit. Construction is lazy;
/// a disabled trace skips the formatting entirely.
#[derive(Debug, Clone, Default)]
pub struct RuleTrace {
    enabled: bool,
    lines: Vec<String>,
}

impl RuleTrace {
    #[inline]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            lines: Vec::new(),
        }
    }

    #[inline]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            lines: Vec::new(),
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn note(&mut self, line: impl FnOnce() -> String) {
        if self.enabled {
            self.lines.push(line());
        }
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// One constraint of the problem. `evaluate` returns the violation count
/// (hard rules) or the unweighted cost magnitude (soft rules).
pub trait ScheduleRule {
    fn name(&self) -> &'static str;

    fn evaluate(&self, instance: &Instance, roster: &Roster, trace: &mut RuleTrace) -> Cost;
}
