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

/// An id or name in a document did not resolve against the instance. This is
/// the only failure the instance lookup surface raises; it aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownIdError {
    entity: &'static str,
    id: String,
}

impl UnknownIdError {
    #[inline]
    pub fn new(entity: &'static str, id: impl Into<String>) -> Self {
        Self {
            entity,
            id: id.into(),
        }
    }

    #[inline]
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for UnknownIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} id \"{}\"", self.entity, self.id)
    }
}

impl std::error::Error for UnknownIdError {}
