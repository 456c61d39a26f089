//! Rotation module - frame stencils and the cyclic rotation buffer
//!
//! A rotation state is four offsets into the 4x4 frame. A piece keeps its
//! states in a [`RotationBuffer`]: a fixed array plus a pointer that wraps at
//! both ends. Successive states are counterclockwise quarter turns.

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{Direction, CELLS_PER_PIECE, FRAME_CELLS, FRAME_DIMENSION, MAX_ROTATIONS};

/// One 4-cell shape inside the frame, as row-major frame offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct RotationState([u8; CELLS_PER_PIECE]);

impl RotationState {
    /// Build a state, rejecting offsets outside the frame or repeated offsets.
    pub fn new(offsets: [u8; CELLS_PER_PIECE]) -> Result<Self, EngineError> {
        for (i, &o) in offsets.iter().enumerate() {
            if o >= FRAME_CELLS || offsets[..i].contains(&o) {
                return Err(EngineError::InvalidRotationState);
            }
        }
        Ok(Self(offsets))
    }

    /// Wrap a stencil already known to be valid.
    pub(crate) const fn from_stencil(offsets: [u8; CELLS_PER_PIECE]) -> Self {
        Self(offsets)
    }

    pub fn offsets(&self) -> &[u8; CELLS_PER_PIECE] {
        &self.0
    }

    /// (column, row) of each offset within the frame.
    pub fn frame_positions(&self) -> [(i32, i32); CELLS_PER_PIECE] {
        let dim = FRAME_DIMENSION;
        self.0.map(|o| ((o % dim) as i32, (o / dim) as i32))
    }
}

impl TryFrom<Vec<u8>> for RotationState {
    type Error = EngineError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        let offsets: [u8; CELLS_PER_PIECE] = value
            .try_into()
            .map_err(|_| EngineError::InvalidRotationState)?;
        Self::new(offsets)
    }
}

impl From<RotationState> for Vec<u8> {
    fn from(value: RotationState) -> Self {
        value.0.to_vec()
    }
}

impl fmt::Display for RotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "({}, {}, {}, {})", a, b, c, d)
    }
}

/// Fixed-length cyclic sequence with a movable pointer.
///
/// The sequence is fixed at construction. Two buffers are equal when both the
/// sequence and the pointer match; use [`RotationBuffer::same_cycle`] to
/// compare sequences alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RotationBuffer<T> {
    items: ArrayVec<T, MAX_ROTATIONS>,
    pointer: usize,
}

impl<T: Copy> RotationBuffer<T> {
    /// Build a buffer holding 1 to 4 items, pointing at the first.
    pub fn new(items: &[T]) -> Result<Self, EngineError> {
        if items.is_empty() || items.len() > MAX_ROTATIONS {
            return Err(EngineError::InvalidRotationCount(items.len()));
        }
        Ok(Self {
            items: items.iter().copied().collect(),
            pointer: 0,
        })
    }

    /// Build from a cycle already known to hold 1 to 4 items.
    pub(crate) fn from_cycle(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            pointer: 0,
        }
    }

    /// Item at the pointer.
    pub fn current(&self) -> T {
        self.items[self.pointer]
    }

    /// Step the pointer one place, wrapping at either end.
    pub fn advance(&mut self, direction: Direction) {
        let len = self.items.len();
        self.pointer = match direction {
            Direction::Forward => (self.pointer + 1) % len,
            Direction::Backward => (self.pointer + len - 1) % len,
        };
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in construction order, independent of the pointer.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Items in cycle order starting from the pointer.
    pub fn iter_from_current(&self) -> impl Iterator<Item = T> + '_ {
        let len = self.items.len();
        (0..len).map(move |i| self.items[(self.pointer + i) % len])
    }
}

impl<T: Copy + PartialEq> RotationBuffer<T> {
    /// Same sequence in the same order, ignoring where the pointers sit.
    pub fn same_cycle(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Copy + fmt::Display> fmt::Display for RotationBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter_from_current().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
