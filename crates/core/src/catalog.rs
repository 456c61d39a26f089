//! Piece catalog - named tetromino stencils
//!
//! The catalog is an immutable table from piece name to its rotation cycle
//! and spawn offset. It is built once and handed to whatever spawns pieces.
//!
//! Each rotation cycle lists counterclockwise quarter turns. Mirror-symmetric
//! shapes (I, S, Z) need two states; O needs one.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::piece::Piece;
use crate::rotation::{RotationBuffer, RotationState};
use crate::types::SPAWN_OFFSET;

/// Standard stencils as (name, frame offsets per rotation state).
const STANDARD_SHAPES: [(&str, &[[u8; 4]]); 7] = [
    ("I", &[[1, 5, 9, 13], [4, 5, 6, 7]]),
    (
        "J",
        &[[2, 6, 9, 10], [4, 5, 6, 10], [1, 2, 5, 9], [0, 4, 5, 6]],
    ),
    (
        "L",
        &[[1, 5, 9, 10], [2, 4, 5, 6], [1, 2, 6, 10], [4, 5, 6, 8]],
    ),
    ("O", &[[5, 6, 9, 10]]),
    ("S", &[[6, 5, 9, 8], [5, 9, 10, 14]]),
    (
        "T",
        &[[1, 4, 5, 6], [1, 4, 5, 9], [4, 5, 6, 9], [1, 5, 6, 9]],
    ),
    ("Z", &[[4, 5, 9, 10], [2, 5, 6, 9]]),
];

/// Serialized form of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ShapeDefinition {
    name: String,
    rotations: Vec<RotationState>,
    #[serde(default = "default_spawn")]
    spawn: (i32, i32),
}

fn default_spawn() -> (i32, i32) {
    SPAWN_OFFSET
}

/// One validated catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShapeDefinition", into = "ShapeDefinition")]
pub struct PieceShape {
    name: String,
    rotations: RotationBuffer<RotationState>,
    spawn: (i32, i32),
}

impl PieceShape {
    pub fn new(
        name: impl Into<String>,
        rotations: &[RotationState],
        spawn: (i32, i32),
    ) -> Result<Self, EngineError> {
        Ok(Self {
            name: name.into(),
            rotations: RotationBuffer::new(rotations)?,
            spawn,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rotations(&self) -> &RotationBuffer<RotationState> {
        &self.rotations
    }

    pub fn spawn_offset(&self) -> (i32, i32) {
        self.spawn
    }

    /// A fresh, unfrozen piece at the spawn offset.
    pub fn spawn(&self) -> Piece {
        let (x, y) = self.spawn;
        Piece::new(self.name.clone(), self.rotations.clone(), x, y)
    }
}

impl TryFrom<ShapeDefinition> for PieceShape {
    type Error = EngineError;

    fn try_from(def: ShapeDefinition) -> Result<Self, Self::Error> {
        Self::new(def.name, &def.rotations, def.spawn)
    }
}

impl From<PieceShape> for ShapeDefinition {
    fn from(shape: PieceShape) -> Self {
        Self {
            name: shape.name,
            rotations: shape.rotations.items().to_vec(),
            spawn: shape.spawn,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PieceShape>", into = "Vec<PieceShape>")]
pub struct PieceCatalog {
    shapes: Vec<PieceShape>,
}

impl PieceCatalog {
    /// Build a catalog, rejecting an empty list or duplicate names.
    pub fn new(shapes: Vec<PieceShape>) -> Result<Self, EngineError> {
        if shapes.is_empty() {
            return Err(EngineError::Config("piece catalog is empty".to_string()));
        }
        for (i, shape) in shapes.iter().enumerate() {
            if shapes[..i].iter().any(|s| s.name == shape.name) {
                return Err(EngineError::Config(format!(
                    "duplicate piece name: {}",
                    shape.name
                )));
            }
        }
        Ok(Self { shapes })
    }

    /// The seven standard tetrominoes, spawning at (3, 0).
    pub fn standard() -> Self {
        let shapes = STANDARD_SHAPES
            .iter()
            .map(|(name, stencils)| PieceShape {
                name: (*name).to_string(),
                rotations: RotationBuffer::from_cycle(
                    stencils.iter().map(|&offsets| RotationState::from_stencil(offsets)),
                ),
                spawn: SPAWN_OFFSET,
            })
            .collect();
        Self { shapes }
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Look up a shape by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&PieceShape> {
        self.shapes
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Spawn the named piece at its spawn offset.
    pub fn spawn(&self, name: &str) -> Result<Piece, EngineError> {
        self.get(name)
            .map(PieceShape::spawn)
            .ok_or_else(|| EngineError::UnknownPiece(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }

    pub fn shapes(&self) -> &[PieceShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<PieceShape>> for PieceCatalog {
    type Error = EngineError;

    fn try_from(shapes: Vec<PieceShape>) -> Result<Self, Self::Error> {
        Self::new(shapes)
    }
}

impl From<PieceCatalog> for Vec<PieceShape> {
    fn from(catalog: PieceCatalog) -> Self {
        catalog.shapes
    }
}
