use core::fmt;
use core::num::NonZeroU32;

use crate::error::{CoreError, CoreResult};

/// Node tag as understood by the analysis engine.
///
/// Engine tags are positive integers, so the tag is stored as `NonZeroU32`
/// and `Option<NodeTag>` stays the size of a `u32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct NodeTag(NonZeroU32);

impl NodeTag {
    /// Create a tag from the engine's integer tag. Zero is rejected.
    pub fn new(tag: u32) -> CoreResult<Self> {
        NonZeroU32::new(tag)
            .map(Self)
            .ok_or(CoreError::InvalidArg {
                what: "node tag must be positive",
            })
    }

    /// The engine's integer tag.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for NodeTag {
    type Error = CoreError;

    fn try_from(tag: u32) -> CoreResult<Self> {
        Self::new(tag)
    }
}

impl From<NodeTag> for u32 {
    fn from(tag: NodeTag) -> Self {
        tag.get()
    }
}

impl fmt::Debug for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeTag({})", self.get())
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Nodal degree of freedom, numbered the way the engine numbers them (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dof {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
}

impl Dof {
    /// Map a 1-based engine dof number to a `Dof`.
    pub fn from_engine_index(index: usize) -> CoreResult<Self> {
        match index {
            1 => Ok(Dof::X),
            2 => Ok(Dof::Y),
            3 => Ok(Dof::Z),
            4 => Ok(Dof::Rx),
            5 => Ok(Dof::Ry),
            6 => Ok(Dof::Rz),
            _ => Err(CoreError::UnknownDof { index }),
        }
    }

    /// 1-based engine dof number.
    pub fn engine_index(self) -> usize {
        match self {
            Dof::X => 1,
            Dof::Y => 2,
            Dof::Z => 3,
            Dof::Rx => 4,
            Dof::Ry => 5,
            Dof::Rz => 6,
        }
    }

    pub fn is_translational(self) -> bool {
        matches!(self, Dof::X | Dof::Y | Dof::Z)
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dof::X => "X",
            Dof::Y => "Y",
            Dof::Z => "Z",
            Dof::Rx => "Rx",
            Dof::Ry => "Ry",
            Dof::Rz => "Rz",
        };
        f.write_str(name)
    }
}
