use num_traits::real::Real;
use smallvec::SmallVec;

use crate::{Triangle, errors::InternalError, idx::Idx, math::{Orientation, Points}, segment::Segment};

/// Which side of its base segment a mountain's chain lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainSide {
    Above,
    Below,
}

impl ChainSide {
    /// The turn `a -> b -> c` along the chain makes at `b` when `b` is a convex corner
    fn convex_turn(self) -> Orientation {
        match self {
            Self::Above => Orientation::Right,
            Self::Below => Orientation::Left,
        }
    }
}

/// An x-monotone chain whose two end vertices are joined by a single base segment
#[derive(Debug, Clone)]
pub(crate) struct MonotoneMountain {
    base: Idx<Segment>,
    side: ChainSide,
    chain: SmallVec<[usize; 16]>,
}

impl MonotoneMountain {
    pub fn new(base: Idx<Segment>, side: ChainSide, chain: SmallVec<[usize; 16]>) -> Self {
        Self { base, side, chain }
    }

    pub fn chain(&self) -> &[usize] {
        &self.chain
    }

    pub fn side(&self) -> ChainSide {
        self.side
    }

    /// Clip convex chain vertices left to right, appending counter-clockwise triangles to `output`.
    ///
    /// Vertices collinear with their stack neighbors stay on the stack until a later convex
    /// corner consumes them, so every chain vertex ends up in some triangle.
    pub fn triangulate<C: Real>(&self, points: &Points<C>, output: &mut Vec<Triangle>) -> Result<(), InternalError> {
        if self.chain.len() < 3 {
            return Ok(());
        }

        let convex = self.side.convex_turn();
        let mut stack: SmallVec<[usize; 16]> = SmallVec::new();
        stack.push(self.chain[0]);
        stack.push(self.chain[1]);

        for &v in &self.chain[2..] {
            while stack.len() >= 2 {
                let (a, b) = (stack[stack.len() - 2], stack[stack.len() - 1]);
                if points.orientation(a, b, v) != convex {
                    break;
                }
                output.push(match self.side {
                    ChainSide::Above => [a, v, b],
                    ChainSide::Below => [a, b, v],
                });
                stack.pop();
            }
            stack.push(v);
        }

        if stack.len() != 2 {
            return Err(InternalError::new(format!("Mountain on {} left {} vertices unclipped: {:?}", self.base, stack.len() - 2, stack)));
        }
        Ok(())
    }
}
