use num_traits::real::Real;
use smallvec::SmallVec;
use tracing::{debug, trace};
use zot::Zot;

use crate::{errors::InternalError, idx::{Idx, SliceExt}, monotone::{ChainSide, MonotoneMountain}, segment::Segment, trapezoidation::{Trapezoidation, TrapezoidationStructure}};

/// Split the polygon interior of a complete map into monotone mountains.
///
/// Every inside trapezoid is cut by the diagonal joining its left and right points. The part
/// next to its bottom segment belongs to that segment's mountain and the part next to its top
/// segment to the top's, unless the diagonal is that segment itself.
pub(crate) fn extract_mountains<C: Real>(trapezoidation: &Trapezoidation<C>) -> Result<Vec<MonotoneMountain>, InternalError> {
    let ss = trapezoidation.ss();
    let ts = trapezoidation.ts();
    let points = trapezoidation.points();

    let mut links: Vec<SmallVec<[(usize, usize); 4]>> = vec![SmallVec::new(); ss.len()];
    for ti in trapezoidation.inside_trapezoids()? {
        let t = &ts[ti];
        let (l, r) = match (t.left_point(), t.right_point()) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(InternalError::new(format!("Inside trapezoid {} is unbounded ({})", ti, t))),
        };

        let base = |si: Option<Idx<Segment>>| si.filter(|&si| !ss[si].has_endpoints(l, r));
        match Zot::from_options(base(t.bottom()), base(t.top())) {
            Zot::Zero => return Err(InternalError::new(format!("{} contributes to no mountain ({})", ti, t))),
            Zot::One(si) => links[si.usize()].push((l, r)),
            Zot::Two(si_bottom, si_top) => {
                links[si_bottom.usize()].push((l, r));
                links[si_top.usize()].push((l, r));
            }
        }
    }

    let mut mountains = Vec::new();
    for si in ss.iter_index() {
        let segment_links = &mut links[si.usize()];
        if segment_links.is_empty() {
            continue;
        }
        segment_links.sort_unstable_by(|a, b| points.compare(a.0, b.0));

        let s = &ss[si];
        let mut chain: SmallVec<[usize; 16]> = SmallVec::with_capacity(segment_links.len() + 1);
        chain.push(s.left());
        for &(l, r) in segment_links.iter() {
            if chain.last() != Some(&l) {
                return Err(InternalError::new(format!("Mountain on {} ({}) is broken at v{}", si, s, l)));
            }
            chain.push(r);
        }
        if chain.last() != Some(&s.right()) {
            return Err(InternalError::new(format!("Mountain on {} ({}) does not reach its right end", si, s)));
        }

        let side = if s.inside_above() { ChainSide::Above } else { ChainSide::Below };
        let mountain = MonotoneMountain::new(si, side, chain);
        trace!(base = %si, side = ?mountain.side(), vertices = mountain.chain().len(), "mountain");
        mountains.push(mountain);
    }

    debug!(mountains = mountains.len(), "extracted monotone mountains");
    Ok(mountains)
}
