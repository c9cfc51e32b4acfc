use num_traits::real::Real;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{PolygonList, Triangle, TriangulationError, TriangulationOptions, Vertex, mountains::extract_mountains, segment::Segment, snapshot::{BoundingBox, TrapezoidMapSnapshot, take_snapshot}, trapezoidation::{TrapezoidationState, TrapezoidationStructure}, validation::validate};

#[cfg(feature = "debugging")]
use crate::debug;

/// Drives one triangulation a segment at a time.
///
/// [Triangulator::new] validates the loops and fixes the random segment order.
/// [Triangulator::insert_next_segment] and [Triangulator::snapshot] expose the trapezoidal map
/// as it grows; [Triangulator::triangulate] finishes the map and produces the triangles.
///
/// ```
/// use seidel_triangulate::{PolygonWithHoles, Triangulator, TriangulationOptions};
///
/// let square = PolygonWithHoles::simple(vec![[0., 0.], [1., 0.], [1., 1.], [0., 1.]]);
/// let mut triangulator = Triangulator::new(&square, &TriangulationOptions::default())?;
/// while triangulator.insert_next_segment()? {
///     let snapshot = triangulator.snapshot();
///     assert!(!snapshot.trapezoids.is_empty());
/// }
/// assert_eq!(triangulator.triangulate()?.len(), 2);
/// # Ok::<(), seidel_triangulate::TriangulationError>(())
/// ```
pub struct Triangulator<C: Real> {
    state: TrapezoidationState<C>,
    bounds: BoundingBox<C>,
    edge_count: usize,
    #[cfg(feature = "debugging")]
    svg_context: Option<debug::svg::SvgContext>,
}

impl<C: Real> Triangulator<C> {
    /// Validate `polygon` and order its segments with a generator seeded from `options`
    pub fn new<P: PolygonList>(polygon: &P, options: &TriangulationOptions) -> Result<Self, TriangulationError>
    where P::Vertex: Vertex<Coordinate = C> {
        let mut rng = StdRng::seed_from_u64(options.seed);
        Self::with_rng(polygon, options, &mut rng)
    }

    /// Validate `polygon` and order its segments with the caller's generator; `options.seed` is unused
    pub fn with_rng<P: PolygonList, R: Rng + ?Sized>(polygon: &P, options: &TriangulationOptions, rng: &mut R) -> Result<Self, TriangulationError>
    where P::Vertex: Vertex<Coordinate = C> {
        let validated = validate(polygon)?;
        let edge_count = validated.edge_count();

        let mut segments = Vec::with_capacity(edge_count);
        for (ring, indices) in validated.rings.iter() {
            for (i, &from) in indices.iter().enumerate() {
                let to = indices[(i + 1) % indices.len()];
                segments.push(Segment::new(&validated.points, from, to, *ring));
            }
        }

        let bounds = BoundingBox::around(&validated.points, validated.rings.iter().flat_map(|(_, indices)| indices.iter().copied()));

        debug!(vertices = polygon.vertex_count(), segments = edge_count, loops = validated.rings.len(), fill_rule = ?polygon.fill_rule(), "validated polygon");

        Ok(Self {
            state: TrapezoidationState::new(validated.points, segments, rng, options.should_verify()),
            bounds,
            edge_count,
            #[cfg(feature = "debugging")]
            svg_context: debug::svg::SvgContext::from_env(),
        })
    }

    /// Insert one more segment into the trapezoidal map. Returns `false` once every segment is in.
    pub fn insert_next_segment(&mut self) -> Result<bool, TriangulationError> {
        let inserted = self.state.insert_next_segment()?.is_some();

        #[cfg(feature = "debugging")]
        if inserted {
            self.output_svg(&format!("step_{:04}.svg", self.state.inserted_segments()), debug::svg::SvgOutputLevel::AllSteps, &[]);
        }

        Ok(inserted)
    }

    pub fn inserted_segments(&self) -> usize {
        self.state.inserted_segments()
    }

    pub fn total_segments(&self) -> usize {
        self.state.total_segments()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// The trapezoidal map as it currently stands
    pub fn snapshot(&self) -> TrapezoidMapSnapshot<C> {
        take_snapshot(&self.state, self.bounds, self.state.inserted_order(), self.state.total_segments())
    }

    /// The query structure, unfolded into a text tree
    #[cfg(feature = "debugging")]
    pub fn query_structure_text(&self) -> String {
        crate::querynode::QueryNode::as_text_tree(self.state.query_node_root(), self.state.qs()).to_string()
    }

    /// Insert the remaining segments, then split the interior into monotone mountains and
    /// triangulate each. Triangles are counter-clockwise triples of input vertex indices.
    pub fn triangulate(mut self) -> Result<Vec<Triangle>, TriangulationError> {
        while self.insert_next_segment()? { }

        #[cfg(feature = "debugging")]
        self.output_svg("trapezoids.svg", debug::svg::SvgOutputLevel::MajorSteps, &[]);
        #[cfg(feature = "debugging")]
        let (svg_context, snapshot) = (self.svg_context.take(), self.snapshot());

        let trapezoidation = self.state.build()?;
        debug!(trapezoids = trapezoidation.live_trapezoid_count(), "built trapezoidal map");

        let mountains = extract_mountains(&trapezoidation)?;

        // n - 2 + 2h for n segments around h holes
        let mut triangles = Vec::with_capacity(self.edge_count);
        for mountain in mountains.iter() {
            mountain.triangulate(trapezoidation.points(), &mut triangles)?;
        }
        debug!(triangles = triangles.len(), "triangulated monotone mountains");

        #[cfg(feature = "debugging")]
        if let Some(svg_context) = svg_context {
            svg_context.save_or_warn("result.svg", &snapshot, &triangles);
        }

        Ok(triangles)
    }

    #[cfg(feature = "debugging")]
    fn output_svg(&self, file_name: &str, level: debug::svg::SvgOutputLevel, triangles: &[Triangle]) {
        if let Some(svg_context) = &self.svg_context {
            if svg_context.output_level >= level {
                svg_context.save_or_warn(file_name, &self.snapshot(), triangles);
            }
        }
    }
}
