//! Diagnostics available with the `debugging` feature.
//!
//! Setting `TRIANGULATE_SVG_OUTPUT_PATH` makes every [Triangulator](crate::Triangulator) write
//! SVG pictures of its trapezoidal map into that directory. `TRIANGULATE_SVG_OUTPUT_LEVEL` picks
//! how many: `1` the result only, `2` also the map before mountain extraction, `3` one picture
//! per inserted segment. `TRIANGULATE_SVG_HIDE_LABELS` omits vertex labels.

pub(crate) mod env;
pub mod svg;
