mod area;
pub use area::PolygonalArea;
mod polygon;
pub use polygon::PolygonWithHoles;
mod polygon_list;
pub use polygon_list::{FillRule, PolygonList, Rings};
mod vertex;
pub use vertex::Vertex;
pub(crate) use vertex::Coords;
