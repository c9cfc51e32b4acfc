pub mod util;

#[cfg(test)]
mod triangulate;
