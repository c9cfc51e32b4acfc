use std::{fmt::{self, Write}, fs, io, path};

use num_traits::real::Real;
use svg_fmt::*;
use tracing::warn;

use crate::{Triangle, TrapezoidMapSnapshot, debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SvgOutputLevel {
    None,
    ResultOnly,
    MajorSteps,
    AllSteps,
}

/// Where, and how much, intermediate pictures are written
pub(crate) struct SvgContext {
    pub output_path: path::PathBuf,
    pub output_level: SvgOutputLevel,
    pub show_labels: bool,
}

impl SvgContext {
    pub fn from_env() -> Option<Self> {
        let output_path = debug::env::svg::output_path()?;
        let output_level = debug::env::svg::output_level();
        if output_level == SvgOutputLevel::None {
            return None;
        }
        Some(Self {
            output_path,
            output_level,
            show_labels: debug::env::svg::show_labels(),
        })
    }

    pub fn save<C: Real>(&self, file_name: impl AsRef<path::Path>, snapshot: &TrapezoidMapSnapshot<C>, triangles: &[Triangle]) -> io::Result<()> {
        let content = render(snapshot, triangles, self.show_labels).map_err(|_| io::Error::new(io::ErrorKind::Other, "SVG formatting failed"))?;
        fs::create_dir_all(&self.output_path)?;
        fs::write(self.output_path.join(file_name), content)
    }

    /// [SvgContext::save], logging a failure instead of returning it. Returns whether the file was written.
    pub fn save_or_warn<C: Real>(&self, file_name: &str, snapshot: &TrapezoidMapSnapshot<C>, triangles: &[Triangle]) -> bool {
        match self.save(file_name, snapshot, triangles) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.output_path.join(file_name).display(), error = %e, "could not write SVG");
                false
            }
        }
    }
}

fn f32_of<C: Real>(c: C) -> f32 {
    c.to_f32().unwrap_or(0.0)
}

fn point<C: Real>(p: [C; 2]) -> [f32; 2] {
    [f32_of(p[0]), f32_of(p[1])]
}

/// Render a trapezoidal map snapshot, and optionally the triangles produced from it, as an SVG document.
///
/// Inside trapezoids are shaded, the most recently inserted segment is highlighted.
pub fn render<C: Real>(snapshot: &TrapezoidMapSnapshot<C>, triangles: &[Triangle], show_labels: bool) -> Result<String, fmt::Error> {
    let [x_min, y_min] = point(snapshot.bounds.min);
    let [x_max, y_max] = point(snapshot.bounds.max);
    let (w, h) = (x_max - x_min, y_max - y_min);
    let percent = |p: f32| w.min(h) * p / 100.0;

    let mut out = String::new();
    writeln!(out, "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">", x_min, y_min, w, h)?;

    for t in snapshot.trapezoids.iter() {
        let corners: Vec<[f32; 2]> = t.corners.iter().map(|&c| point(c)).collect();
        let fill = if t.inside { Fill::Color(rgb(255, 240, 160)) } else { Fill::None };
        writeln!(out, "{}",
            polygon(&corners)
                .fill(fill)
                .stroke(Stroke::Color(rgb(200, 200, 0), percent(0.1)))
        )?;
    }

    for triangle in triangles {
        let corners: Vec<[f32; 2]> = triangle.iter().map(|&v| point(snapshot.vertices[v])).collect();
        writeln!(out, "{}",
            polygon(&corners)
                .fill(Fill::None)
                .stroke(Stroke::Color(black(), percent(0.1)))
        )?;
    }

    let newest = snapshot.segments.len().checked_sub(1);
    for (i, &[a, b]) in snapshot.segments.iter().enumerate() {
        let ([ax, ay], [bx, by]) = (point(snapshot.vertices[a]), point(snapshot.vertices[b]));
        let color = if Some(i) == newest { rgb(255, 126, 0) } else { red() };
        writeln!(out, "{}", line_segment(ax, ay, bx, by).color(color).width(percent(0.4)))?;
    }

    for (v, &c) in snapshot.vertices.iter().enumerate() {
        let [x, y] = point(c);
        writeln!(out, "{}", circle(x, y, percent(0.5)).fill(Fill::Color(blue())))?;
        if show_labels {
            let gap = percent(1.0);
            writeln!(out, "{}",
                text(x - gap, y, format!("v{}", v))
                    .color(black())
                    .align(Align::Right)
                    .size(percent(2.0))
            )?;
        }
    }

    writeln!(out, "</svg>")?;
    Ok(out)
}

// svg_fmt is missing a function for Circle
fn circle(x: f32, y: f32, r: f32) -> Circle {
    Circle {
        x,
        y,
        radius: r,
        style: Style::default(),
    }
}
