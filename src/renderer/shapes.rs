//! Shape generation for 2D primitives
//!
//! Everything renders as triangle lists; outlines are thin quads along each
//! segment of a polyline.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Append a thick line segment as two triangles
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    out.push(Vertex::new(a1.x, a1.y, color));
    out.push(Vertex::new(a2.x, a2.y, color));
    out.push(Vertex::new(b1.x, b1.y, color));

    out.push(Vertex::new(b1.x, b1.y, color));
    out.push(Vertex::new(a2.x, a2.y, color));
    out.push(Vertex::new(b2.x, b2.y, color));
}

/// Append a closed outline through `points`
pub fn line_loop(out: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    if points.len() < 2 {
        return;
    }
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        line(out, a, b, width, color);
    }
}

/// Append an open polyline through `points`
pub fn polyline(out: &mut Vec<Vertex>, points: &[Vec2], width: f32, color: [f32; 4]) {
    for pair in points.windows(2) {
        line(out, pair[0], pair[1], width, color);
    }
}

/// Append a filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Append a filled triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_emits_one_quad() {
        let mut out = Vec::new();
        line(
            &mut out,
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            2.0,
            [1.0; 4],
        );
        assert_eq!(out.len(), 6);
        // Quad spans the line width on both sides
        assert!(out.iter().any(|v| (v.position[1] - 1.0).abs() < 1e-6));
        assert!(out.iter().any(|v| (v.position[1] + 1.0).abs() < 1e-6));
    }

    #[test]
    fn loop_closes_back_to_start() {
        let pts = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let mut out = Vec::new();
        line_loop(&mut out, &pts, 1.0, [1.0; 4]);
        // Three segments, six vertices each
        assert_eq!(out.len(), 18);
    }

    #[test]
    fn circle_vertex_count_matches_segments() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::ZERO, 5.0, [1.0; 4], 12);
        assert_eq!(out.len(), 36);
    }
}
