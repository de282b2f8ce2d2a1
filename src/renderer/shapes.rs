//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Rect};

/// Two triangles covering `rect`
pub fn rect_quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Vertices for the whole scene in field coordinates
///
/// Blocks first in spawn order, player last so it draws on top.
pub fn scene_vertices(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((state.blocks.len() + 1) * 6);

    for block in &state.blocks {
        vertices.extend_from_slice(&rect_quad(&block.bounds(), colors::BLOCK));
    }
    vertices.extend_from_slice(&rect_quad(&state.player.bounds(), colors::PLAYER));

    vertices
}

/// Map field coordinates (top-left origin, y down) to NDC (-1..1, y up)
#[inline]
pub fn field_to_ndc(pos: Vec2, field: Vec2) -> Vec2 {
    Vec2::new(pos.x / field.x * 2.0 - 1.0, 1.0 - pos.y / field.y * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_rect_quad_covers_corners() {
        let quad = rect_quad(&Rect::new(10.0, 20.0, 30.0, 40.0), colors::BLOCK);
        let xs: Vec<f32> = quad.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = quad.iter().map(|v| v.position[1]).collect();
        assert!(xs.iter().all(|&x| x == 10.0 || x == 40.0));
        assert!(ys.iter().all(|&y| y == 20.0 || y == 60.0));
        assert!(quad.iter().all(|v| v.color == colors::BLOCK));
    }

    #[test]
    fn test_scene_vertices() {
        let mut state = GameState::new(GameConfig::default(), 1);
        assert_eq!(scene_vertices(&state).len(), 6);

        state.push_block(0.0);
        state.push_block(100.0);
        let vertices = scene_vertices(&state);
        assert_eq!(vertices.len(), 18);
        assert_eq!(vertices[0].color, colors::BLOCK);
        assert_eq!(vertices[17].color, colors::PLAYER);
    }

    #[test]
    fn test_field_to_ndc() {
        let field = Vec2::new(800.0, 600.0);
        assert_eq!(field_to_ndc(Vec2::ZERO, field), Vec2::new(-1.0, 1.0));
        assert_eq!(field_to_ndc(field, field), Vec2::new(1.0, -1.0));
        assert_eq!(
            field_to_ndc(Vec2::new(400.0, 300.0), field),
            Vec2::new(0.0, 0.0)
        );
    }
}
