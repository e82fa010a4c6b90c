//! CPU-side frame mesh. Every draw on the canvas becomes one quad; quads are
//! kept in submission order and grouped into draw calls by texture.

use mpg_core::{Color, Rect};

use crate::vertex::QuadVertex;

/// Identity used to decide whether two quads can share a draw call.
pub trait BatchKey: Clone {
    fn same_batch(&self, other: &Self) -> bool;
}

/// A contiguous run of indices that share the same texture binding.
#[derive(Debug, Clone)]
pub struct DrawCall<K> {
    pub key: K,
    pub index_start: u32,
    pub index_count: u32,
}

pub struct QuadMesh<K> {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall<K>>,
}

impl<K: BatchKey> QuadMesh<K> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            draw_calls: Vec::new(),
        }
    }

    pub fn push_quad(&mut self, rect: Rect, color: Color, key: &K) {
        if rect.is_empty() {
            return;
        }
        let base_index = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&QuadVertex::quad(rect, color));

        let draw_start = self.indices.len() as u32;
        self.indices.extend_from_slice(&[
            base_index,
            base_index + 1,
            base_index + 2,
            base_index,
            base_index + 2,
            base_index + 3,
        ]);
        self.push_draw_call(key, draw_start, 6);
    }

    /// Append a draw call, merging with the previous one when the key matches
    /// and indices are contiguous. Quads stay in submission order, so merging
    /// never changes how they composite.
    fn push_draw_call(&mut self, key: &K, index_start: u32, index_count: u32) {
        if let Some(last) = self.draw_calls.last_mut() {
            let contiguous = last.index_start + last.index_count == index_start;
            if last.key.same_batch(key) && contiguous {
                last.index_count += index_count;
                return;
            }
        }
        self.draw_calls.push(DrawCall {
            key: key.clone(),
            index_start,
            index_count,
        });
    }

    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drops every quad and the keys they hold.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
    }
}

impl<K: BatchKey> Default for QuadMesh<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl BatchKey for u32 {
        fn same_batch(&self, other: &Self) -> bool {
            self == other
        }
    }

    #[test]
    fn consecutive_quads_with_same_key_merge() {
        let mut mesh = QuadMesh::<u32>::new();
        mesh.push_quad(Rect::new(0, 0, 10, 10), Color::WHITE, &1);
        mesh.push_quad(Rect::new(10, 0, 10, 10), Color::BLACK, &1);
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.draw_calls.len(), 1);
        assert_eq!(mesh.draw_calls[0].index_count, 12);
    }

    #[test]
    fn key_change_splits_and_preserves_order() {
        let mut mesh = QuadMesh::<u32>::new();
        mesh.push_quad(Rect::new(0, 0, 800, 600), Color::WHITE, &7);
        mesh.push_quad(Rect::new(750, 10, 40, 40), Color::WHITE, &1);
        mesh.push_quad(Rect::new(700, 10, 40, 40), Color::WHITE, &1);
        mesh.push_quad(Rect::new(0, 0, 800, 600), Color::WHITE, &7);

        let keys: Vec<u32> = mesh.draw_calls.iter().map(|d| d.key).collect();
        assert_eq!(keys, vec![7, 1, 7]);
        let starts: Vec<u32> = mesh.draw_calls.iter().map(|d| d.index_start).collect();
        assert_eq!(starts, vec![0, 6, 18]);
    }

    #[test]
    fn quad_indices_reference_own_vertices() {
        let mut mesh = QuadMesh::<u32>::new();
        mesh.push_quad(Rect::new(0, 0, 1, 1), Color::WHITE, &0);
        mesh.push_quad(Rect::new(5, 5, 1, 1), Color::WHITE, &0);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn quad_vertices_span_rect_with_color() {
        let mut mesh = QuadMesh::<u32>::new();
        mesh.push_quad(Rect::new(200, 200, 400, 200), Color::rgba(0, 0, 0, 180), &0);
        assert_eq!(mesh.vertices[0].position, [200.0, 200.0]);
        assert_eq!(mesh.vertices[2].position, [600.0, 400.0]);
        assert_eq!(mesh.vertices[2].tex_coords, [1.0, 1.0]);
        assert!((mesh.vertices[1].color[3] - 180.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_rects_are_skipped() {
        let mut mesh = QuadMesh::<u32>::new();
        mesh.push_quad(Rect::new(0, 0, 0, 10), Color::WHITE, &0);
        assert!(mesh.is_empty());
        assert!(mesh.draw_calls.is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut mesh = QuadMesh::<u32>::new();
        mesh.push_quad(Rect::new(0, 0, 1, 1), Color::WHITE, &0);
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
        assert!(mesh.draw_calls.is_empty());
    }
}
