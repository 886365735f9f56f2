//! Perceptual ordering of palette entries.
//!
//! Greedy nearest-neighbor tour through OKLab space: start at the first color
//! seen in the sprite, always jump to the closest unvisited color. Adjacent
//! palette indices end up looking alike, which makes hand-editing the palette
//! texture practical. This is an approximation, not a shortest path.
//!
//! The tour needs every pairwise distance, O(N²) in time. Up to
//! [`MATRIX_LIMIT`] colors the distances are computed once into a symmetric
//! matrix; beyond that the matrix would cost too much memory (a full 65536
//! color palette needs 16 GiB of f32), so distances are recomputed per lookup.
//! Both paths evaluate the same expression, so the tour is identical.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::color_table::{ColorHandle, ColorTable};
use crate::error::RecolorError;
use crate::oklab::OKLab;

/// Largest palette for which the full distance matrix is materialized (64 MiB).
pub const MATRIX_LIMIT: usize = 4096;

/// Pairwise squared OKLab distances between palette entries.
pub struct Distances {
    labs: Vec<OKLab>,
    matrix: Option<Vec<f32>>,
}

impl Distances {
    pub fn new(labs: Vec<OKLab>) -> Self {
        let n = labs.len();
        let matrix = (n <= MATRIX_LIMIT).then(|| {
            let mut cells = vec![0.0f32; n * n];
            for i in 0..n {
                for j in (i + 1)..n {
                    let d = labs[i].distance_sq(labs[j]);
                    cells[i * n + j] = d;
                    cells[j * n + i] = d;
                }
            }
            cells
        });
        log::debug!(
            "perceptual sort over {n} colors using {} distances",
            if matrix.is_some() { "precomputed" } else { "on-demand" }
        );
        Self { labs, matrix }
    }

    pub fn len(&self) -> usize {
        self.labs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        match &self.matrix {
            Some(cells) => cells[i * self.labs.len() + j],
            None => self.labs[i].distance_sq(self.labs[j]),
        }
    }
}

/// Visit order over `distances`, as positions into its entries.
///
/// Ties go to the lowest position (first minimum found in a forward scan).
pub fn nearest_neighbor_tour(distances: &Distances) -> Result<Vec<usize>, RecolorError> {
    let n = distances.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);

    visited[0] = true;
    tour.push(0);
    let mut current = 0;

    for _ in 1..n {
        let mut best: Option<(usize, f32)> = None;

        for (j, visited_j) in visited.iter().enumerate() {
            if !visited_j {
                let d = distances.get(current, j);
                if best.is_none_or(|(_, best_dist)| d < best_dist) {
                    best = Some((j, d));
                }
            }
        }

        let Some((next, _)) = best else {
            log::error!("perceptual sort ran out of candidates after {} of {n}", tour.len());
            return Err(RecolorError::SortInvariant {
                placed: tour.len(),
                total: n,
            });
        };

        visited[next] = true;
        tour.push(next);
        current = next;
    }

    log::trace!("perceptual tour complete: {} stops", tour.len());
    Ok(tour)
}

/// Order a table's entries perceptually and write the resulting indices back.
///
/// Returns the handles in palette-index order. The distance matrix is dropped
/// before returning.
pub fn sort_table(table: &mut ColorTable) -> Result<Vec<ColorHandle>, RecolorError> {
    let order: Vec<ColorHandle> = {
        let handles: Vec<ColorHandle> = table.handles().collect();
        let distances = Distances::new(table.entries().iter().map(|e| e.lab()).collect());
        nearest_neighbor_tour(&distances)?
            .into_iter()
            .map(|position| handles[position])
            .collect()
    };
    table.assign_order(&order);
    Ok(order)
}
