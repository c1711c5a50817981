use crate::motion::AlignmentPath;
use simple_matrix::Matrix;
use std::{cmp, iter};

/// Inclusive column range explored on each row of the cost table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    ranges: Vec<(usize, usize)>,
    columns: usize,
}
impl Corridor {
    pub fn full(rows: usize, columns: usize) -> Corridor {
        Corridor {
            ranges: vec![(0, columns.saturating_sub(1)); rows],
            columns,
        }
    }
    /// Cells at most `radius` columns away from the diagonal joining
    /// (0, 0) and (rows - 1, columns - 1).
    pub fn around_diagonal(rows: usize, columns: usize, radius: usize) -> Corridor {
        if rows == 0 || columns == 0 {
            return Corridor::full(rows, columns);
        }
        let ranges = (0..rows)
            .map(|row_index| {
                let start = row_index * columns / rows;
                let end = cmp::max(start, ((row_index + 1) * columns / rows).saturating_sub(1));
                (
                    start.saturating_sub(radius),
                    cmp::min(columns - 1, end.saturating_add(radius)),
                )
            })
            .collect();
        Corridor { ranges, columns }
    }
    /// Projects a path found on the half resolution sequences back to full
    /// resolution and widens it by `radius` coarse cells.
    pub fn from_coarse_path(
        coarse_path: &AlignmentPath,
        rows: usize,
        columns: usize,
        radius: usize,
    ) -> Corridor {
        if rows == 0 || columns == 0 {
            return Corridor::full(rows, columns);
        }
        let mut ranges: Vec<Option<(usize, usize)>> = vec![None; rows];
        for &(coarse_row, coarse_column) in coarse_path.pairs() {
            let first_row = coarse_row.saturating_sub(radius) * 2;
            let last_row = cmp::min(rows - 1, widen(coarse_row, radius));
            let first_column = coarse_column.saturating_sub(radius) * 2;
            let last_column = cmp::min(columns - 1, widen(coarse_column, radius));
            if first_row > last_row || first_column > last_column {
                continue;
            }
            for range in ranges.iter_mut().take(last_row + 1).skip(first_row) {
                *range = Some(match *range {
                    Some((start, end)) => (cmp::min(start, first_column), cmp::max(end, last_column)),
                    None => (first_column, last_column),
                });
            }
        }
        Corridor {
            ranges: ranges
                .into_iter()
                .map(|range| range.unwrap_or((0, columns - 1)))
                .collect(),
            columns,
        }
    }
    pub fn rows(&self) -> usize {
        self.ranges.len()
    }
    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn range(&self, row_index: usize) -> Option<(usize, usize)> {
        self.ranges.get(row_index).copied()
    }
    pub fn contains(&self, row_index: usize, column_index: usize) -> bool {
        matches!(self.range(row_index), Some((start, end)) if column_index >= start && column_index <= end)
    }
}

struct CorridorCosts {
    corridor: Corridor,
    offsets: Vec<usize>,
    cells: Vec<f32>,
}
impl CorridorCosts {
    fn new(corridor: Corridor) -> Self {
        let mut offsets = Vec::with_capacity(corridor.rows());
        let mut size = 0;
        for (start, end) in corridor.ranges.iter() {
            offsets.push(size);
            size += end + 1 - start;
        }
        CorridorCosts {
            corridor,
            offsets,
            cells: vec![f32::INFINITY; size],
        }
    }
    fn get(&self, row_index: usize, column_index: usize) -> f32 {
        if !self.corridor.contains(row_index, column_index) {
            return f32::INFINITY;
        }
        let (start, _) = self.corridor.ranges[row_index];
        self.cells[self.offsets[row_index] + column_index - start]
    }
    fn set(&mut self, row_index: usize, column_index: usize, value: f32) {
        if self.corridor.contains(row_index, column_index) {
            let (start, _) = self.corridor.ranges[row_index];
            self.cells[self.offsets[row_index] + column_index - start] = value;
        }
    }
}

enum CostTable {
    Full(Matrix<f32>),
    Corridor(CorridorCosts),
}
impl CostTable {
    fn get(&self, row_index: usize, column_index: usize) -> f32 {
        match self {
            CostTable::Full(matrix) => matrix_cell(matrix, row_index, column_index),
            CostTable::Corridor(costs) => costs.get(row_index, column_index),
        }
    }
}

pub struct Dtw<T: Copy> {
    state_m: usize,
    state_n: usize,
    distance_fn: fn(T, T) -> f32,
    state_similarity: Option<f32>,
    cost_table: Option<CostTable>,
}
impl<T: Copy> Dtw<T> {
    /// Fills the whole cumulative cost matrix, O(m * n) in time and memory.
    pub fn compute_optimal_path(&mut self, first_sequence: &[T], second_sequence: &[T]) -> f32 {
        self.state_m = first_sequence.len();
        self.state_n = second_sequence.len();
        if self.state_m == 0 || self.state_n == 0 {
            return self.clear();
        }
        let mut distance_cost_matrix: Matrix<f32> =
            Matrix::from_iter(self.state_m, self.state_n, iter::repeat(f32::INFINITY));
        distance_cost_matrix.set(
            0,
            0,
            (self.distance_fn)(first_sequence[0], second_sequence[0]),
        );
        for (row_index, first_sequence_item) in first_sequence.iter().enumerate().skip(1) {
            let cost = (self.distance_fn)(*first_sequence_item, second_sequence[0]);
            let previous = matrix_cell(&distance_cost_matrix, row_index - 1, 0);
            distance_cost_matrix.set(row_index, 0, cost + previous);
        }
        for (column_index, second_sequence_item) in second_sequence.iter().enumerate().skip(1) {
            let cost = (self.distance_fn)(first_sequence[0], *second_sequence_item);
            let previous = matrix_cell(&distance_cost_matrix, 0, column_index - 1);
            distance_cost_matrix.set(0, column_index, cost + previous);
        }
        for (row_index, first_sequence_item) in first_sequence.iter().enumerate().skip(1) {
            for (column_index, second_sequence_item) in
                second_sequence.iter().enumerate().skip(1)
            {
                let cost = (self.distance_fn)(*first_sequence_item, *second_sequence_item);
                let insertion = matrix_cell(&distance_cost_matrix, row_index - 1, column_index);
                let deletion = matrix_cell(&distance_cost_matrix, row_index, column_index - 1);
                let matches = matrix_cell(&distance_cost_matrix, row_index - 1, column_index - 1);
                let min_value = [insertion, deletion, matches]
                    .iter()
                    .fold(f32::INFINITY, |a, &b| a.min(b));
                distance_cost_matrix.set(row_index, column_index, cost + min_value);
            }
        }
        let similarity = matrix_cell(&distance_cost_matrix, self.state_m - 1, self.state_n - 1);
        self.cost_table = Some(CostTable::Full(distance_cost_matrix));
        self.state_similarity = Some(similarity);
        similarity
    }
    /// Restricts the search to `radius` columns around the diagonal.
    pub fn compute_optimal_path_with_window(
        &mut self,
        first_sequence: &[T],
        second_sequence: &[T],
        radius: usize,
    ) -> f32 {
        let corridor =
            Corridor::around_diagonal(first_sequence.len(), second_sequence.len(), radius);
        self.compute_optimal_path_in_corridor(first_sequence, second_sequence, corridor)
    }
    /// Fills only the cells inside the corridor, cells outside it cost infinity.
    pub fn compute_optimal_path_in_corridor(
        &mut self,
        first_sequence: &[T],
        second_sequence: &[T],
        corridor: Corridor,
    ) -> f32 {
        self.state_m = first_sequence.len();
        self.state_n = second_sequence.len();
        if self.state_m == 0
            || self.state_n == 0
            || corridor.rows() != self.state_m
            || corridor.columns() != self.state_n
        {
            return self.clear();
        }
        let mut costs = CorridorCosts::new(corridor);
        for (row_index, first_sequence_item) in first_sequence.iter().enumerate() {
            let (start, end) = costs.corridor.ranges[row_index];
            for column_index in start..=end {
                let cost =
                    (self.distance_fn)(*first_sequence_item, second_sequence[column_index]);
                let min_value = if row_index == 0 && column_index == 0 {
                    0.
                } else {
                    let insertion = if row_index > 0 {
                        costs.get(row_index - 1, column_index)
                    } else {
                        f32::INFINITY
                    };
                    let deletion = if column_index > 0 {
                        costs.get(row_index, column_index - 1)
                    } else {
                        f32::INFINITY
                    };
                    let matches = if row_index > 0 && column_index > 0 {
                        costs.get(row_index - 1, column_index - 1)
                    } else {
                        f32::INFINITY
                    };
                    [insertion, deletion, matches]
                        .iter()
                        .fold(f32::INFINITY, |a, &b| a.min(b))
                };
                costs.set(row_index, column_index, cost + min_value);
            }
        }
        let similarity = costs.get(self.state_m - 1, self.state_n - 1);
        self.cost_table = Some(CostTable::Corridor(costs));
        self.state_similarity = Some(similarity);
        similarity
    }
    /// Walks the last computed cost table back from the end cell.
    /// On ties the diagonal move is preferred.
    pub fn retrieve_optimal_path(&self) -> Option<AlignmentPath> {
        let cost_table = self.cost_table.as_ref()?;
        if self.state_m == 0 || self.state_n == 0 {
            return None;
        }
        let mut row_index = self.state_m - 1;
        let mut column_index = self.state_n - 1;
        let mut path = Vec::with_capacity(self.state_m + self.state_n);
        path.push((row_index, column_index));
        while (row_index > 0) || (column_index > 0) {
            if row_index > 0 && column_index > 0 {
                let insertion = cost_table.get(row_index - 1, column_index);
                let deletion = cost_table.get(row_index, column_index - 1);
                let matches = cost_table.get(row_index - 1, column_index - 1);
                if matches <= insertion && matches <= deletion {
                    row_index -= 1;
                    column_index -= 1;
                } else if insertion <= deletion {
                    row_index -= 1;
                } else {
                    column_index -= 1;
                }
            } else if row_index > 0 {
                row_index -= 1;
            } else {
                column_index -= 1;
            }
            path.push((row_index, column_index));
        }
        path.reverse();
        Some(AlignmentPath::new(path))
    }
    pub fn similarity(&self) -> Option<f32> {
        self.state_similarity
    }
    fn clear(&mut self) -> f32 {
        self.cost_table = None;
        self.state_similarity = None;
        f32::INFINITY
    }
    pub fn new(distance_fn: fn(T, T) -> f32) -> Dtw<T> {
        Dtw {
            state_m: 0,
            state_n: 0,
            distance_fn,
            state_similarity: None,
            cost_table: None,
        }
    }
}
/// Last full resolution index covered by a coarse index widened by `radius`.
fn widen(coarse_index: usize, radius: usize) -> usize {
    coarse_index
        .saturating_add(radius)
        .saturating_mul(2)
        .saturating_add(1)
}
fn matrix_cell(matrix: &Matrix<f32>, row_index: usize, column_index: usize) -> f32 {
    matrix
        .get(row_index, column_index)
        .copied()
        .unwrap_or(f32::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute_distance(a: f32, b: f32) -> f32 {
        (a - b).abs()
    }

    #[test]
    fn it_aligns_repeated_frames_without_cost() {
        let mut dtw = Dtw::new(absolute_distance);
        let cost = dtw.compute_optimal_path(&[1., 2., 3.], &[1., 2., 2., 3.]);
        assert_eq!(cost, 0.);
        assert_eq!(dtw.similarity(), Some(0.));
        let path = dtw.retrieve_optimal_path().unwrap();
        assert_eq!(path.pairs(), &[(0, 0), (1, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn it_accumulates_the_minimum_cost() {
        let mut dtw = Dtw::new(absolute_distance);
        let cost = dtw.compute_optimal_path(&[0., 1., 2.], &[0., 2.]);
        // (0,0)=0 (1,0)|(1,1)=1 (2,1)=0
        assert_eq!(cost, 1.);
        assert!(dtw.retrieve_optimal_path().unwrap().is_valid_for(3, 2));
    }

    #[test]
    fn it_matches_the_exact_cost_with_a_wide_window() {
        let first = (0..40).map(|i| (i as f32 * 0.3).sin()).collect::<Vec<_>>();
        let second = (0..55).map(|i| (i as f32 * 0.21).sin()).collect::<Vec<_>>();
        let mut dtw = Dtw::new(absolute_distance);
        let exact = dtw.compute_optimal_path(&first, &second);
        let windowed = dtw.compute_optimal_path_with_window(&first, &second, 55);
        assert!((exact - windowed).abs() < 1e-4);
        assert!(dtw.retrieve_optimal_path().unwrap().is_valid_for(40, 55));
    }

    #[test]
    fn it_never_beats_the_exact_cost_with_a_narrow_window() {
        let first = (0..30).map(|i| (i as f32 * 0.5).cos()).collect::<Vec<_>>();
        let second = (0..70).map(|i| (i as f32 * 0.2).cos()).collect::<Vec<_>>();
        let mut dtw = Dtw::new(absolute_distance);
        let exact = dtw.compute_optimal_path(&first, &second);
        for radius in 0..4 {
            let windowed = dtw.compute_optimal_path_with_window(&first, &second, radius);
            assert!(windowed.is_finite());
            assert!(windowed + 1e-4 >= exact);
            assert!(dtw.retrieve_optimal_path().unwrap().is_valid_for(30, 70));
        }
    }

    #[test]
    fn it_builds_connected_diagonal_corridors() {
        for (rows, columns) in [(5, 17), (17, 5), (1, 9), (9, 1), (8, 8)] {
            let corridor = Corridor::around_diagonal(rows, columns, 0);
            assert_eq!(corridor.range(0).map(|(start, _)| start), Some(0));
            assert_eq!(
                corridor.range(rows - 1).map(|(_, end)| end),
                Some(columns - 1)
            );
            for row_index in 1..rows {
                let (start, _) = corridor.range(row_index).unwrap();
                let (_, previous_end) = corridor.range(row_index - 1).unwrap();
                assert!(start <= previous_end + 1);
            }
        }
    }

    #[test]
    fn it_projects_coarse_paths() {
        let coarse_path = AlignmentPath::new(vec![(0, 0), (1, 1), (2, 1)]);
        let corridor = Corridor::from_coarse_path(&coarse_path, 5, 4, 0);
        assert_eq!(corridor.range(0), Some((0, 1)));
        assert_eq!(corridor.range(2), Some((2, 3)));
        assert_eq!(corridor.range(4), Some((2, 3)));
        assert!(corridor.contains(4, 3));
        assert!(!corridor.contains(0, 2));
    }

    #[test]
    fn it_clips_huge_radiuses_to_the_table() {
        let diagonal = Corridor::around_diagonal(6, 9, usize::MAX);
        assert_eq!(diagonal, Corridor::full(6, 9));
        let coarse_path = AlignmentPath::new(vec![(0, 0), (1, 1), (2, 2)]);
        let projected = Corridor::from_coarse_path(&coarse_path, 6, 5, usize::MAX);
        assert_eq!(projected, Corridor::full(6, 5));
    }

    #[test]
    fn it_has_no_path_before_computing() {
        let dtw: Dtw<f32> = Dtw::new(absolute_distance);
        assert!(dtw.retrieve_optimal_path().is_none());
    }
}
