use crate::error::{MosaicError, MosaicResult};

/// Evenly spaced `side x side` lattice over the unit square.
///
/// Points are row-major with x varying fastest, so point `k` sits at
/// `(axis[k % side], axis[k / side])`.
#[must_use]
pub fn unit_grid_points(side: usize) -> Vec<[f64; 2]> {
    let axis: Vec<f64> = match side {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..side)
            .map(|i| i as f64 / (side - 1) as f64)
            .collect(),
    };

    let mut points = Vec::with_capacity(side * side);
    for &y in &axis {
        for &x in &axis {
            points.push([x, y]);
        }
    }
    points
}

/// Greedy nearest-available-point assignment.
///
/// Grid cells are visited in order; each takes the closest data point that no
/// earlier cell claimed (lowest index on ties). Assignment stops when every
/// data point is placed, so the result length is `min(grid.len(), points.len())`.
pub fn assign_nearest_available(
    grid: &[[f64; 2]],
    points: &[[f64; 2]],
) -> MosaicResult<Vec<usize>> {
    if points
        .iter()
        .flatten()
        .chain(grid.iter().flatten())
        .any(|value| !value.is_finite())
    {
        return Err(MosaicError::InvalidData(
            "assignment coordinates must be finite".to_owned(),
        ));
    }

    let mut available = vec![true; points.len()];
    let mut order = Vec::with_capacity(grid.len().min(points.len()));

    for cell in grid.iter().take(points.len()) {
        let mut best: Option<(usize, f64)> = None;
        for (index, point) in points.iter().enumerate() {
            if !available[index] {
                continue;
            }
            let dx = cell[0] - point[0];
            let dy = cell[1] - point[1];
            let distance = dx * dx + dy * dy;
            if best.is_none_or(|(_, current)| distance < current) {
                best = Some((index, distance));
            }
        }

        if let Some((index, _)) = best {
            available[index] = false;
            order.push(index);
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::{assign_nearest_available, unit_grid_points};

    #[test]
    fn grid_points_span_unit_square() {
        let grid = unit_grid_points(2);
        assert_eq!(grid, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        assert_eq!(unit_grid_points(1), vec![[0.0, 0.0]]);
    }

    #[test]
    fn assignment_never_reuses_a_point() {
        let grid = unit_grid_points(2);
        let points = [[0.9, 0.8], [0.1, 0.1], [0.0, 0.05]];
        let order = assign_nearest_available(&grid, &points).expect("assign");
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn ties_pick_lowest_index() {
        let grid = [[0.5, 0.5]];
        let points = [[0.0, 0.5], [1.0, 0.5]];
        assert_eq!(assign_nearest_available(&grid, &points).expect("assign"), vec![0]);
    }
}
