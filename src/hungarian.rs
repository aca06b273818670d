use nalgebra::DMatrix;

/* -----------------------------------------------------------------------------
 * hungarian.rs - Kuhn-Munkres minimum-cost assignment with potentials, O(n^2 m)
 * ----------------------------------------------------------------------------- */

/// Solve the rectangular assignment problem minimizing total cost.
///
/// Returns, for every row, the column assigned to it. When there are more
/// rows than columns the surplus rows are left as `None`; otherwise every
/// row is assigned. Costs must be finite.
pub(crate) fn solve(cost: &DMatrix<f64>) -> Vec<Option<usize>> {
    debug_assert!(
        cost.iter().all(|c| c.is_finite()),
        "cost matrix contains a non-finite entry"
    );

    let (n_rows, n_cols) = cost.shape();
    if n_rows == 0 || n_cols == 0 {
        return vec![None; n_rows];
    }

    if n_rows <= n_cols {
        return solve_wide(cost);
    }

    // Tall matrix: solve the transpose and invert the mapping.
    let col_to_row = solve_wide(&cost.transpose());
    let mut row_to_col = vec![None; n_rows];
    for (col, row) in col_to_row.iter().enumerate() {
        if let Some(row) = row {
            row_to_col[*row] = Some(col);
        }
    }
    row_to_col
}

/// Requires `nrows <= ncols`.
fn solve_wide(cost: &DMatrix<f64>) -> Vec<Option<usize>> {
    let (n, m) = cost.shape();
    debug_assert!(n <= m, "solve_wide needs nrows <= ncols, got {n}x{m}");

    // 1-based indexing; index 0 is the virtual root column.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = cost[(i0 - 1, j - 1)] - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment along the alternating path.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut row_to_col = vec![None; n];
    for j in 1..=m {
        if p[j] != 0 {
            row_to_col[p[j] - 1] = Some(j - 1);
        }
    }
    row_to_col
}
