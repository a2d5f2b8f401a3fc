use serde::Serialize;

use crate::data::filter::FilteredView;
use crate::data::model::Measure;

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Square, symmetric matrix of pairwise Pearson coefficients.
///
/// `None` marks an undefined coefficient: fewer than two rows where both
/// columns are present, or a constant column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<Measure>,
    cells: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[Measure] {
        &self.columns
    }

    pub fn contains(&self, column: Measure) -> bool {
        self.columns.contains(&column)
    }

    /// Coefficient for `(a, b)`; `None` when undefined or either column is
    /// not part of the matrix.
    pub fn get(&self, a: Measure, b: Measure) -> Option<f64> {
        let i = self.columns.iter().position(|&c| c == a)?;
        let j = self.columns.iter().position(|&c| c == b)?;
        self.at(i, j)
    }

    /// Coefficient by row/column position.
    pub fn at(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i * self.columns.len() + j]
    }
}

/// Pearson coefficients for every ordered pair of `columns` over `view`,
/// using rows where both values of the pair are present.
pub fn correlate(view: &FilteredView<'_>, columns: &[Measure]) -> CorrelationMatrix {
    let n = columns.len();
    let mut cells = vec![None; n * n];

    for i in 0..n {
        for j in i..n {
            let (a, b) = (columns[i], columns[j]);
            let (xs, ys): (Vec<f64>, Vec<f64>) = view
                .iter()
                .filter_map(|r| Some((a.value(r)?, b.value(r)?)))
                .unzip();
            let r = if i == j {
                (!is_constant(&xs)).then_some(1.0)
            } else {
                pearson(&xs, &ys)
            };
            cells[i * n + j] = r;
            cells[j * n + i] = r;
        }
    }

    log::debug!("correlated {} columns over {} rows", n, view.len());
    CorrelationMatrix {
        columns: columns.to_vec(),
        cells,
    }
}

/// Fewer than two values count as constant.
fn is_constant(xs: &[f64]) -> bool {
    match xs.first() {
        Some(&first) => xs.len() < 2 || xs.iter().all(|&x| x == first),
        None => true,
    }
}

/// Pearson's r over paired samples, clamped to [-1, 1].
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if is_constant(xs) || is_constant(ys) {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}
