//! Sampling planner: decides whether a dataset must be reduced before
//! rendering and which row/column indices survive.
//!
//! The planner is pure index arithmetic over the configured maxima and
//! per-axis sampling methods; it never touches the data itself.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use framelens_settings::SettingsStore;
use framelens_types::SamplingMethod;

/// Indices that survive reduction, per axis. `None` means the axis
/// already fits the configured maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub rows: Option<Vec<usize>>,
    pub columns: Option<Vec<usize>>,
}

impl RenderPlan {
    /// True when no reduction is needed on either axis.
    pub fn fits(&self) -> bool {
        self.rows.is_none() && self.columns.is_none()
    }
}

/// Plan the reduction for a `rows` x `columns` dataset, honoring
/// `display_max_rows` / `display_max_columns` and the per-axis sampling
/// methods. Random sampling is seeded from `sampling_seed`, so plans are
/// reproducible for a given configuration.
pub fn plan_render(settings: &SettingsStore, rows: usize, columns: usize) -> RenderPlan {
    let max_rows = settings.display_max_rows() as usize;
    let max_columns = settings.display_max_columns() as usize;
    let seed = settings.sampling_seed();

    let row_indices = (rows > max_rows)
        .then(|| sample_indices(settings.row_sampling_method(), rows, max_rows, seed));
    let column_indices = (columns > max_columns)
        .then(|| sample_indices(settings.column_sampling_method(), columns, max_columns, seed));

    RenderPlan {
        rows: row_indices,
        columns: column_indices,
    }
}

/// Whether an estimated payload exceeds the configured byte ceiling.
pub fn exceeds_render_budget(settings: &SettingsStore, estimated_bytes: u64) -> bool {
    estimated_bytes > settings.max_render_size_bytes()
}

/// Shrink a row count until its proportional payload estimate fits the
/// byte ceiling, dropping `sampling_factor` of the remaining rows per
/// pass. Returns the full count when the estimate already fits, and keeps
/// at least one row otherwise.
///
/// A `sampling_factor` of zero disables shrinking: the full row count
/// comes back even when its estimate exceeds the ceiling, so callers that
/// must hold the ceiling should check [`exceeds_render_budget`] on the
/// result.
pub fn rows_within_budget(
    settings: &SettingsStore,
    total_rows: usize,
    estimated_bytes: u64,
) -> usize {
    let budget = settings.max_render_size_bytes();
    if total_rows == 0 || estimated_bytes <= budget {
        return total_rows;
    }

    let factor = settings.sampling_factor();
    if factor <= 0.0 {
        // shrinking disabled
        return total_rows;
    }

    let bytes_per_row = estimated_bytes as f64 / total_rows as f64;
    let mut keep = total_rows as f64;
    while keep > 1.0 && keep * bytes_per_row > budget as f64 {
        keep *= 1.0 - factor;
    }
    (keep.floor() as usize).max(1)
}

/// Pick `target` surviving indices out of `0..total` with the given
/// method. The result is sorted ascending; `target >= total` keeps
/// everything.
pub fn sample_indices(
    method: SamplingMethod,
    total: usize,
    target: usize,
    seed: u64,
) -> Vec<usize> {
    if target >= total {
        return (0..total).collect();
    }
    if target == 0 {
        return Vec::new();
    }

    match method {
        SamplingMethod::Random => {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut indices = rand::seq::index::sample(&mut rng, total, target).into_vec();
            indices.sort_unstable();
            indices
        }
        SamplingMethod::First => (0..target).collect(),
        SamplingMethod::Last => (total - target..total).collect(),
        SamplingMethod::Inner => {
            let start = (total - target) / 2;
            (start..start + target).collect()
        }
        SamplingMethod::Outer => {
            let head = target - target / 2;
            let tail = target / 2;
            (0..head).chain(total - tail..total).collect()
        }
    }
}
