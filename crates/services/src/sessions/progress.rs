/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionProgress {
    /// One-based position of the current item, capped at `total`.
    pub position: usize,
    pub total: usize,
    /// Share of items already behind the cursor, from 0.0 to 1.0.
    pub fraction: f64,
    pub is_complete: bool,
}

impl SessionProgress {
    pub(crate) fn at(current: usize, total: usize, is_complete: bool) -> Self {
        // Session sizes stay far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let fraction = if total == 0 {
            0.0
        } else {
            current.min(total) as f64 / total as f64
        };

        Self {
            position: (current + 1).min(total),
            total,
            fraction,
            is_complete,
        }
    }
}
