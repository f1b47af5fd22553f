use kreme_tree::RowBounds;

/// Fixed-height row geometry for a [`TreeView`](crate::TreeView).
///
/// Rows are laid out top to bottom with `spacing` between them, so a row's
/// bounds follow from its visible index alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub row_height: f32,
    pub spacing: f32,
}

/// Row under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHit {
    Row(usize),
    /// Below the last row.
    Background,
    /// Above the first row.
    Outside,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            spacing: 0.0,
        }
    }
}

impl RowLayout {
    pub fn new(row_height: f32, spacing: f32) -> Self {
        Self {
            row_height: row_height.max(1.0),
            spacing: spacing.max(0.0),
        }
    }

    fn stride(&self) -> f32 {
        self.row_height + self.spacing
    }

    /// Bounds of the row at `visible_index`, in view coordinates.
    pub fn bounds(&self, visible_index: usize) -> RowBounds {
        RowBounds::new(visible_index as f32 * self.stride(), self.row_height)
    }

    /// Total height occupied by `rows` rows.
    pub fn content_height(&self, rows: usize) -> f32 {
        match rows {
            0 => 0.0,
            rows => rows as f32 * self.stride() - self.spacing,
        }
    }

    /// Map a pointer y to a row. The gap after a row belongs to that row.
    pub fn hit(&self, y: f32, rows: usize) -> RowHit {
        if !y.is_finite() || y < 0.0 {
            return RowHit::Outside;
        }

        let index = (y / self.stride()).floor() as usize;
        if index < rows {
            RowHit::Row(index)
        } else {
            RowHit::Background
        }
    }
}
