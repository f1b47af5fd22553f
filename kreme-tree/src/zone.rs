use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Region of a target row the pointer is over.
///
/// `Top` inserts before (or into, for non-first rows), `Middle` inserts
/// inside, `Bottom` inserts after. `None` means there is no usable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropZone {
    Top,
    Middle,
    Bottom,
    None,
}

/// Vertical extent of a target row, in the same space as the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBounds {
    pub top: f32,
    pub height: f32,
}

impl RowBounds {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }
}

/// Fractions of the row height separating the three zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneThresholds {
    pub top: f32,
    pub bottom: f32,
}

impl ZoneThresholds {
    /// Folder rows: the lower half means "after".
    pub const FOLDER_ROW: Self = Self {
        top: 0.33,
        bottom: 0.5,
    };

    /// Plain labels: an even three-way split.
    pub const LABEL: Self = Self {
        top: 0.33,
        bottom: 0.66,
    };

    pub fn new(top: f32, bottom: f32) -> Result<Self> {
        let thresholds = Self { top, bottom };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        let in_range = |value: f32| (0.0..=1.0).contains(&value);
        if in_range(self.top) && in_range(self.bottom) && self.top <= self.bottom
        {
            Ok(())
        } else {
            Err(Error::InvalidThresholds {
                top: self.top,
                bottom: self.bottom,
            })
        }
    }
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self::FOLDER_ROW
    }
}

/// Classify a pointer position against a target row.
pub fn classify(
    bounds: Option<RowBounds>,
    pointer_y: f32,
    thresholds: ZoneThresholds,
) -> DropZone {
    let Some(bounds) = bounds else {
        return DropZone::None;
    };

    if !bounds.height.is_finite()
        || bounds.height <= 0.0
        || !bounds.top.is_finite()
        || !pointer_y.is_finite()
    {
        return DropZone::None;
    }

    let offset = pointer_y - bounds.top;
    if offset < bounds.height * thresholds.top {
        DropZone::Top
    } else if offset > bounds.height * thresholds.bottom {
        DropZone::Bottom
    } else {
        DropZone::Middle
    }
}
