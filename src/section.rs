use crate::{NSECTIONS, YMIN};

/// Lowest section Y index.
pub const SECTION_Y_MIN: i8 = (YMIN >> 4) as i8;
/// Highest section Y index.
pub const SECTION_Y_MAX: i8 = SECTION_Y_MIN + NSECTIONS as i8 - 1;

/// 16 blocks tall slice of chunk.
///
/// Block storage lives outside of this crate, section only knows its Y.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Section {
    y: i8,
}

impl Section {
    pub fn new(y: i8) -> Self {
        Section { y }
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Index inside chunk sections array, `None` when outside of the world height.
    pub(crate) fn index(y: i8) -> Option<usize> {
        if y < SECTION_Y_MIN || y > SECTION_Y_MAX {
            return None;
        }

        Some((y - SECTION_Y_MIN) as usize)
    }
}
