/// Cap on how many rows a single extraction pass may fill.
///
/// A hard limit additionally demands that exactly that many rows are
/// available; coming up short is an error instead of a shorter result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    rows: usize,
    hard: bool,
}

impl Limit {
    pub const UNLIMITED: Limit = Limit {
        rows: usize::MAX,
        hard: false,
    };

    pub fn new(rows: usize, hard: bool) -> Self {
        Self { rows, hard }
    }

    pub fn allowed_row_count(&self) -> usize {
        self.rows
    }

    pub fn is_hard(&self) -> bool {
        self.hard
    }

    pub fn is_unlimited(&self) -> bool {
        self.rows == usize::MAX
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::UNLIMITED
    }
}
