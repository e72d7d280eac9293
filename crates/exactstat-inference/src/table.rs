use exactstat_error::Result;

use crate::arguments::{check_two_by_two, checked_table_sum};

/// A 2×2 table of counts
///
/// ```text
///   a  b
///   c  d
/// ```
///
/// Construction guarantees every margin and the grand total fit in `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContingencyTable {
    cells: [[u32; 2]; 2],
    total: u32,
}

impl ContingencyTable {
    /// Table `{{a, b}, {c, d}}`.
    ///
    /// # Errors
    ///
    /// [`exactstat_error::StatError::Overflow`] when a margin or the total
    /// exceeds `u32::MAX`.
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Result<Self> {
        let cells = [[a, b], [c, d]];
        let total = checked_table_sum(&cells)?;
        Ok(Self { cells, total })
    }

    /// Table from row slices, which must form exactly two rows of two.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        check_two_by_two(rows)?;
        let top = rows[0].as_ref();
        let bottom = rows[1].as_ref();
        Self::new(top[0], top[1], bottom[0], bottom[1])
    }

    #[must_use]
    pub const fn a(&self) -> u32 {
        self.cells[0][0]
    }

    #[must_use]
    pub const fn b(&self) -> u32 {
        self.cells[0][1]
    }

    #[must_use]
    pub const fn c(&self) -> u32 {
        self.cells[1][0]
    }

    #[must_use]
    pub const fn d(&self) -> u32 {
        self.cells[1][1]
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// `a + b`.
    #[must_use]
    pub const fn first_row_sum(&self) -> u32 {
        self.a() + self.b()
    }

    /// `a + c`.
    #[must_use]
    pub const fn first_column_sum(&self) -> u32 {
        self.a() + self.c()
    }
}
