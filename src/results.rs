use std::fmt::{self, Display};
use std::str::FromStr;

use comfy_table::{Cell, Table};
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::print::{labeled_table, PrintExt};
use crate::Face;

/// Anything that exposes a table of play results.
pub trait Outcomes {
    fn outcomes(&self) -> Option<&Results>;
}

/// Outcome of one play: one row per roll, one column per die.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Results {
    rows: Vec<Vec<Face>>,
    dice: usize,
}

/// Layout requested from [`crate::Game::last_results`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Form {
    #[default]
    Wide,
    Narrow,
}

/// One `(roll, die)` cell of the narrow layout. Both indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrowEntry {
    pub roll: usize,
    pub die: usize,
    pub value: Face,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Narrow {
    entries: Vec<NarrowEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView<'a> {
    Wide(&'a Results),
    Narrow(Narrow),
}

impl Results {
    /// Builds a table from rows. All rows must have the same length.
    pub fn from_rows<R, T>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = T>,
        T: Into<Face>,
    {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect_vec())
            .collect_vec();
        let dice = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != dice) {
            return Err(Error::InvalidArgumentType("rows must all have the same length"));
        }
        Ok(Self { rows, dice })
    }

    /// Transposes per-die columns of equal length into a table.
    pub(crate) fn from_columns(columns: Vec<Vec<Face>>, rolls: usize) -> Self {
        let dice = columns.len();
        let mut columns = columns.into_iter().map(Vec::into_iter).collect_vec();
        let rows = (0..rolls)
            .map(|_| columns.iter_mut().filter_map(Iterator::next).collect_vec())
            .collect_vec();
        Self { rows, dice }
    }

    /// `(rolls, dice)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.dice)
    }

    pub fn rows(&self) -> &[Vec<Face>] {
        &self.rows
    }

    pub fn row(&self, roll: usize) -> Option<&[Face]> {
        self.rows.get(roll).map(Vec::as_slice)
    }

    pub fn column(&self, die: usize) -> Option<Vec<&Face>> {
        (die < self.dice).then(|| self.rows.iter().map(|r| &r[die]).collect())
    }

    pub fn narrow(&self) -> Narrow {
        let entries = self
            .rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter().enumerate().map(move |(d, value)| NarrowEntry {
                    roll: r + 1,
                    die: d + 1,
                    value: value.clone(),
                })
            })
            .collect();
        Narrow { entries }
    }

    pub fn view(&self, form: Form) -> ResultsView<'_> {
        match form {
            Form::Wide => ResultsView::Wide(self),
            Form::Narrow => ResultsView::Narrow(self.narrow()),
        }
    }
}

impl Outcomes for Results {
    fn outcomes(&self) -> Option<&Results> {
        Some(self)
    }
}

impl<T: Outcomes + ?Sized> Outcomes for &T {
    fn outcomes(&self) -> Option<&Results> {
        (**self).outcomes()
    }
}

impl Narrow {
    pub fn entries(&self) -> &[NarrowEntry] {
        &self.entries
    }

    /// `(rolls * dice, 1)`: one value column.
    pub fn shape(&self) -> (usize, usize) {
        (self.entries.len(), 1)
    }
}

impl ResultsView<'_> {
    pub fn shape(&self) -> (usize, usize) {
        match self {
            ResultsView::Wide(x) => x.shape(),
            ResultsView::Narrow(x) => x.shape(),
        }
    }
}

impl FromStr for Form {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wide" => Ok(Form::Wide),
            "narrow" => Ok(Form::Narrow),
            other => Err(Error::InvalidFormat(other.to_owned())),
        }
    }
}

impl PrintExt for Results {
    fn table(&self) -> Table {
        let header = std::iter::once(String::new()).chain((1..=self.dice).map(|d| d.to_string()));
        let mut table = labeled_table(header);
        for (r, row) in self.rows.iter().enumerate() {
            table.add_row(
                std::iter::once(Cell::new(format!("Roll {}", r + 1)))
                    .chain(row.iter().map(Cell::new))
                    .collect_vec(),
            );
        }
        table
    }
}

impl PrintExt for Narrow {
    fn table(&self) -> Table {
        let mut table = labeled_table(["", "", "Value"]);
        for e in &self.entries {
            table.add_row(vec![
                Cell::new(format!("Roll {}", e.roll)),
                Cell::new(e.die),
                Cell::new(&e.value),
            ]);
        }
        table
    }
}

impl PrintExt for ResultsView<'_> {
    fn table(&self) -> Table {
        match self {
            ResultsView::Wide(x) => x.table(),
            ResultsView::Narrow(x) => x.table(),
        }
    }
}

impl Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl Display for Narrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl Display for ResultsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsView::Wide(x) => x.fmt(f),
            ResultsView::Narrow(x) => x.fmt(f),
        }
    }
}
