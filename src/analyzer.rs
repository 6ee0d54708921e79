use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display};

use comfy_table::{Cell, Table};
use itertools::Itertools;
use log::debug;

use crate::config::Binding;
use crate::error::{Error, Result};
use crate::results::{Outcomes, Results};
use crate::print::{labeled_table, PrintExt};
use crate::Face;

const COMBINATION_LABEL: &str = "Combination Count";
const PERMUTATION_LABEL: &str = "Permutation Count";

/// Statistics over the results of a played game.
///
/// The table is either borrowed from its source or copied from it, see
/// [`Binding`]. A borrowed table keeps the source from being replayed while
/// the analyzer is alive. A copied one never changes until [`Analyzer::refresh`].
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    outcome: Cow<'a, Results>,
}

/// Per-roll tally of every face seen anywhere in the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceCounts {
    faces: Vec<Face>,
    counts: Vec<Vec<usize>>,
}

/// Number of rolls that produced each distinct key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counts {
    label: &'static str,
    entries: Vec<(Vec<Face>, usize)>,
}

impl<'a> Analyzer<'a> {
    pub fn new<S>(source: &'a S) -> Result<Self>
    where
        S: Outcomes + ?Sized,
    {
        Self::with_binding(source, Binding::Borrow)
    }

    pub fn with_binding<S>(source: &'a S, binding: Binding) -> Result<Self>
    where
        S: Outcomes + ?Sized,
    {
        let results = read(source)?;
        let outcome = match binding {
            Binding::Borrow => Cow::Borrowed(results),
            Binding::Snapshot => Cow::Owned(results.clone()),
        };
        Ok(Self { outcome })
    }

    /// Re-reads `source` and keeps a copy of its current table.
    pub fn refresh<S>(&mut self, source: &S) -> Result<()>
    where
        S: Outcomes + ?Sized,
    {
        self.outcome = Cow::Owned(read(source)?.clone());
        Ok(())
    }

    pub fn outcome(&self) -> &Results {
        &self.outcome
    }

    /// Number of rolls in which every die shows the same face.
    pub fn jackpot(&self) -> usize {
        self.outcome
            .rows()
            .iter()
            .filter(|r| !r.is_empty() && r.iter().all_equal())
            .count()
    }

    pub fn face_count(&self) -> FaceCounts {
        let faces = self
            .outcome
            .rows()
            .iter()
            .flatten()
            .collect::<BTreeSet<_>>();
        let index = faces
            .iter()
            .enumerate()
            .map(|(i, f)| (*f, i))
            .collect::<BTreeMap<_, _>>();

        let counts = self
            .outcome
            .rows()
            .iter()
            .map(|row| {
                let mut tally = vec![0; index.len()];
                for face in row {
                    tally[index[face]] += 1;
                }
                tally
            })
            .collect();

        FaceCounts {
            faces: faces.into_iter().cloned().collect(),
            counts,
        }
    }

    /// Counts rolls by their unordered set of values.
    pub fn combo_count(&self, sort: bool) -> Counts {
        self.count_by(COMBINATION_LABEL, sort, |row| row.iter().cloned().sorted().collect())
    }

    /// Counts rolls by their values in die order.
    pub fn permutation_count(&self, sort: bool) -> Counts {
        self.count_by(PERMUTATION_LABEL, sort, <[Face]>::to_vec)
    }

    fn count_by<F>(&self, label: &'static str, sort: bool, key: F) -> Counts
    where
        F: Fn(&[Face]) -> Vec<Face>,
    {
        let mut counts = BTreeMap::<Vec<Face>, usize>::new();
        for row in self.outcome.rows() {
            *counts.entry(key(row.as_slice())).or_default() += 1;
        }
        debug!("{label}: {} distinct keys", counts.len());

        let entries = if sort {
            counts
                .into_iter()
                .sorted_by(|a, b| b.1.cmp(&a.1))
                .collect()
        } else {
            counts.into_iter().collect()
        };
        Counts { label, entries }
    }
}

impl Analyzer<'static> {
    pub fn from_results(results: Results) -> Self {
        Self {
            outcome: Cow::Owned(results),
        }
    }

    /// Copies the current table of `source`.
    pub fn snapshot<S>(source: &S) -> Result<Self>
    where
        S: Outcomes + ?Sized,
    {
        Ok(Self::from_results(read(source)?.clone()))
    }
}

fn read<S>(source: &S) -> Result<&Results>
where
    S: Outcomes + ?Sized,
{
    source.outcomes().ok_or(Error::InvalidArgumentType(
        "source exposes no results table, play the game first",
    ))
}

impl FaceCounts {
    /// Every face seen in the results, sorted.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// One row per roll, one column per face of [`FaceCounts::faces`].
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    /// Count of `face` in roll `roll` (0-based). `None` for unknown rolls.
    pub fn get(&self, roll: usize, face: &Face) -> Option<usize> {
        let row = self.counts.get(roll)?;
        Some(
            self.faces
                .binary_search(face)
                .map_or(0, |i| row[i]),
        )
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.counts.len(), self.faces.len())
    }
}

impl Counts {
    pub fn label(&self) -> &str {
        self.label
    }

    pub fn entries(&self) -> &[(Vec<Face>, usize)] {
        &self.entries
    }

    pub fn get(&self, key: &[Face]) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, c)| *c)
    }

    /// `(distinct keys, 1)`: one count column.
    pub fn shape(&self) -> (usize, usize) {
        (self.entries.len(), 1)
    }
}

impl PrintExt for FaceCounts {
    fn table(&self) -> Table {
        let header = std::iter::once(String::new()).chain(self.faces.iter().map(Face::to_string));
        let mut table = labeled_table(header);
        for (r, row) in self.counts.iter().enumerate() {
            table.add_row(
                std::iter::once(Cell::new(format!("Roll {}", r + 1)))
                    .chain(row.iter().map(Cell::new))
                    .collect_vec(),
            );
        }
        table
    }
}

impl PrintExt for Counts {
    fn table(&self) -> Table {
        let mut table = labeled_table(["", self.label]);
        for (key, count) in &self.entries {
            table.add_row(vec![
                Cell::new(format!("({})", key.iter().join(", "))),
                Cell::new(count),
            ]);
        }
        table
    }
}

impl Display for FaceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{Die, Game};

    fn analyzer<const N: usize>(rows: &[[i32; N]]) -> Analyzer<'static> {
        Analyzer::from_results(Results::from_rows(rows.iter().copied()).unwrap())
    }

    fn key(values: &[i32]) -> Vec<Face> {
        values.iter().copied().map(Face::from).collect()
    }

    #[test]
    fn jackpot_counts_uniform_rows() {
        assert_eq!(analyzer(&[[1, 1], [1, 0]]).jackpot(), 1);
        assert_eq!(analyzer(&[[2, 2], [5, 5]]).jackpot(), 2);
        assert_eq!(analyzer(&[[1, 2], [2, 1]]).jackpot(), 0);
    }

    #[test]
    fn face_count_fills_missing_faces() {
        let counts = analyzer(&[[1, 1, 3, 3, 5], [1, 1, 2, 2, 4]]).face_count();
        assert_eq!(counts.faces(), key(&[1, 2, 3, 4, 5]).as_slice());
        assert_eq!(counts.counts(), &[vec![2, 0, 2, 0, 1], vec![2, 2, 0, 1, 0]]);
        assert_eq!(counts.get(1, &Face::from(4)), Some(1));
        assert_eq!(counts.get(0, &Face::from(9)), Some(0));
        assert_eq!(counts.get(2, &Face::from(1)), None);
    }

    #[test]
    fn combinations_ignore_order() {
        let counts = analyzer(&[[1, 2, 3], [3, 2, 1]]).combo_count(true);
        assert_eq!(counts.shape(), (1, 1));
        assert_eq!(counts.label(), "Combination Count");
        assert_eq!(counts.get(&key(&[1, 2, 3])), Some(2));
    }

    #[test]
    fn permutations_keep_order() {
        let counts = analyzer(&[[1, 2, 3], [3, 2, 1]]).permutation_count(true);
        assert_eq!(counts.shape(), (2, 1));
        assert_eq!(counts.label(), "Permutation Count");
        assert_eq!(counts.get(&key(&[1, 2, 3])), Some(1));
        assert_eq!(counts.get(&key(&[3, 2, 1])), Some(1));
    }

    #[test]
    fn sort_orders_by_frequency_then_key() {
        let a = analyzer(&[[3, 3], [1, 2], [3, 3], [2, 1], [1, 1]]);
        let sorted = a.permutation_count(true);
        let keys = sorted.entries().iter().map(|(k, _)| k.clone()).collect_vec();
        assert_eq!(
            keys,
            vec![key(&[3, 3]), key(&[1, 1]), key(&[1, 2]), key(&[2, 1])]
        );
        let unsorted = a.combo_count(false);
        assert_eq!(
            unsorted.entries(),
            &[(key(&[1, 1]), 1), (key(&[1, 2]), 2), (key(&[3, 3]), 2)]
        );
    }

    #[test]
    fn unplayed_game_is_rejected() {
        let game = Game::new(vec![Die::new([1, 2]).unwrap()]);
        assert!(matches!(
            Analyzer::new(&game),
            Err(Error::InvalidArgumentType(_))
        ));
    }

    #[test]
    fn snapshot_survives_replay() {
        let mut game = Game::new(vec![Die::new([1, 2]).unwrap(), Die::new([1, 2]).unwrap()]);
        let mut rng = StdRng::seed_from_u64(5);
        game.play_with(4, &mut rng).unwrap();
        let mut analyzer = Analyzer::snapshot(&game).unwrap();

        game.play_with(9, &mut rng).unwrap();
        assert_eq!(analyzer.outcome().shape(), (4, 2));

        analyzer.refresh(&game).unwrap();
        assert_eq!(analyzer.outcome().shape(), (9, 2));
    }

    #[test]
    fn borrowed_binding_reads_the_game_table() {
        let mut game = Game::new(vec![Die::new(["h", "t"]).unwrap()]);
        game.play(6).unwrap();
        let analyzer = Analyzer::new(&game).unwrap();
        assert!(std::ptr::eq(analyzer.outcome(), game.outcomes().unwrap()));
        assert_eq!(analyzer.jackpot(), 6);
    }

    #[test]
    fn counts_render_keys_as_tuples() {
        let counts = analyzer(&[[1, 2], [2, 1], [1, 2]]).permutation_count(true);
        assert_eq!(counts.table().row_iter().count(), 2);
        let text = counts.to_string();
        assert!(text.contains("Permutation Count"));
        assert!(text.contains("(1, 2)"));
        assert!(text.contains("(2, 1)"));
    }

    #[test]
    fn face_counts_render_one_row_per_roll() {
        let counts = analyzer(&[[1, 1, 3], [2, 2, 2]]).face_count();
        let table = counts.table();
        assert_eq!(table.header().unwrap().cell_count(), 4);
        assert_eq!(table.row_iter().count(), 2);
        assert!(counts.to_string().contains("Roll 2"));
    }

    #[test]
    fn integer_and_float_dice_share_faces() {
        let mut game = Game::new(vec![Die::new([1]).unwrap(), Die::new([1.0]).unwrap()]);
        game.play(5).unwrap();
        let analyzer = Analyzer::new(&game).unwrap();
        assert_eq!(analyzer.jackpot(), 5);
        assert_eq!(analyzer.face_count().faces().len(), 1);
        assert_eq!(analyzer.face_count().counts(), vec![vec![2]; 5].as_slice());
        assert_eq!(analyzer.combo_count(true).shape(), (1, 1));
    }
}
