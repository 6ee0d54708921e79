use std::fmt::{self, Display};

use comfy_table::{Cell, Table};
use itertools::Itertools;
use log::{debug, trace};
use rand::{thread_rng, Rng};

use crate::error::{Error, Result};
use crate::face::{homogenize, Face, Weight};
use crate::print::{labeled_table, PrintExt};

const DEFAULT_WEIGHT: f64 = 1.0;

/// A weighted die with a fixed set of distinct faces.
///
/// Every face starts with weight `1.0`. Probabilities are derived from the
/// current weights on every roll, so weight changes apply to the next roll.
#[derive(Debug, Clone)]
pub struct Die {
    faces: Vec<Face>,
    weights: Vec<f64>,
}

/// Read-only face to weight view of a die, in face order.
#[derive(Debug, Clone, Copy)]
pub struct WeightTable<'a> {
    faces: &'a [Face],
    weights: &'a [f64],
}

impl Die {
    pub fn new<I, T>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Face>,
    {
        let faces = homogenize(faces.into_iter().map(Into::into).collect())?;
        if let Some(face) = faces.iter().duplicates().next() {
            return Err(Error::DuplicateFace(face.clone()));
        }
        debug!("new die with {} faces", faces.len());
        Ok(Self {
            weights: vec![DEFAULT_WEIGHT; faces.len()],
            faces,
        })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Replaces the weight of `face`. The die is left untouched on error.
    pub fn set_weight<F, W>(&mut self, face: F, weight: W) -> Result<()>
    where
        F: Into<Face>,
        W: Into<Weight>,
    {
        let face = face.into();
        let index = self
            .faces
            .iter()
            .position(|f| *f == face)
            .ok_or_else(|| Error::FaceNotFound(face.clone()))?;

        let weight = weight.into().value();
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeightType(weight.to_string()));
        }

        let total: f64 = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| if i == index { weight } else { *w })
            .sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(Error::ZeroTotalWeight);
        }

        debug!("face {face} weight {} -> {weight}", self.weights[index]);
        self.weights[index] = weight;
        Ok(())
    }

    pub fn current_state(&self) -> WeightTable<'_> {
        WeightTable {
            faces: &self.faces,
            weights: &self.weights,
        }
    }

    /// Normalized probability of every face, in face order.
    pub fn probabilities(&self) -> Vec<(&Face, f64)> {
        let total = self.total_weight();
        self.faces
            .iter()
            .zip(&self.weights)
            .map(|(f, w)| (f, w / total))
            .collect()
    }

    pub fn roll(&self, n: usize) -> Vec<Face> {
        self.roll_with(n, &mut thread_rng())
    }

    /// Draws `n` faces with replacement using `rng`.
    pub fn roll_with<G>(&self, n: usize, rng: &mut G) -> Vec<Face>
    where
        G: Rng,
    {
        let total = self.total_weight();
        let cumulative = self
            .weights
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect_vec();
        let fallback = self.weights.iter().rposition(|w| *w > 0.0).unwrap_or(0);

        let rolls = (0..n)
            .map(|_| {
                let v = rng.gen_range(0.0..total);
                let index = cumulative.partition_point(|c| *c <= v);
                self.faces[if index < self.faces.len() { index } else { fallback }].clone()
            })
            .collect_vec();
        trace!("rolled {rolls:?}");
        rolls
    }

    fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl<'a> WeightTable<'a> {
    pub fn get(&self, face: &Face) -> Option<f64> {
        self.faces
            .iter()
            .position(|f| f == face)
            .map(|i| self.weights[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Face, f64)> + 'a {
        self.faces.iter().zip(self.weights.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl PrintExt for WeightTable<'_> {
    fn table(&self) -> Table {
        let mut table = labeled_table(["", "weight"]);
        for (face, weight) in self.iter() {
            table.add_row(vec![Cell::new(face), Cell::new(format!("{weight:?}"))]);
        }
        table
    }
}

impl Display for WeightTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}
