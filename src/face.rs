use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use num::ToPrimitive;

use crate::error::{Error, Result};

/// 2^63, the first float above every `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A single face of a die.
///
/// Faces are either text or numbers, never booleans. Integers and floats
/// compare by value, floats by [`f64::total_cmp`], which makes `Face` usable as
/// a map key. Numbers sort before text.
#[derive(Debug, Clone)]
pub enum Face {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Relative likelihood of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weight {
    Int(i64),
    Float(f64),
}

impl Face {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Face::Text(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Face::Int(_) | Face::Float(_) => 0,
            Face::Text(_) => 1,
        }
    }

    fn promote(self) -> Self {
        match self {
            Face::Int(x) => x.to_f64().map_or(Face::Int(x), Face::Float),
            other => other,
        }
    }
}

impl Weight {
    pub fn value(self) -> f64 {
        match self {
            Weight::Int(x) => x.to_f64().unwrap_or(f64::NAN),
            Weight::Float(x) => x,
        }
    }
}

/// Checks that a face set is non-empty and all text or all numeric.
///
/// Numeric sets mixing integers and floats come back as all floats.
pub(crate) fn homogenize(faces: Vec<Face>) -> Result<Vec<Face>> {
    if faces.is_empty() {
        return Err(Error::InvalidArgumentType("a die needs at least one face"));
    }
    let numeric = faces.iter().filter(|f| f.is_numeric()).count();
    if numeric != 0 && numeric != faces.len() {
        return Err(Error::InvalidArgumentType(
            "faces must be all strings or all numbers",
        ));
    }
    let has_float = faces.iter().any(|f| matches!(f, Face::Float(_)));
    let has_int = faces.iter().any(|f| matches!(f, Face::Int(_)));
    if has_float && has_int {
        return Ok(faces.into_iter().map(Face::promote).collect());
    }
    Ok(faces)
}

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Face {}

impl PartialOrd for Face {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Face {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Face::Int(a), Face::Int(b)) => a.cmp(b),
            (Face::Float(a), Face::Float(b)) => a.total_cmp(b),
            (Face::Text(a), Face::Text(b)) => a.cmp(b),
            (Face::Int(a), Face::Float(b)) => cmp_int_float(*a, *b),
            (Face::Float(a), Face::Int(b)) => cmp_int_float(*b, *a).reverse(),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Exact comparison of an integer with a float under `total_cmp` order.
fn cmp_int_float(a: i64, b: f64) -> Ordering {
    match a.to_f64().map_or(Ordering::Less, |x| x.total_cmp(&b)) {
        Ordering::Equal if b < I64_LIMIT => a.cmp(&(b as i64)),
        Ordering::Equal => Ordering::Less,
        other => other,
    }
}

/// `x` as an `i64` when it is integral and in range. `-0.0` is excluded.
fn integral(x: f64) -> Option<i64> {
    let fits = x.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&x);
    (fits && !(x == 0.0 && x.is_sign_negative())).then_some(x as i64)
}

impl Hash for Face {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Face::Int(x) => x.hash(state),
            Face::Float(x) => match integral(*x) {
                Some(i) => i.hash(state),
                None => x.to_bits().hash(state),
            },
            Face::Text(x) => x.hash(state),
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Int(x) => write!(f, "{x}"),
            Face::Float(x) => write!(f, "{x:?}"),
            Face::Text(x) => f.write_str(x),
        }
    }
}

macro_rules! impl_face_from_int {
    ($($typ:ty),*) => {
        $(
            impl From<$typ> for $crate::face::Face {
                fn from(value: $typ) -> Self {
                    Face::Int(i64::from(value))
                }
            }

            impl From<$typ> for $crate::face::Weight {
                fn from(value: $typ) -> Self {
                    Weight::Int(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! impl_face_from_float {
    ($($typ:ty),*) => {
        $(
            impl From<$typ> for $crate::face::Face {
                fn from(value: $typ) -> Self {
                    Face::Float(f64::from(value))
                }
            }

            impl From<$typ> for $crate::face::Weight {
                fn from(value: $typ) -> Self {
                    Weight::Float(f64::from(value))
                }
            }
        )*
    };
}

impl_face_from_int!(i8, i16, i32, i64, u8, u16, u32);
impl_face_from_float!(f32, f64);

impl From<&str> for Face {
    fn from(value: &str) -> Self {
        Face::Text(value.to_owned())
    }
}

impl From<String> for Face {
    fn from(value: String) -> Self {
        Face::Text(value)
    }
}

impl From<&Face> for Face {
    fn from(value: &Face) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces<T: Into<Face>>(values: impl IntoIterator<Item = T>) -> Vec<Face> {
        values.into_iter().map(Into::into).collect()
    }

    #[test]
    fn mixed_text_and_numbers_are_rejected() {
        let mixed = vec![Face::from("a"), Face::from(1)];
        assert!(matches!(
            homogenize(mixed),
            Err(Error::InvalidArgumentType(_))
        ));
    }

    #[test]
    fn empty_face_set_is_rejected() {
        assert!(matches!(
            homogenize(Vec::new()),
            Err(Error::InvalidArgumentType(_))
        ));
    }

    #[test]
    fn mixed_numbers_are_promoted_to_floats() {
        let out = homogenize(vec![Face::from(1), Face::from(2.5)]).unwrap();
        assert_eq!(out, vec![Face::Float(1.0), Face::Float(2.5)]);
    }

    #[test]
    fn homogeneous_sets_are_kept() {
        let ints = faces([3, 1, 2]);
        assert_eq!(homogenize(ints.clone()).unwrap(), ints);
        let text = faces(["heads", "tails"]);
        assert_eq!(homogenize(text.clone()).unwrap(), text);
    }

    #[test]
    fn numbers_sort_before_text() {
        let mut all = vec![Face::from("b"), Face::from(2.5), Face::from(7), Face::from("a")];
        all.sort();
        assert_eq!(
            all,
            vec![Face::from(2.5), Face::from(7), Face::from("a"), Face::from("b")]
        );
    }

    #[test]
    fn integers_and_floats_compare_by_value() {
        assert_eq!(Face::from(1), Face::from(1.0));
        assert!(Face::from(1) < Face::from(1.5));
        assert!(Face::from(2.5) < Face::from(3));
        assert!(Face::from(-1) > Face::from(f64::NEG_INFINITY));
        assert_ne!(Face::from(0), Face::from(-0.0));
        assert!(Face::Int(i64::MAX) < Face::from(9_223_372_036_854_775_808.0));
    }

    #[test]
    fn equal_numbers_hash_alike() {
        use std::collections::HashSet;

        let set: HashSet<Face> = [Face::from(3), Face::from(3.0), Face::from(3.5)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Face::from(3.0)));
    }

    #[test]
    fn display_matches_value() {
        assert_eq!(Face::from(3).to_string(), "3");
        assert_eq!(Face::from(1.0).to_string(), "1.0");
        assert_eq!(Face::from("six").to_string(), "six");
    }

    #[test]
    fn weight_converts_to_float() {
        assert_eq!(Weight::from(4).value(), 4.0);
        assert_eq!(Weight::from(0.5f32).value(), 0.5);
    }
}
