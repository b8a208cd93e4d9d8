//! Ordering types and value comparison.
//!
//! Provides [`Dir`] for sort direction, [`Nils`] for nil placement, and
//! [`compare_values`], the native three-way ordering over derived values.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Sort direction.
///
/// Direction is applied once to the fully sorted run of present values,
/// never inside the comparator, so flipping it leaves nil placement alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "descending")]
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ascending run.
    ///
    /// For `Asc`, leaves the run unchanged.
    /// For `Desc`, reverses it in place.
    pub fn apply<T>(self, run: &mut [T]) {
        if self.is_desc() {
            run.reverse();
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where nil values land, independent of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nils {
    /// Nil compares less than every present value.
    First,
    /// Nil compares greater than every present value.
    #[default]
    Last,
}

impl Nils {
    /// Orders a pair by nil-ness alone.
    ///
    /// Returns `None` when neither side is nil, leaving the pair to
    /// [`compare_values`].
    pub fn place(self, a_nil: bool, b_nil: bool) -> Option<Ordering> {
        match (a_nil, b_nil) {
            (true, true) => Some(Ordering::Equal),
            (false, false) => None,
            (true, false) => Some(match self {
                Nils::First => Ordering::Less,
                Nils::Last => Ordering::Greater,
            }),
            (false, true) => Some(match self {
                Nils::First => Ordering::Greater,
                Nils::Last => Ordering::Less,
            }),
        }
    }

    /// Returns the display name of this placement.
    pub fn as_str(self) -> &'static str {
        match self {
            Nils::First => "first",
            Nils::Last => "last",
        }
    }
}

impl std::fmt::Display for Nils {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nils {}", self.as_str())
    }
}

/// Compares two derived values with their native ordering.
///
/// Returns `None` if the types have no defined relative order (a string
/// against a number, a symbol against a string) or a float is NaN. Lists
/// compare element by element; maps only compare equal to equal maps.
///
/// ```
/// use std::cmp::Ordering;
/// use standout_sorter::{compare_values, Value};
///
/// assert_eq!(compare_values(&Value::from(1), &Value::from(2.5)), Some(Ordering::Less));
/// assert_eq!(compare_values(&Value::from("a"), &Value::from(1)), None);
/// ```
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Sym(a), Value::Sym(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.compare(*b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Nil, Value::Nil) => Some(Ordering::Equal),
        (Value::List(a), Value::List(b)) => compare_lists(a, b),
        (Value::Map(_), Value::Map(_)) => (a == b).then_some(Ordering::Equal),

        // Type mismatch - cannot compare
        _ => None,
    }
}

fn compare_lists(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        match compare_values(x, y)? {
            Ordering::Equal => continue,
            decided => return Some(decided),
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// Compares two derived values, resolving nils with the given placement
/// before falling back to [`compare_values`].
pub fn compare_with_nils(a: &Value, b: &Value, nils: Nils) -> Option<Ordering> {
    match nils.place(a.is_nil(), b.is_nil()) {
        Some(ordering) => Some(ordering),
        None => compare_values(a, b),
    }
}

/// A total order over any two values, used for pairs with no native order.
///
/// Values group by type first, then order natively where that is defined
/// and by their inspected form otherwise.
pub(crate) fn fallback_order(a: &Value, b: &Value) -> Ordering {
    type_rank(a)
        .cmp(&type_rank(b))
        .then_with(|| compare_values(a, b).unwrap_or_else(|| a.inspect().cmp(&b.inspect())))
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Nil => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Str(_) => 3,
        Value::Sym(_) => 4,
        Value::List(_) => 5,
        Value::Map(_) => 6,
    }
}
