//! Compiled sort pipelines.
//!
//! A [`Pipeline`] is the collection-independent half of a sort: the ordered
//! shaping steps plus the active direction and nil placement. It turns the
//! steps into a comparator and runs the standard library's stable sort with
//! it.

use std::cmp::Ordering;

use log::debug;

use crate::error::{Result, SortError, Stage};
use crate::ordering::{compare_with_nils, fallback_order, Dir, Nils};
use crate::step::Step;
use crate::traits::Extract;
use crate::value::Value;

/// Ordered steps plus the final-ordering configuration.
///
/// Shaping steps (`Dig`, `Call`, `Fold`) are kept in the order they were
/// pushed. Pushing a `Nils` or `Direction` step replaces the current
/// setting instead.
///
/// # Example
///
/// ```
/// use standout_sorter::{Case, Dir, Key, Pipeline, Step, Value};
///
/// let pipeline = Pipeline::new()
///     .push(Step::dig([Key::sym("name")], false).unwrap())
///     .push(Step::Fold(Case::Lower))
///     .push(Step::Direction(Dir::Desc));
///
/// let items = vec![
///     Value::map([(Key::sym("name"), "bob")]),
///     Value::map([(Key::sym("name"), "Alice")]),
///     Value::map([(Key::sym("name"), "Carol")]),
/// ];
///
/// let sorted = pipeline.sort(&items).unwrap();
/// assert_eq!(sorted[0], &items[2]);
/// assert_eq!(sorted[2], &items[1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    steps: Vec<Step>,
    dir: Dir,
    nils: Nils,
}

impl Pipeline {
    /// Creates an empty pipeline: ascending, nils last, items compared as
    /// they are.
    pub fn new() -> Self {
        Pipeline::default()
    }

    /// Adds a step.
    pub fn push(mut self, step: Step) -> Self {
        self.add(step);
        self
    }

    pub(crate) fn add(&mut self, step: Step) {
        match step {
            Step::Nils(nils) => self.nils = nils,
            Step::Direction(dir) => self.dir = dir,
            shaping => self.steps.push(shaping),
        }
    }

    /// Returns the shaping steps in application order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the active direction.
    pub fn dir(&self) -> Dir {
        self.dir
    }

    /// Returns the active nil placement.
    pub fn nils(&self) -> Nils {
        self.nils
    }

    /// Returns `true` if there are no shaping steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns `true` if any step extracts from the item.
    pub fn has_extraction(&self) -> bool {
        self.steps.iter().any(Step::is_extraction)
    }

    /// Runs the shaping steps over one item, producing its sort key.
    pub fn derive<T: Extract>(&self, item: &T) -> Value {
        let mut current: Option<Value> = None;
        for step in &self.steps {
            let next = match &current {
                None => step.perform(item),
                Some(value) => step.perform(value),
            };
            current = Some(next);
        }
        current.unwrap_or_else(|| item.to_value())
    }

    /// Compares two items through the pipeline.
    ///
    /// Nil keys are placed by the nil policy only; direction is not
    /// applied here.
    pub fn compare<T: Extract>(&self, a: &T, b: &T) -> Result<Ordering> {
        let a = self.derive(a);
        let b = self.derive(b);
        compare_with_nils(&a, &b, self.nils).ok_or_else(|| self.incomparable(&a, &b))
    }

    /// Computes the sorted order of `items` as a permutation of indexes.
    ///
    /// Position `i` of the result holds the index of the item that sorts
    /// into position `i`.
    pub fn order<T: Extract>(&self, items: &[T]) -> Result<Vec<usize>> {
        debug!(
            "sorting {} items through {} steps ({}, {})",
            items.len(),
            self.steps.len(),
            self.dir,
            self.nils
        );

        let keys: Vec<Value> = items.iter().map(|item| self.derive(item)).collect();
        let mut order: Vec<usize> = (0..keys.len()).collect();
        let mut failure: Option<SortError> = None;

        // Incomparable pairs still get a total order so the sort finishes;
        // the first failure is returned in place of the result.
        order.sort_by(|&a, &b| {
            let (a, b) = (&keys[a], &keys[b]);
            match compare_with_nils(a, b, self.nils) {
                Some(ordering) => ordering,
                None => {
                    if failure.is_none() {
                        failure = Some(self.incomparable(a, b));
                    }
                    fallback_order(a, b)
                }
            }
        });

        if let Some(err) = failure {
            debug!("sort aborted: {err}");
            return Err(err);
        }

        let nil_count = keys.iter().filter(|key| key.is_nil()).count();
        let present = match self.nils {
            Nils::First => &mut order[nil_count..],
            Nils::Last => &mut order[..keys.len() - nil_count],
        };
        self.dir.apply(present);

        Ok(order)
    }

    /// Sorts into a new vector of references. The input is unchanged.
    pub fn sort<'a, T: Extract>(&self, items: &'a [T]) -> Result<Vec<&'a T>> {
        let order = self.order(items)?;
        Ok(order.into_iter().map(|i| &items[i]).collect())
    }

    /// Sorts `items` in place.
    ///
    /// Every key is derived and compared before the slice is touched, so
    /// on error the slice is left in its original order.
    pub fn sort_in_place<T: Extract>(&self, items: &mut [T]) -> Result<()> {
        let order = self.order(items)?;
        apply_order(items, &order);
        Ok(())
    }

    fn incomparable(&self, a: &Value, b: &Value) -> SortError {
        SortError::Incomparable {
            left: a.inspect(),
            left_type: a.type_name(),
            right: b.inspect(),
            right_type: b.type_name(),
            stage: if self.has_extraction() {
                Stage::Derived
            } else {
                Stage::RawItems
            },
        }
    }
}

/// Rearranges `items` so position `i` holds what was at `order[i]`.
fn apply_order<T>(items: &mut [T], order: &[usize]) {
    let mut placed = vec![false; items.len()];
    for start in 0..items.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let next = order[current];
            if next == start {
                break;
            }
            items.swap(current, next);
            current = next;
        }
    }
}
