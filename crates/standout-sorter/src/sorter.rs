//! Fluent sort builder and terminals.
//!
//! The [`Sorter`] struct wraps a source slice and a [`Pipeline`], offering a
//! chainable builder API and terminal methods that run the sort.

use crate::error::{Result, SortError, StepError};
use crate::ordering::{Dir, Nils};
use crate::pipeline::Pipeline;
use crate::step::{Case, Step};
use crate::traits::{Args, Extract};
use crate::value::Key;

/// A sort under construction over a source collection.
///
/// Builder methods append steps or replace the ordering configuration and
/// return the sorter for chaining. Nothing is extracted or compared until a
/// terminal method runs.
///
/// A sorter over a shared slice (from [`Sorter::new`]) produces new
/// vectors; a sorter over a mutable slice (from [`Sorter::new_mut`]) sorts
/// the caller's slice in place.
///
/// # Example
///
/// ```
/// use standout_sorter::{Key, Sorter, Value};
///
/// let people = vec![
///     Value::map([(Key::sym("name"), Value::from("Charlie"))]),
///     Value::map([(Key::sym("name"), Value::Nil)]),
///     Value::map([(Key::sym("name"), Value::from("alice"))]),
/// ];
///
/// let sorted = Sorter::new(&people)
///     .dig([Key::sym("name")])
///     .case_insensitive()
///     .descending()
///     .sort()
///     .unwrap();
///
/// assert_eq!(sorted, vec![&people[0], &people[2], &people[1]]);
/// ```
#[derive(Debug)]
pub struct Sorter<S> {
    source: S,
    pipeline: Pipeline,
    invalid: Option<StepError>,
}

impl<S> Sorter<S> {
    fn from_source(source: S) -> Self {
        Sorter {
            source,
            pipeline: Pipeline::new(),
            invalid: None,
        }
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    /// Adds a step, keeping the first invalid-argument error for the
    /// terminal to report.
    pub fn step(mut self, step: std::result::Result<Step, StepError>) -> Self {
        match step {
            Ok(step) => self.pipeline.add(step),
            Err(err) => {
                if self.invalid.is_none() {
                    self.invalid = Some(err);
                }
            }
        }
        self
    }

    /// Extracts by walking `path` through each item.
    ///
    /// At each segment a keyed lookup is tried first, then a call named
    /// after the segment. If neither answers, the item's string form is
    /// used.
    pub fn dig<K: Into<Key>>(self, path: impl IntoIterator<Item = K>) -> Self {
        self.step(Step::dig(path, false))
    }

    /// Like [`Sorter::dig`], but textual and symbolic keys match each other.
    pub fn dig_indifferent<K: Into<Key>>(self, path: impl IntoIterator<Item = K>) -> Self {
        self.step(Step::dig(path, true))
    }

    /// Extracts a single key.
    pub fn key(self, key: impl Into<Key>) -> Self {
        self.dig([key])
    }

    /// Alias for [`Sorter::key`].
    pub fn field(self, key: impl Into<Key>) -> Self {
        self.key(key)
    }

    /// Extracts by calling `name` on each item with `args`.
    pub fn call(self, name: impl Into<String>, args: Args) -> Self {
        self.step(Step::call(name, args))
    }

    /// Extracts by calling `name` on each item with no arguments.
    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.call(name, Args::new())
    }

    // ========================================================================
    // Transformation
    // ========================================================================

    /// Folds the current value to upper case.
    pub fn upcase(self) -> Self {
        self.step(Ok(Step::Fold(Case::Upper)))
    }

    /// Folds the current value to lower case.
    pub fn downcase(self) -> Self {
        self.step(Ok(Step::Fold(Case::Lower)))
    }

    /// Alias for [`Sorter::downcase`].
    pub fn case_insensitive(self) -> Self {
        self.downcase()
    }

    /// Alias for [`Sorter::downcase`].
    pub fn insensitive(self) -> Self {
        self.downcase()
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts smallest first. This is the default.
    pub fn ascending(self) -> Self {
        self.step(Ok(Step::Direction(Dir::Asc)))
    }

    /// Sorts largest first. Nil placement is unaffected.
    pub fn descending(self) -> Self {
        self.step(Ok(Step::Direction(Dir::Desc)))
    }

    /// Places nil keys before every present key.
    pub fn nils_first(self) -> Self {
        self.step(Ok(Step::Nils(Nils::First)))
    }

    /// Places nil keys after every present key. This is the default.
    pub fn nils_last(self) -> Self {
        self.step(Ok(Step::Nils(Nils::Last)))
    }

    // ========================================================================
    // Pipeline access
    // ========================================================================

    /// Appends every step of `pipeline`, and adopts its direction and nil
    /// placement.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        let (dir, nils) = (pipeline.dir(), pipeline.nils());
        for step in pipeline.steps() {
            self.pipeline.add(step.clone());
        }
        self.pipeline.add(Step::Direction(dir));
        self.pipeline.add(Step::Nils(nils));
        self
    }

    /// Returns the pipeline built so far.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn checked(&self) -> Result<&Pipeline> {
        match &self.invalid {
            Some(err) => Err(SortError::InvalidStep(err.clone())),
            None => Ok(&self.pipeline),
        }
    }
}

impl<'a, T: Extract> Sorter<&'a [T]> {
    /// Creates a sorter over a shared slice.
    pub fn new(items: &'a [T]) -> Self {
        Sorter::from_source(items)
    }

    // ========================================================================
    // Terminals
    // ========================================================================

    /// Sorts into a new vector of references. The source is unchanged.
    ///
    /// Terminals on a shared sorter take `&self`; running one again gives
    /// the same result.
    pub fn sort(&self) -> Result<Vec<&'a T>> {
        self.checked()?.sort(self.source)
    }

    /// Sorts into a new vector of clones.
    pub fn sort_cloned(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        Ok(self.sort()?.into_iter().cloned().collect())
    }

    /// Switches to descending order, then sorts.
    pub fn reverse_sort(self) -> Result<Vec<&'a T>> {
        self.descending().sort()
    }

    // ========================================================================
    // Delegated accessors (each sorts first)
    // ========================================================================

    /// Returns the first item in sorted order.
    pub fn first(&self) -> Result<Option<&'a T>> {
        Ok(self.sort()?.first().copied())
    }

    /// Returns the first `n` items in sorted order.
    pub fn first_n(&self, n: usize) -> Result<Vec<&'a T>> {
        self.take(n)
    }

    /// Returns the last item in sorted order.
    pub fn last(&self) -> Result<Option<&'a T>> {
        Ok(self.sort()?.last().copied())
    }

    /// Returns the last `n` items in sorted order.
    pub fn last_n(&self, n: usize) -> Result<Vec<&'a T>> {
        let sorted = self.sort()?;
        let start = sorted.len().saturating_sub(n);
        Ok(sorted[start..].to_vec())
    }

    /// Returns up to `n` items from the front of the sorted order.
    pub fn take(&self, n: usize) -> Result<Vec<&'a T>> {
        let mut sorted = self.sort()?;
        sorted.truncate(n);
        Ok(sorted)
    }

    /// Returns the sorted order without its first `n` items.
    pub fn skip(&self, n: usize) -> Result<Vec<&'a T>> {
        let sorted = self.sort()?;
        Ok(sorted.into_iter().skip(n).collect())
    }

    /// Returns the item at `index` in sorted order.
    pub fn get(&self, index: usize) -> Result<Option<&'a T>> {
        Ok(self.sort()?.get(index).copied())
    }

    /// Returns the number of items, after checking they sort.
    pub fn count(&self) -> Result<usize> {
        Ok(self.sort()?.len())
    }

    /// Iterates over the items in sorted order.
    pub fn iter(&self) -> Result<std::vec::IntoIter<&'a T>> {
        Ok(self.sort()?.into_iter())
    }
}

impl<'a, T: Extract> Sorter<&'a mut [T]> {
    /// Creates a sorter that reorders `items` in place.
    ///
    /// The slice is exclusively borrowed until the terminal runs.
    pub fn new_mut(items: &'a mut [T]) -> Self {
        Sorter::from_source(items)
    }

    /// Sorts the source slice in place and hands it back.
    ///
    /// On error the slice keeps its original order.
    pub fn sort_in_place(self) -> Result<&'a mut [T]> {
        let Sorter {
            source,
            pipeline,
            invalid,
        } = self;
        if let Some(err) = invalid {
            return Err(SortError::InvalidStep(err));
        }
        pipeline.sort_in_place(&mut *source)?;
        Ok(source)
    }

    /// Switches to descending order, then sorts in place.
    pub fn reverse_sort_in_place(self) -> Result<&'a mut [T]> {
        self.descending().sort_in_place()
    }
}

/// Starts a [`Sorter`] from a slice.
///
/// ```
/// use standout_sorter::Sortable;
///
/// let mut words = vec!["pear", "Fig", "apple"];
/// words.sorter_mut().case_insensitive().sort_in_place().unwrap();
/// assert_eq!(words, ["apple", "Fig", "pear"]);
/// ```
pub trait Sortable<T> {
    /// Creates a sorter producing a new sorted vector.
    fn sorter(&self) -> Sorter<&[T]>;

    /// Creates a sorter that sorts in place.
    fn sorter_mut(&mut self) -> Sorter<&mut [T]>;
}

impl<T: Extract> Sortable<T> for [T] {
    fn sorter(&self) -> Sorter<&[T]> {
        Sorter::new(self)
    }

    fn sorter_mut(&mut self) -> Sorter<&mut [T]> {
        Sorter::new_mut(self)
    }
}
