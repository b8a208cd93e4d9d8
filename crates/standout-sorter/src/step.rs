//! Pipeline steps.
//!
//! A [`Step`] is one immutable instruction: extract by path, extract by
//! call, fold case, or set the ordering configuration. Extraction and case
//! folding never fail; anything an item cannot answer degrades to the
//! item's generic string form.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::StepError;
use crate::ordering::{Dir, Nils};
use crate::traits::{Args, Extract};
use crate::value::{Key, Value};

/// Case folding applied by a fold step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    /// Fold to upper case.
    Upper,
    /// Fold to lower case.
    Lower,
}

impl Case {
    /// Folds `text` to this case.
    pub fn fold(self, text: &str) -> String {
        match self {
            Case::Upper => text.to_uppercase(),
            Case::Lower => text.to_lowercase(),
        }
    }

    /// Returns the display name of this case.
    pub fn as_str(self) -> &'static str {
        match self {
            Case::Upper => "upper",
            Case::Lower => "lower",
        }
    }
}

/// A single pipeline instruction.
///
/// `Dig`, `Call` and `Fold` shape the value each item is compared by and
/// run in pipeline order. `Nils` and `Direction` configure the final
/// ordering; a pipeline keeps only the last one of each.
///
/// # Example
///
/// ```
/// use standout_sorter::{Key, Step, Value};
///
/// let step = Step::dig([Key::sym("user"), Key::sym("name")], false).unwrap();
/// let item = Value::map([(
///     Key::sym("user"),
///     Value::map([(Key::sym("name"), "Ada")]),
/// )]);
/// assert_eq!(step.perform(&item), Value::from("Ada"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Walk a path of keys, falling back to calls for named segments.
    Dig {
        /// Segments applied left to right.
        path: Vec<Key>,
        /// Treat textual and symbolic keys as the same.
        indifferent: bool,
    },
    /// Invoke a named operation with arguments.
    Call {
        /// Operation name.
        name: String,
        /// Arguments passed to the operation.
        args: Args,
    },
    /// Fold text to one case.
    Fold(Case),
    /// Set nil placement.
    Nils(Nils),
    /// Set direction.
    Direction(Dir),
}

/// How one path segment resolved against an operand.
enum Resolution {
    Keyed(Value),
    Called(Value),
    Unresolved,
}

impl Step {
    /// Creates a path extraction step.
    ///
    /// Returns an error if `path` is empty.
    pub fn dig<K: Into<Key>>(
        path: impl IntoIterator<Item = K>,
        indifferent: bool,
    ) -> Result<Step, StepError> {
        let path: Vec<Key> = path.into_iter().map(Into::into).collect();
        if path.is_empty() {
            return Err(StepError::EmptyPath);
        }
        Ok(Step::Dig { path, indifferent })
    }

    /// Creates a call extraction step.
    ///
    /// Returns an error if `name` is empty.
    pub fn call(name: impl Into<String>, args: Args) -> Result<Step, StepError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StepError::EmptyMethodName);
        }
        Ok(Step::Call { name, args })
    }

    /// Returns `true` for steps that shape the compared value.
    pub fn is_shaping(&self) -> bool {
        matches!(self, Step::Dig { .. } | Step::Call { .. } | Step::Fold(_))
    }

    /// Returns `true` for extraction steps.
    pub fn is_extraction(&self) -> bool {
        matches!(self, Step::Dig { .. } | Step::Call { .. })
    }

    /// Applies this step to one operand.
    ///
    /// Ordering-configuration steps pass the operand's value through.
    pub fn perform(&self, source: &dyn Extract) -> Value {
        match self {
            Step::Dig { path, indifferent } => dig(source, path, *indifferent),
            Step::Call { name, args } => call(source, name, args),
            Step::Fold(case) => fold(source, *case),
            Step::Nils(_) | Step::Direction(_) => source.to_value(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Dig { path, indifferent } => {
                let segments: Vec<String> = path.iter().map(Key::inspect).collect();
                write!(f, "dig({})", segments.join(", "))?;
                if *indifferent {
                    write!(f, " indifferent")?;
                }
                Ok(())
            }
            Step::Call { name, args } if args.is_empty() => write!(f, "call({name})"),
            Step::Call { name, args } => {
                let mut parts: Vec<String> = args.positional.iter().map(Value::inspect).collect();
                parts.extend(
                    args.keyword
                        .iter()
                        .map(|(k, v)| format!("{k}: {}", v.inspect())),
                );
                write!(f, "call({name}, {})", parts.join(", "))
            }
            Step::Fold(case) => write!(f, "fold({})", case.as_str()),
            Step::Nils(nils) => write!(f, "{nils}"),
            Step::Direction(dir) => write!(f, "{dir}"),
        }
    }
}

fn resolve(source: &dyn Extract, key: &Key, indifferent: bool) -> Resolution {
    let fetched = if indifferent {
        source.fetch_indifferent(key)
    } else {
        source.fetch(key)
    };
    if let Some(value) = fetched {
        return Resolution::Keyed(value);
    }

    match key
        .name()
        .and_then(|name| source.call(name, &Args::default()))
    {
        Some(value) => Resolution::Called(value),
        None => Resolution::Unresolved,
    }
}

fn dig(source: &dyn Extract, path: &[Key], indifferent: bool) -> Value {
    if source.is_nil() {
        return Value::Nil;
    }

    let mut current: Option<Value> = None;
    for key in path {
        let resolution = match &current {
            None => resolve(source, key, indifferent),
            Some(value) if value.is_nil() => return Value::Nil,
            Some(value) => resolve(value, key, indifferent),
        };

        match resolution {
            Resolution::Keyed(value) => current = Some(value),
            Resolution::Called(value) => {
                trace!("segment {} resolved by call", key.inspect());
                current = Some(value);
            }
            Resolution::Unresolved => {
                trace!(
                    "segment {} unresolved, falling back to string form",
                    key.inspect()
                );
                return fallback(source);
            }
        }
    }

    current.unwrap_or_else(|| source.to_value())
}

fn call(source: &dyn Extract, name: &str, args: &Args) -> Value {
    if source.is_nil() {
        return Value::Nil;
    }

    source.call(name, args).unwrap_or_else(|| {
        trace!("call {name} unsupported, falling back to string form");
        fallback(source)
    })
}

fn fold(source: &dyn Extract, case: Case) -> Value {
    match source.to_value() {
        Value::Nil => Value::Nil,
        Value::Str(s) => Value::Str(case.fold(&s)),
        Value::Sym(s) => Value::Sym(case.fold(&s)),
        _ => Value::Str(case.fold(&source.to_text())),
    }
}

fn fallback(source: &dyn Extract) -> Value {
    Value::Str(source.to_text())
}
