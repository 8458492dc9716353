use crate::types::Value;

/// What a single column of a [`Condition`] must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `col = <value>`; a `Null` value compiles to `col IS NULL`.
    Equals(Value),
    /// `col <operator> <value>`, e.g. `(">", 30)` or `("LIKE", "a%")`.
    Compare(String, Value),
    /// `col <operator> (<v1>,<v2>,...)`, the operator being `in` or `not in`.
    In(String, Vec<Value>),
}

impl Predicate {
    pub fn equals(value: impl Into<Value>) -> Self {
        Predicate::Equals(value.into())
    }

    pub fn compare(operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate::Compare(operator.into(), value.into())
    }

    pub fn is_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::In("in".to_owned(), values.into_iter().map(Into::into).collect())
    }

    pub fn not_in<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Predicate::In("not in".to_owned(), values.into_iter().map(Into::into).collect())
    }
}

/// Ordered column → [`Predicate`] mapping, compiled to a `WHERE` clause whose
/// terms are joined with `AND`.
///
/// Terms compile in insertion order; adding a column twice replaces the first
/// predicate in place.
///
/// ```rust
/// use syncopate::prelude::*;
/// use syncopate::query_builder::compile_condition;
///
/// let condition = Condition::new()
///     .equals("name", "O'Brien")
///     .compare("age", ">", 30)
///     .is_in("status", ["a", "b"]);
/// assert_eq!(
///     compile_condition(Some(&condition)).unwrap(),
///     " WHERE name = 'O''Brien' AND age > 30 AND status in ('a','b')"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    terms: Vec<(String, Predicate)>,
}

impl Condition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, predicate: Predicate) -> Self {
        self.insert(column, predicate);
        self
    }

    #[must_use]
    pub fn equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(column, Predicate::equals(value))
    }

    #[must_use]
    pub fn compare(
        self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.with(column, Predicate::compare(operator, value))
    }

    #[must_use]
    pub fn is_in<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(column, Predicate::is_in(values))
    }

    #[must_use]
    pub fn not_in<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(column, Predicate::not_in(values))
    }

    pub fn insert(&mut self, column: impl Into<String>, predicate: Predicate) -> Option<Predicate> {
        let column = column.into();
        if let Some(slot) = self.terms.iter_mut().find(|(name, _)| *name == column) {
            Some(std::mem::replace(&mut slot.1, predicate))
        } else {
            self.terms.push((column, predicate));
            None
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.terms.iter().map(|(name, predicate)| (name.as_str(), predicate))
    }
}

impl<K: Into<String>> FromIterator<(K, Predicate)> for Condition {
    fn from_iter<I: IntoIterator<Item = (K, Predicate)>>(iter: I) -> Self {
        let mut condition = Condition::new();
        for (column, predicate) in iter {
            condition.insert(column, predicate);
        }
        condition
    }
}
