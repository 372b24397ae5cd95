//! Condition AST
//!
//! Defines the predicate and condition types evaluated by the store.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Columns reachable from a member row joined to its team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl Field {
    /// Returns true if the field lives on the team side of the join
    pub fn is_team_field(&self) -> bool {
        matches!(self, Field::TeamId | Field::TeamName)
    }

    /// Returns true if reading the field needs the team row resolved.
    ///
    /// The team id is carried on the member row itself.
    pub fn requires_join(&self) -> bool {
        matches!(self, Field::TeamName)
    }

    /// External field name (query strings, sort specs)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::MemberId => "memberId",
            Field::Username => "username",
            Field::Age => "age",
            Field::TeamId => "teamId",
            Field::TeamName => "teamName",
        }
    }

    /// Parses an external field name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "memberId" => Some(Field::MemberId),
            "username" => Some(Field::Username),
            "age" => Some(Field::Age),
            "teamId" => Some(Field::TeamId),
            "teamName" => Some(Field::TeamName),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed scalar value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl Value {
    /// Compares two values of the same kind.
    ///
    /// Returns `None` for mismatched kinds; callers treat that as "no match".
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Int(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "'{}'", v),
        }
    }
}

/// Comparison operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// field = value
    Eq(Value),
    /// field > value
    Gt(Value),
    /// field >= value
    Gte(Value),
    /// field < value
    Lt(Value),
    /// field <= value
    Lte(Value),
}

impl FilterOp {
    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }

    /// Returns true if this is a range operation
    pub fn is_range(&self) -> bool {
        !self.is_equality()
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Gt(_) => "gt",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lt(_) => "lt",
            FilterOp::Lte(_) => "lte",
        }
    }

    pub fn operand(&self) -> &Value {
        match self {
            FilterOp::Eq(v)
            | FilterOp::Gt(v)
            | FilterOp::Gte(v)
            | FilterOp::Lt(v)
            | FilterOp::Lte(v) => v,
        }
    }

    /// Tests an actual value against this operation.
    ///
    /// Kind mismatches never match.
    pub fn test(&self, actual: &Value) -> bool {
        let ordering = match actual.compare(self.operand()) {
            Some(o) => o,
            None => return false,
        };

        match self {
            FilterOp::Eq(_) => ordering == Ordering::Equal,
            FilterOp::Gt(_) => ordering == Ordering::Greater,
            FilterOp::Gte(_) => ordering != Ordering::Less,
            FilterOp::Lt(_) => ordering == Ordering::Less,
            FilterOp::Lte(_) => ordering != Ordering::Greater,
        }
    }
}

/// A single atomic condition (field + operation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: Field,
    pub op: FilterOp,
}

impl Predicate {
    pub fn new(field: Field, op: FilterOp) -> Self {
        Self { field, op }
    }

    pub fn eq(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq(value.into()))
    }

    pub fn gt(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gt(value.into()))
    }

    pub fn gte(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gte(value.into()))
    }

    pub fn lt(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lt(value.into()))
    }

    pub fn lte(field: Field, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lte(value.into()))
    }

    /// Evaluates against a possibly absent field value.
    ///
    /// Absent values never match.
    pub fn matches(&self, actual: Option<&Value>) -> bool {
        match actual {
            Some(v) => self.op.test(v),
            None => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.op_name(), self.op.operand())
    }
}

/// An ordered conjunction of predicates.
///
/// The empty condition matches every row and is the identity of `and`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    predicates: Vec<Predicate>,
}

impl Condition {
    /// The "no constraint" condition
    pub fn all() -> Self {
        Self::default()
    }

    /// A condition made of a single predicate
    pub fn single(predicate: Predicate) -> Self {
        Self {
            predicates: vec![predicate],
        }
    }

    /// Builds a condition from predicates, keeping their order
    pub fn from_predicates(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Conjunction; `all()` on either side leaves the other unchanged
    pub fn and(mut self, other: Condition) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    /// Adds one predicate to the conjunction
    pub fn and_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Returns true if this condition places no constraint on rows
    pub fn is_unconstrained(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns true if any predicate reads a team-side column
    pub fn references_team(&self) -> bool {
        self.predicates.iter().any(|p| p.field.is_team_field())
    }

    /// Returns true if evaluating this condition needs the team row resolved
    pub fn requires_join(&self) -> bool {
        self.predicates.iter().any(|p| p.field.requires_join())
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluates every predicate against a field accessor
    pub fn matches<F>(&self, mut lookup: F) -> bool
    where
        F: FnMut(Field) -> Option<Value>,
    {
        self.predicates
            .iter()
            .all(|p| p.matches(lookup(p.field).as_ref()))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.predicates.is_empty() {
            return f.write_str("TRUE");
        }
        for (i, pred) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{}", pred)?;
        }
        Ok(())
    }
}

/// How the team relation is resolved on a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    /// Members without a team are dropped
    Inner,
    /// Members without a team are kept with absent team fields
    #[default]
    Left,
}
