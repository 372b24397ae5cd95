//! Row sorting for store reads
//!
//! Sorts joined rows by an ordered list of keys. The sort is stable, so rows
//! tied on every key keep their storage order.

use std::cmp::Ordering;

use crate::model::MemberWithTeam;
use crate::query::{NullsOrder, SortDirection, SortKey, Value};

use super::evaluator::ConditionEvaluator;

/// Sorts joined rows
pub struct RowSorter;

impl RowSorter {
    /// Sorts rows according to `keys`, first key most significant.
    pub fn sort(rows: &mut [MemberWithTeam], keys: &[SortKey]) {
        if keys.is_empty() {
            return;
        }
        rows.sort_by(|a, b| Self::compare_rows(a, b, keys));
    }

    fn compare_rows(a: &MemberWithTeam, b: &MemberWithTeam, keys: &[SortKey]) -> Ordering {
        for key in keys {
            let a_val = ConditionEvaluator::row_value(a, key.field);
            let b_val = ConditionEvaluator::row_value(b, key.field);

            let ordering = Self::compare_values(a_val.as_ref(), b_val.as_ref(), key);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Compares two values under one key.
    ///
    /// Absent values are placed by `key.nulls` regardless of direction.
    fn compare_values(a: Option<&Value>, b: Option<&Value>, key: &SortKey) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match key.nulls {
                NullsOrder::First => Ordering::Less,
                NullsOrder::Last => Ordering::Greater,
            },
            (Some(_), None) => match key.nulls {
                NullsOrder::First => Ordering::Greater,
                NullsOrder::Last => Ordering::Less,
            },
            (Some(a_val), Some(b_val)) => {
                let ordering = a_val.compare(b_val).unwrap_or(Ordering::Equal);
                match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}
