//! Sort keys

use serde::{Deserialize, Serialize};

use super::ast::Field;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Placement of absent values, independent of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsOrder {
    First,
    #[default]
    Last,
}

impl NullsOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullsOrder::First => "nullsfirst",
            NullsOrder::Last => "nullslast",
        }
    }
}

/// One ordering key: field, direction and explicit nulls placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: Field,
    pub direction: SortDirection,
    #[serde(default)]
    pub nulls: NullsOrder,
}

impl SortKey {
    /// Ascending, nulls last
    pub fn asc(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
            nulls: NullsOrder::Last,
        }
    }

    /// Descending, nulls last
    pub fn desc(field: Field) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
            nulls: NullsOrder::Last,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullsOrder::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullsOrder::Last;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_defaults_to_nulls_last() {
        let asc = SortKey::asc(Field::Username);
        assert_eq!(asc.direction, SortDirection::Asc);
        assert_eq!(asc.nulls, NullsOrder::Last);

        let desc = SortKey::desc(Field::Age);
        assert_eq!(desc.direction, SortDirection::Desc);
        assert_eq!(desc.nulls, NullsOrder::Last);
    }

    #[test]
    fn test_nulls_first_override() {
        let key = SortKey::asc(Field::Username).nulls_first();
        assert_eq!(key.nulls, NullsOrder::First);
        assert_eq!(key.nulls_last().nulls, NullsOrder::Last);
    }
}
