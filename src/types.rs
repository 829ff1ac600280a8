//! Request and response payloads

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Field name carrying the batch in a request
const TO_SORT: &str = "to_sort";

/// A batch of integer sequences to sort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RequestPayload {
    /// Sequences to sort; a missing or null key is an empty batch
    #[serde(default)]
    #[schema(example = json!([[3, 1, 2], [], [5]]))]
    pub to_sort: Vec<Vec<i64>>,
}

/// Sorted sequences plus the time spent sorting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResponsePayload {
    /// Sorted copies, positionally matching `to_sort`
    #[schema(example = json!([[1, 2, 3], [], [5]]))]
    pub sorted_arrays: Vec<Vec<i64>>,
    /// Wall-clock nanoseconds spent in the sort phase only
    pub time_ns: u64,
}

impl RequestPayload {
    pub fn new(to_sort: Vec<Vec<i64>>) -> Self {
        Self { to_sort }
    }

    /// Total number of integers across all sequences
    pub fn element_count(&self) -> usize {
        self.to_sort.iter().map(Vec::len).sum()
    }
}

// Keys match `to_sort` case-insensitively and the last matching key wins.
// `null` is accepted both for the outer list and for any inner sequence.
impl<'de> Deserialize<'de> for RequestPayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RequestPayloadVisitor)
    }
}

struct RequestPayloadVisitor;

impl<'de> Visitor<'de> for RequestPayloadVisitor {
    type Value = RequestPayload;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with a `{}` array of integer arrays", TO_SORT)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut to_sort = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if is_to_sort(&key) {
                let outer: Option<Vec<Option<Vec<i64>>>> = map.next_value()?;
                to_sort = outer
                    .unwrap_or_default()
                    .into_iter()
                    .map(Option::unwrap_or_default)
                    .collect();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(RequestPayload { to_sort })
    }
}

// Simple case folding; U+017F (long s) folds to 's'.
fn is_to_sort(key: &str) -> bool {
    key.chars().count() == TO_SORT.len()
        && key.chars().zip(TO_SORT.chars()).all(|(k, t)| {
            let k = if k == '\u{17F}' { 's' } else { k.to_ascii_lowercase() };
            k == t
        })
}
