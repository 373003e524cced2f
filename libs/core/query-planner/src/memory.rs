//! In-memory record store.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::Value;

use crate::filter::FilterSpec;
use crate::sort::{SortDirection, SortSpec};
use crate::store::{QueryPlan, Record, RecordStore, StoreError};

/// Evaluates query plans over a snapshot of JSON records.
///
/// Used for derived collections that are computed per request and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<Record>,
}

impl MemoryRecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    fn matching<'a>(&'a self, filter: &'a FilterSpec) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| filter.matches(r))
    }
}

impl FromIterator<Record> for MemoryRecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn count(&self, filter: &FilterSpec) -> Result<u64, StoreError> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn find(&self, plan: &QueryPlan) -> Result<Vec<Record>, StoreError> {
        let mut matched: Vec<&Record> = self.matching(&plan.filter).collect();
        // sort_by is stable, so records equal on every key keep insertion order
        matched.sort_by(|a, b| compare_records(a, b, &plan.sort));

        let skip = usize::try_from(plan.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(plan.limit).unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|r| plan.projection.apply(r.clone()))
            .collect())
    }
}

fn compare_records(a: &Record, b: &Record, sort: &SortSpec) -> Ordering {
    for key in sort.keys() {
        let ordering = compare_values(a.get(&key.field), b.get(&key.field));
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing < null < bool < number < string < array < object
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => {
            let type_order = |v: &Value| -> u8 {
                match v {
                    Value::Null => 0,
                    Value::Bool(_) => 1,
                    Value::Number(_) => 2,
                    Value::String(_) => 3,
                    Value::Array(_) => 4,
                    Value::Object(_) => 5,
                }
            };

            match (a_val, b_val) {
                (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
                (Value::Number(x), Value::Number(y)) => {
                    let x = x.as_f64().unwrap_or(0.0);
                    let y = y.as_f64().unwrap_or(0.0);
                    x.total_cmp(&y)
                }
                (Value::String(x), Value::String(y)) => x.cmp(y),
                _ => type_order(a_val).cmp(&type_order(b_val)),
            }
        }
    }
}
