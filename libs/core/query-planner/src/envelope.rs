use serde::{Deserialize, Serialize};

use crate::pagination::PaginationSpec;
use crate::store::Record;

/// One page of results together with page metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<T = Record> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> ResultEnvelope<T> {
    pub fn new(results: Vec<T>, pagination: PaginationSpec, total_results: u64) -> Self {
        Self {
            results,
            page: pagination.page(),
            limit: pagination.limit(),
            total_pages: pagination.total_pages(total_results),
            total_results,
        }
    }

    /// Convert the results while keeping the page metadata
    pub fn map<U, F>(self, f: F) -> ResultEnvelope<U>
    where
        F: FnMut(T) -> U,
    {
        ResultEnvelope {
            results: self.results.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }

    /// Convert the results, failing on the first conversion error
    pub fn try_map<U, E, F>(self, f: F) -> Result<ResultEnvelope<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(ResultEnvelope {
            results: self.results.into_iter().map(f).collect::<Result<_, _>>()?,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_results: self.total_results,
        })
    }
}
