use serde::Serialize;
use std::{collections::HashSet, ops};

use crate::Report;

/// Represents the list of reports.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Reports {
    pub reports: Vec<Report>,
}

impl Reports {
    /// Gets the identifiers of the letters reported by the given
    /// reader.
    pub fn excluded_for(&self, self_id: &str) -> HashSet<String> {
        excluded_for(self_id, self)
    }
}

/// Collects the identifiers of the letters reported by `self_id`.
/// The result is meant to be given to the mailbox projection, so
/// that reported letters never show up again for their reporter.
pub fn excluded_for(self_id: &str, reports: &[Report]) -> HashSet<String> {
    reports
        .iter()
        .filter(|report| report.is_from(self_id))
        .map(|report| report.letter_id.clone())
        .collect()
}

impl ops::Deref for Reports {
    type Target = Vec<Report>;

    fn deref(&self) -> &Self::Target {
        &self.reports
    }
}

impl ops::DerefMut for Reports {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reports
    }
}

impl From<Vec<Report>> for Reports {
    fn from(reports: Vec<Report>) -> Self {
        Self { reports }
    }
}

impl FromIterator<Report> for Reports {
    fn from_iter<T: IntoIterator<Item = Report>>(iter: T) -> Self {
        Self {
            reports: iter.into_iter().collect(),
        }
    }
}
