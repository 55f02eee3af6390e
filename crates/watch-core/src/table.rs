//! Latest job snapshot per `(os, runtime version)` slot.

use std::collections::HashMap;

use travis_api::Job;

use crate::version::compare_versions;

/// One operating-system section of the table, versions in display order.
#[derive(Debug)]
pub struct Section<'a> {
    pub os: &'a str,
    pub jobs: Vec<(&'a str, &'a Job)>,
}

/// Mapping `os -> version -> latest Job`.
///
/// Sections are kept in a fixed order: the configured operating systems
/// first, then any other reported OS in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    order: Vec<String>,
    slots: HashMap<String, HashMap<String, Job>>,
}

impl ResultTable {
    pub fn new<S: AsRef<str>>(os_order: &[S]) -> Self {
        Self {
            order: os_order.iter().map(|s| s.as_ref().to_string()).collect(),
            slots: HashMap::new(),
        }
    }

    /// Store `job` in its slot, returning the snapshot it replaced.
    pub fn record(&mut self, job: Job) -> Option<Job> {
        let os = job.os().to_string();
        if !self.order.iter().any(|o| *o == os) {
            self.order.push(os.clone());
        }
        self.slots
            .entry(os)
            .or_default()
            .insert(job.runtime_version(), job)
    }

    pub fn get(&self, os: &str, version: &str) -> Option<&Job> {
        self.slots.get(os)?.get(version)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty sections in display order, versions sorted by precedence.
    pub fn sections(&self) -> Vec<Section<'_>> {
        self.order
            .iter()
            .filter_map(|os| {
                let versions = self.slots.get(os)?;
                if versions.is_empty() {
                    return None;
                }
                let mut jobs: Vec<(&str, &Job)> =
                    versions.iter().map(|(v, job)| (v.as_str(), job)).collect();
                jobs.sort_by(|(a, _), (b, _)| compare_versions(a, b));
                Some(Section {
                    os: os.as_str(),
                    jobs,
                })
            })
            .collect()
    }
}
