//! Filter and sort pipeline over discovered descriptors.
//!
//! Filters are AND-combined in a fixed order: activity, parent application,
//! keyword. The package-name filter is pushed down into the scan so packages
//! that do not match are never loaded.

use crate::descriptor::ApplicationDescriptor;
use crate::discovery::Scanner;
use crate::parent::ParentApplication;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub parent_application: Option<ParentApplication>,
    pub package_name: Option<String>,
    /// Matched verbatim: exact membership in `keywords`, substring of the
    /// lower-cased name. Callers lower-case it when they want
    /// case-insensitive search.
    pub keyword: Option<String>,
    pub include_inactive: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent_application(mut self, parent: ParentApplication) -> Self {
        self.parent_application = Some(parent);
        self
    }

    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn include_inactive(mut self, yes: bool) -> Self {
        self.include_inactive = yes;
        self
    }

    /// Whether `desc` passes the activity, parent and keyword filters.
    pub fn matches(&self, desc: &ApplicationDescriptor) -> bool {
        if !self.include_inactive && !desc.is_active() {
            return false;
        }

        if let Some(parent) = self.parent_application {
            if !parent.admits(desc.parent_applications()) {
                return false;
            }
        }

        if let Some(keyword) = non_empty(self.keyword.as_deref()) {
            let tagged = desc.keywords().iter().any(|k| k == keyword);
            if !tagged && !desc.name().to_lowercase().contains(keyword) {
                return false;
            }
        }

        true
    }

    /// Filter `candidates` and order survivors by name (case-sensitive).
    pub fn apply(&self, candidates: Vec<ApplicationDescriptor>) -> Vec<ApplicationDescriptor> {
        let mut kept: Vec<ApplicationDescriptor> = candidates
            .into_iter()
            .filter(|desc| self.matches(desc))
            .collect();
        kept.sort_by(|a, b| a.name().cmp(b.name()));
        kept
    }

    /// Scan with the package filter pushed down, then filter and sort.
    pub fn run(&self, scanner: &Scanner) -> Vec<ApplicationDescriptor> {
        let package = non_empty(self.package_name.as_deref());
        self.apply(scanner.scan(package))
    }
}

/// Ordered applications matching `query`.
pub fn query(scanner: &Scanner, query: &Query) -> Vec<ApplicationDescriptor> {
    query.run(scanner)
}

// Empty strings behave like "no filter", as the CLI defaults are empty.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
