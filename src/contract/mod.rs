//! Contract suites for the departments, users and website-links API.
//!
//! A [`Suite`] groups named [`Case`]s per endpoint. Cases issue requests
//! through the shared [`SuiteContext`] and check responses with the
//! [`expect`] helpers.

pub mod departments;
pub mod expect;
pub mod suite;
pub mod users;
pub mod website_links;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::AppError;

pub use expect::AssertionError;
pub use suite::{Case, CaseFn, CaseFuture, Group, Suite, SuiteContext};

/// Selectable suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SuiteKind {
    Departments,
    WebsiteLinks,
    Users,
    All,
}

impl SuiteKind {
    /// Build the suites this selection stands for.
    pub fn suites(self) -> Vec<Suite> {
        match self {
            Self::Departments => vec![departments::suite()],
            Self::WebsiteLinks => vec![website_links::suite()],
            Self::Users => vec![users::suite()],
            Self::All => all_suites(),
        }
    }
}

impl fmt::Display for SuiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Departments => "departments",
            Self::WebsiteLinks => "website-links",
            Self::Users => "users",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

impl FromStr for SuiteKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| AppError::UnknownSuite(s.to_string()))
    }
}

/// Every registered suite.
pub fn all_suites() -> Vec<Suite> {
    vec![departments::suite(), website_links::suite(), users::suite()]
}

/// Resolve a selection into suites, dropping duplicates while keeping order.
pub fn select(kinds: &[SuiteKind]) -> Vec<Suite> {
    if kinds.is_empty() {
        return all_suites();
    }
    let mut selected: Vec<Suite> = Vec::new();
    for suite in kinds.iter().flat_map(|kind| kind.suites()) {
        if !selected.iter().any(|s| s.name == suite.name) {
            selected.push(suite);
        }
    }
    selected
}
