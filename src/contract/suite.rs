//! Suite, group and case definitions.

use std::future::Future;
use std::pin::Pin;

use crate::client::ApiClient;
use crate::config::{AuthConfig, FixtureConfig};
use crate::error::Result;

/// Boxed future returned by a case body.
pub type CaseFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Case body or group setup hook.
pub type CaseFn = for<'a> fn(&'a mut SuiteContext) -> CaseFuture<'a>;

/// State shared by the cases of one suite run.
///
/// Cases run in declaration order, so later cases may rely on ids recorded by
/// earlier ones.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    pub client: ApiClient,
    pub auth: AuthConfig,
    pub fixtures: FixtureConfig,
    /// Root department created by the create group.
    pub created_id: Option<i64>,
    /// Leaf department created for the delete group.
    pub temp_id: Option<i64>,
}

impl SuiteContext {
    pub fn new(client: ApiClient, auth: AuthConfig, fixtures: FixtureConfig) -> Self {
        Self {
            client,
            auth,
            fixtures,
            created_id: None,
            temp_id: None,
        }
    }
}

/// A single named contract check.
#[derive(Clone, Copy)]
pub struct Case {
    pub id: &'static str,
    pub title: &'static str,
    pub run: CaseFn,
}

impl Case {
    pub const fn new(id: &'static str, title: &'static str, run: CaseFn) -> Self {
        Self { id, title, run }
    }
}

impl std::fmt::Debug for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Case").field("id", &self.id).field("title", &self.title).finish()
    }
}

/// Cases sharing one endpoint, with an optional setup hook run before them.
#[derive(Debug, Clone)]
pub struct Group {
    pub title: &'static str,
    pub setup: Option<Case>,
    pub cases: Vec<Case>,
}

impl Group {
    pub fn new(title: &'static str, cases: Vec<Case>) -> Self {
        Self {
            title,
            setup: None,
            cases,
        }
    }

    /// Run `setup` once before the group's cases.
    pub fn with_setup(mut self, setup: Case) -> Self {
        self.setup = Some(setup);
        self
    }
}

/// All checks for one resource group.
#[derive(Debug, Clone)]
pub struct Suite {
    pub name: &'static str,
    pub groups: Vec<Group>,
}

impl Suite {
    pub fn new(name: &'static str, groups: Vec<Group>) -> Self {
        Self { name, groups }
    }

    pub fn case_count(&self) -> usize {
        self.groups.iter().map(|g| g.cases.len()).sum()
    }

    /// Every case in declaration order, with its group title.
    pub fn cases(&self) -> impl Iterator<Item = (&'static str, &Case)> {
        self.groups
            .iter()
            .flat_map(|group| group.cases.iter().map(move |case| (group.title, case)))
    }
}
