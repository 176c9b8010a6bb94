//! Repository fixtures.
//!
//! A fixture is a TOML description of one repository:
//!
//! ```toml
//! id = "demo"
//! default_branch = "main"
//!
//! [[commits]]
//! id = "a1b2c3d4e5f6a7b8"
//! message = ""
//!
//! [[commits]]
//! id = "b2c3d4e5f6a7b8c9"
//! message = "Add readme"
//! parents = ["a1b2c3d4e5f6a7b8"]
//!
//! [branches]
//! main = "b2c3d4e5f6a7b8c9"
//!
//! [tags]
//! "v0.1.0" = "a1b2c3d4e5f6a7b8"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use refsel_types::{Commit, RepositoryContext};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ProviderError, ProviderResult};
use crate::memory::InMemoryRepositoryStore;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFixture {
    pub id: String,
    pub default_branch: String,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub branches: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl RepositoryFixture {
    pub fn from_toml_str(input: &str) -> ProviderResult<Self> {
        toml::from_str(input).map_err(|e| ProviderError::Fixture(e.to_string()))
    }

    pub fn load(path: &Path) -> ProviderResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    /// Load this fixture into `store` and return the repository context a
    /// caller would hand to a dropdown.
    ///
    /// Fails if any branch or tag points at a commit the fixture does not
    /// define.
    pub fn install(&self, store: &InMemoryRepositoryStore) -> ProviderResult<RepositoryContext> {
        store.insert_repository(&self.id, &self.default_branch)?;
        for commit in &self.commits {
            store.add_commit(&self.id, commit.clone())?;
        }
        for (name, commit) in &self.branches {
            store
                .set_branch(&self.id, name, commit)
                .map_err(|e| ProviderError::Fixture(format!("branch {name}: {e}")))?;
        }
        for (name, commit) in &self.tags {
            store
                .set_tag(&self.id, name, commit)
                .map_err(|e| ProviderError::Fixture(format!("tag {name}: {e}")))?;
        }
        info!(
            repository = %self.id,
            commits = self.commits.len(),
            branches = self.branches.len(),
            tags = self.tags.len(),
            "fixture installed"
        );
        Ok(RepositoryContext::new(&self.id, &self.default_branch))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::traits::CommitProvider;

    const DEMO: &str = r#"
id = "demo"
default_branch = "main"

[[commits]]
id = "a1b2c3d4e5f6a7b8"
message = ""

[[commits]]
id = "b2c3d4e5f6a7b8c9"
message = "Add readme"
parents = ["a1b2c3d4e5f6a7b8"]

[branches]
main = "b2c3d4e5f6a7b8c9"
dev = "a1b2c3d4e5f6a7b8"

[tags]
"v0.1.0" = "a1b2c3d4e5f6a7b8"
"#;

    #[test]
    fn parse_fixture() {
        let fixture = RepositoryFixture::from_toml_str(DEMO).unwrap();
        assert_eq!(fixture.id, "demo");
        assert_eq!(fixture.commits.len(), 2);
        assert_eq!(fixture.commits[1].first_parent(), Some("a1b2c3d4e5f6a7b8"));
        assert_eq!(fixture.branches.len(), 2);
        assert_eq!(fixture.tags["v0.1.0"], "a1b2c3d4e5f6a7b8");
    }

    #[test]
    fn parse_error_is_fixture_error() {
        let err = RepositoryFixture::from_toml_str("id = ").unwrap_err();
        assert!(matches!(err, ProviderError::Fixture(_)));
    }

    #[tokio::test]
    async fn install_into_store() {
        let fixture = RepositoryFixture::from_toml_str(DEMO).unwrap();
        let store = InMemoryRepositoryStore::new();
        let ctx = fixture.install(&store).unwrap();
        assert_eq!(ctx.ready_id(), Some("demo"));
        assert_eq!(ctx.default_branch, "main");

        let commits = store.list_commits("demo", "main").await.unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "Add readme");
    }

    #[test]
    fn install_rejects_dangling_branch() {
        let mut fixture = RepositoryFixture::from_toml_str(DEMO).unwrap();
        fixture.branches.insert("broken".into(), "ffff".into());
        let err = fixture.install(&InMemoryRepositoryStore::new()).unwrap_err();
        assert!(err.to_string().contains("branch broken"));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEMO.as_bytes()).unwrap();
        let fixture = RepositoryFixture::load(file.path()).unwrap();
        assert_eq!(fixture.default_branch, "main");
    }

    #[test]
    fn load_missing_file() {
        let err = RepositoryFixture::load(Path::new("/nonexistent/fixture.toml")).unwrap_err();
        assert!(matches!(err, ProviderError::Io(_)));
    }
}
