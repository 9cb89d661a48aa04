use serde::{Deserialize, Deserializer, Serialize};

// GraphQL nulls out a field it failed to resolve; read that as the zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Organization node
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
}

// Repository node
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
}

/// A GraphQL list wrapper, only the `nodes` field is requested.
#[derive(Debug, Deserialize, Clone)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Connection { nodes: Vec::new() }
    }
}

/// Response envelope shared by every query. Only the shape of `data` differs.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.clone())
            .collect()
    }
}

// Entry of the `errors` array; locations/path/extensions are ignored
#[derive(Debug, Deserialize, Clone)]
pub struct GraphQLError {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

// organizations(first: 100) { nodes { name } }
#[derive(Debug, Deserialize, Default)]
pub struct OrganizationsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub organizations: Connection<Organization>,
}

// organization(name: $name) { repositories(first: 100) { nodes { name } } }
#[derive(Debug, Deserialize, Default)]
pub struct OrganizationRepositoriesData {
    pub organization: Option<OrganizationRepositories>,
}

#[derive(Debug, Deserialize, Default)]
pub struct OrganizationRepositories {
    #[serde(default, deserialize_with = "null_as_default")]
    pub repositories: Connection<Repository>,
}

impl OrganizationRepositoriesData {
    pub fn into_repositories(self) -> Vec<Repository> {
        self.organization
            .map(|org| org.repositories.nodes)
            .unwrap_or_default()
    }
}

// repository(name: $name) { file(name: $file) { isDirectory } }
#[derive(Debug, Deserialize, Default)]
pub struct RepositoryFileData {
    pub repository: Option<RepositoryFile>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RepositoryFile {
    pub file: Option<FileEntry>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_directory: bool,
}

/// What a file query actually told us about the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePresence {
    File,
    Directory,
    /// Neither the repository nor the file field came back.
    Absent,
}

impl RepositoryFileData {
    pub fn presence(&self) -> FilePresence {
        match self.repository.as_ref().and_then(|repo| repo.file) {
            Some(FileEntry { is_directory: true }) => FilePresence::Directory,
            Some(FileEntry {
                is_directory: false,
            }) => FilePresence::File,
            None => FilePresence::Absent,
        }
    }
}
