use model::sourcegraph::{
    FilePresence, GraphQLResponse, Organization, OrganizationRepositoriesData, OrganizationsData,
    Repository, RepositoryFileData,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::services::queries::{self, GraphQLRequest};
use crate::services::transport::Transport;

// Sourcegraph GraphQL API client
pub struct SourcegraphClient<'a, T> {
    config: &'a Config,
    transport: T,
}

impl<'a, T: Transport> SourcegraphClient<'a, T> {
    pub fn new(config: &'a Config, transport: T) -> Self {
        SourcegraphClient { config, transport }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Send one request and decode its `data` into `D`.
    ///
    /// The first failure is returned as is: a transport error, a non-200
    /// status (with the raw body), an undecodable body, or a non-empty
    /// `errors` array. Nothing is retried. A response without `data` and
    /// without errors decodes to `D::default()`.
    pub async fn execute<D>(&self, request: &GraphQLRequest) -> Result<D, ApiError>
    where
        D: DeserializeOwned + Default,
    {
        debug!(
            "executing {} with variables {}",
            request.operation_name, request.variables
        );
        let reply = self
            .transport
            .post_json(self.config.endpoint(), self.config.token(), &request.to_body())
            .await?;

        if reply.status != 200 {
            return Err(ApiError::Status {
                code: reply.status,
                body: reply.body,
            });
        }

        // `errors` is checked before `data` is shaped, a partially nulled
        // `data` must not hide the messages
        let response: GraphQLResponse<Value> = serde_json::from_str(&reply.body)?;
        let errors = response.error_messages();
        if !errors.is_empty() {
            return Err(ApiError::GraphQL(errors));
        }
        match response.data {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Ok(D::default()),
        }
    }

    pub async fn list_organizations(&self) -> Result<Vec<Organization>, ApiError> {
        let data: OrganizationsData = self.execute(&queries::organizations()).await?;
        Ok(data.organizations.nodes)
    }

    pub async fn list_repositories(&self, org_name: &str) -> Result<Vec<Repository>, ApiError> {
        let data: OrganizationRepositoriesData = self
            .execute(&queries::organization_repositories(org_name))
            .await?;
        Ok(data.into_repositories())
    }

    pub async fn file_presence(
        &self,
        repo_name: &str,
        file_name: &str,
    ) -> Result<FilePresence, ApiError> {
        let data: RepositoryFileData = self
            .execute(&queries::repository_file(repo_name, file_name))
            .await?;
        Ok(data.presence())
    }

    /// True unless the path is reported as a directory. An absent file field
    /// also counts as found.
    pub async fn has_file(&self, repo_name: &str, file_name: &str) -> Result<bool, ApiError> {
        let presence = self.file_presence(repo_name, file_name).await?;
        if presence == FilePresence::Absent {
            debug!("{}: no file field for {}, treating as present", repo_name, file_name);
        }
        Ok(presence != FilePresence::Directory)
    }
}
