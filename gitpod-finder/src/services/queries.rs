use serde_json::{json, Value};

// Only the first page is ever fetched
pub const PAGE_SIZE: u32 = 100;

const ORGANIZATIONS_QUERY: &str = r#"
query Organizations($first: Int!) {
    organizations(first: $first) {
        nodes {
            name
        }
    }
}
"#;

const ORGANIZATION_REPOSITORIES_QUERY: &str = r#"
query OrganizationRepositories($name: String!, $first: Int!) {
    organization(name: $name) {
        repositories(first: $first) {
            nodes {
                name
            }
        }
    }
}
"#;

const REPOSITORY_FILE_QUERY: &str = r#"
query RepositoryFile($name: String!, $file: String!) {
    repository(name: $name) {
        file(name: $file) {
            isDirectory
        }
    }
}
"#;

/// A query plus its variables; `to_body` gives the POST payload.
#[derive(Debug, Clone)]
pub struct GraphQLRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: Value,
}

impl GraphQLRequest {
    pub fn to_body(&self) -> Value {
        json!({
            "query": self.query,
            "operationName": self.operation_name,
            "variables": self.variables,
        })
    }
}

pub fn organizations() -> GraphQLRequest {
    GraphQLRequest {
        query: ORGANIZATIONS_QUERY,
        operation_name: "Organizations",
        variables: json!({ "first": PAGE_SIZE }),
    }
}

pub fn organization_repositories(org_name: &str) -> GraphQLRequest {
    GraphQLRequest {
        query: ORGANIZATION_REPOSITORIES_QUERY,
        operation_name: "OrganizationRepositories",
        variables: json!({ "name": org_name, "first": PAGE_SIZE }),
    }
}

pub fn repository_file(repo_name: &str, file_name: &str) -> GraphQLRequest {
    GraphQLRequest {
        query: REPOSITORY_FILE_QUERY,
        operation_name: "RepositoryFile",
        variables: json!({ "name": repo_name, "file": file_name }),
    }
}
