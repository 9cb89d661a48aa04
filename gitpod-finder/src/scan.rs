use std::io::Write;

use tracing::{info, warn};

use crate::error::ScanError;
use crate::services::sourcegraph_api::SourcegraphClient;
use crate::services::transport::Transport;

/// Walk organizations, then their repositories, and print every repository
/// that has the configured file at its root.
///
/// Only the organization fetch is fatal. A failed repository listing or file
/// check is reported on `out` and the walk moves on to the next sibling.
pub async fn run<T, W>(client: &SourcegraphClient<'_, T>, out: &mut W) -> Result<(), ScanError>
where
    T: Transport,
    W: Write,
{
    let target_file = client.config().target_file();

    let orgs = match client.list_organizations().await {
        Ok(orgs) => orgs,
        Err(e) => {
            writeln!(out, "Error fetching organizations: {}", e)?;
            return Err(ScanError::Organizations(e));
        }
    };
    info!("found {} organizations", orgs.len());

    for org in &orgs {
        writeln!(out, "Organization: {}", org.name)?;

        let repos = match client.list_repositories(&org.name).await {
            Ok(repos) => repos,
            Err(e) => {
                warn!("skipping organization {}: {}", org.name, e);
                writeln!(
                    out,
                    "Error fetching repositories for organization {} : {}",
                    org.name, e
                )?;
                continue;
            }
        };

        for repo in &repos {
            match client.has_file(&repo.name, target_file).await {
                Ok(true) => writeln!(out, "  - Repository: {}", repo.name)?,
                Ok(false) => {}
                Err(e) => {
                    warn!("skipping repository {}: {}", repo.name, e);
                    writeln!(
                        out,
                        "Error checking {} for repository {} : {}",
                        target_file, repo.name, e
                    )?;
                }
            }
        }
    }

    Ok(())
}
