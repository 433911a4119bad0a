//! [`SourceHost`] implementation backed by the Stash REST API.

use anyhow::Result;
use ferry_core::{BuildStatusReport, SourceHost};

use crate::client::StashClient;

impl SourceHost for StashClient {
  async fn pull_request_latest_commit(&self, number: &str) -> Result<Option<String>> {
    let pull_request = self.get_pull_request(number).await?;
    Ok(pull_request.from_ref.latest_commit)
  }

  async fn report_build_status(&self, report: &BuildStatusReport) -> Result<()> {
    StashClient::report_build_status(
      self,
      report.state,
      &report.key,
      &report.name,
      &report.build_url,
      &report.commit,
      &report.description,
    )
    .await
  }
}
