//! File upload through the daemon's `/files` endpoint.

use reqwest::multipart::{Form, Part};
use sbxctl_common::RemoteError;

use super::client::EnvdClient;
use crate::http;

impl EnvdClient {
    /// Write `data` to `path` inside the sandbox, owned by the client's user.
    /// Parent directories are created by the daemon.
    pub async fn write_file(&self, path: &str, data: Vec<u8>) -> Result<(), RemoteError> {
        let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
        let form = Form::new().part("file", Part::bytes(data).file_name(file_name));

        let response = self
            .request(reqwest::Method::POST, "/files")
            .query(&[("path", path), ("username", self.user.as_str())])
            .timeout(self.request_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(http::network_error)?;
        http::check_status(response).await?;

        tracing::debug!(path, "file written");
        Ok(())
    }
}
