use async_trait::async_trait;

use super::{HttpExecutor, Request, Response, ResponseError, ResponseErrorKind};

pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: Request) -> Result<Response, ResponseError> {
        let mut builder = self.client.get(request.target());

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        map_response(response).await
    }
}

async fn map_response(value: reqwest::Response) -> Result<Response, ResponseError> {
    let status = value.status().as_u16();

    let data = value
        .bytes()
        .await
        .map_err(|e| ResponseError {
            kind: ResponseErrorKind::BadResponse,
            status: Some(status),
            message: e.to_string(),
        })?
        .to_vec();

    Ok(Response { status, data })
}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        let kind = if value.is_timeout() {
            ResponseErrorKind::Timeout
        } else if value.is_connect() {
            ResponseErrorKind::Connection
        } else {
            ResponseErrorKind::BadResponse
        };

        // The request URL carries the credential, never include it.
        ResponseError {
            kind,
            status: value.status().map(|v| v.as_u16()),
            message: value.without_url().to_string(),
        }
    }
}
