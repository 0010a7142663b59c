#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::ApiError;
use crate::domain::models::CareerApi;
use crate::domain::models::ChatMessage;
use crate::domain::models::ConversationSummary;
use crate::domain::models::ErrorBody;
use crate::domain::models::LoginRequest;
use crate::domain::models::RegisterRequest;
use crate::domain::models::SendMessageRequest;
use crate::domain::models::SendMessageResponse;
use crate::domain::models::TokenResponse;

pub const AUTH_HEADER: &str = "x-auth-token";

pub struct HttpApi {
    url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(url: String) -> HttpApi {
        return HttpApi {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }

    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url);
    }

    #[allow(clippy::implicit_return)]
    async fn parse<T: DeserializeOwned>(
        path: &str,
        res: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let msg = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|err_body| return err_body.msg);
            tracing::error!(
                path = path,
                status = status.as_u16(),
                msg = ?msg,
                "Career Agent API request failed"
            );

            return Err(ApiError::Status {
                status: status.as_u16(),
                msg,
            });
        }

        return serde_json::from_str::<T>(&body).map_err(|err| {
            tracing::error!(path = path, error = %err, "Unexpected Career Agent API response");
            return ApiError::Decode(err.to_string());
        });
    }

    #[allow(clippy::implicit_return)]
    async fn token_request<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<String, ApiError> {
        tracing::debug!(path = path, "Requesting token");

        let mut req = self.client.post(self.endpoint(path));
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let token_res = HttpApi::parse::<TokenResponse>(path, res).await?;

        return Ok(token_res.token);
    }
}

#[async_trait]
impl CareerApi for HttpApi {
    #[allow(clippy::implicit_return)]
    async fn register(&self, req: &RegisterRequest) -> Result<String, ApiError> {
        return self.token_request("/api/auth/register", Some(req)).await;
    }

    #[allow(clippy::implicit_return)]
    async fn login(&self, req: &LoginRequest) -> Result<String, ApiError> {
        return self.token_request("/api/auth/login", Some(req)).await;
    }

    #[allow(clippy::implicit_return)]
    async fn guest_login(&self) -> Result<String, ApiError> {
        return self
            .token_request::<serde_json::Value>("/api/auth/guest", None)
            .await;
    }

    #[allow(clippy::implicit_return)]
    async fn list_conversations(
        &self,
        token: &str,
    ) -> Result<Vec<ConversationSummary>, ApiError> {
        let path = "/api/conversations";
        tracing::debug!(path = path, "Listing conversations");

        let res = self
            .client
            .get(self.endpoint(path))
            .header(AUTH_HEADER, token)
            .send()
            .await?;

        return HttpApi::parse(path, res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn get_conversation(&self, token: &str, id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        let path = format!("/api/conversations/{id}");
        tracing::debug!(path = %path, "Loading conversation history");

        let res = self
            .client
            .get(self.endpoint(&path))
            .header(AUTH_HEADER, token)
            .send()
            .await?;

        return HttpApi::parse(&path, res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(
        &self,
        token: &str,
        req: &SendMessageRequest,
    ) -> Result<SendMessageResponse, ApiError> {
        let path = "/api/conversations";
        tracing::debug!(
            path = path,
            conversation_id = ?req.conversation_id,
            history_len = req.history.len(),
            "Sending chat message"
        );

        let res = self
            .client
            .post(self.endpoint(path))
            .header(AUTH_HEADER, token)
            .json(req)
            .send()
            .await?;

        return HttpApi::parse(path, res).await;
    }

    #[allow(clippy::implicit_return)]
    async fn analyze(
        &self,
        token: &str,
        req: &AnalysisRequest,
    ) -> Result<AnalysisResult, ApiError> {
        let path = "/api/agent/analyzer";
        tracing::debug!(
            path = path,
            resume_len = req.resume_text.len(),
            job_description_len = req.job_description_text.len(),
            "Requesting resume analysis"
        );

        let res = self
            .client
            .post(self.endpoint(path))
            .header(AUTH_HEADER, token)
            .json(req)
            .send()
            .await?;

        return HttpApi::parse(path, res).await;
    }
}
