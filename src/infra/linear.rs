use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};

use crate::config::LinearConfig;
use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const CREATE_ISSUE_MUTATION: &str = "\
mutation CreateIssue($title: String!, $description: String, $teamId: String!, $priority: Int) {
  issueCreate(input: { title: $title, description: $description, teamId: $teamId, priority: $priority }) {
    success
    issue { id title url }
  }
}";

pub struct LinearClient {
    http: Client,
    config: LinearConfig,
}

impl LinearClient {
    pub fn new(config: LinearConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl IssueTrackerService for LinearClient {
    async fn create_ticket(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        let request_body = GraphqlRequest {
            query: CREATE_ISSUE_MUTATION,
            variables: CreateIssueVariables {
                title: &draft.title,
                description: &draft.description,
                team_id: &self.config.team_id,
                priority: draft.priority.ordinal(),
            },
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::Transport(format!("failed to call Linear: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Transport(format!("failed to read Linear response: {err}")))?;

        // keep the raw body in the error; HTML error pages land here
        let payload: GraphqlResponse = serde_json::from_str(&body).map_err(|err| {
            AppError::Response(format!("{err} (HTTP {status}); raw body: {body}"))
        })?;

        if let Some(errors) = payload.errors.filter(|errors| !errors.is_empty()) {
            let detail = errors
                .into_iter()
                .map(|error| error.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Api(detail));
        }

        let issue_create = payload
            .data
            .and_then(|data| data.issue_create)
            .ok_or_else(|| {
                AppError::Api(format!("response carried no issueCreate payload (HTTP {status})"))
            })?;

        if !issue_create.success {
            return Err(AppError::Api(format!(
                "issueCreate reported success = false for '{}'",
                draft.title
            )));
        }

        let issue = issue_create.issue.ok_or_else(|| {
            AppError::Api("issueCreate succeeded but returned no issue".to_string())
        })?;

        Ok(Ticket {
            id: issue.id,
            title: issue.title,
            url: issue.url,
        })
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'static str,
    variables: CreateIssueVariables<'a>,
}

#[derive(Serialize)]
struct CreateIssueVariables<'a> {
    title: &'a str,
    description: &'a str,
    #[serde(rename = "teamId")]
    team_id: &'a str,
    priority: u8,
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
    #[serde(default)]
    data: Option<ResponseData>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct ResponseData {
    #[serde(rename = "issueCreate")]
    issue_create: Option<IssueCreatePayload>,
}

#[derive(Deserialize)]
struct IssueCreatePayload {
    success: bool,
    issue: Option<CreatedIssue>,
}

#[derive(Deserialize)]
struct CreatedIssue {
    id: String,
    title: String,
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;
    use crate::domain::ticket::Priority;

    fn client(api_url: String) -> LinearClient {
        LinearClient::new(LinearConfig {
            api_key: "lin_api_test".to_string(),
            team_id: "TEAM-1".to_string(),
            api_url,
        })
    }

    fn draft() -> TicketDraft {
        TicketDraft {
            title: "Fix bug".to_string(),
            description: "It crashes on save.".to_string(),
            priority: Priority::High,
        }
    }

    #[tokio::test]
    async fn creates_ticket_and_maps_priority() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .header("authorization", "lin_api_test")
                    .json_body_partial(
                        r#"{"variables": {"title": "Fix bug", "teamId": "TEAM-1", "priority": 2}}"#,
                    );
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "data": {
                            "issueCreate": {
                                "success": true,
                                "issue": {
                                    "id": "issue-123",
                                    "title": "Fix bug",
                                    "url": "https://linear.app/team/issue-123"
                                }
                            }
                        }
                    }));
            })
            .await;

        let ticket = client(server.url("/graphql"))
            .create_ticket(&draft())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(ticket.id, "issue-123");
        assert_eq!(ticket.title, "Fix bug");
        assert_eq!(ticket.url.as_deref(), Some("https://linear.app/team/issue-123"));
    }

    #[tokio::test]
    async fn error_list_in_response_fails_the_ticket() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "errors": [{"message": "team not found"}]
                    }));
            })
            .await;

        let err = client(server.url("/graphql"))
            .create_ticket(&draft())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert!(err.to_string().contains("team not found"));
    }

    #[tokio::test]
    async fn unsuccessful_result_fails_the_ticket() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "data": {"issueCreate": {"success": false, "issue": null}}
                    }));
            })
            .await;

        let err = client(server.url("/graphql"))
            .create_ticket(&draft())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
    }

    #[tokio::test]
    async fn missing_payload_fails_the_ticket() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({"data": {}}));
            })
            .await;

        let err = client(server.url("/graphql"))
            .create_ticket(&draft())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
    }

    #[tokio::test]
    async fn unparseable_body_is_a_response_error_with_raw_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(502).body("<html>Bad Gateway</html>");
            })
            .await;

        let err = client(server.url("/graphql"))
            .create_ticket(&draft())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Response(_)));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let err = client("http://127.0.0.1:1/graphql".to_string())
            .create_ticket(&draft())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transport(_)));
    }
}
