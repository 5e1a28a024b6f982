use crate::config::FeatureFlags;
use crate::endpoints::Endpoint;
use crate::error::QueryError;
use crate::state::AppState;
use crate::types::{
    AccessDate, LogEntry, LogResponse, Notice, QueryResult, SubscriptionResponse, UsageResponse,
};
use crate::utils::mask_token;
use chrono::{Datelike, Local, NaiveDate, TimeDelta};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

pub const SUBSCRIPTION_PATH: &str = "/v1/dashboard/billing/subscription";
pub const USAGE_PATH: &str = "/v1/dashboard/billing/usage";
pub const LOG_PATH: &str = "/api/log/token";

pub const BALANCE_FAILED: &str = "Token exhausted";
pub const LOG_QUERY_FAILED: &str = "Failed to query call details, please enter the correct token";
pub const LOG_REQUEST_FAILED: &str = "Query failed, please enter a correct token";

/// Days of history covered by the usage lookup
const USAGE_WINDOW_DAYS: i64 = 100;

/// Billing figures gathered by the first step
#[derive(Debug, Clone, PartialEq)]
struct Billing {
    balance: f64,
    usage: f64,
    access_date: AccessDate,
}

/// Everything a finished query wants to write back to the UI state
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub result: QueryResult,
    pub notices: Vec<Notice>,
    /// Both summary panels should open to show fresh data
    pub expand_panels: bool,
}

/// HTTP access to one endpoint's billing and log APIs
#[derive(Debug, Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    base_url: String,
}

impl QueryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    async fn fetch_subscription(&self, token: &str) -> Result<SubscriptionResponse, QueryError> {
        let url = build_url(&self.base_url, SUBSCRIPTION_PATH, &[])?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_usage(&self, token: &str, today: NaiveDate) -> Result<UsageResponse, QueryError> {
        let (start_date, end_date) = usage_window(today);
        let url = build_url(
            &self.base_url,
            USAGE_PATH,
            &[("start_date", start_date.as_str()), ("end_date", end_date.as_str())],
        )?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// The log API takes the token as a query parameter, not a header
    async fn fetch_logs(&self, token: &str) -> Result<LogResponse, QueryError> {
        let url = build_url(&self.base_url, LOG_PATH, &[("key", token)])?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn fetch_billing(&self, token: &str, today: NaiveDate) -> Result<Billing, QueryError> {
        let subscription = self.fetch_subscription(token).await?;
        let usage = self.fetch_usage(token, today).await?;

        let access_date = match subscription.access_until {
            None | Some(0) => AccessDate::Never,
            Some(timestamp) => AccessDate::At(timestamp),
        };

        Ok(Billing {
            balance: subscription.hard_limit_usd,
            usage: usage.total_usage / 100.0,
            access_date,
        })
    }

    async fn fetch_log_entries(&self, token: &str) -> Result<Vec<LogEntry>, QueryError> {
        let response = self.fetch_logs(token).await?;
        if !response.success {
            return Err(QueryError::Rejected(response.message));
        }
        let mut logs = response.data.unwrap_or_default();
        logs.reverse();
        Ok(logs)
    }
}

/// Run the enabled lookups for one token and build a fresh result.
///
/// The billing and log steps are independent: a billing failure clears the
/// billing fields but the log lookup still runs. A log failure resets the
/// whole result. Nothing from a previous query survives either way.
pub async fn run_query(
    client: &QueryClient,
    token: &str,
    features: FeatureFlags,
    today: NaiveDate,
) -> QueryOutcome {
    let mut result = QueryResult::default();
    let mut notices = Vec::new();
    let mut expand_panels = false;

    if features.show_balance {
        match client.fetch_billing(token, today).await {
            Ok(billing) => {
                tracing::debug!(balance = billing.balance, usage = billing.usage, "billing loaded");
                result.balance = billing.balance;
                result.usage = billing.usage;
                result.access_date = billing.access_date;
                result.token_valid = true;
            }
            Err(e) => {
                tracing::warn!(token = %mask_token(token), error = %e, "billing lookup failed");
                notices.push(Notice::error(BALANCE_FAILED));
            }
        }
    }

    if features.show_detail {
        match client.fetch_log_entries(token).await {
            Ok(logs) => {
                tracing::debug!(count = logs.len(), "call log loaded");
                result.logs = logs;
                expand_panels = true;
            }
            Err(e) => {
                tracing::warn!(token = %mask_token(token), error = %e, "call log lookup failed");
                let message = match e {
                    QueryError::Rejected(_) => LOG_QUERY_FAILED,
                    _ => LOG_REQUEST_FAILED,
                };
                notices.push(Notice::error(message));
                result = QueryResult::default();
            }
        }
    }

    QueryOutcome {
        result,
        notices,
        expand_panels,
    }
}

/// Spawn a query against `endpoint` and store the outcome under its name.
///
/// The result is keyed by the endpoint the query started on, so switching
/// tabs mid-flight does not misfile it.
pub fn execute_query_background(
    state: Arc<RwLock<AppState>>,
    endpoint: Endpoint,
    token: String,
    features: FeatureFlags,
    timeout: Duration,
) -> JoinHandle<()> {
    if let Ok(mut s) = state.write() {
        s.loading = true;
    }

    tokio::spawn(async move {
        tracing::info!(endpoint = %endpoint.name, token = %mask_token(&token), "query started");

        let outcome = match QueryClient::new(&endpoint.base_url, timeout) {
            Ok(client) => run_query(&client, &token, features, Local::now().date_naive()).await,
            Err(e) => {
                tracing::error!(error = %e, "failed to build http client");
                QueryOutcome {
                    result: QueryResult::default(),
                    notices: vec![Notice::error(LOG_REQUEST_FAILED)],
                    expand_panels: false,
                }
            }
        };

        if let Ok(mut s) = state.write() {
            s.finish_query(&endpoint.name, outcome);
        }
    })
}

/// Start and end dates for the usage lookup, formatted `YYYY-M-D`
pub fn usage_window(today: NaiveDate) -> (String, String) {
    let start = today - TimeDelta::days(USAGE_WINDOW_DAYS);
    (format_short_date(start), format_short_date(today))
}

fn format_short_date(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// Join `path` onto `base_url` and append the query pairs
pub(crate) fn build_url(
    base_url: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Url, url::ParseError> {
    let full_path = format!("{}{}", base_url.trim_end_matches('/'), path);
    let mut url = Url::parse(&full_path)?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::EndpointSelector;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "sk-abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUV";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn all_features() -> FeatureFlags {
        FeatureFlags::default()
    }

    fn client(server: &MockServer) -> QueryClient {
        QueryClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    async fn mount_billing(server: &MockServer, hard_limit: f64, total_usage: f64) {
        Mock::given(method("GET"))
            .and(path(SUBSCRIPTION_PATH))
            .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hard_limit_usd": hard_limit,
                "access_until": 0
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path(USAGE_PATH))
            .and(query_param("start_date", "2026-7-11"))
            .and(query_param("end_date", "2026-10-19"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_usage": total_usage
            })))
            .mount(server)
            .await;
    }

    async fn mount_logs(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(LOG_PATH))
            .and(query_param("key", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_usage_window_format() {
        let (start, end) = usage_window(today());
        assert_eq!(start, "2026-7-11");
        assert_eq!(end, "2026-10-19");

        let (start, end) = usage_window(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(start, "2025-11-25");
        assert_eq!(end, "2026-3-5");
    }

    #[test]
    fn test_build_url_with_query() {
        let url = build_url("http://localhost:3000/", LOG_PATH, &[("key", "sk-a b")]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/log/token?key=sk-a+b");
    }

    #[test]
    fn test_build_url_without_query() {
        let url = build_url("http://localhost:3000", SUBSCRIPTION_PATH, &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/v1/dashboard/billing/subscription"
        );
    }

    #[test]
    fn test_build_url_invalid_base() {
        assert!(build_url("not a valid url", LOG_PATH, &[]).is_err());
    }

    #[tokio::test]
    async fn test_billing_success() {
        let server = MockServer::start().await;
        mount_billing(&server, 25.0, 1234.0).await;

        let features = FeatureFlags {
            show_detail: false,
            ..all_features()
        };
        let outcome = run_query(&client(&server), TOKEN, features, today()).await;

        assert_eq!(outcome.result.balance, 25.0);
        assert_eq!(outcome.result.usage, 12.34);
        assert_eq!(outcome.result.access_date, AccessDate::Never);
        assert!(outcome.result.token_valid);
        assert!(outcome.notices.is_empty());
        assert!(!outcome.expand_panels);
    }

    #[tokio::test]
    async fn test_logs_are_reversed() {
        let server = MockServer::start().await;
        mount_logs(
            &server,
            json!({"success": true, "message": "", "data": [{"created_at": 1}, {"created_at": 2}]}),
        )
        .await;

        let features = FeatureFlags {
            show_balance: false,
            ..all_features()
        };
        let outcome = run_query(&client(&server), TOKEN, features, today()).await;

        let created: Vec<i64> = outcome.result.logs.iter().map(|l| l.created_at).collect();
        assert_eq!(created, vec![2, 1]);
        assert!(outcome.expand_panels);
    }

    #[tokio::test]
    async fn test_billing_failure_resets_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUBSCRIPTION_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let features = FeatureFlags {
            show_detail: false,
            ..all_features()
        };
        let outcome = run_query(&client(&server), TOKEN, features, today()).await;

        assert_eq!(outcome.result, QueryResult::default());
        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.notices[0].message, BALANCE_FAILED);
    }

    #[tokio::test]
    async fn test_usage_failure_discards_subscription() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUBSCRIPTION_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"hard_limit_usd": 10.0})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(USAGE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let features = FeatureFlags {
            show_detail: false,
            ..all_features()
        };
        let outcome = run_query(&client(&server), TOKEN, features, today()).await;

        assert_eq!(outcome.result, QueryResult::default());
    }

    #[tokio::test]
    async fn test_log_step_runs_after_billing_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SUBSCRIPTION_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_logs(
            &server,
            json!({"success": true, "data": [{"created_at": 7}]}),
        )
        .await;

        let outcome = run_query(&client(&server), TOKEN, all_features(), today()).await;

        assert!(!outcome.result.token_valid);
        assert_eq!(outcome.result.balance, 0.0);
        assert_eq!(outcome.result.logs.len(), 1);
        assert_eq!(outcome.notices[0].message, BALANCE_FAILED);
    }

    #[tokio::test]
    async fn test_log_rejection_resets_everything() {
        let server = MockServer::start().await;
        mount_billing(&server, 5.0, 100.0).await;
        mount_logs(
            &server,
            json!({"success": false, "message": "invalid token", "data": null}),
        )
        .await;

        let outcome = run_query(&client(&server), TOKEN, all_features(), today()).await;

        assert_eq!(outcome.result, QueryResult::default());
        assert_eq!(outcome.notices.len(), 1);
        assert_eq!(outcome.notices[0].message, LOG_QUERY_FAILED);
        assert!(!outcome.expand_panels);
    }

    #[tokio::test]
    async fn test_log_transport_failure_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LOG_PATH))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let features = FeatureFlags {
            show_balance: false,
            ..all_features()
        };
        let outcome = run_query(&client(&server), TOKEN, features, today()).await;

        assert_eq!(outcome.result, QueryResult::default());
        assert_eq!(outcome.notices[0].message, LOG_REQUEST_FAILED);
    }

    #[tokio::test]
    async fn test_disabled_steps_make_no_requests() {
        let server = MockServer::start().await;
        let features = FeatureFlags {
            show_balance: false,
            show_detail: false,
            show_exchange_rate: true,
        };

        let outcome = run_query(&client(&server), TOKEN, features, today()).await;

        assert_eq!(outcome.result, QueryResult::default());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_background_query_stores_under_starting_endpoint() {
        let server = MockServer::start().await;
        mount_billing(&server, 3.0, 50.0).await;
        mount_logs(&server, json!({"success": true, "data": []})).await;

        let selector = EndpointSelector::new(vec![
            Endpoint {
                name: "main".to_string(),
                base_url: server.uri(),
            },
            Endpoint {
                name: "backup".to_string(),
                base_url: "http://127.0.0.1:9".to_string(),
            },
        ])
        .unwrap();
        let state = Arc::new(RwLock::new(AppState::new(selector)));
        let endpoint = state.read().unwrap().selector.active().clone();

        let handle = execute_query_background(
            state.clone(),
            endpoint,
            TOKEN.to_string(),
            all_features(),
            Duration::from_secs(5),
        );
        assert!(state.read().unwrap().loading);

        state.write().unwrap().selector.select_endpoint("backup");
        handle.await.unwrap();

        let s = state.read().unwrap();
        assert!(!s.loading);
        assert_eq!(s.results.get("main").unwrap().balance, 3.0);
        assert!(s.results.get("backup").is_none());
    }
}
