use std::time::Duration;

use tracing::debug;

const ERROR_BODY_LIMIT: usize = 240;

/// Single GET with no retry. Any non-2xx status or transport failure is an error.
pub(crate) fn get_text(
    url: &str,
    query: &[(&str, &str)],
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<String, String> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout_read(read_timeout)
        .timeout_write(read_timeout)
        .build();

    let mut request = agent.get(url);
    for (key, value) in query {
        request = request.query(key, value);
    }
    debug!(url, params = query.len(), "GET");

    match request.call() {
        Ok(response) => response
            .into_string()
            .map_err(|err| format!("response decode failed: {err}")),
        Err(ureq::Error::Status(status, response)) => {
            let response_body = response.into_string().ok().unwrap_or_default();
            Err(status_error(status, &response_body))
        }
        Err(ureq::Error::Transport(err)) => Err(format!("transport error: {err}")),
    }
}

fn status_error(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP status {status}")
    } else {
        let truncated = body.chars().take(ERROR_BODY_LIMIT).collect::<String>();
        format!("HTTP status {status} ({truncated})")
    }
}


#[cfg(test)]
mod tests {
    use super::test_server::{Behavior, TestServer};
    use super::*;

    fn fast_get(server: &TestServer, query: &[(&str, &str)]) -> Result<String, String> {
        get_text(
            &server.base_url,
            query,
            Duration::from_millis(200),
            Duration::from_millis(200),
        )
    }

    #[test]
    fn returns_body_on_success() {
        let server = TestServer::spawn(vec![Behavior::Respond(200, "ok".to_string())]);
        let result = fast_get(&server, &[("q", "x")]);
        assert_eq!(result.expect("request should succeed"), "ok");
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn sends_query_parameters() {
        let server = TestServer::spawn(vec![Behavior::Respond(200, "ok".to_string())]);
        fast_get(&server, &[("part", "contentDetails"), ("id", "a,b")]).expect("request");
        let targets = server.request_targets();
        assert_eq!(targets.len(), 1);
        assert!(
            targets[0].contains("part=contentDetails"),
            "unexpected target: {}",
            targets[0]
        );
        assert!(targets[0].contains("id=a"), "unexpected target: {}", targets[0]);
    }

    #[test]
    fn server_errors_are_not_retried() {
        let server = TestServer::spawn(vec![
            Behavior::Respond(503, "down".to_string()),
            Behavior::Respond(200, "ok".to_string()),
        ]);

        let err = fast_get(&server, &[]).expect_err("503 should fail");
        assert!(
            err.contains("HTTP status 503") && err.contains("down"),
            "unexpected error message: {err}"
        );
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn client_errors_include_truncated_body() {
        let long_body = "x".repeat(500);
        let server = TestServer::spawn(vec![Behavior::Respond(403, long_body)]);

        let err = fast_get(&server, &[]).expect_err("403 should fail");
        assert!(err.starts_with("HTTP status 403 ("), "unexpected: {err}");
        assert!(err.len() < 300, "body should be truncated: {} chars", err.len());
    }

    #[test]
    fn read_timeout_is_a_transport_error() {
        let server = TestServer::spawn(vec![Behavior::DelayRespond(
            Duration::from_millis(150),
            200,
            "slow".to_string(),
        )]);

        let err = get_text(
            &server.base_url,
            &[],
            Duration::from_millis(250),
            Duration::from_millis(20),
        )
        .expect_err("slow response should time out");
        assert!(err.starts_with("transport error:"), "unexpected: {err}");
        assert_eq!(server.request_count(), 1);
    }

    #[test]
    fn status_error_omits_empty_body() {
        assert_eq!(status_error(404, "  \n"), "HTTP status 404");
    }
}
