//! HTTP existence prober for profile URLs.
//!
//! A profile page exists iff the platform answers 200 to a plain GET.
//! Redirects are not followed: on these platforms a redirect is how a
//! renamed or missing profile presents itself.

use crate::engine::{FailureKind, ProbeJob, ProbeOutcome, Prober};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::redirect;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::timeout;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Issues GET requests with browser-like headers; the job key is the
/// platform name and the target is the fully-formed profile URL.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build the prober with a shared connection pool and a client-level
    /// timeout as a backstop behind the per-job one.
    pub fn new(request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(redirect::Policy::none())
            .timeout(request_timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    type Key = String;

    async fn probe(&self, job: &ProbeJob<String>) -> ProbeOutcome<String> {
        match timeout(job.timeout, self.client.get(&job.target).send()).await {
            Ok(Ok(response)) => {
                outcome_for_status(&job.key, &job.target, response.status().as_u16())
            }
            Ok(Err(e)) => {
                let kind = if e.is_timeout() {
                    FailureKind::Timeout
                } else if e.is_connect() {
                    FailureKind::Unreachable
                } else {
                    FailureKind::Transport
                };
                ProbeOutcome::missed(job.key.clone(), kind)
            }
            Err(_) => ProbeOutcome::missed(job.key.clone(), FailureKind::Timeout),
        }
    }
}

/// Classify an HTTP answer: 200 means the profile exists, anything else is
/// an expected miss carrying the status for the tally.
fn outcome_for_status(key: &str, url: &str, status: u16) -> ProbeOutcome<String> {
    if status == 200 {
        let mut payload = BTreeMap::new();
        payload.insert("url".to_string(), url.to_string());
        payload.insert("status".to_string(), status.to_string());
        ProbeOutcome::found(key.to_string(), payload)
    } else {
        ProbeOutcome::missed(key.to_string(), FailureKind::HttpStatus(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_200_is_found() {
        let outcome = outcome_for_status("GitHub", "https://github.com/octocat", 200);
        assert!(outcome.success);
        assert_eq!(
            outcome.payload.get("url").map(String::as_str),
            Some("https://github.com/octocat")
        );
        assert_eq!(outcome.payload.get("status").map(String::as_str), Some("200"));
    }

    #[test]
    fn test_non_200_is_a_classified_miss() {
        let outcome = outcome_for_status("GitHub", "https://github.com/nobody", 404);
        assert!(!outcome.success);
        assert_eq!(outcome.failure, Some(FailureKind::HttpStatus(404)));

        // A redirect means renamed/missing on these platforms
        let outcome = outcome_for_status("Instagram", "https://instagram.com/x", 302);
        assert_eq!(outcome.failure, Some(FailureKind::HttpStatus(302)));
    }

    #[test]
    fn test_prober_builds() {
        assert!(HttpProber::new(Duration::from_secs(8)).is_ok());
    }
}
