//! Passive subdomain discovery via certificate-transparency logs.
//!
//! One JSON query against crt.sh per scan. This phase is best effort: any
//! transport or parse failure degrades to an empty result set and the
//! brute-force phase runs regardless.

use crate::types::Domain;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

const CRTSH_TIMEOUT: Duration = Duration::from_secs(15);

/// One certificate record as returned by crt.sh. A single certificate may
/// list several names separated by newlines in `name_value`.
#[derive(Debug, Deserialize)]
struct CertRecord {
    name_value: String,
}

/// Client for the crt.sh certificate-transparency search endpoint.
pub struct CertLogClient {
    client: reqwest::Client,
}

impl CertLogClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(CRTSH_TIMEOUT).build()?;
        Ok(Self { client })
    }

    /// Names inside `domain` that appear in issued certificates.
    ///
    /// Returns an empty set on any failure.
    pub async fn subdomains(&self, domain: &Domain) -> BTreeSet<String> {
        let url = format!("https://crt.sh/?q=%.{}&output=json", domain);

        let records: Vec<CertRecord> = match self.fetch(&url).await {
            Ok(records) => records,
            Err(e) => {
                debug!("crt.sh lookup failed for {}: {}", domain, e);
                return BTreeSet::new();
            }
        };

        extract_names(&records, domain)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<CertRecord>, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Split, normalize, and filter certificate subject names down to real
/// hostnames inside the target zone: lowercase, wildcards dropped, names
/// outside the zone dropped.
fn extract_names(records: &[CertRecord], domain: &Domain) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    for record in records {
        for raw in record.name_value.lines() {
            let name = raw.trim().to_ascii_lowercase();
            if name.is_empty() || name.contains('*') {
                continue;
            }
            if domain.owns(&name) {
                names.insert(name);
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[&str]) -> Vec<CertRecord> {
        values
            .iter()
            .map(|v| CertRecord {
                name_value: v.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_extract_splits_multi_name_records() {
        let domain = Domain::parse("example.test").unwrap();
        let recs = records(&["shop.example.test\nwww.example.test"]);

        let names = extract_names(&recs, &domain);
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["shop.example.test", "www.example.test"]
        );
    }

    #[test]
    fn test_extract_drops_wildcards_and_foreign_names() {
        let domain = Domain::parse("example.test").unwrap();
        let recs = records(&[
            "*.example.test",
            "cdn.other.test",
            "notexample.test",
            "mail.example.test",
        ]);

        let names = extract_names(&recs, &domain);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["mail.example.test"]);
    }

    #[test]
    fn test_extract_lowercases_and_dedupes() {
        let domain = Domain::parse("example.test").unwrap();
        let recs = records(&["WWW.Example.Test", "www.example.test"]);

        let names = extract_names(&recs, &domain);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_parses_crtsh_json_shape() {
        let body = r#"[
            {"issuer_ca_id": 1, "name_value": "a.example.test\nb.example.test", "id": 42},
            {"issuer_ca_id": 2, "name_value": "*.example.test", "id": 43}
        ]"#;

        let records: Vec<CertRecord> = serde_json::from_str(body).unwrap();
        let domain = Domain::parse("example.test").unwrap();
        let names = extract_names(&records, &domain);
        assert_eq!(names.len(), 2);
    }
}
