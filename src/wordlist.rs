//! Builtin subdomain candidate labels.
//!
//! A compact list of the labels that actually turn up in the wild:
//! infrastructure, mail, environments, tooling. Users can substitute their
//! own list with `--wordlist`.

/// Default brute-force labels for subdomain discovery.
pub const SUBDOMAIN_LABELS: &[&str] = &[
    "www", "mail", "ftp", "cpanel", "webmail", "smtp", "pop", "imap", "admin", "api", "dev",
    "staging", "test", "beta", "demo", "app", "blog", "shop", "store", "portal", "secure", "vpn",
    "remote", "cloud", "cdn", "static", "assets", "img", "images", "media", "ns1", "ns2", "ns3",
    "dns", "dns1", "dns2", "mx", "mx1", "mx2", "login", "auth", "sso", "accounts", "dashboard",
    "panel", "db", "database", "mysql", "postgres", "mongo", "redis", "cache", "git", "gitlab",
    "jenkins", "ci", "deploy", "docker", "k8s", "docs", "wiki", "help", "support", "status",
    "monitor", "grafana", "proxy", "gateway", "lb", "internal", "intranet", "corp", "m", "mobile",
    "ws", "wss", "socket", "stream", "live", "search", "elastic", "kibana", "log", "logs",
    "sentry", "backup", "bak", "old", "new", "staging2", "uat", "qa", "crm", "erp", "hr",
    "finance", "marketing", "sales", "s3", "storage", "files", "upload", "download", "share",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_are_unique() {
        let set: HashSet<_> = SUBDOMAIN_LABELS.iter().collect();
        assert_eq!(set.len(), SUBDOMAIN_LABELS.len());
    }

    #[test]
    fn test_labels_are_plain_lowercase() {
        for label in SUBDOMAIN_LABELS {
            assert!(!label.is_empty());
            assert!(label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
