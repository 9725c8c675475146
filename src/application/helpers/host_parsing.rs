//! Hostname to tenant resolution.
//!
//! A request reaches a tenant when its host carries the tenant slug as the
//! leftmost label. Three deployment shapes are recognised, checked in order:
//!
//! 1. Loopback (`localhost`, `127.0.0.1`, `::1`): `<slug>.localhost[:port]`.
//! 2. Preview deployments under a configured suffix: `<slug>.<suffix>` or
//!    `<slug>---<branch>.<suffix>`; the `---` form wins when present.
//! 3. Anything else is matched against the production root domain:
//!    `<slug>.<root>`, excluding `<root>` and `www.<root>`.
//!
//! Every function here is pure; nothing touches the network or storage.

use url::Url;

/// Separator between tenant slug and branch name in preview hosts.
const PREVIEW_BRANCH_SEPARATOR: &str = "---";

/// Longest label DNS allows, and therefore the longest usable slug.
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRules {
    root_domain: String,
    preview_suffix: Option<String>,
    reserved: Vec<String>,
}

impl HostRules {
    pub fn new<I, S>(root_domain: &str, preview_suffix: Option<&str>, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            root_domain: normalize_domain(root_domain),
            preview_suffix: preview_suffix
                .map(normalize_domain)
                .filter(|suffix| !suffix.is_empty()),
            reserved: reserved
                .into_iter()
                .map(|name| name.as_ref().trim().to_ascii_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    pub fn preview_suffix(&self) -> Option<&str> {
        self.preview_suffix.as_deref()
    }

    /// Empty labels are always reserved.
    pub fn is_reserved(&self, label: &str) -> bool {
        label.is_empty() || self.reserved.iter().any(|name| name == label)
    }
}

/// Resolve the tenant slug for a request.
///
/// `host` is the raw `Host` header (port allowed). When it is empty the host
/// part of `url` is used instead; a malformed header never falls back.
/// Returns `None` for root/admin context.
pub fn resolve_tenant_slug(host: &str, url: &str, rules: &HostRules) -> Option<String> {
    let hostname = if host.trim().is_empty() {
        hostname_from_url(url)?
    } else {
        normalize_hostname(host)?
    };

    let label = if is_loopback(&hostname) {
        loopback_label(&hostname)
    } else if let Some(suffix) = rules
        .preview_suffix()
        .filter(|suffix| is_subdomain_of(&hostname, suffix))
    {
        preview_label(&hostname, suffix)
    } else {
        production_label(&hostname, rules.root_domain())
    }?;

    if rules.is_reserved(label) || !is_dns_label(label) {
        return None;
    }
    Some(label.to_string())
}

/// Strip the port and any trailing dot, lowercase. IPv6 literals lose their brackets.
/// `None` when the port is not a number.
pub fn normalize_hostname(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (without_port, port) = match raw.strip_prefix('[') {
        Some(rest) => {
            let (host, after) = rest.split_once(']')?;
            match after {
                "" => (host, None),
                _ => (host, Some(after.strip_prefix(':')?)),
            }
        }
        None => match raw.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (raw, None),
        },
    };
    if port.is_some_and(|port| port.parse::<u16>().is_err()) {
        return None;
    }
    let hostname = without_port.trim_end_matches('.').to_ascii_lowercase();
    (!hostname.is_empty()).then_some(hostname)
}

fn hostname_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    normalize_hostname(parsed.host_str()?)
}

fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_matches('.').to_ascii_lowercase()
}

pub fn is_loopback(hostname: &str) -> bool {
    hostname == "localhost"
        || hostname.ends_with(".localhost")
        || hostname == "127.0.0.1"
        || hostname == "::1"
}

fn is_subdomain_of(hostname: &str, domain: &str) -> bool {
    hostname
        .strip_suffix(domain)
        .is_some_and(|rest| rest.ends_with('.'))
}

fn loopback_label(hostname: &str) -> Option<&str> {
    hostname.strip_suffix(".localhost")
}

fn preview_label<'a>(hostname: &'a str, suffix: &str) -> Option<&'a str> {
    let label = hostname.strip_suffix(suffix)?.strip_suffix('.')?;
    if label.contains('.') {
        return None;
    }
    Some(
        label
            .split_once(PREVIEW_BRANCH_SEPARATOR)
            .map_or(label, |(slug, _branch)| slug),
    )
}

fn production_label<'a>(hostname: &'a str, root_domain: &str) -> Option<&'a str> {
    if root_domain.is_empty() || hostname == root_domain {
        return None;
    }
    if hostname
        .strip_prefix("www.")
        .is_some_and(|rest| rest == root_domain)
    {
        return None;
    }
    hostname.strip_suffix(root_domain)?.strip_suffix('.')
}

/// A single DNS label made of `a-z0-9-`, not starting or ending with a hyphen.
pub fn is_dns_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
