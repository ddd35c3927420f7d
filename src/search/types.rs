use bytes::Bytes;
use reqwest::StatusCode;

/// Query parameters forwarded to the upstream search API, order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(Vec<(String, String)>);

impl SearchQuery {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    /// Append each default whose name the caller did not supply.
    pub fn with_defaults(mut self, defaults: &[(&str, &str)]) -> Self {
        for (name, value) in defaults {
            if !self.contains(name) {
                self.0.push((name.to_string(), value.to_string()));
            }
        }
        self
    }

    /// Replace every `name` parameter with a single server-held value.
    pub fn with_credential(mut self, name: &str, value: &str) -> Self {
        self.0.retain(|(k, _)| k != name);
        self.0.push((name.to_string(), value.to_string()));
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Upstream response body, passed back to the caller untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamBody {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamBody {
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
