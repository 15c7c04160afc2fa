// URI template matching: one `{name}` placeholder per `/`-separated segment

use std::collections::BTreeMap;

/// Captured placeholder values keyed by placeholder name
pub type UriParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed resource URI template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    segments: Vec<Segment>,
}

impl UriTemplate {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();

        Self { segments }
    }

    /// Match a concrete URI. Segment counts must agree and every literal
    /// segment must be equal; placeholder segments are percent-decoded.
    pub fn match_uri(&self, uri: &str) -> Option<UriParams> {
        let parts: Vec<&str> = uri.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = UriParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal != part => return None,
                Segment::Literal(_) => {}
                Segment::Param(name) => {
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }

        Some(params)
    }

    /// Substitute captured values back into the template. Placeholders with
    /// no value are left as written.
    pub fn expand(&self, params: &UriParams) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => literal.clone(),
                Segment::Param(name) => params
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| format!("{{{}}}", name)),
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn decode_segment(part: &str) -> String {
    match urlencoding::decode(part) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => part.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_placeholder() {
        let template = UriTemplate::parse("a://x/{p}/y");
        let params = template.match_uri("a://x/42/y").unwrap();

        assert_eq!(params.len(), 1);
        assert_eq!(params["p"], "42");
    }

    #[test]
    fn test_multiple_placeholders() {
        let template = UriTemplate::parse("synthcore://kernels/{kernelId}/agents/{agent}");
        let params = template.match_uri("synthcore://kernels/K1/agents/Navigator").unwrap();

        assert_eq!(params["kernelId"], "K1");
        assert_eq!(params["agent"], "Navigator");
    }

    #[test]
    fn test_segment_count_mismatch() {
        let template = UriTemplate::parse("a://x/{p}/y");

        assert!(template.match_uri("a://x/42").is_none());
        assert!(template.match_uri("a://x/42/y/z").is_none());
    }

    #[test]
    fn test_literal_mismatch() {
        let template = UriTemplate::parse("a://x/{p}/y");

        assert!(template.match_uri("a://x/42/z").is_none());
        assert!(template.match_uri("b://x/42/y").is_none());
    }

    #[test]
    fn test_placeholder_is_percent_decoded() {
        let template = UriTemplate::parse("synthcore://agents/{agentName}/status");
        let params = template.match_uri("synthcore://agents/Peer%20Review/status").unwrap();

        assert_eq!(params["agentName"], "Peer Review");
    }

    #[test]
    fn test_malformed_escape_is_kept_verbatim() {
        let template = UriTemplate::parse("a://x/{p}");
        let params = template.match_uri("a://x/%FF").unwrap();

        assert_eq!(params["p"], "%FF");
    }

    #[test]
    fn test_empty_placeholder_segment_matches() {
        let template = UriTemplate::parse("a://x/{p}/y");
        let params = template.match_uri("a://x//y").unwrap();

        assert_eq!(params["p"], "");
    }

    #[test]
    fn test_expand() {
        let template = UriTemplate::parse("synthcore://agents/{agentName}/status");
        let params = template.match_uri("synthcore://agents/Peer%20Review/status").unwrap();

        assert_eq!(template.expand(&params), "synthcore://agents/Peer Review/status");
        assert_eq!(
            template.expand(&UriParams::new()),
            "synthcore://agents/{agentName}/status"
        );
    }
}
