use serde::Serialize;
use tracing::trace;

/// Ordered mapping of query keys to their raw values
///
/// Keys keep the position of their first appearance; a repeated key
/// overwrites the earlier value in place. Values are split on `&`/`=` only
/// and are never percent-decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryKey {
    entries: Vec<(String, String)>,
}

impl QueryKey {
    /// Builds the mapping from a raw query string (without the leading `?`)
    pub fn from_query(query: &str) -> Self {
        let mut query_key = QueryKey::default();

        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };
            if key.is_empty() {
                continue;
            }
            query_key.insert(key, value);
        }

        query_key
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Structural breakdown of a URL string
///
/// Every component is an empty string when the input has no such part.
/// `relative` is `path` + `?query` + `#fragment` as they appeared in the
/// input, and `fragment` keeps its leading `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    pub protocol: String,
    pub authority: String,
    pub user_info: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: String,
    pub relative: String,
    pub path: String,
    pub directory: String,
    pub file: String,
    pub query: String,
    pub fragment: String,
    pub query_key: QueryKey,
}

/// Splits a URL into its structural parts
///
/// This is a loose, pattern-based decomposition for the URL shapes found in
/// campaign links. It never fails: input that does not look like a URL comes
/// back with most fields empty.
///
/// # Arguments
/// * `url` - Any string
///
/// # Returns
/// * `ParsedUrl` - The captured components and the query key mapping
pub fn parse_url(url: &str) -> ParsedUrl {
    let mut parsed = ParsedUrl::default();
    let mut rest = url;

    // protocol, unless the input opens with `user:password@`
    if !starts_with_credentials(rest) {
        if let Some(idx) = rest.find(|c: char| matches!(c, ':' | '/' | '?' | '#' | '.')) {
            if idx > 0 && rest[idx..].starts_with(':') {
                parsed.protocol = rest[..idx].to_string();
                rest = &rest[idx + 1..];
            }
        }
    }

    rest = rest.strip_prefix("//").unwrap_or(rest);

    let authority_len = parse_authority(rest, &mut parsed);
    parsed.authority = rest[..authority_len].to_string();
    rest = &rest[authority_len..];

    parse_relative(rest, &mut parsed);
    parsed.query_key = QueryKey::from_query(&parsed.query);

    trace!(
        "Parsed URL {}: protocol={}, host={}, port={}, path={}, query={}, fragment={}",
        url, parsed.protocol, parsed.host, parsed.port, parsed.path, parsed.query, parsed.fragment
    );
    parsed
}

/// True when the input begins with `[^:@]+:[^:@/]*@`
fn starts_with_credentials(input: &str) -> bool {
    let Some(colon) = input.find(|c: char| c == ':' || c == '@') else {
        return false;
    };
    if colon == 0 || !input[colon..].starts_with(':') {
        return false;
    }
    let after = &input[colon + 1..];
    match after.find(|c: char| matches!(c, ':' | '@' | '/')) {
        Some(idx) => after[idx..].starts_with('@'),
        None => false,
    }
}

/// Captures user info, host and port; returns the byte length consumed
fn parse_authority(input: &str, parsed: &mut ParsedUrl) -> usize {
    let mut pos = 0;

    // user[:password]@
    let user_end = input.find(|c: char| c == ':' || c == '@').unwrap_or(input.len());
    let mut candidate = None;
    if input[user_end..].starts_with('@') {
        candidate = Some((user_end, None));
    } else if input[user_end..].starts_with(':') {
        let after = &input[user_end + 1..];
        let pass_len = after.find(|c: char| c == ':' || c == '@').unwrap_or(after.len());
        if after[pass_len..].starts_with('@') {
            candidate = Some((user_end + 1 + pass_len, Some(user_end)));
        }
    }
    if let Some((at, colon)) = candidate {
        parsed.user_info = input[..at].to_string();
        match colon {
            Some(colon) => {
                parsed.user = input[..colon].to_string();
                parsed.password = input[colon + 1..at].to_string();
            }
            None => parsed.user = input[..at].to_string(),
        }
        pos = at + 1;
    }

    let host_len = input[pos..]
        .find(|c: char| matches!(c, ':' | '/' | '?' | '#'))
        .unwrap_or(input.len() - pos);
    parsed.host = input[pos..pos + host_len].to_string();
    pos += host_len;

    if input[pos..].starts_with(':') {
        pos += 1;
        let digits = input[pos..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len() - pos);
        parsed.port = input[pos..pos + digits].to_string();
        pos += digits;
    }

    pos
}

/// Captures path, directory, file, query and fragment from the remainder
fn parse_relative(input: &str, parsed: &mut ParsedUrl) {
    let path_end = input.find(|c: char| c == '?' || c == '#').unwrap_or(input.len());
    let path = &input[..path_end];

    if path.starts_with('/') {
        // the last segment is a file only when it carries an extension;
        // in the first segment a leading character never starts it
        let last_slash = path.rfind('/').unwrap_or(0);
        let last_segment = &path[last_slash + 1..];
        let extension_part = if last_slash == 0 {
            let mut chars = last_segment.chars();
            chars.next();
            chars.as_str()
        } else {
            last_segment
        };
        let is_file = extension_part.contains('.') && !extension_part.ends_with('.');
        if is_file {
            parsed.directory = path[..=last_slash].to_string();
            parsed.file = last_segment.to_string();
        } else {
            parsed.directory = path.to_string();
        }
    } else if let Some(slash) = path.find('/') {
        // a bare file followed by more path ends the capture
        parsed.file = path[..slash].to_string();
        parsed.path = parsed.file.clone();
        parsed.relative = parsed.file.clone();
        return;
    } else {
        parsed.file = path.to_string();
    }
    parsed.path = path.to_string();

    let mut rest = &input[path_end..];
    if let Some(after) = rest.strip_prefix('?') {
        let query_end = after.find('#').unwrap_or(after.len());
        parsed.query = after[..query_end].to_string();
        rest = &after[query_end..];
    }
    if rest.starts_with('#') {
        parsed.fragment = rest.to_string();
    }
    parsed.relative = input.to_string();
}
