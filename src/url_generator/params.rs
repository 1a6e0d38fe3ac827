use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

/// Characters left as-is when encoding a query value
///
/// Letters, digits and `- _ . ! ~ * ' ( )` pass through, the same set a
/// browser's `encodeURIComponent` keeps.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One candidate value of a query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Plain value, encoded according to the parameter's flag
    Raw(String),
    /// Value carrying its own encoding flag, which overrides the parameter's
    WithOptions {
        value: String,
        #[serde(rename = "skipEncoding", default)]
        skip_encoding: bool,
    },
}

impl ParamValue {
    pub fn raw(value: impl Into<String>) -> Self {
        ParamValue::Raw(value.into())
    }

    pub fn with_options(value: impl Into<String>, skip_encoding: bool) -> Self {
        ParamValue::WithOptions {
            value: value.into(),
            skip_encoding,
        }
    }

    /// Resolves the raw value and whether encoding is skipped for it
    pub fn resolve(&self, param_skip_encoding: bool) -> (&str, bool) {
        match self {
            ParamValue::Raw(value) => (value.as_str(), param_skip_encoding),
            ParamValue::WithOptions { value, skip_encoding } => (value.as_str(), *skip_encoding),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Raw(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Raw(value)
    }
}

/// A query parameter and the values it should be expanded over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub key: String,
    #[serde(rename = "value", deserialize_with = "one_or_many")]
    pub values: Vec<ParamValue>,
    #[serde(rename = "skipEncoding", default)]
    pub skip_encoding: bool,
}

impl ParamSpec {
    pub fn new<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
            skip_encoding: false,
        }
    }

    /// A parameter with exactly one value
    pub fn single(key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let value: ParamValue = value.into();
        Self::new(key, [value])
    }

    pub fn skip_encoding(mut self, skip: bool) -> Self {
        self.skip_encoding = skip;
        self
    }
}

/// Accepts either a single value or a list of values
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ParamValue>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ParamValue>),
        One(ParamValue),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(values) => values,
        OneOrMany::One(value) => vec![value],
    })
}

/// Percent-encodes a query value the way `encodeURIComponent` does
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT_SET).to_string()
}

/// Builds the `&key=value` fragments for every parameter
///
/// The outer list follows the order of `specs`, each inner list the order of
/// that parameter's values.
///
/// # Arguments
/// * `specs` - Parameters to expand
///
/// # Returns
/// * `Vec<Vec<String>>` - One fragment list per parameter
pub fn map_values(specs: &[ParamSpec]) -> Vec<Vec<String>> {
    specs
        .iter()
        .map(|spec| {
            trace!("Expanding {} value(s) for parameter {}", spec.values.len(), spec.key);
            spec.values
                .iter()
                .map(|value| {
                    let (raw, skip) = value.resolve(spec.skip_encoding);
                    if skip {
                        format!("&{}={}", spec.key, raw)
                    } else {
                        format!("&{}={}", spec.key, encode_uri_component(raw))
                    }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_single_value() {
        let result = map_values(&[ParamSpec::single("utm_campaign", "google")]);
        assert_eq!(result, vec![vec!["&utm_campaign=google".to_string()]]);
    }

    #[test]
    fn test_map_value_list() {
        let result = map_values(&[ParamSpec::new("utm_campaign", ["google", "twitter", "facebook"])]);
        assert_eq!(result[0][0], "&utm_campaign=google");
        assert_eq!(result[0][1], "&utm_campaign=twitter");
        assert_eq!(result[0][2], "&utm_campaign=facebook");
    }

    #[test]
    fn test_encodes_by_default() {
        let result = map_values(&[ParamSpec::single("utm_campaign", "Hello World")]);
        assert_eq!(result, vec![vec!["&utm_campaign=Hello%20World".to_string()]]);
    }

    #[test]
    fn test_skip_encoding_on_param() {
        let spec = ParamSpec::single("utm_campaign", "{creativeID}").skip_encoding(true);
        assert_eq!(map_values(&[spec])[0][0], "&utm_campaign={creativeID}");
    }

    #[test]
    fn test_mixed_value_options() {
        let spec = ParamSpec::new(
            "utm_campaign",
            [
                ParamValue::with_options("{google}", true),
                ParamValue::with_options("{twitter}", false),
                ParamValue::raw("{facebook}"),
            ],
        );
        let result = map_values(&[spec]);

        assert_eq!(result[0][0], "&utm_campaign={google}");
        assert_eq!(result[0][1], "&utm_campaign=%7Btwitter%7D");
        assert_eq!(result[0][2], "&utm_campaign=%7Bfacebook%7D");
    }

    #[test]
    fn test_value_flag_overrides_param_flag() {
        let spec = ParamSpec::new("q", [ParamValue::with_options("a b", false), ParamValue::raw("c d")])
            .skip_encoding(true);
        let result = map_values(&[spec]);

        assert_eq!(result[0], vec!["&q=a%20b".to_string(), "&q=c d".to_string()]);
    }

    #[test]
    fn test_uri_component_set() {
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("a&b=c/d?e#f"), "a%26b%3Dc%2Fd%3Fe%23f");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_deserialize_specs() {
        let json = r#"[
            {"key": "a", "value": "one"},
            {"key": "b", "value": ["x", {"value": "{y}", "skipEncoding": true}]},
            {"key": "c", "value": {"value": "z"}, "skipEncoding": true}
        ]"#;
        let specs: Vec<ParamSpec> = serde_json::from_str(json).unwrap();

        assert_eq!(specs[0], ParamSpec::single("a", "one"));
        assert_eq!(
            specs[1].values,
            vec![ParamValue::raw("x"), ParamValue::with_options("{y}", true)]
        );
        assert_eq!(specs[2].values, vec![ParamValue::with_options("z", false)]);
        assert!(specs[2].skip_encoding);
    }

    #[test]
    fn test_empty_value_list() {
        let result = map_values(&[ParamSpec::new("a", Vec::<String>::new())]);
        assert_eq!(result, vec![Vec::<String>::new()]);
    }
}
