use serde::{Deserialize, Serialize};

/// What the session asks for: a continuation of `prefix` given `context`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    /// Free-form context, e.g. the email subject.
    pub context: String,
    /// Everything typed so far.
    pub prefix: String,
}

impl SuggestionRequest {
    pub fn new(context: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            prefix: prefix.into(),
        }
    }
}

/// Body of `POST /autocomplete`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AutocompleteRequest<'a> {
    pub subject: &'a str,
    pub text_so_far: &'a str,
}

impl<'a> From<&'a SuggestionRequest> for AutocompleteRequest<'a> {
    fn from(request: &'a SuggestionRequest) -> Self {
        Self {
            subject: &request.context,
            text_so_far: &request.prefix,
        }
    }
}

/// Body of a successful `/autocomplete` response. A missing field means no suggestion.
#[derive(Deserialize, Debug, Default)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Trim a raw suggestion; whitespace-only collapses to empty.
pub fn normalize_suggestion(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: the wire field names the suggestion service expects.
    #[test]
    fn test_autocomplete_request_serialization() {
        let request = SuggestionRequest::new("Meeting", "Hello ");
        let serialized = serde_json::to_string(&AutocompleteRequest::from(&request)).unwrap();
        assert_eq!(serialized, r#"{"subject":"Meeting","text_so_far":"Hello "}"#);
    }

    #[test]
    fn test_autocomplete_response_missing_field() {
        let response: AutocompleteResponse = serde_json::from_str("{}").unwrap();
        assert!(response.suggestion.is_none());
    }

    #[test]
    fn test_autocomplete_response_ignores_extra_fields() {
        let response: AutocompleteResponse =
            serde_json::from_str(r#"{"suggestion":"there","model":"t5"}"#).unwrap();
        assert_eq!(response.suggestion.as_deref(), Some("there"));
    }

    macro_rules! test_normalize_rules {
        ( $($name:ident: $input:expr => $expected:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(normalize_suggestion($input), $expected);
                }
            )+
        };
    }

    test_normalize_rules! {
        test_normalize_plain: "there" => "there",
        test_normalize_surrounding_space: "  how are you \n" => "how are you",
        test_normalize_whitespace_only: " \t\n" => "",
        test_normalize_inner_space_kept: "see  you" => "see  you",
    }
}
