//! Boundary types for the external grammar processor and the response
//! shapes the arc-diagram page consumes.
//!
//! The processor is a black box reached through [`GrammarService`]; this
//! module only models its replies and assembles them into view responses.
//! Nothing here retries or de-duplicates: a resubmitted sentence simply
//! produces a fresh response and the page shows whichever arrived last.

use serde::{Deserialize, Serialize};

use crate::dmrs;
use crate::ir::Graph;
use crate::parser::{self, MrsParseError};

/// Raw reply of the parse processor, wire names preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserReply {
    #[serde(rename = "NOTES", default)]
    pub notes: Vec<String>,
    #[serde(rename = "WARNINGS", default)]
    pub warnings: Vec<String>,
    #[serde(rename = "ERRORS", default)]
    pub errors: Vec<String>,
    #[serde(rename = "SENT", default)]
    pub sent: Option<String>,
    #[serde(rename = "RESULTS", default)]
    pub results: Vec<ParserResult>,
}

/// One reading: the MRS in SimpleMRS text plus its derivation string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserResult {
    #[serde(rename = "MRS")]
    pub mrs: String,
    #[serde(rename = "DERIV", default)]
    pub deriv: String,
}

/// Raw reply of the realization processor, wire names preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorReply {
    #[serde(rename = "NOTE", default)]
    pub note: Option<String>,
    #[serde(rename = "WARNING", default)]
    pub warning: Option<String>,
    #[serde(rename = "ERROR", default)]
    pub error: Option<String>,
    #[serde(rename = "SENT", default)]
    pub sent: Option<String>,
    #[serde(rename = "RESULTS", default)]
    pub results: Vec<String>,
}

/// What the page receives for a parsed sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub sentence: String,
    pub result: ParseOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Processor notes joined into one status line.
    #[serde(rename = "NOTES")]
    pub notes: String,
    #[serde(rename = "RESULTS")]
    pub results: Vec<ParseResult>,
}

/// A graph document beside the canonical MRS text it was extracted from.
/// The page renders the graph and sends `mrs` back out for realization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(flatten)]
    pub graph: Graph,
    pub mrs: String,
}

/// What the page receives for a realization request. Empty `results` is a
/// valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "RESULTS")]
    pub results: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The processor failed or reported error text. Surfaced as status,
    /// never retried.
    #[error("grammar processor error: {0}")]
    Collaborator(String),
    #[error(transparent)]
    Mrs(#[from] MrsParseError),
}

/// The external grammar processor. Implementations own transport and
/// process management; tests supply a canned double.
pub trait GrammarService {
    fn parse(&self, sentence: &str) -> Result<ParserReply, ServiceError>;
    fn generate(&self, mrs: &str) -> Result<GeneratorReply, ServiceError>;
}

/// Turn a raw parse reply into the page response: each result's MRS is
/// read, its graph extracted, and the MRS re-serialized so the generate
/// round-trip sends canonical text.
pub fn build_parse_response(
    sentence: &str,
    reply: ParserReply,
) -> Result<ParseResponse, ServiceError> {
    if !reply.errors.is_empty() {
        let error = reply.errors.join("\n");
        if reply.results.is_empty() {
            return Err(ServiceError::Collaborator(error));
        }
        tracing::warn!("parse processor reported errors: {error}");
    }

    let mut results = Vec::with_capacity(reply.results.len());
    for result in &reply.results {
        let m = parser::parse_mrs(&result.mrs)?;
        results.push(ParseResult {
            graph: dmrs::extract(&m),
            mrs: parser::serialize_mrs(&m),
        });
    }
    Ok(ParseResponse {
        sentence: sentence.to_string(),
        result: ParseOutcome {
            notes: reply.notes.join("\n"),
            results,
        },
    })
}

/// Turn a raw generator reply into the page response. A `[0 results]`
/// note alongside realization lines means the processor printed error
/// text without an ERROR prefix; those lines become the error message.
pub fn build_generate_response(reply: GeneratorReply) -> Result<GenerateResponse, ServiceError> {
    if let Some(error) = reply.error {
        tracing::warn!("generator reported an error: {error}");
        return Err(ServiceError::Collaborator(error));
    }
    if let Some(note) = reply.note.as_deref()
        && note.ends_with("[0 results]")
        && !reply.results.is_empty()
    {
        let error = reply.results.join("\n");
        tracing::warn!("generator printed unprefixed error text: {error}");
        return Err(ServiceError::Collaborator(error));
    }
    Ok(GenerateResponse {
        results: reply.results,
    })
}

/// Parse a sentence through a service and assemble the page response.
pub fn parse_sentence<S: GrammarService>(
    service: &S,
    sentence: &str,
) -> Result<ParseResponse, ServiceError> {
    let reply = service.parse(sentence)?;
    build_parse_response(sentence, reply)
}

/// Realize an MRS through a service and assemble the page response.
pub fn generate_sentences<S: GrammarService>(
    service: &S,
    mrs: &str,
) -> Result<GenerateResponse, ServiceError> {
    let reply = service.generate(mrs)?;
    build_generate_response(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOG_SLEEPS: &str = "[ LTOP: h0 INDEX: e2 [ e SF: prop TENSE: pres ] \
        RELS: < \
        [ _the_q_rel<0:3> LBL: h4 ARG0: x3 RSTR: h5 BODY: h6 ] \
        [ _dog_n_1_rel<4:7> LBL: h7 ARG0: x3 [ x PERS: 3 NUM: sg ] ] \
        [ _sleep_v_1_rel<8:15> LBL: h1 ARG0: e2 ARG1: x3 ] > \
        HCONS: < h0 qeq h1 h5 qeq h7 > ]";

    struct Canned;

    impl GrammarService for Canned {
        fn parse(&self, _sentence: &str) -> Result<ParserReply, ServiceError> {
            Ok(ParserReply {
                notes: vec!["1 readings, added 10 edges".to_string()],
                results: vec![ParserResult {
                    mrs: DOG_SLEEPS.to_string(),
                    deriv: String::new(),
                }],
                ..ParserReply::default()
            })
        }

        fn generate(&self, _mrs: &str) -> Result<GeneratorReply, ServiceError> {
            Ok(GeneratorReply {
                note: Some("generated 1 sentence [1 results]".to_string()),
                results: vec!["The dog sleeps.".to_string()],
                ..GeneratorReply::default()
            })
        }
    }

    #[test]
    fn parser_reply_reads_the_wire_shape() {
        let raw = r#"{
            "NOTES": ["parsed 1 / 1 sentences"],
            "WARNINGS": [],
            "ERRORS": [],
            "SENT": "the dog sleeps",
            "RESULTS": [{"MRS": "[ LTOP: h0 RELS: < > HCONS: < > ]", "DERIV": "(root)"}]
        }"#;
        let reply: ParserReply = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.sent.as_deref(), Some("the dog sleeps"));
        assert_eq!(reply.results.len(), 1);
        assert_eq!(reply.results[0].deriv, "(root)");
    }

    #[test]
    fn parse_response_carries_graphs_and_canonical_mrs() {
        let response = parse_sentence(&Canned, "the dog sleeps").unwrap();
        assert_eq!(response.sentence, "the dog sleeps");
        assert_eq!(response.result.notes, "1 readings, added 10 edges");
        let result = &response.result.results[0];
        assert_eq!(result.graph.nodes.len(), 3);
        assert_eq!(result.graph.nodes[0].pred, "_the_q");
        assert!(result.graph.links[0].is_top());
        assert!(result.mrs.starts_with("[ TOP: h0"));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["result"]["RESULTS"][0]["nodes"][1]["pred"], "_dog_n_1");
        assert!(value["result"]["RESULTS"][0]["mrs"].is_string());
        assert_eq!(value["result"]["NOTES"], "1 readings, added 10 edges");
    }

    #[test]
    fn empty_parse_results_are_a_valid_outcome() {
        let reply = ParserReply {
            notes: vec!["0 readings".to_string()],
            ..ParserReply::default()
        };
        let response = build_parse_response("colorless ideas", reply).unwrap();
        assert!(response.result.results.is_empty());
        assert_eq!(response.result.notes, "0 readings");
    }

    #[test]
    fn processor_errors_surface_as_service_errors() {
        let reply = ParserReply {
            errors: vec!["exhausted chart memory".to_string()],
            ..ParserReply::default()
        };
        let err = build_parse_response("a very long sentence", reply).unwrap_err();
        match err {
            ServiceError::Collaborator(message) => {
                assert!(message.contains("exhausted chart memory"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_result_mrs_is_reported() {
        let reply = ParserReply {
            results: vec![ParserResult {
                mrs: "[ LTOP: h0 RELS: <".to_string(),
                deriv: String::new(),
            }],
            ..ParserReply::default()
        };
        let err = build_parse_response("the dog sleeps", reply).unwrap_err();
        assert!(matches!(err, ServiceError::Mrs(_)));
    }

    #[test]
    fn generation_round_trip() {
        let response = generate_sentences(&Canned, DOG_SLEEPS).unwrap();
        assert_eq!(response.results, vec!["The dog sleeps.".to_string()]);
    }

    #[test]
    fn zero_results_note_with_stray_lines_is_an_error() {
        let reply = GeneratorReply {
            note: Some("generated 0 sentences [0 results]".to_string()),
            results: vec!["no semantics for lexeme".to_string()],
            ..GeneratorReply::default()
        };
        let err = build_generate_response(reply).unwrap_err();
        match err {
            ServiceError::Collaborator(message) => {
                assert_eq!(message, "no semantics for lexeme")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_results_without_stray_lines_is_empty() {
        let reply = GeneratorReply {
            note: Some("generated 0 sentences [0 results]".to_string()),
            ..GeneratorReply::default()
        };
        let response = build_generate_response(reply).unwrap();
        assert!(response.results.is_empty());
    }
}
