//! Response Shaping
//!
//! Maps raw provider replies onto the stable JSON contract returned to callers.

use crate::{
    error::{ErrorKind, TutorError},
    profile::StudentProfile,
    prompt::RequestKind,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Answers longer than this many characters count as plausible.
///
/// This is a placeholder: there is no semantic grading behind `correct`.
pub const PLAUSIBLE_ANSWER_MIN_CHARS: usize = 5;

/// Raw text returned by the generative model for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    pub text: String,
}

impl ModelReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
}

/// The success payload of a tutor operation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TutorReply {
    Profile {
        profile: StudentProfile,
    },
    Explanation {
        explanation: String,
    },
    Question {
        question: String,
    },
    Feedback {
        feedback: String,
        correct: bool,
    },
    Combined {
        explanation: String,
        question: String,
    },
    Audio {
        #[serde(rename = "audioBase64")]
        audio_base64: String,
        format: AudioFormat,
    },
}

/// The outbound contract: `{"success": true, ..}` or `{"success": false, "error", "kind"}`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TutorResponse {
    Success {
        success: bool,
        #[serde(flatten)]
        reply: TutorReply,
    },
    Failure {
        success: bool,
        error: String,
        kind: ErrorKind,
    },
}

impl TutorResponse {
    pub fn success(reply: TutorReply) -> Self {
        TutorResponse::Success {
            success: true,
            reply,
        }
    }

    pub fn failure(err: &TutorError) -> Self {
        TutorResponse::Failure {
            success: false,
            error: err.to_string(),
            kind: err.kind(),
        }
    }

    /// The failure classification, or `None` on success.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            TutorResponse::Success { .. } => None,
            TutorResponse::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<Result<TutorReply, TutorError>> for TutorResponse {
    fn from(result: Result<TutorReply, TutorError>) -> Self {
        match result {
            Ok(reply) => TutorResponse::success(reply),
            Err(err) => TutorResponse::failure(&err),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseShaper;

impl ResponseShaper {
    /// Wraps model replies under the fields of `kind`.
    ///
    /// `answer` is the student's answer and is only read for feedback.
    pub fn shape(
        &self,
        kind: RequestKind,
        replies: Vec<ModelReply>,
        answer: Option<&str>,
    ) -> Result<TutorReply, TutorError> {
        let expected = kind.parts().len();
        if replies.len() != expected {
            return Err(TutorError::Internal(format!(
                "Expected {} model replies for '{}', got {}",
                expected,
                kind,
                replies.len()
            )));
        }
        let mut texts = replies.into_iter().map(|r| r.text);
        // The length check above guarantees the iterator holds `expected` items.
        let mut next = || texts.next().unwrap_or_default();

        let reply = match kind {
            RequestKind::Explanation => TutorReply::Explanation {
                explanation: next(),
            },
            RequestKind::Question => TutorReply::Question { question: next() },
            RequestKind::Feedback => {
                let answer = answer.ok_or_else(|| {
                    TutorError::Internal("Feedback shaping requires the student's answer".into())
                })?;
                TutorReply::Feedback {
                    feedback: next(),
                    correct: is_plausible_answer(answer),
                }
            }
            RequestKind::Combined => {
                let explanation = next();
                let question = next();
                TutorReply::Combined {
                    explanation,
                    question,
                }
            }
        };
        Ok(reply)
    }

    /// Base64-encodes synthesized speech for transport.
    pub fn shape_audio(&self, audio: &[u8]) -> TutorReply {
        TutorReply::Audio {
            audio_base64: base64::engine::general_purpose::STANDARD.encode(audio),
            format: AudioFormat::Mp3,
        }
    }
}

/// Length-only stand-in for grading: more than [`PLAUSIBLE_ANSWER_MIN_CHARS`] characters.
pub fn is_plausible_answer(answer: &str) -> bool {
    answer.chars().count() > PLAUSIBLE_ANSWER_MIN_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn replies(texts: &[&str]) -> Vec<ModelReply> {
        texts.iter().map(|t| ModelReply::new(*t)).collect()
    }

    #[test]
    fn test_plausible_answer_threshold() {
        assert!(!is_plausible_answer("ok"));
        assert!(!is_plausible_answer("12345"));
        assert!(is_plausible_answer("123456"));
        assert!(is_plausible_answer("the answer is four"));
        // Counts characters, not bytes.
        assert!(!is_plausible_answer("ñññññ"));
    }

    #[test]
    fn test_shape_single_kinds() {
        let shaper = ResponseShaper;
        assert_eq!(
            shaper
                .shape(RequestKind::Explanation, replies(&["Think of a pizza"]), None)
                .unwrap(),
            TutorReply::Explanation {
                explanation: "Think of a pizza".to_string()
            }
        );
        assert_eq!(
            shaper
                .shape(RequestKind::Question, replies(&["What is 1/2 x 1/2?"]), None)
                .unwrap(),
            TutorReply::Question {
                question: "What is 1/2 x 1/2?".to_string()
            }
        );
    }

    #[test]
    fn test_shape_feedback_applies_heuristic() {
        let shaper = ResponseShaper;
        let short = shaper
            .shape(RequestKind::Feedback, replies(&["Nice try"]), Some("ok"))
            .unwrap();
        assert_eq!(
            short,
            TutorReply::Feedback {
                feedback: "Nice try".to_string(),
                correct: false
            }
        );

        let long = shaper
            .shape(
                RequestKind::Feedback,
                replies(&["Great save!"]),
                Some("the answer is four"),
            )
            .unwrap();
        assert!(matches!(long, TutorReply::Feedback { correct: true, .. }));
    }

    #[test]
    fn test_shape_feedback_without_answer_is_internal() {
        let err = ResponseShaper
            .shape(RequestKind::Feedback, replies(&["Nice"]), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_shape_combined_keeps_order() {
        let reply = ResponseShaper
            .shape(
                RequestKind::Combined,
                replies(&["explanation text", "question text"]),
                None,
            )
            .unwrap();
        let json = serde_json::to_value(TutorResponse::success(reply)).unwrap();
        assert_eq!(
            json,
            json!({
                "success": true,
                "explanation": "explanation text",
                "question": "question text"
            })
        );
    }

    #[test]
    fn test_shape_rejects_wrong_reply_count() {
        let err = ResponseShaper
            .shape(RequestKind::Combined, replies(&["only one"]), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);

        let err = ResponseShaper
            .shape(RequestKind::Question, vec![], None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_shape_audio_encodes_bytes() {
        let bytes = vec![0x49u8, 0x44, 0x33, 0x04, 0x00, 0xff];
        let reply = ResponseShaper.shape_audio(&bytes);
        let json = serde_json::to_value(TutorResponse::success(reply)).unwrap();

        assert_eq!(json["format"], "mp3");
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(json["audioBase64"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_failure_serialization() {
        let response = TutorResponse::failure(&TutorError::Validation("Missing text".into()));
        assert_eq!(response.error_kind(), Some(ErrorKind::Validation));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": false, "error": "Missing text", "kind": "validation"})
        );
    }

    #[test]
    fn test_from_result() {
        let ok: TutorResponse = Ok(TutorReply::Question {
            question: "q".into(),
        })
        .into();
        assert_eq!(ok.error_kind(), None);

        let err: TutorResponse = Err(TutorError::Upstream("quota".into())).into();
        assert_eq!(err.error_kind(), Some(ErrorKind::UpstreamFailure));
    }
}
