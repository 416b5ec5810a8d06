//! Prompt builders: answer synthesis and query structuring.

use article_store::Article;

use crate::memory::ConversationWindow;

/// Default system instructions for answer synthesis.
///
/// Keep this short: it consistently improves steering without wasting tokens.
pub const ANSWER_SYSTEM: &str = r#"
You answer questions about encyclopedia articles. Use the provided context as
ground truth; if it does not contain the answer, say you do not know.
"#;

/// System instructions for the query structuring call.
pub const STRUCTURE_SYSTEM: &str =
    "You split raw user input into a question and an answer language.";

/// Format instructions appended to the structuring prompt. The model must
/// return exactly this JSON shape; anything else fails schema validation.
pub const FORMAT_INSTRUCTIONS: &str = r#"Return a JSON object with exactly two string fields:
{"question": "<the question, without the language directive>", "language": "<the requested language, empty if none>"}
Return only the JSON object, no prose."#;

/// Default character budget for the rendered context block.
pub const DEFAULT_MAX_CTX_CHARS: usize = 8000;

/// Builds the user prompt for answer synthesis.
///
/// The context is compacted into at most `max_chars`, preserving the ranking
/// order. For each article it shows a header with title and URL, then the
/// article text. The closing line carries the answer-language directive.
pub fn build_answer_prompt(
    question: &str,
    language: &str,
    articles: &[Article],
    max_chars: usize,
) -> String {
    let mut out = String::new();

    if !articles.is_empty() {
        out.push_str("Context (top-ranked):\n");
        let mut budget = max_chars;

        for (i, a) in articles.iter().enumerate() {
            let header = format!(
                "==[{}]== {} :: {} (distance {:.3})\n",
                i + 1,
                a.title,
                a.url,
                a.distance
            );
            let text = a.text.trim();

            // stop if we exceed budget
            if header.len() >= budget {
                break;
            }
            out.push_str(&header);
            budget -= header.len();

            let take = budget.saturating_sub(2);
            if text.len() > take {
                out.push_str(safe_truncate(text, take));
                out.push_str("\n…\n");
                break;
            } else {
                out.push_str(text);
                out.push('\n');
                budget -= text.len() + 1;
            }
        }
        out.push('\n');
    }

    out.push_str("Question:\n");
    out.push_str(question.trim());
    out.push_str("\n\n");
    out.push_str(&format!(
        "Answer using only the context above when possible. Answer in {}.\n",
        language
    ));

    out
}

/// Builds the conversational variant: the bounded history is rendered ahead
/// of the context so the model can resolve follow-up references.
pub fn build_conversational_prompt(
    question: &str,
    language: &str,
    articles: &[Article],
    history: &ConversationWindow,
    max_chars: usize,
) -> String {
    if history.is_empty() {
        return build_answer_prompt(question, language, articles, max_chars);
    }

    let mut out = String::from("Previous conversation:\n");
    for (q, a) in history.turns() {
        out.push_str("User: ");
        out.push_str(q.trim());
        out.push('\n');
        out.push_str("Assistant: ");
        out.push_str(a.trim());
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&build_answer_prompt(question, language, articles, max_chars));
    out
}

/// Builds the query structuring prompt around the raw user input.
pub fn build_structure_prompt(raw: &str) -> String {
    format!(
        "Take the user input which contains a question and a language to return results in, \
         and extract the question and language. The extracted question must not contain the \
         language directive.\n{}\n{}\n",
        FORMAT_INSTRUCTIONS,
        raw.trim()
    )
}

fn safe_truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        let mut end = max;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, text: &str) -> Article {
        Article {
            title: title.into(),
            url: format!("https://example.org/{title}"),
            text: text.into(),
            views: 10,
            lang: "en".into(),
            distance: 0.2,
        }
    }

    #[test]
    fn answer_prompt_has_context_question_and_language() {
        let docs = vec![doc("Paris", "Paris is the capital of France.")];
        let p = build_answer_prompt("What is the capital of France?", "french", &docs, 4000);
        assert!(p.contains("==[1]== Paris"));
        assert!(p.contains("Question:\nWhat is the capital of France?"));
        assert!(p.contains("Answer in french."));
    }

    #[test]
    fn language_defaults_flow_through() {
        let p = build_answer_prompt("q", "english", &[], 4000);
        assert!(p.contains("Answer in english."));
        assert!(!p.contains("Context"));
    }

    #[test]
    fn context_respects_char_budget() {
        let docs = vec![doc("Long", &"x".repeat(10_000)), doc("Next", "short")];
        let p = build_answer_prompt("q", "english", &docs, 500);
        // The second article never makes it in, and the block is truncated.
        assert!(!p.contains("==[2]=="));
        assert!(p.contains('…'));
        assert!(p.len() < 1_000);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let s = "héllo wörld";
        for max in 0..s.len() {
            let t = safe_truncate(s, max);
            assert!(t.len() <= max);
        }
    }

    #[test]
    fn history_is_rendered_before_context() {
        let mut window = ConversationWindow::default();
        window.push("Who wrote Hamlet?".into(), "Shakespeare.".into());
        let docs = vec![doc("Hamlet", "Hamlet is a tragedy.")];
        let p = build_conversational_prompt("When was he born?", "english", &docs, &window, 4000);
        let conv = p.find("Previous conversation:").unwrap();
        let ctx = p.find("Context (top-ranked):").unwrap();
        assert!(conv < ctx);
        assert!(p.contains("User: Who wrote Hamlet?"));
        assert!(p.contains("Assistant: Shakespeare."));
    }

    #[test]
    fn empty_history_falls_back_to_stateless_prompt() {
        let window = ConversationWindow::default();
        let p = build_conversational_prompt("q", "english", &[], &window, 4000);
        assert!(!p.contains("Previous conversation:"));
    }

    #[test]
    fn structure_prompt_embeds_format_and_input() {
        let p = build_structure_prompt("What is the capital of France? Respond in French");
        assert!(p.contains("\"question\""));
        assert!(p.contains("Respond in French"));
    }
}
