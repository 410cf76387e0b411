//! Prompt builder: short system message + compact context block.

use doc_index::RetrievedChunk;

/// Default system instructions for document-grounded answers.
///
/// Keep this short: it consistently improves steering without wasting tokens.
pub const DEFAULT_SYSTEM: &str = r#"
You answer questions about one uploaded document. Be concise and cite page numbers when relevant.
Use the provided context as ground truth; if it is insufficient, say so.
"#;

/// Character budget for the context block of a single prompt.
pub const DEFAULT_MAX_CTX_CHARS: usize = 6000;

/// Builds the final user prompt: the question plus a labeled context
/// section compacted to `max_chars`, preserving ranking order.
pub fn build_user_prompt(question: &str, chunks: &[RetrievedChunk], max_chars: usize) -> String {
    let mut out = String::new();
    out.push_str("Question:\n");
    out.push_str(question.trim());
    out.push_str("\n\n");

    if !chunks.is_empty() {
        out.push_str("Context (top-ranked):\n");
        let mut budget = max_chars;

        for (i, chunk) in chunks.iter().enumerate() {
            let header = format!("==[{}]== page {} (score {:.3})\n", i + 1, chunk.page, chunk.score);
            let text = chunk.text.trim();

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
        out.push_str("Answer using only the context above when possible.\n");
    }

    out
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

    fn chunk(page: u32, score: f32, text: &str) -> RetrievedChunk {
        RetrievedChunk {
            score,
            page,
            text: text.into(),
        }
    }

    #[test]
    fn prompt_keeps_ranking_order() {
        let chunks = vec![chunk(4, 0.91, "first"), chunk(2, 0.77, "second")];
        let prompt = build_user_prompt("What is this about?", &chunks, 2000);

        assert!(prompt.starts_with("Question:\nWhat is this about?"));
        let p1 = prompt.find("page 4").unwrap();
        let p2 = prompt.find("page 2").unwrap();
        assert!(p1 < p2);
    }

    #[test]
    fn no_context_yields_bare_question() {
        let prompt = build_user_prompt("hello?", &[], 2000);
        assert!(prompt.contains("Question:"));
        assert!(!prompt.contains("Context"));
    }

    #[test]
    fn budget_truncates_long_context() {
        let chunks = vec![chunk(1, 0.9, &"x".repeat(5000))];
        let prompt = build_user_prompt("q", &chunks, 200);
        assert!(prompt.len() < 400);
        assert!(prompt.contains('…'));
    }
}
