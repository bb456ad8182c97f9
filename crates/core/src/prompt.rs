//! Deterministic prompt assembly.
//!
//! Pure string composition: no I/O, no clock, no randomness. Sections are
//! joined by one blank line in a fixed order; empty memory and zero
//! excerpts skip their sections entirely.

use std::borrow::Cow;

/// Excerpts longer than this are cut before inclusion, purely to bound
/// prompt size. Ordering and numbering are unaffected.
pub const MAX_EXCERPT_CHARS: usize = 2000;

const ELLIPSIS: &str = "...";

const SYSTEM_INSTRUCTION: &str = "You are an AI assistant. Answer the user's question using only the \
     provided context. If the context is not sufficient to answer, say \
     \"I don't know\" and suggest what additional information or documents \
     would help.";

const CLOSING_INSTRUCTION: &str =
    "Answer the question above. When your answer uses an excerpt, cite it by its number.";

/// Composes the full prompt for one turn.
///
/// Section order: system instruction, optional conversation memory,
/// optional ranked excerpts (`[EXCERPT i]`, 1-based, input order), the
/// user question, closing citation instruction.
pub fn build_prompt(excerpts: &[String], memory: &str, query: &str) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(5);

    sections.push(SYSTEM_INSTRUCTION.to_string());

    if !memory.is_empty() {
        sections.push(format!("Conversation Memory:\n{memory}"));
    }

    if !excerpts.is_empty() {
        let mut block = String::from("Relevant Document Excerpts:");
        for (position, excerpt) in excerpts.iter().enumerate() {
            block.push_str("\n[EXCERPT ");
            block.push_str(&(position + 1).to_string());
            block.push_str("] ");
            block.push_str(&truncate_excerpt(excerpt));
        }
        sections.push(block);
    }

    sections.push(format!("User Question:\n{query}"));
    sections.push(CLOSING_INSTRUCTION.to_string());

    sections.join("\n\n")
}

fn truncate_excerpt(text: &str) -> Cow<'_, str> {
    if text.chars().count() <= MAX_EXCERPT_CHARS {
        Cow::Borrowed(text)
    } else {
        let mut truncated: String = text.chars().take(MAX_EXCERPT_CHARS).collect();
        truncated.push_str(ELLIPSIS);
        Cow::Owned(truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_yield_byte_identical_prompts() {
        let excerpts = vec!["alpha".to_string(), "beta".to_string()];
        let first = build_prompt(&excerpts, "user: hi\nassistant: hello", "what is alpha?");
        let second = build_prompt(&excerpts, "user: hi\nassistant: hello", "what is alpha?");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_memory_omits_the_memory_section() {
        let prompt = build_prompt(&["alpha".to_string()], "", "q");
        assert!(!prompt.contains("Conversation Memory"));
    }

    #[test]
    fn zero_excerpts_omit_the_excerpt_section() {
        let prompt = build_prompt(&[], "user: hi", "q");
        assert!(!prompt.contains("Relevant Document Excerpts"));
        assert!(!prompt.contains("[EXCERPT"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let prompt = build_prompt(&["alpha".to_string()], "user: hi", "what is alpha?");

        let memory_at = prompt.find("Conversation Memory:").expect("memory section");
        let excerpts_at = prompt
            .find("Relevant Document Excerpts:")
            .expect("excerpt section");
        let question_at = prompt.find("User Question:").expect("question section");
        let closing_at = prompt
            .find("cite it by its number")
            .expect("closing instruction");

        assert!(memory_at < excerpts_at);
        assert!(excerpts_at < question_at);
        assert!(question_at < closing_at);
        assert!(prompt.contains("User Question:\nwhat is alpha?"));
    }

    #[test]
    fn excerpts_are_numbered_from_one_in_input_order() {
        let excerpts = vec!["first".to_string(), "second".to_string()];
        let prompt = build_prompt(&excerpts, "", "q");
        assert!(prompt.contains("[EXCERPT 1] first"));
        assert!(prompt.contains("[EXCERPT 2] second"));
    }

    #[test]
    fn excerpt_at_the_limit_is_included_verbatim() {
        let excerpt = "x".repeat(MAX_EXCERPT_CHARS);
        let prompt = build_prompt(&[excerpt.clone()], "", "q");
        assert!(prompt.contains(&excerpt));
        assert!(!prompt.contains(&format!("{}{}", "x".repeat(MAX_EXCERPT_CHARS), "...")));
    }

    #[test]
    fn excerpt_over_the_limit_is_cut_with_an_ellipsis() {
        let excerpt = "x".repeat(MAX_EXCERPT_CHARS + 1);
        let prompt = build_prompt(&[excerpt], "", "q");

        let expected = format!("{}{}", "x".repeat(MAX_EXCERPT_CHARS), "...");
        assert!(prompt.contains(&expected));
        assert!(!prompt.contains(&"x".repeat(MAX_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn truncation_does_not_renumber_later_excerpts() {
        let excerpts = vec!["y".repeat(MAX_EXCERPT_CHARS + 100), "short".to_string()];
        let prompt = build_prompt(&excerpts, "", "q");
        assert!(prompt.contains("[EXCERPT 2] short"));
    }
}
