//! LLM prompts for role extraction and retrieval answers

/// Default role extraction instruction
pub const DEFAULT_ROLE_PROMPT: &str = "List all the job roles or titles mentioned in the following document. \
Provide a comma-separated list of unique roles. If no roles are found, respond with 'None'.";

const TABLE_KEYWORDS: [&str; 4] = ["table", "count", "number of", "how many"];

/// Role extraction prompt: the instruction followed by the full document
pub fn role_extraction_prompt(template: &str, document_text: &str) -> String {
    format!("{}\n\nDocument Content:\n{}", template, document_text)
}

/// True when the question asks about tables or counts
pub fn is_table_question(question: &str) -> bool {
    let lowered = question.to_lowercase();
    TABLE_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

/// Prompt answering `question` from retrieved document excerpts
///
/// Questions about tables or counts steer the model towards structured data
/// and exact numbers.
pub fn answer_prompt(question: &str, context: &str) -> String {
    if is_table_question(question) {
        format!(
            "Based on the following document excerpts, specifically focus on any tables or structured lists \
to answer the question: '{}'. If exact numbers are provided, use them. \
If no relevant table or count is found, state that.\n\n\
Document Excerpts:\n{}\n\nAnswer:",
            question, context
        )
    } else {
        format!(
            "Based on the following document excerpts, answer the question: '{}'.\n\n\
Document Excerpts:\n{}\n\nAnswer:",
            question, context
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_prompt_layout() {
        let prompt = role_extraction_prompt("List roles.", "Alice is a Data Analyst.");
        assert_eq!(prompt, "List roles.\n\nDocument Content:\nAlice is a Data Analyst.");
    }

    #[test]
    fn test_default_prompt_mentions_none() {
        assert!(DEFAULT_ROLE_PROMPT.contains("comma-separated"));
        assert!(DEFAULT_ROLE_PROMPT.contains("'None'"));
    }

    #[test]
    fn test_table_question_detection() {
        assert!(is_table_question("How many engineers are there?"));
        assert!(is_table_question("What is the NUMBER OF managers"));
        assert!(is_table_question("Show the staffing table"));
        assert!(is_table_question("headcount per role"));
        assert!(!is_table_question("Who leads the project?"));
    }

    #[test]
    fn test_answer_prompt_variants() {
        let table = answer_prompt("How many analysts?", "ctx");
        assert!(table.contains("tables or structured lists"));
        assert!(table.contains("'How many analysts?'"));
        assert!(table.ends_with("Document Excerpts:\nctx\n\nAnswer:"));

        let plain = answer_prompt("Who is the manager?", "ctx");
        assert!(!plain.contains("structured lists"));
        assert!(plain.starts_with("Based on the following document excerpts, answer the question: 'Who is the manager?'."));
    }
}
