use std::sync::LazyLock;

use regex::Regex;

/// Boilerplate prompts that close an ELA question stem, in priority order.
///
/// Patterns are case-insensitive; a literal space matches any whitespace run
/// so prompts wrapped across PDF lines still match. A pattern must cover the
/// whole tail of the question text from some line start to the end. A `.*?`
/// wildcard stands for words within one sentence: it never crosses `.`, `?`
/// or `!`, so a passage line that happens to open like a prompt cannot pull
/// the prose after it into the match.
const PROMPT_TABLE: &[(&str, &str)] = &[
    ("logical_completion", r"Which choice most logically completes the text\??"),
    ("logical_transition", r"Which choice completes the text with the most logical transition\??"),
    ("precise_word", r"Which choice completes the text with the most logical and precise word or phrase\??"),
    ("standard_english", r"Which choice completes the text so that it conforms to the conventions of Standard English\??"),
    ("word_meaning", r#"As used in the text, what does the word [“"].*?[”"] most nearly mean\??"#),
    ("main_idea_text", r"Which choice best states the main idea of the text\??"),
    ("main_idea_passage", r"Which choice best states the main idea of the passage\??"),
    ("primary_purpose", r"Which choice best describes the primary purpose of the text\??"),
    ("overall_structure", r"Which choice best describes the overall structure of the text\??"),
    ("underlined_function", r"Which choice best describes the function of the underlined (?:portion|sentence) in the text as a whole\??"),
    ("quotation_claim", r"Which quotation from .*? most effectively illustrates the claim\??"),
    ("graph_conclusion", r"Which choice best describes data from the (?:graph|table) that (?:support|supports|illustrate) .*? conclusion\??"),
    ("graph_completion", r"Which choice most effectively uses data from the graph to complete the .*?\?"),
    ("graph_interpretation", r"Which choice offers an accurate interpretation of the data in the graph\??"),
    ("finding_support", r"Which finding, if true, would most directly support .*? claim\??"),
    ("statement_support", r"Which statement, if true, would most strongly support the claim in the underlined sentence\??"),
    ("claim_support", r"Which choice most strongly supports the claim that .*?\?"),
    ("previous_evidence", r"Which choice provides the best evidence for the answer to the previous question\??"),
    ("texts_difference", r"Which choice best describes a difference in how the authors of Text 1 and Text 2 view .*?\?"),
    ("texts_similarity", r"Which choice best describes a similarity in how the authors of Text 1 and Text 2 view .*?\?"),
    ("texts_response", r"Based on the texts, how would the author of Text 2 most likely respond to the (?:underlined claim|assertion|assessment) .*?\?"),
    ("question_answered", r"Which question does the text most directly attempt to answer\??"),
    ("strongly_suggest", r"What does the text most strongly suggest about .*?\?"),
    ("notes_goal", r"Which choice most effectively uses (?:relevant )?information from the notes to accomplish this goal\??"),
    ("notes_emphasis", r"Which choice most effectively uses relevant information from the notes to (?:introduce|emphasize) .*?\?"),
    ("according_to", r"According to the text, .*?\?"),
    ("based_on", r"Based on the text, .*?\?"),
    ("purpose_fragment", r"The primary purpose of the text is to"),
];

struct PromptRule {
    name: &'static str,
    re: Regex,
}

const SENTENCE_WILDCARD: &str = r"[^.?!]*?";

static PROMPT_RULES: LazyLock<Vec<PromptRule>> = LazyLock::new(|| {
    PROMPT_TABLE
        .iter()
        .map(|&(name, pattern)| {
            let pattern = pattern.replace(' ', r"\s+").replace(".*?", SENTENCE_WILDCARD);
            PromptRule {
                name,
                re: Regex::new(&format!(r"(?i)\A\s*(?:{})\s*\z", pattern)).unwrap(),
            }
        })
        .collect()
});

/// Remove the trailing-most boilerplate prompt from a question stem.
///
/// Candidates are line starts scanned from the end, so the shortest matching
/// tail wins. The first line is never a candidate: a stem that is nothing but
/// a prompt is returned as-is rather than emptied.
pub fn strip_trailing_prompt(text: &str) -> String {
    let text = text.trim();
    let line_starts: Vec<usize> = text.match_indices('\n').map(|(i, _)| i + 1).collect();

    for &start in line_starts.iter().rev() {
        let tail = &text[start..];
        if let Some(rule) = PROMPT_RULES.iter().find(|r| r.re.is_match(tail)) {
            let head = text[..start].trim_end();
            if head.is_empty() {
                break;
            }
            tracing::trace!(prompt = rule.name, "stripped trailing prompt");
            return head.to_string();
        }
    }

    text.to_string()
}
