/// Phrases that mark a message as wanting fresh information from the web.
///
/// Matching is plain substring containment, so short entries such as "now"
/// or "when" also fire inside longer words ("know", "whenever").
pub const SEARCH_KEYWORDS: [&str; 17] = [
    "search",
    "look up",
    "find",
    "what is",
    "who is",
    "when",
    "where",
    "current",
    "latest",
    "recent",
    "news",
    "today",
    "now",
    "information about",
    "tell me about",
    "explain",
    "definition of",
];

pub fn needs_web_search(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SEARCH_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
