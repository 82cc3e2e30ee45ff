//! Prompt authoring for the reasoning oracle
//!
//! Two prompts exist: the per-turn decision prompt and the novelty
//! judgment used by the knowledge gate. Both demand strict JSON output
//! so the gateway validators can check structure rather than prose.

/// Render the knowledge entries as a bullet list, or a placeholder
fn knowledge_listing(entries: &[String]) -> String {
    if entries.is_empty() {
        "None yet.".to_string()
    } else {
        entries
            .iter()
            .map(|entry| format!("- {entry}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build the per-turn decision prompt
///
/// Returns `(system_prompt, user_content)`.
pub fn decision(
    long_term_goal: &str,
    short_term_goal: &str,
    knowledge: &[String],
    recent_history: &[String],
    server_text: &str,
) -> (String, String) {
    let system_prompt = format!(
        "You are a network protocol expert operating as an autonomous agent.\n\
         Your long-term goal: {long_term_goal}\n\
         Your short-term goal: {short_term_goal}\n\
         \n\
         Current knowledge base (already persisted):\n\
         {knowledge}\n\
         \n\
         Interaction history (client -> server):\n\
         {history}\n\
         \n\
         The server's last output was: \"{server_text}\"\n\
         \n\
         Your tasks:\n\
         1. Analyze the server's response.\n\
         2. Infer new knowledge about the protocol (state transitions, commands, errors).\n\
         3. Judge whether the current goals are met or need revising. Revise the \
         long-term goal only with strong reason; it should change rarely.\n\
         4. If the short-term goal keeps failing, set a different short-term goal.\n\
         5. Choose the next payload to send in service of both goals.\n\
         \n\
         Knowledge base update rules:\n\
         - Record the world as thoroughly as possible: new locations, items, NPCs, \
         command effects, error feedback, plot hints, mechanics.\n\
         - Leave new_knowledge empty only when the information is a pure repeat of \
         the knowledge base or entirely meaningless.\n\
         - Any verified username/password combination is always worth recording, \
         formatted as: username: <username>, password: <password>.\n\
         \n\
         Respond strictly in this JSON format:\n\
         {{\n\
             \"analysis\": \"your reasoning...\",\n\
             \"new_knowledge\": \"proposed new knowledge, or empty\",\n\
             \"long_term_goal\": \"the updated long-term goal\",\n\
             \"short_term_goal\": \"the updated short-term goal\",\n\
             \"next_payload\": \"the exact string to send next\"\n\
         }}",
        knowledge = knowledge_listing(knowledge),
        history = recent_history.join("\n"),
    );

    let user_content =
        format!("The server said: {server_text}. What is your next move?");

    (system_prompt, user_content)
}

/// Build the novelty judgment prompt for a knowledge candidate
///
/// Returns `(system_prompt, user_content)`.
pub fn novelty_judgment(knowledge: &[String], candidate: &str) -> (String, String) {
    let system_prompt = format!(
        "You are a knowledge base curator. Decide whether the proposed entry adds \
         real information to the existing knowledge base.\n\
         \n\
         Existing knowledge base:\n\
         {knowledge}\n\
         \n\
         Proposed new entry:\n\
         \"{candidate}\"\n\
         \n\
         Criteria:\n\
         1. If the entry is an exact repeat of existing knowledge or meaningless \
         filler, answer NO.\n\
         2. Answer YES if it carries any of: a new location, item, or NPC detail; \
         a command's observed effect or a specific error message; a plot or quest \
         hint; any valid detail absent from the knowledge base.\n\
         3. Prefer thoroughness: do not worry about entries being too small, as \
         long as they are new and real.\n\
         \n\
         Respond strictly in this JSON format:\n\
         {{\n\
             \"decision\": \"YES\" or \"NO\"\n\
         }}",
        knowledge = knowledge_listing(knowledge),
    );

    (system_prompt, "Please judge.".to_string())
}
