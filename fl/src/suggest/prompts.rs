//! Prompt text for the suggestion service

/// System prompt for breaking a task into steps
pub const BREAK_DOWN_SYSTEM: &str = "You are a helpful assistant that breaks down tasks.";

/// System prompt for getting past a blocker
pub const RESOLVE_BLOCK_SYSTEM: &str = "You are a helpful assistant that resolves blocks.";

/// User prompt asking for 3-5 smaller steps
pub fn break_down(title: &str, description: &str) -> String {
    format!(
        r#"You are an executive function assistant. The user is overwhelmed by the task: "{title}".
Description: "{description}"

Break this task down into 3-5 smaller, manageable steps.
Return ONLY JSON: an array of objects with "title" and "description" keys.
Example:
[
    {{"title": "Get the vacuum", "description": "Bring it to the room"}},
    {{"title": "Clear the floor", "description": "Pick up large items"}}
]"#
    )
}

/// User prompt asking for 2-4 steps around a stated blocker
pub fn resolve_block(title: &str, reason: &str, language: &str) -> String {
    format!(
        r#"You are an executive function assistant. The user is blocked on the task: "{title}".
The user says: "{reason}"

Provide 2-4 concrete, small steps to resolve this specific blocker and get back on track.
Reply in {language}.
Return ONLY JSON: an array of objects with "title" and "description" keys."#
    )
}
