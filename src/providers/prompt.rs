/// The system prompt sent with every recipe request.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax.
pub const CHEF_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Build the user turn listing the ingredients on hand.
pub fn build_user_message(ingredients: &[String]) -> String {
    format!(
        "I have {}. Please give me a recipe you'd recommend I make!",
        ingredients.join(", ")
    )
}
