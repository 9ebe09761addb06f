//! Canned prompt shortcuts shown on an empty conversation.
//!
//! Picking one fills the input box with the prompt text and focuses it; the
//! user still presses send themselves.

/// A suggested prompt card.
#[derive(Debug, Clone, Copy)]
pub struct SuggestedPrompt {
    pub title: &'static str,
    pub prompt: &'static str,
    pub description: &'static str,
}

pub const SUGGESTED_PROMPTS: [SuggestedPrompt; 4] = [
    SuggestedPrompt {
        title: "Find a Recipe by Ingredients",
        prompt: "What can I make with chicken, spinach, and feta cheese?",
        description: "List ingredients you have on hand",
    },
    SuggestedPrompt {
        title: "Get Nutritional Information",
        prompt: "What's the nutritional value of a slice of avocado toast?",
        description: "Ask about calories, protein, etc.",
    },
    SuggestedPrompt {
        title: "Meal Planning Help",
        prompt: "Create a 5-day meal plan for a family of four with a focus on Mediterranean cuisine.",
        description: "Specify dietary preferences",
    },
    SuggestedPrompt {
        title: "Find Similar Recipes",
        prompt: "I love chicken parmesan. What are some similar dishes I could try?",
        description: "Discover related recipes",
    },
];
