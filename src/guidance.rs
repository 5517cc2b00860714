//! Mood and food suggestions shown next to the current phase.

use crate::models::{FoodSuggestion, Phase, PhaseGuide};

const fn food(name: &'static str, benefit: &'static str) -> FoodSuggestion {
    FoodSuggestion { name, benefit }
}

pub fn guidance(phase: Phase) -> PhaseGuide {
    let (title, description, affirmation, foods) = match phase {
        Phase::Menstrual => (
            "Rest & Restore",
            "Take it easy, practice self-care",
            "Your body is doing incredible work. Rest is productive.",
            [
                food("Dark Chocolate", "Boosts mood"),
                food("Leafy Greens", "Iron-rich"),
                food("Bananas", "Reduces cramps"),
                food("Nuts & Seeds", "Magnesium"),
            ],
        ),
        Phase::Follicular => (
            "Energized & Creative",
            "Great time for new projects",
            "You are full of potential and creative energy.",
            [
                food("Avocado", "Healthy fats"),
                food("Eggs", "Protein boost"),
                food("Fresh Salads", "Light & energizing"),
                food("Citrus Fruits", "Vitamin C"),
            ],
        ),
        Phase::Ovulation => (
            "Peak Energy",
            "You're at your strongest",
            "You are powerful, confident, and unstoppable.",
            [
                food("Salmon", "Omega-3"),
                food("Strawberries", "Antioxidants"),
                food("Cucumber", "Hydrating"),
                food("Watermelon", "Refreshing"),
            ],
        ),
        Phase::Luteal => (
            "Wind Down",
            "Focus on comfort and calm",
            "You deserve comfort, rest, and gentle care.",
            [
                food("Sweet Potato", "Complex carbs"),
                food("Yogurt", "Calcium"),
                food("Chicken", "Lean protein"),
                food("Potatoes", "Comfort food"),
            ],
        ),
    };

    PhaseGuide {
        phase,
        title,
        description,
        affirmation,
        foods: foods.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_phase_has_four_foods() {
        for phase in Phase::ALL {
            let guide = guidance(phase);
            assert_eq!(guide.phase, phase);
            assert_eq!(guide.foods.len(), 4);
            assert!(!guide.title.is_empty());
        }
    }

    #[test]
    fn menstrual_guide_suggests_rest() {
        let guide = guidance(Phase::Menstrual);
        assert_eq!(guide.title, "Rest & Restore");
        assert_eq!(guide.foods[2].name, "Bananas");
    }
}
