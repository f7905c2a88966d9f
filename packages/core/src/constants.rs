/// Number of gift ideas requested per generation call unless configured otherwise
pub const DEFAULT_IDEA_COUNT: usize = 3;

/// Upper bound for the configurable idea count
pub const MAX_IDEA_COUNT: usize = 10;

/// The five love languages offered by the preference form
pub const LOVE_LANGUAGES: [&str; 5] = [
    "Words of Affirmation",
    "Acts of Service",
    "Receiving Gifts",
    "Quality Time",
    "Physical Touch",
];
