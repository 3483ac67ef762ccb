// DOM hooks and browser-facing tuning for the hero front-end.

// Markup contract: each clickable letter carries `data-hero-letter="<index>"`
pub const LETTER_ATTR: &str = "data-hero-letter";
pub const LETTER_SELECTOR: &str = "[data-hero-letter]";

// Inline styles stripped from managed elements on panic reset
pub const MANAGED_STYLE_PROPS: [&str; 5] = [
    "transform",
    "filter",
    "opacity",
    "will-change",
    "transition",
];

// Root class per visibility regime, for CSS-side dimming
pub const VISIBILITY_CLASSES: [&str; 3] = ["hero--full", "hero--reduced", "hero--frozen"];

// IntersectionObserver fires at every 1/VISIBILITY_STEPS of visibility
pub const VISIBILITY_STEPS: u32 = 20;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Host option keys (the object passed to `mountHero`)
pub const OPT_ROOT: &str = "root";
pub const OPT_PLAY: &str = "play";
pub const OPT_KILL_ALL: &str = "killAll";
pub const OPT_CLEANUP: &str = "cleanup";
pub const OPT_POWER_MODE: &str = "powerMode";
pub const OPT_WIRE_CLICKS: &str = "wireClicks";

#[inline]
pub fn visibility_thresholds() -> Vec<f64> {
    (0..=VISIBILITY_STEPS)
        .map(|i| i as f64 / VISIBILITY_STEPS as f64)
        .collect()
}

#[inline]
pub fn parse_letter_index(attr: &str) -> Option<usize> {
    attr.trim().parse().ok()
}
