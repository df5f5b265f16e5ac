//! Fixed fallback affirmations.

use rand::seq::SliceRandom;
use rand::Rng;

static QUOTES: [&str; 6] = [
    "You are enough. Just as you are. 💛",
    "Progress, not perfection.",
    "You’re growing through what you’re going through.",
    "Take small steps forward — they still count.",
    "Even slow healing is healing. 🌱",
    "You’ve survived 100% of your bad days.",
];

/// Returns the immutable quote set.
pub fn quotes() -> &'static [&'static str] {
    &QUOTES
}

/// Picks one quote uniformly at random.
pub fn random_quote() -> &'static str {
    random_quote_with(&mut rand::thread_rng())
}

/// Picks one quote uniformly using the caller's RNG.
pub fn random_quote_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // QUOTES is non-empty.
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::{quotes, random_quote, random_quote_with};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn holds_six_distinct_quotes() {
        let unique: HashSet<_> = quotes().iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn random_quote_comes_from_the_bank() {
        for _ in 0..50 {
            assert!(quotes().contains(&random_quote()));
        }
    }

    #[test]
    fn seeded_rng_reaches_every_quote() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<_> = (0..500).map(|_| random_quote_with(&mut rng)).collect();
        assert_eq!(seen.len(), quotes().len());
    }
}
