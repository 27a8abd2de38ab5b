//! RNG module - weighted letter generation
//!
//! Letters for each piece are drawn independently from a table weighted by
//! English letter frequency, so common letters (e, t, a) show up far more
//! often than rare ones (q, z).
//!
//! Also provides a simple LCG for deterministic testing.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() >> 16) * max) >> 16
    }
}

/// Relative frequency of each letter, in tenths of a percent
pub const LETTER_WEIGHTS: [(char, u32); 26] = [
    ('a', 82),
    ('b', 15),
    ('c', 28),
    ('d', 43),
    ('e', 127),
    ('f', 22),
    ('g', 20),
    ('h', 61),
    ('i', 70),
    ('j', 2),
    ('k', 8),
    ('l', 40),
    ('m', 24),
    ('n', 67),
    ('o', 75),
    ('p', 19),
    ('q', 1),
    ('r', 60),
    ('s', 63),
    ('t', 91),
    ('u', 28),
    ('v', 10),
    ('w', 24),
    ('x', 2),
    ('y', 20),
    ('z', 1),
];

const fn total_weight() -> u32 {
    let mut sum = 0;
    let mut i = 0;
    while i < LETTER_WEIGHTS.len() {
        sum += LETTER_WEIGHTS[i].1;
        i += 1;
    }
    sum
}

const TOTAL_WEIGHT: u32 = total_weight();

/// Weighted letter generator
#[derive(Debug, Clone)]
pub struct LetterSource {
    rng: SimpleRng,
}

impl LetterSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw one lowercase letter
    pub fn draw(&mut self) -> char {
        let mut roll = self.rng.next_range(TOTAL_WEIGHT);
        for &(letter, weight) in LETTER_WEIGHTS.iter() {
            if roll < weight {
                return letter;
            }
            roll -= weight;
        }
        LETTER_WEIGHTS[LETTER_WEIGHTS.len() - 1].0
    }
}

impl Default for LetterSource {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_stays_below_max() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(26) < 26);
        }
    }

    #[test]
    fn test_letters_are_lowercase_ascii() {
        let mut source = LetterSource::new(99);
        for _ in 0..500 {
            let letter = source.draw();
            assert!(letter.is_ascii_lowercase(), "unexpected {letter:?}");
        }
    }

    #[test]
    fn test_common_letters_outnumber_rare_ones() {
        let mut source = LetterSource::new(2024);
        let mut e = 0;
        let mut z = 0;
        for _ in 0..5000 {
            match source.draw() {
                'e' => e += 1,
                'z' => z += 1,
                _ => {}
            }
        }
        assert!(e > z * 10, "e={e} z={z}");
    }

    #[test]
    fn test_every_letter_is_reachable() {
        let mut source = LetterSource::new(31);
        let mut seen = [false; 26];
        for _ in 0..20_000 {
            seen[(source.draw() as u8 - b'a') as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing letters: {seen:?}");
    }

    #[test]
    fn test_same_seed_same_letters() {
        let mut a = LetterSource::new(5);
        let mut b = LetterSource::new(5);
        let xs: Vec<char> = (0..20).map(|_| a.draw()).collect();
        let ys: Vec<char> = (0..20).map(|_| b.draw()).collect();
        assert_eq!(xs, ys);
    }
}
