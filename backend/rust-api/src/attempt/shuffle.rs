use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Seeds are drawn from `[0, 2^31)`.
pub const SEED_SPACE: u32 = 1 << 31;

pub fn draw_seed() -> u32 {
    rand::rng().random_range(0..SEED_SPACE)
}

/// Fisher-Yates from the back, driven only by `seed`: for each `i` down to 1
/// a uniform `j` in `[0, i]` is drawn and `i`, `j` are swapped.
pub fn shuffle_with_seed<T>(items: &mut [T], seed: u32) {
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    items.shuffle(&mut rng);
}

pub fn shuffled<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_with_seed(&mut out, seed);
    out
}
