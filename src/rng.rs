/// Seeded mulberry32 generator; identical seeds replay identical games.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f64 / 4_294_967_296.0) as f32
    }

    /// Uniform pick from a non-empty slice.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = ((self.next_f32() * items.len() as f32).floor() as usize).min(items.len() - 1);
        Some(items[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn pick_stays_in_range_and_covers_all_items() {
        let mut rng = Rng::new(99);
        let items = [0usize, 1, 2];
        let mut seen = [false; 3];
        for _ in 0..300 {
            let value = rng.pick(&items).expect("non-empty slice");
            seen[value] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
        assert_eq!(rng.pick::<u8>(&[]), None);
    }
}
