use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";
const RANDOM_LEN: usize = 12;

/// Generates 20-character child keys that sort in creation order.
///
/// The first 8 characters encode the millisecond timestamp. Keys created in
/// the same millisecond (or while the clock runs backwards) increment the
/// random suffix of the previous key instead of drawing a new one.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    last_millis: u64,
    last_random: [u8; RANDOM_LEN],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        self.next_id_at(now)
    }

    fn next_id_at(&mut self, millis: u64) -> String {
        if millis > self.last_millis {
            let mut rng = rand::rng();
            for slot in self.last_random.iter_mut() {
                *slot = rng.random_range(0..64);
            }
            self.last_millis = millis;
        } else {
            for slot in self.last_random.iter_mut().rev() {
                if *slot < 63 {
                    *slot += 1;
                    break;
                }
                *slot = 0;
            }
        }

        let mut id = [0u8; 8 + RANDOM_LEN];
        let mut remaining = self.last_millis;
        for slot in id[..8].iter_mut().rev() {
            *slot = PUSH_CHARS[(remaining % 64) as usize];
            remaining /= 64;
        }
        for (slot, value) in id[8..].iter_mut().zip(self.last_random.iter()) {
            *slot = PUSH_CHARS[*value as usize];
        }

        id.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_sort_in_creation_order_within_one_millisecond() {
        let mut generator = PushIdGenerator::new();
        let ids: Vec<String> = (0..200).map(|_| generator.next_id_at(1_700_000_000_000)).collect();

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert!(ids.iter().all(|id| id.len() == 20));
    }

    #[test]
    fn later_timestamps_sort_after_earlier_ones() {
        let mut generator = PushIdGenerator::new();
        let first = generator.next_id_at(1_000);
        let second = generator.next_id_at(2_000);
        let clock_skew = generator.next_id_at(1_500);

        assert!(first < second);
        assert!(second < clock_skew);
    }
}
