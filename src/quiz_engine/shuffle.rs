use crate::quiz_engine::seed::pseudo_random_stream;

/// Return a seeded permutation of `items`, leaving the input untouched.
///
/// Fisher-Yates from the back: step `i` draws one stream value and swaps
/// `i` with `floor(value * (i + 1))`.
pub fn shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut stream = pseudo_random_stream(seed);
    let mut copy = items.to_vec();

    for i in (1..copy.len()).rev() {
        let j = (stream.next_unit() * (i + 1) as f64).floor() as usize;
        copy.swap(i, j);
    }

    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz_engine::seed::derive_seed;
    use rand::Rng;

    #[test]
    fn shuffle_matches_reference_permutations() {
        assert_eq!(shuffle(&[1, 2, 3, 4], derive_seed("abc")), vec![4, 1, 2, 3]);
        let ten: Vec<u32> = (0..10).collect();
        assert_eq!(shuffle(&ten, 42), vec![0, 7, 3, 5, 2, 1, 8, 9, 4, 6]);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(1..40);
            let items: Vec<u16> = (0..len).map(|_| rng.gen_range(0..10)).collect();
            let shuffled = shuffle(&items, rng.gen());

            let mut a = items.clone();
            let mut b = shuffled.clone();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b, "not a permutation of {items:?}");
        }
    }

    #[test]
    fn shuffle_does_not_touch_the_input() {
        let items = vec!["a", "b", "c", "d", "e"];
        let before = items.clone();
        let _ = shuffle(&items, 1234);
        assert_eq!(items, before);
    }

    #[test]
    fn shuffle_is_deterministic_with_seed() {
        let items: Vec<u32> = (0..52).collect();
        assert_eq!(shuffle(&items, 99), shuffle(&items, 99));
        assert_ne!(shuffle(&items, 99), shuffle(&items, 100));
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let empty: Vec<u8> = Vec::new();
        assert!(shuffle(&empty, 5).is_empty());
        assert_eq!(shuffle(&[7], 5), vec![7]);
    }
}
