use std::ops::Index;

use rand::Rng;

use crate::countries::EmojiCountryPair;
use crate::error::{Error, Result};

/// The questions played in one session, in play order.
/// Built once by [`build`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSequence {
    questions: Vec<EmojiCountryPair>,
}

impl QuestionSequence {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&EmojiCountryPair> {
        self.questions.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmojiCountryPair> {
        self.questions.iter()
    }
}

impl Index<usize> for QuestionSequence {
    type Output = EmojiCountryPair;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.questions[idx]
    }
}

/// Draw `rounds * questions_per_round` distinct questions from `source`.
///
/// The table is shuffled with Fisher-Yates using `rng` and the head of the
/// permutation is kept, so no question repeats within a session.
pub fn build<R: Rng + ?Sized>(
    source: &[EmojiCountryPair],
    rounds: usize,
    questions_per_round: usize,
    rng: &mut R,
) -> Result<QuestionSequence> {
    let available = source.len();
    let requested = match rounds.checked_mul(questions_per_round) {
        Some(n) if n > 0 && n <= available => n,
        Some(n) => {
            return Err(Error::InsufficientData {
                requested: n,
                available,
            })
        }
        None => {
            return Err(Error::InsufficientData {
                requested: usize::MAX,
                available,
            })
        }
    };

    let mut questions = source.to_vec();
    for i in (1..questions.len()).rev() {
        let j = rng.gen_range(0..=i);
        questions.swap(i, j);
    }
    questions.truncate(requested);

    Ok(QuestionSequence { questions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::EMOJI_COUNTRIES;
    use assert_matches::assert_matches;
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builds_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let seq = build(&EMOJI_COUNTRIES, 3, 5, &mut rng).unwrap();
        assert_eq!(seq.len(), 15);

        let seq = build(&EMOJI_COUNTRIES, 2, 4, &mut rng).unwrap();
        assert_eq!(seq.len(), 8);
    }

    #[test]
    fn questions_are_distinct_and_from_the_table() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let seq = build(&EMOJI_COUNTRIES, 2, 5, &mut rng).unwrap();
            assert!(seq.iter().map(|p| p.country).all_unique());
            assert!(seq.iter().all(|p| EMOJI_COUNTRIES.contains(p)));
        }
    }

    #[test]
    fn full_draw_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        let seq = build(&EMOJI_COUNTRIES, 3, 5, &mut rng).unwrap();
        let drawn: Vec<_> = seq.iter().map(|p| p.country).sorted().collect();
        let table: Vec<_> = EMOJI_COUNTRIES.iter().map(|p| p.country).sorted().collect();
        assert_eq!(drawn, table);
    }

    #[test]
    fn same_seed_same_order() {
        let a = build(&EMOJI_COUNTRIES, 3, 5, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = build(&EMOJI_COUNTRIES, 3, 5, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_eventually_differ() {
        let first = build(&EMOJI_COUNTRIES, 3, 5, &mut StdRng::seed_from_u64(0)).unwrap();
        let differs = (1..20).any(|seed| {
            build(&EMOJI_COUNTRIES, 3, 5, &mut StdRng::seed_from_u64(seed)).unwrap() != first
        });
        assert!(differs);
    }

    #[test]
    fn every_position_is_reachable() {
        // Each country should lead the sequence for some seed.
        let leaders: std::collections::HashSet<_> = (0..2000)
            .map(|seed| {
                build(&EMOJI_COUNTRIES, 1, 1, &mut StdRng::seed_from_u64(seed)).unwrap()[0].country
            })
            .collect();
        assert_eq!(leaders.len(), EMOJI_COUNTRIES.len());
    }

    #[test]
    fn too_many_questions_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_matches!(
            build(&EMOJI_COUNTRIES, 4, 5, &mut rng),
            Err(Error::InsufficientData {
                requested: 20,
                available: 15
            })
        );
    }

    #[test]
    fn zero_questions_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_matches!(
            build(&EMOJI_COUNTRIES, 0, 5, &mut rng),
            Err(Error::InsufficientData { requested: 0, .. })
        );
    }

    #[test]
    fn overflowing_request_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_matches!(
            build(&EMOJI_COUNTRIES, usize::MAX, 2, &mut rng),
            Err(Error::InsufficientData { .. })
        );
    }

    #[test]
    fn single_entry_table() {
        let table = [EmojiCountryPair::new("🇮🇸", "Iceland")];
        let seq = build(&table, 1, 1, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(seq[0].country, "Iceland");
        assert_eq!(seq.get(1), None);
    }
}
