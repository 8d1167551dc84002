use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use timeline_core::model::{Dataset, EventId, GroupId, QUESTION_SIZE, Question, QuestionError};

use crate::error::SessionError;

/// Draws questions from a dataset.
///
/// Eligible groups are filtered before choosing, so a dataset without any group of
/// `QUESTION_SIZE` records fails fast instead of retrying.
pub struct QuestionGenerator<'a> {
    dataset: &'a Dataset,
}

impl<'a> QuestionGenerator<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    /// Uniformly choose among groups with at least `QUESTION_SIZE` records.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoEligibleGroup` if the dataset has no such group.
    pub fn pick_eligible_group<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GroupId, SessionError> {
        self.dataset
            .eligible_groups()
            .choose(rng)
            .copied()
            .ok_or(SessionError::NoEligibleGroup)
    }

    /// Sample `QUESTION_SIZE` distinct records of `group` and shuffle their presentation.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::UnknownGroup` for a group outside the dataset.
    /// Returns `QuestionError::InsufficientGroupSize` for a group with too few records.
    pub fn generate<R: Rng + ?Sized>(&self, group: GroupId, rng: &mut R) -> Result<Question, QuestionError> {
        let records = self.dataset.records_in(group);
        if records.is_empty() {
            return Err(QuestionError::UnknownGroup(group));
        }
        if records.len() < QUESTION_SIZE {
            return Err(QuestionError::InsufficientGroupSize {
                group,
                len: records.len(),
            });
        }

        let sample: Vec<_> = records.choose_multiple(rng, QUESTION_SIZE).cloned().collect();
        let mut presented: Vec<EventId> = sample.iter().map(|record| record.id()).collect();
        presented.shuffle(rng);

        Question::new(group, sample, presented)
    }

    /// Pick an eligible group and generate a question from it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoEligibleGroup` if the dataset has no eligible group.
    pub fn next_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Question, SessionError> {
        let group = self.pick_eligible_group(rng)?;
        Ok(self.generate(group, rng)?)
    }
}

/// A fresh uniform permutation of the question's events.
pub fn reshuffled<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Vec<EventId> {
    let mut order = question.presented().to_vec();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn dataset(len: usize) -> Dataset {
        Dataset::from_pairs((0..len).map(|i| (format!("event {i}"), format!("{}", 1500 + i * 3)))).unwrap()
    }

    #[test]
    fn generated_question_is_sorted_and_permuted() {
        let data = dataset(20);
        let generator = QuestionGenerator::new(&data);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let question = generator.next_question(&mut rng).unwrap();
            let items = question.items();
            assert_eq!(items.len(), QUESTION_SIZE);
            assert!(items.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()));
            assert!(items.iter().all(|r| r.group_id() == question.group_id()));

            let presented: HashSet<_> = question.presented().iter().copied().collect();
            let correct: HashSet<_> = question.correct_order().collect();
            assert_eq!(presented, correct);
        }
    }

    #[test]
    fn short_groups_are_never_chosen() {
        // group-1 has 10 records, group-2 has 3.
        let data = dataset(13);
        let generator = QuestionGenerator::new(&data);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            assert_eq!(generator.pick_eligible_group(&mut rng).unwrap(), GroupId::new(1));
        }
    }

    #[test]
    fn generate_rejects_small_and_unknown_groups() {
        let data = dataset(13);
        let generator = QuestionGenerator::new(&data);
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.generate(GroupId::new(2), &mut rng).unwrap_err();
        assert_eq!(
            err,
            QuestionError::InsufficientGroupSize {
                group: GroupId::new(2),
                len: 3
            }
        );
        let err = generator.generate(GroupId::new(9), &mut rng).unwrap_err();
        assert_eq!(err, QuestionError::UnknownGroup(GroupId::new(9)));
    }

    #[test]
    fn dataset_without_eligible_group_fails_fast() {
        let data = dataset(3);
        let generator = QuestionGenerator::new(&data);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            generator.next_question(&mut rng).unwrap_err(),
            SessionError::NoEligibleGroup
        );
    }

    #[test]
    fn same_seed_same_question() {
        let data = dataset(40);
        let generator = QuestionGenerator::new(&data);
        let a = generator.next_question(&mut StdRng::seed_from_u64(99)).unwrap();
        let b = generator.next_question(&mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn group_of_exactly_four_uses_every_record() {
        let data = dataset(4);
        let generator = QuestionGenerator::new(&data);
        let question = generator.next_question(&mut StdRng::seed_from_u64(5)).unwrap();
        let ids: Vec<_> = question.correct_order().map(|id| id.value()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn reshuffle_keeps_the_same_events() {
        let data = dataset(10);
        let generator = QuestionGenerator::new(&data);
        let mut rng = StdRng::seed_from_u64(21);
        let question = generator.next_question(&mut rng).unwrap();
        let mut order = reshuffled(&question, &mut rng);
        let mut expected = question.presented().to_vec();
        order.sort_unstable();
        expected.sort_unstable();
        assert_eq!(order, expected);
    }
}
