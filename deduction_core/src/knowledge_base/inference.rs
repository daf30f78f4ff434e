//! Single-hop deduction and confidence scoring.
//!
//! Deduction only ever combines one new sentence with one existing belief, so a
//! single `listen` call produces a bounded number of new beliefs. Longer chains
//! form over several conversations as deduced beliefs become premises.

use mystery_rules::{Adverb, Noun, Sentence, SentenceKey, Verb};
use std::collections::BTreeSet;

use super::Knowledge;

/// Sentences deducible from `new` combined with one of `known`.
///
/// Results are in the iteration order of `known`, deduplicated, and may include
/// sentences the caller already believes.
pub fn derive<'a>(new: &Sentence, known: impl IntoIterator<Item = &'a Sentence>) -> Vec<Sentence> {
    let mut seen: BTreeSet<SentenceKey> = BTreeSet::new();
    let mut derived = Vec::new();

    for existing in known {
        if existing == new {
            continue;
        }
        for candidate in chain(new, existing)
            .into_iter()
            .chain(exclusion(new, existing))
        {
            if seen.insert(candidate.key()) {
                derived.push(candidate);
            }
        }
    }

    derived
}

/// `a ~ m` and `m ~ b` relate `a` and `b`.
///
/// Two affirmations give an affirmation; an affirmation and a denial give a
/// denial. Two denials say nothing.
fn chain(first: &Sentence, second: &Sentence) -> Vec<Sentence> {
    let adverb = match (first.adverb, second.adverb) {
        (Adverb::True, Adverb::True) => Adverb::True,
        (Adverb::False, Adverb::False) => return Vec::new(),
        _ => Adverb::False,
    };
    let verb = if first.verb == Verb::Has || second.verb == Verb::Has {
        Verb::Has
    } else {
        Verb::Is
    };

    let mut out = Vec::new();
    for bridge in first.nouns() {
        let (Some(a), Some(b)) = (first.other_noun(bridge), second.other_noun(bridge)) else {
            continue;
        };
        if let Some(sentence) = relating(a, verb, b, adverb) {
            out.push(sentence);
        }
    }
    out
}

/// `a is m` and `b is n` with `m != n` of the same exclusive type: `a` is not `b`.
fn exclusion(first: &Sentence, second: &Sentence) -> Vec<Sentence> {
    if !first.is_affirmative() || !second.is_affirmative() {
        return Vec::new();
    }
    if first.verb != Verb::Is || second.verb != Verb::Is {
        return Vec::new();
    }

    let mut out = Vec::new();
    for m in first.nouns() {
        let attribute = m.noun_type();
        if !attribute.is_exclusive() {
            continue;
        }
        for n in second.nouns() {
            if n == m || n.noun_type() != attribute {
                continue;
            }
            let (Some(a), Some(b)) = (first.other_noun(m), second.other_noun(n)) else {
                continue;
            };
            if a.noun_type() == attribute || b.noun_type() == attribute {
                continue;
            }
            if let Some(sentence) = relating(a, Verb::Is, b, Adverb::False) {
                out.push(sentence);
            }
        }
    }
    out
}

/// A sentence between two distinct nouns of different types.
fn relating(a: Noun, verb: Verb, b: Noun, adverb: Adverb) -> Option<Sentence> {
    if a == b || a.noun_type() == b.noun_type() {
        return None;
    }
    Some(Sentence::new(a, verb, b, adverb))
}

/// Scores how strongly a store supports a query. Never negative.
pub trait ConfidenceStrategy {
    fn confidence(&self, knowledge: &Knowledge, query: &Sentence) -> f32;
}

/// Direct match plus one level of substitution through a bridging noun.
///
/// Every supporting path adds a fixed weight and nothing subtracts, so adding
/// beliefs can only raise a score.
#[derive(Debug, Clone, Copy)]
pub struct DirectSubstitution {
    pub direct_weight: f32,
    pub bridge_weight: f32,
}

impl Default for DirectSubstitution {
    fn default() -> Self {
        Self {
            direct_weight: 1.0,
            bridge_weight: 0.5,
        }
    }
}

impl ConfidenceStrategy for DirectSubstitution {
    fn confidence(&self, knowledge: &Knowledge, query: &Sentence) -> f32 {
        let (s, o) = (query.subject, query.object);
        if s == o {
            return 0.0;
        }

        let mut score = 0.0;
        if knowledge.holds(s, o, query.adverb) {
            score += self.direct_weight;
        }

        for &m in Noun::all() {
            if m == s || m == o {
                continue;
            }
            let supported = if query.is_affirmative() {
                knowledge.holds(s, m, Adverb::True) && knowledge.holds(m, o, Adverb::True)
            } else {
                (knowledge.holds(s, m, Adverb::True) && knowledge.holds(m, o, Adverb::False))
                    || (knowledge.holds(s, m, Adverb::False) && knowledge.holds(m, o, Adverb::True))
            };
            if supported {
                score += self.bridge_weight;
            }
        }

        if !query.is_affirmative() && s.noun_type() != o.noun_type() {
            score += self.bridge_weight * exclusive_mismatches(knowledge, s, o) as f32;
        }

        score
    }
}

/// Pairs of different exclusive attributes held by `s` and `o` respectively.
fn exclusive_mismatches(knowledge: &Knowledge, s: Noun, o: Noun) -> usize {
    let mut count = 0;
    for &m in Noun::all() {
        let attribute = m.noun_type();
        if !attribute.is_exclusive()
            || s.noun_type() == attribute
            || o.noun_type() == attribute
            || !knowledge.knows(&Sentence::affirm(s, Verb::Is, m))
        {
            continue;
        }
        count += Noun::of_type(attribute)
            .into_iter()
            .filter(|&n| n != m && knowledge.knows(&Sentence::affirm(o, Verb::Is, n)))
            .count();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(sentences: &[Sentence]) -> Vec<SentenceKey> {
        sentences.iter().map(|s| s.key()).collect()
    }

    #[test]
    fn test_chain_through_shared_noun() {
        let new = Sentence::affirm(Noun::Nephew, Verb::Is, Noun::Red);
        let known = [Sentence::affirm(Noun::Killer, Verb::Is, Noun::Nephew)];

        let derived = derive(&new, known.iter());
        assert!(keys(&derived).contains(&Sentence::affirm(Noun::Red, Verb::Is, Noun::Killer).key()));
    }

    #[test]
    fn test_chain_prefers_has() {
        let new = Sentence::affirm(Noun::Red, Verb::Is, Noun::Butler);
        let known = [Sentence::affirm(Noun::Butler, Verb::Has, Noun::Knife)];

        let derived = derive(&new, known.iter());
        assert_eq!(derived, vec![Sentence::affirm(Noun::Red, Verb::Has, Noun::Knife)]);
    }

    #[test]
    fn test_chain_with_denial() {
        let new = Sentence::deny(Noun::Nephew, Verb::Is, Noun::Killer);
        let known = [Sentence::affirm(Noun::Red, Verb::Is, Noun::Nephew)];

        let derived = derive(&new, known.iter());
        assert!(derived.contains(&Sentence::deny(Noun::Red, Verb::Is, Noun::Killer)));
    }

    #[test]
    fn test_two_denials_say_nothing() {
        let new = Sentence::deny(Noun::Nephew, Verb::Is, Noun::Killer);
        let known = [Sentence::deny(Noun::Red, Verb::Is, Noun::Nephew)];
        assert!(derive(&new, known.iter()).is_empty());
    }

    #[test]
    fn test_exclusion_rules_out_suspect() {
        let new = Sentence::affirm(Noun::Brown, Verb::Is, Noun::Brother);
        let known = [Sentence::affirm(Noun::Killer, Verb::Is, Noun::Nephew)];

        let derived = derive(&new, known.iter());
        assert_eq!(derived, vec![Sentence::deny(Noun::Brown, Verb::Is, Noun::Killer)]);
    }

    #[test]
    fn test_no_same_type_conclusions() {
        // Both are photos of relatives: no "Red is Brown" style conclusions.
        let new = Sentence::affirm(Noun::Red, Verb::Is, Noun::Nephew);
        let known = [Sentence::affirm(Noun::Brown, Verb::Is, Noun::Nephew)];

        let derived = derive(&new, known.iter());
        assert!(derived.is_empty());
    }

    #[test]
    fn test_possession_does_not_exclude() {
        let new = Sentence::affirm(Noun::Red, Verb::Is, Noun::Nephew);
        let known = [Sentence::affirm(Noun::Butler, Verb::Has, Noun::Poison)];
        assert!(derive(&new, known.iter()).is_empty());
    }

    #[test]
    fn test_empty_store_confidence_is_zero() {
        let knowledge = Knowledge::new();
        let strategy = DirectSubstitution::default();
        for &noun in Noun::all() {
            let query = Sentence::affirm(noun, Verb::Is, Noun::Killer);
            assert_eq!(strategy.confidence(&knowledge, &query), 0.0);
            assert_eq!(strategy.confidence(&knowledge, &query.negated()), 0.0);
        }
    }

    #[test]
    fn test_bridge_confidence() {
        let mut knowledge = Knowledge::new();
        knowledge.add_knowledge(Sentence::affirm(Noun::Killer, Verb::Is, Noun::Nephew));
        knowledge.add_knowledge(Sentence::affirm(Noun::Nephew, Verb::Is, Noun::Red));

        let strategy = DirectSubstitution::default();
        let guilty = Sentence::affirm(Noun::Red, Verb::Is, Noun::Killer);
        assert!((strategy.confidence(&knowledge, &guilty) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_exclusive_mismatch_confidence() {
        let mut knowledge = Knowledge::new();
        knowledge.add_knowledge(Sentence::affirm(Noun::Killer, Verb::Is, Noun::Nephew));
        knowledge.add_knowledge(Sentence::affirm(Noun::Brown, Verb::Is, Noun::Brother));

        let strategy = DirectSubstitution::default();
        let innocent = Sentence::deny(Noun::Brown, Verb::Is, Noun::Killer);
        assert!(strategy.confidence(&knowledge, &innocent) > 0.0);
        assert_eq!(strategy.confidence(&knowledge, &innocent.negated()), 0.0);
    }
}
