//! Clue generators turn a pair of typed nouns into a physical clue.
//!
//! Each generator handles one pair of noun types. Adding a relation type means
//! adding a generator and registering it; existing generators stay untouched.

use crate::error::RulesError;
use crate::grammar::{Noun, NounType, Verb};

use super::ClueItem;

/// A strategy that can synthesize clues relating two noun types.
pub trait ClueGenerator {
    /// Short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Whether this generator relates nouns of these types. Commutative.
    fn matches(&self, a: NounType, b: NounType) -> bool;

    /// Build the clue for two nouns, in either order.
    fn item(&self, a: Noun, b: Noun) -> Result<ClueItem, RulesError>;
}

/// Put the noun of type `first` before the other one, or fail if the pair does not fit.
fn oriented(
    generator: &'static str,
    first: NounType,
    second: NounType,
    a: Noun,
    b: Noun,
) -> Result<(Noun, Noun), RulesError> {
    match (a.noun_type(), b.noun_type()) {
        (ta, tb) if ta == first && tb == second => Ok((a, b)),
        (ta, tb) if ta == second && tb == first => Ok((b, a)),
        (ta, tb) => Err(RulesError::GeneratorMismatch {
            generator,
            a: ta,
            b: tb,
        }),
    }
}

fn is_pair(a: NounType, b: NounType, x: NounType, y: NounType) -> bool {
    (a == x && b == y) || (a == y && b == x)
}

/// Photo of the victim with a relative, showing the relative's hair.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppearanceIdentityClue;

impl ClueGenerator for AppearanceIdentityClue {
    fn name(&self) -> &'static str {
        "appearance-identity"
    }

    fn matches(&self, a: NounType, b: NounType) -> bool {
        is_pair(a, b, NounType::HairColor, NounType::Identity)
    }

    fn item(&self, a: Noun, b: Noun) -> Result<ClueItem, RulesError> {
        let (hair, identity) =
            oriented(self.name(), NounType::HairColor, NounType::Identity, a, b)?;
        let description = format!(
            "A photo of the victim and his {}, who has {} hair,",
            identity, hair
        );
        Ok(ClueItem::new(hair, identity, Verb::Is, "Photo", description))
    }
}

/// A receipt tying a relative to an object.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnershipClue;

impl ClueGenerator for OwnershipClue {
    fn name(&self) -> &'static str {
        "ownership"
    }

    fn matches(&self, a: NounType, b: NounType) -> bool {
        is_pair(a, b, NounType::Identity, NounType::Unique)
    }

    fn item(&self, a: Noun, b: Noun) -> Result<ClueItem, RulesError> {
        let (identity, object) =
            oriented(self.name(), NounType::Identity, NounType::Unique, a, b)?;
        if object == Noun::Killer {
            return Err(RulesError::GeneratorMismatch {
                generator: self.name(),
                a: a.noun_type(),
                b: b.noun_type(),
            });
        }
        let description = format!("A receipt for a {}, signed by the victim's {},", object, identity);
        Ok(ClueItem::new(identity, object, Verb::Has, "Receipt", description))
    }
}

/// A hair left on an object.
#[derive(Debug, Clone, Copy, Default)]
pub struct HairEvidenceClue;

impl ClueGenerator for HairEvidenceClue {
    fn name(&self) -> &'static str {
        "hair-evidence"
    }

    fn matches(&self, a: NounType, b: NounType) -> bool {
        is_pair(a, b, NounType::HairColor, NounType::Unique)
    }

    fn item(&self, a: Noun, b: Noun) -> Result<ClueItem, RulesError> {
        let (hair, object) = oriented(self.name(), NounType::HairColor, NounType::Unique, a, b)?;
        if object == Noun::Killer {
            return Err(RulesError::GeneratorMismatch {
                generator: self.name(),
                a: a.noun_type(),
                b: b.noun_type(),
            });
        }
        let description = format!("A {} hair caught on the {},", hair.name().to_lowercase(), object);
        Ok(ClueItem::new(hair, object, Verb::Has, "Hair", description))
    }
}

/// Ordered set of generators, consulted by linear scan.
pub struct ClueGeneratorRegistry {
    generators: Vec<Box<dyn ClueGenerator>>,
}

impl ClueGeneratorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// A registry holding every built-in generator.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AppearanceIdentityClue);
        registry.register(OwnershipClue);
        registry.register(HairEvidenceClue);
        registry
    }

    pub fn register(&mut self, generator: impl ClueGenerator + 'static) {
        self.generators.push(Box::new(generator));
    }

    /// The first generator that relates the two types.
    pub fn find(&self, a: NounType, b: NounType) -> Option<&dyn ClueGenerator> {
        self.generators
            .iter()
            .find(|g| g.matches(a, b))
            .map(|g| g.as_ref())
    }

    /// Make a clue for the pair, if some generator can.
    pub fn make_item(&self, a: Noun, b: Noun) -> Option<ClueItem> {
        self.generators
            .iter()
            .filter(|g| g.matches(a.noun_type(), b.noun_type()))
            .find_map(|g| g.item(a, b).ok())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl Default for ClueGeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ClueGeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.generators.iter().map(|g| g.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: [NounType; 3] = [NounType::HairColor, NounType::Identity, NounType::Unique];

    #[test]
    fn test_matches_is_commutative() {
        let registry = ClueGeneratorRegistry::with_defaults();
        for generator in &registry.generators {
            for a in TYPES {
                for b in TYPES {
                    assert_eq!(generator.matches(a, b), generator.matches(b, a));
                }
            }
        }
    }

    #[test]
    fn test_photo_clue_orders_hair_first() {
        let generator = AppearanceIdentityClue;
        assert!(generator.matches(NounType::HairColor, NounType::Identity));

        let forward = generator.item(Noun::Red, Noun::Nephew).unwrap();
        let backward = generator.item(Noun::Nephew, Noun::Red).unwrap();

        assert_eq!(forward.info.noun_a, Noun::Red);
        assert_eq!(backward.info.noun_a, Noun::Red);
        assert_eq!(backward.info.noun_b, Noun::Nephew);
        assert_eq!(forward.sprite.as_str(), "Photo");
        assert_eq!(
            backward.description,
            "A photo of the victim and his Nephew, who has Red hair,"
        );
    }

    #[test]
    fn test_clue_nouns_independent_of_argument_order() {
        let generator = AppearanceIdentityClue;
        for (a, b) in [(Noun::Brown, Noun::Butler), (Noun::Butler, Noun::Brown)] {
            let sentence = generator.item(a, b).unwrap().sentence();
            let mut nouns = sentence.nouns();
            nouns.sort();
            assert_eq!(nouns, [Noun::Brown, Noun::Butler]);
        }
    }

    #[test]
    fn test_mismatched_types_error() {
        let result = AppearanceIdentityClue.item(Noun::Red, Noun::Knife);
        assert!(matches!(result, Err(RulesError::GeneratorMismatch { .. })));
    }

    #[test]
    fn test_killer_is_never_a_physical_clue() {
        assert!(OwnershipClue.item(Noun::Butler, Noun::Killer).is_err());
        assert!(HairEvidenceClue.item(Noun::Killer, Noun::Red).is_err());
    }

    #[test]
    fn test_registry_dispatch() {
        let registry = ClueGeneratorRegistry::with_defaults();
        assert_eq!(registry.len(), 3);

        let receipt = registry.make_item(Noun::Knife, Noun::Butler).unwrap();
        assert_eq!(receipt.sprite.as_str(), "Receipt");
        assert_eq!(receipt.info.noun_a, Noun::Butler);

        let hair = registry.make_item(Noun::Poison, Noun::Blonde).unwrap();
        assert_eq!(hair.description, "A blonde hair caught on the Poison,");

        assert!(registry.make_item(Noun::Red, Noun::Brown).is_none());
        assert!(registry
            .find(NounType::Identity, NounType::Identity)
            .is_none());
    }

    #[test]
    fn test_registry_extension() {
        struct IdentityPairs;
        impl ClueGenerator for IdentityPairs {
            fn name(&self) -> &'static str {
                "identity-pairs"
            }
            fn matches(&self, a: NounType, b: NounType) -> bool {
                a == NounType::Identity && b == NounType::Identity
            }
            fn item(&self, a: Noun, b: Noun) -> Result<ClueItem, RulesError> {
                Ok(ClueItem::new(a, b, Verb::Has, "Letter", "A letter"))
            }
        }

        let mut registry = ClueGeneratorRegistry::new();
        assert!(registry.is_empty());
        registry.register(IdentityPairs);
        let item = registry.make_item(Noun::Butler, Noun::Brother).unwrap();
        assert_eq!(item.sprite.as_str(), "Letter");
    }
}
