//! What a character says when the police ask who did it.

use mystery_rules::{Noun, Sentence, Verb};

/// Suspects in the order they are considered.
pub const SUSPECTS: [Noun; 3] = [Noun::Blonde, Noun::Brown, Noun::Red];

fn shout(noun: Noun) -> String {
    noun.name().to_uppercase()
}

/// The two other suspects as `(favoured, fallback)`. The favoured one is
/// cleared only when strictly more innocent, so a tie clears the fallback.
fn elimination_pair(my_hair: Option<Noun>) -> Option<(Noun, Noun)> {
    match my_hair? {
        Noun::Blonde => Some((Noun::Brown, Noun::Red)),
        Noun::Brown => Some((Noun::Blonde, Noun::Red)),
        Noun::Red => Some((Noun::Brown, Noun::Blonde)),
        _ => None,
    }
}

/// Build the accusation of a character with hair `my_hair`.
///
/// A suspect with any guilt confidence is named directly, first in
/// [`SUSPECTS`] order. Otherwise the speaker clears whichever of the other two
/// looks more innocent and blames the remaining one. Ties are settled by
/// `elimination_pair`.
pub fn accusation_line(my_hair: Option<Noun>, confidence: impl Fn(&Sentence) -> f32) -> String {
    let others: Vec<Noun> = SUSPECTS
        .iter()
        .copied()
        .filter(|&suspect| Some(suspect) != my_hair)
        .collect();

    for &suspect in &others {
        let guilt = confidence(&Sentence::affirm(suspect, Verb::Is, Noun::Killer));
        if guilt > 0.0 {
            return format!("I think {} did it (confidence {})", shout(suspect), guilt);
        }
    }

    let Some((favoured, fallback)) = elimination_pair(my_hair) else {
        return "I have no idea.".to_string();
    };
    let cleared_favoured = confidence(&Sentence::deny(favoured, Verb::Is, Noun::Killer));
    let cleared_fallback = confidence(&Sentence::deny(fallback, Verb::Is, Noun::Killer));
    if cleared_favoured <= 0.0 && cleared_fallback <= 0.0 {
        return "I have no idea.".to_string();
    }

    let (innocent, guilty) = if cleared_favoured > cleared_fallback {
        (favoured, fallback)
    } else {
        (fallback, favoured)
    };
    format!(
        "Well I didn't do it, and {} didn't do it, so {} did.",
        shout(innocent),
        shout(guilty)
    )
}
