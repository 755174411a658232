//! The sixteen candidate transformations.
//!
//! Every function walks the target label, builds candidates, and hands them
//! to the [`Emitter`], which owns deduplication and the variant cap. A
//! `false` return from [`Emitter::emit`] means the cap is hit and the
//! technique bails out.

use super::tables;
use super::{Emitter, TechniqueError};
use crate::variant::Technique;

type Result = std::result::Result<(), TechniqueError>;

pub(super) fn run(technique: Technique, name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    match technique {
        Technique::Homograph => homograph(name, tld, emitter),
        Technique::Leetspeak => leetspeak(name, tld, emitter),
        Technique::Typo => typo(name, tld, emitter),
        Technique::Phonetic => phonetic(name, tld, emitter),
        Technique::Repetition => repetition(name, tld, emitter),
        Technique::Omission => omission(name, tld, emitter),
        Technique::Insertion => insertion(name, tld, emitter),
        Technique::Transposition => transposition(name, tld, emitter),
        Technique::Hyphenation => hyphenation(name, tld, emitter),
        Technique::TldSwap => tld_swap(name, tld, emitter),
        Technique::Prefix => prefix(name, tld, emitter),
        Technique::Suffix => suffix(name, tld, emitter),
        Technique::VowelSwap => vowel_swap(name, tld, emitter),
        Technique::DoubleChar => double_char(name, tld, emitter),
        Technique::Bitsquatting => bitsquatting(name, tld, emitter),
        Technique::Subdomain => subdomain(name, tld, emitter),
    }
}

/// Only the homograph technique bounds its per-character fan-out; the other
/// tables are small enough to use in full.
const MAX_HOMOGLYPHS_PER_CHAR: usize = 3;

const MAX_QWERTY_SUBSTITUTES_PER_KEY: usize = 2;

fn substituted(chars: &[char], i: usize, substitute: char) -> String {
    let mut out: String = chars[..i].iter().collect();
    out.push(substitute);
    out.extend(chars[i + 1..].iter());
    out
}

fn per_char_substitution(
    name: &str,
    tld: &str,
    technique: Technique,
    limit: usize,
    lookup: fn(char) -> Option<&'static [char]>,
    emitter: &mut Emitter,
) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        let Some(substitutes) = lookup(ch) else {
            continue;
        };
        for &substitute in substitutes.iter().take(limit) {
            let candidate = substituted(&chars, i, substitute);
            let detail = format!("'{}' -> '{}' at position {}", ch, substitute, i);
            if !emitter.emit(&candidate, tld, technique, detail) {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn homograph(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    per_char_substitution(
        name,
        tld,
        Technique::Homograph,
        MAX_HOMOGLYPHS_PER_CHAR,
        tables::homoglyphs_for,
        emitter,
    )
}

fn leetspeak(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    per_char_substitution(
        name,
        tld,
        Technique::Leetspeak,
        usize::MAX,
        tables::leetspeak_for,
        emitter,
    )
}

fn typo(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    per_char_substitution(
        name,
        tld,
        Technique::Typo,
        MAX_QWERTY_SUBSTITUTES_PER_KEY,
        tables::qwerty_neighbours_for,
        emitter,
    )
}

fn phonetic(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    for &(from, to) in tables::PHONETIC_RULES {
        let Some(pos) = name.find(from) else {
            continue;
        };
        let candidate = name.replacen(from, to, 1);
        let detail = format!("'{}' -> '{}' at position {}", from, to, pos);
        if !emitter.emit(&candidate, tld, Technique::Phonetic, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn repetition(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphabetic() {
            continue;
        }
        let mut candidate: String = chars[..=i].iter().collect();
        candidate.push(ch);
        candidate.extend(chars[i + 1..].iter());
        let detail = format!("doubled '{}' at position {}", ch, i);
        if !emitter.emit(&candidate, tld, Technique::Repetition, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn omission(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() < 2 {
        return Ok(());
    }
    for (i, &ch) in chars.iter().enumerate() {
        let mut candidate: String = chars[..i].iter().collect();
        candidate.extend(chars[i + 1..].iter());
        let detail = format!("dropped '{}' at position {}", ch, i);
        if !emitter.emit(&candidate, tld, Technique::Omission, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn insertion(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for gap in 0..=chars.len() {
        for &extra in tables::INSERTION_CHARS {
            let mut candidate: String = chars[..gap].iter().collect();
            candidate.push(extra);
            candidate.extend(chars[gap..].iter());
            let detail = format!("inserted '{}' at position {}", extra, gap);
            if !emitter.emit(&candidate, tld, Technique::Insertion, detail) {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn transposition(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == chars[i + 1] {
            continue;
        }
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        let candidate: String = swapped.into_iter().collect();
        let detail = format!("swapped '{}{}' at position {}", chars[i], chars[i + 1], i);
        if !emitter.emit(&candidate, tld, Technique::Transposition, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn hyphenation(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for i in 1..chars.len() {
        // Never produce consecutive hyphens or a hyphen at a label edge.
        if chars[i - 1] == '-' || chars[i] == '-' {
            continue;
        }
        let mut candidate: String = chars[..i].iter().collect();
        candidate.push('-');
        candidate.extend(chars[i..].iter());
        let detail = format!("hyphen inserted at position {}", i);
        if !emitter.emit(&candidate, tld, Technique::Hyphenation, detail) {
            return Ok(());
        }
    }

    if name.contains('-') {
        let candidate = name.replace('-', "");
        if !candidate.is_empty() {
            emitter.emit(
                &candidate,
                tld,
                Technique::Hyphenation,
                "all hyphens removed".to_string(),
            );
        }
    }
    Ok(())
}

fn tld_swap(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    for &alternative in tables::ALTERNATIVE_TLDS {
        if alternative == tld {
            continue;
        }
        let detail = format!("tld '{}' -> '{}'", tld, alternative);
        if !emitter.emit(name, alternative, Technique::TldSwap, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn prefix(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    for &entry in tables::PHISHING_PREFIXES {
        let word = entry.trim_end_matches(['-', '.']);
        let candidate = format!("{}{}", word, name);
        let detail = format!("prefixed '{}'", word);
        if !emitter.emit(&candidate, tld, Technique::Prefix, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn suffix(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    for &entry in tables::PHISHING_SUFFIXES {
        let word = entry.trim_start_matches('-');
        let candidate = format!("{}{}", name, word);
        let detail = format!("appended '{}'", word);
        if !emitter.emit(&candidate, tld, Technique::Suffix, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn vowel_swap(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if !tables::VOWELS.contains(&ch) {
            continue;
        }
        for &vowel in tables::VOWELS {
            if vowel == ch {
                continue;
            }
            let candidate = substituted(&chars, i, vowel);
            let detail = format!("'{}' -> '{}' at position {}", ch, vowel, i);
            if !emitter.emit(&candidate, tld, Technique::VowelSwap, detail) {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn double_char(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] != chars[i + 1] {
            continue;
        }
        // Only runs of exactly two; longer runs are not a doubling typo.
        if i > 0 && chars[i - 1] == chars[i] {
            continue;
        }
        if i + 2 < chars.len() && chars[i + 2] == chars[i] {
            continue;
        }
        let mut candidate: String = chars[..i].iter().collect();
        candidate.extend(chars[i + 1..].iter());
        let detail = format!("collapsed '{}{}' at position {}", chars[i], chars[i], i);
        if !emitter.emit(&candidate, tld, Technique::DoubleChar, detail) {
            return Ok(());
        }
    }
    Ok(())
}

fn bitsquatting(name: &str, tld: &str, emitter: &mut Emitter) -> Result {
    let chars: Vec<char> = name.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii() {
            continue;
        }
        let code = ch as u8;
        for bit in 0..8 {
            let flipped = code ^ (1 << bit);
            // Memory errors produce arbitrary bytes; only those that land on
            // a plain letter yield a registrable label.
            if !flipped.is_ascii_lowercase() {
                continue;
            }
            let flipped = flipped as char;
            let candidate = substituted(&chars, i, flipped);
            let detail = format!("bit {} flipped: '{}' -> '{}' at position {}", bit, ch, flipped, i);
            if !emitter.emit(&candidate, tld, Technique::Bitsquatting, detail) {
                return Ok(());
            }
        }
    }
    Ok(())
}

fn subdomain(name: &str, _tld: &str, emitter: &mut Emitter) -> Result {
    for &label in tables::SUBDOMAIN_LABELS {
        let candidate = format!("{}.{}", name, label);
        let detail = format!("subdomain label '{}'", label);
        if !emitter.emit(&candidate, "com", Technique::Subdomain, detail) {
            return Ok(());
        }
    }
    Ok(())
}
