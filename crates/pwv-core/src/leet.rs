//! Leet-substitution expansion.

/// Substitution options for a lowercase letter, original first.
fn substitutions(letter: char) -> Option<&'static [char]> {
    match letter {
        'a' => Some(&['a', '@']),
        'e' => Some(&['e', '3']),
        'i' => Some(&['i', '1']),
        'o' => Some(&['o', '0']),
        's' => Some(&['s', '$', '5']),
        't' => Some(&['t', '7']),
        _ => None,
    }
}

/// Options for one character of the input, mirroring its case.
fn char_options(ch: char) -> Vec<char> {
    match substitutions(ch.to_ascii_lowercase()) {
        Some(options) if ch.is_uppercase() => {
            options.iter().map(char::to_ascii_uppercase).collect()
        }
        Some(options) => options.to_vec(),
        None => vec![ch],
    }
}

/// Number of variants [`leet_variants`] produces for `word`.
pub fn variant_count(word: &str) -> usize {
    word.chars().map(|ch| char_options(ch).len()).product()
}

/// Expand `word` into every substitution variant.
///
/// Variants are ordered as a cartesian product with the first character
/// varying slowest, so the unmodified word always comes first. The count
/// grows multiplicatively and is not capped here.
pub fn leet_variants(word: &str) -> Vec<String> {
    let mut variants = vec![String::with_capacity(word.len())];
    for ch in word.chars() {
        let options = char_options(ch);
        if options.len() == 1 {
            for variant in &mut variants {
                variant.push(options[0]);
            }
            continue;
        }
        let mut next = Vec::with_capacity(variants.len() * options.len());
        for prefix in &variants {
            for &option in &options {
                let mut variant = prefix.clone();
                variant.push(option);
                next.push(variant);
            }
        }
        variants = next;
    }
    variants
}
