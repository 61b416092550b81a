use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a player name for matching
///
/// Swaps "Last, First" to "first last", strips accents, lowercases, turns
/// hyphen/apostrophe variants into spaces and collapses whitespace. Pure and
/// idempotent, so values can be re-normalized freely.
pub fn normalize(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    let swapped = match name.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => name.to_string(),
    };

    let folded: String = strip_accents(&swapped)
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ',' => ' ',
            '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => ' ',
            '\'' | '`' | '\u{2018}' | '\u{2019}' | '\u{02BC}' => ' ',
            other => other,
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace accented characters with their ASCII base form
///
/// NFD decomposition plus a small table for letters that do not decompose.
pub fn strip_accents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'đ' => out.push('d'),
            'Đ' => out.push('D'),
            'ł' => out.push('l'),
            'Ł' => out.push('L'),
            'ø' => out.push('o'),
            'Ø' => out.push('O'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("Ae"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("Oe"),
            'ð' => out.push('d'),
            'Ð' => out.push('D'),
            'þ' => out.push_str("th"),
            'Þ' => out.push_str("Th"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_form_matches_plain_form() {
        assert_eq!(normalize("Djokovic, Novak"), normalize("Novak Djokovic"));
        assert_eq!(normalize("Alcaraz, Carlos"), "carlos alcaraz");
    }

    #[test]
    fn test_accents_are_stripped() {
        assert_eq!(normalize("Björn Borg"), "bjorn borg");
        assert_eq!(normalize("Đere, Laslo"), "laslo dere");
        assert_eq!(normalize("Hurkacz, Hubert"), "hubert hurkacz");
        assert_eq!(normalize("Søren Hess-Olesen"), "soren hess olesen");
    }

    #[test]
    fn test_punctuation_becomes_spaces() {
        assert_eq!(normalize("Auger-Aliassime, Felix"), "felix auger aliassime");
        assert_eq!(normalize("O'Connell, Christopher"), "christopher o connell");
        assert_eq!(normalize("O\u{2019}Connell, Christopher"), "christopher o connell");
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(normalize("  Carlos   Alcaraz "), "carlos alcaraz");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Djokovic, Novak",
            "Auger-Aliassime, Felix",
            "Søren Hess-Olesen",
            "Smith, John, Jr",
            "plain name",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
