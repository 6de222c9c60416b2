//! Converts labels into URL-safe kebab-case slugs (e.g., `Web Dev` becomes
//! `web-dev` and `fooBar` becomes `foo-bar`).

/// Converts `input` into a lower-case, hyphen-delimited slug. Words are split
/// on anything that isn't a letter or digit, on lower-to-upper case changes,
/// on the end of an upper-case run (`XMLHttp` -> `xml-http`), and between
/// letters and digits, except that ordinals like `1st` stay whole. Accented
/// Latin letters are folded to ASCII, combining marks and apostrophes are
/// dropped, so `Don't Café` becomes `dont-cafe`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for word in words(&deburr(input)) {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(word.iter().flat_map(|c| c.to_lowercase()));
    }
    slug
}

/// Applies [`slugify`] to each element of `inputs`, preserving order and
/// length.
pub fn slugify_all<S: AsRef<str>>(inputs: &[S]) -> Vec<String> {
    inputs.iter().map(|s| slugify(s.as_ref())).collect()
}

// Folds Latin-1 Supplement and Latin Extended-A letters to ASCII, drops
// combining diacritical marks, then strips apostrophes. Everything else passes
// through untouched.
fn deburr(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\u{300}'..='\u{36f}' => {}
            '\u{c0}'..='\u{17f}' if c.is_alphabetic() => match ligature(c) {
                Some(s) => folded.push_str(s),
                None => match deunicode::deunicode_char(c) {
                    Some(s) => folded.push_str(s),
                    None => folded.push(c),
                },
            },
            _ => folded.push(c),
        }
    }
    folded.retain(|c| c != '\'' && c != '\u{2019}');
    folded
}

// Letters whose transliteration is title-cased rather than all-caps, so `Æther`
// reads as one word.
fn ligature(c: char) -> Option<&'static str> {
    Some(match c {
        'Æ' => "Ae",
        'æ' => "ae",
        'Œ' => "Oe",
        'œ' => "oe",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'Þ' => "Th",
        'þ' => "th",
        'ŉ' => "'n",
        'ſ' => "s",
        _ => return None,
    })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
    Upper,
    Lower,
    Digit,
    Separator,
}

fn classify(c: char) -> Class {
    if c.is_uppercase() {
        Class::Upper
    } else if c.is_alphabetic() {
        // caseless scripts (CJK, etc.) group like lower-case letters
        Class::Lower
    } else if c.is_numeric() {
        Class::Digit
    } else {
        Class::Separator
    }
}

// Returns the length of an ordinal (`1st`, `22nd`, `4TH`) at the start of
// `chars`. The suffix must agree with the last digit and be followed by a
// word end or a case change.
fn ordinal_len(chars: &[char]) -> Option<usize> {
    let digits = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || chars.len() < digits + 2 {
        return None;
    }
    let expected = match chars[digits - 1] {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        _ => "th",
    };
    let suffix: String = chars[digits..digits + 2].iter().collect();
    let lower = suffix == expected;
    let upper = suffix == expected.to_ascii_uppercase();
    if !lower && !upper {
        return None;
    }
    let ends_word = match chars.get(digits + 2) {
        None => true,
        Some(&next) => {
            !next.is_alphanumeric()
                || (lower && next.is_uppercase())
                || (upper && next.is_lowercase())
        }
    };
    if ends_word {
        Some(digits + 2)
    } else {
        None
    }
}

fn words(input: &str) -> Vec<Vec<char>> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current: Vec<char> = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let class = classify(c);
        if class == Class::Separator {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            i += 1;
            continue;
        }

        let prev = current.last().map(|&p| classify(p));
        if class == Class::Digit && prev != Some(Class::Digit) {
            if let Some(len) = ordinal_len(&chars[i..]) {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                words.push(chars[i..i + len].to_vec());
                i += len;
                continue;
            }
        }

        if let Some(prev) = prev {
            let next = chars.get(i + 1).map(|&n| classify(n));
            let boundary = match (prev, class) {
                (Class::Digit, Class::Upper) | (Class::Digit, Class::Lower) => true,
                (Class::Upper, Class::Digit) | (Class::Lower, Class::Digit) => true,
                (Class::Lower, Class::Upper) => true,
                // `XMLHttp`: the `H` starts a new word
                (Class::Upper, Class::Upper) => next == Some(Class::Lower),
                _ => false,
            };
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        i += 1;
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_slugify_spaces() {
        assert_eq!("web-dev", slugify("Web Dev"));
        assert_eq!("hello-world", slugify("  hello   world  "));
    }

    #[test]
    fn test_slugify_case_changes() {
        assert_eq!("foo-bar", slugify("fooBar"));
        assert_eq!("xml-http-request", slugify("XMLHttpRequest"));
        assert_eq!("ai", slugify("AI"));
        assert_eq!("type-script", slugify("TypeScript"));
    }

    #[test]
    fn test_slugify_digits() {
        assert_eq!("web-3", slugify("web3"));
        assert_eq!("es-2015-features", slugify("ES2015 features"));
        assert_eq!("2024", slugify("2024"));
    }

    #[test]
    fn test_slugify_separators() {
        assert_eq!("foo-bar-baz", slugify("__foo--bar..baz__"));
        assert_eq!("c-rust", slugify("C++ & Rust"));
        assert_eq!("", slugify(""));
        assert_eq!("", slugify("--- !!"));
    }

    #[test]
    fn test_slugify_deburr_and_apostrophes() {
        assert_eq!("cafe-creme", slugify("Café Crème"));
        assert_eq!("dont-panic", slugify("Don't Panic"));
        assert_eq!("strasse", slugify("Straße"));
    }

    #[test]
    fn test_slugify_ligatures() {
        assert_eq!("aether", slugify("Æther"));
        assert_eq!("oeuvre", slugify("Œuvre"));
        assert_eq!("thorr", slugify("Þórr"));
        assert_eq!("encyclopaedia", slugify("encyclopædia"));
    }

    #[test]
    fn test_slugify_combining_marks() {
        assert_eq!("resume", slugify("re\u{301}sume\u{301}"));
        assert_eq!("naive-cafe", slugify("nai\u{308}ve cafe\u{301}"));
    }

    #[test]
    fn test_slugify_ordinals() {
        assert_eq!("1st-place", slugify("1st Place"));
        assert_eq!("22nd-century", slugify("22nd Century"));
        assert_eq!("4th-of-july", slugify("4th of July"));
        assert_eq!("3rd-party", slugify("3rdParty"));
        assert_eq!("the-2nd", slugify("THE 2ND"));
        // the suffix must match the last digit
        assert_eq!("12-th", slugify("12th"));
        assert_eq!("1-stop", slugify("1stop"));
    }

    #[test]
    fn test_slugify_caseless_script() {
        assert_eq!("rust-中文", slugify("Rust 中文"));
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in &[
            "Web Dev",
            "XMLHttpRequest",
            "ES2015 features",
            "Café Crème",
            "Rust 中文",
            "Æther 1st Place",
            "already-a-slug",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(once, slugify(&once), "input: {:?}", input);
        }
    }

    #[test]
    fn test_slugify_all_preserves_order() {
        assert_eq!(
            vec!["web-dev".to_owned(), "ai".to_owned(), "".to_owned()],
            slugify_all(&["Web Dev", "AI", ""]),
        );
        assert!(slugify_all::<&str>(&[]).is_empty());
    }
}
