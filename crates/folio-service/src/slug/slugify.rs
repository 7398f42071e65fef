//! Pure slug helpers.

/// Convert a human-readable name into a lowercase, hyphen-separated slug.
///
/// `locale` selects the transliteration table for letters that have a
/// language-specific spelling (`de`, `da`, `nb`); every other locale folds
/// accented Latin letters to their base letter. Characters that cannot be
/// mapped into `[a-z0-9]` act as separators, runs of separators collapse into
/// a single `-`, and leading or trailing separators are dropped.
pub fn slugify(input: &str, locale: &str) -> String {
    let lang = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch == '@' {
            pending_separator = true;
            push_word(&mut slug, "at", &mut pending_separator);
            pending_separator = true;
            continue;
        }

        if ch.is_ascii_alphanumeric() {
            let mut buf = [0u8; 4];
            push_word(&mut slug, ch.encode_utf8(&mut buf), &mut pending_separator);
        } else if let Some(mapped) = transliterate(ch, &lang) {
            push_word(&mut slug, mapped, &mut pending_separator);
        } else {
            pending_separator = true;
        }
    }

    slug
}

fn push_word(slug: &mut String, word: &str, pending_separator: &mut bool) {
    if *pending_separator && !slug.is_empty() {
        slug.push('-');
    }
    *pending_separator = false;
    slug.push_str(word);
}

fn transliterate(ch: char, lang: &str) -> Option<&'static str> {
    let mapped = match (lang, ch) {
        ("de", 'ä') => "ae",
        ("de", 'ö') => "oe",
        ("de", 'ü') => "ue",
        ("da" | "nb" | "no", 'æ') => "ae",
        ("da" | "nb" | "no", 'ø') => "oe",
        ("da" | "nb" | "no", 'å') => "aa",
        (_, 'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą') => "a",
        (_, 'æ') => "ae",
        (_, 'ç' | 'ć' | 'č') => "c",
        (_, 'ď' | 'đ' | 'ð') => "d",
        (_, 'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě') => "e",
        (_, 'ğ') => "g",
        (_, 'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı') => "i",
        (_, 'ł' | 'ľ') => "l",
        (_, 'ñ' | 'ń' | 'ň') => "n",
        (_, 'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő') => "o",
        (_, 'œ') => "oe",
        (_, 'ř') => "r",
        (_, 'ś' | 'š' | 'ş') => "s",
        (_, 'ß') => "ss",
        (_, 'ť' | 'ţ') => "t",
        (_, 'þ') => "th",
        (_, 'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű') => "u",
        (_, 'ý' | 'ÿ') => "y",
        (_, 'ź' | 'ż' | 'ž') => "z",
        _ => return None,
    };
    Some(mapped)
}

/// Pick a slug for `base` that does not clash with `existing`.
///
/// `existing` holds the slugs already taken that equal `base` or look like
/// `base-<digits>`. A free base is returned unchanged. Otherwise the result
/// is `base-<n>` where `n` is one more than the largest suffix in use, the
/// bare base counting as suffix 0.
pub fn next_available_slug(base: &str, existing: &[String]) -> String {
    if !existing.iter().any(|slug| slug == base) {
        return base.to_string();
    }

    let max_suffix = existing
        .iter()
        .filter_map(|slug| numeric_suffix(base, slug))
        .max()
        .unwrap_or(0);

    format!("{base}-{}", max_suffix + 1)
}

fn numeric_suffix(base: &str, slug: &str) -> Option<u64> {
    if slug == base {
        return Some(0);
    }
    let digits = slug.strip_prefix(base)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
