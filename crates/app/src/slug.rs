//! Slugs
//!
//! Category and product slugs are lowercase ASCII words joined by single
//! hyphens. Cyrillic input is transliterated to Latin first and accented
//! Latin letters lose their diacritics.

/// Derive a slug from a display name.
///
/// Returns an empty string when nothing slug-worthy is left, which callers
/// treat as missing data.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.to_lowercase().chars() {
        if let Some(latin) = transliterate(ch).or_else(|| fold_latin(ch)) {
            if latin.is_empty() {
                continue;
            }

            push_word(&mut out, latin, &mut pending_dash);

            continue;
        }

        if ch.is_ascii_alphanumeric() {
            let mut buf = [0_u8; 4];

            push_word(&mut out, ch.encode_utf8(&mut buf), &mut pending_dash);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = !out.is_empty();
        }
    }

    out
}

/// Whether `value` is already a well-formed slug.
#[must_use]
pub fn is_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

fn push_word(out: &mut String, word: &str, pending_dash: &mut bool) {
    if *pending_dash {
        out.push('-');
        *pending_dash = false;
    }

    out.push_str(word);
}

/// Russian GOST-style mapping as used by the `transliterate` reversed `ru` pack.
fn transliterate(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ы' => "y",
        'ю' => "ju",
        'я' => "ja",
        'ъ' | 'ь' => "",
        _ => return None,
    };

    Some(latin)
}

/// Common Latin-1 and Latin Extended-A letters reduced to their base letters.
fn fold_latin(ch: char) -> Option<&'static str> {
    let base = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'ł' | 'ľ' | 'ĺ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' | 'ŕ' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'þ' => "th",
        _ => return None,
    };

    Some(base)
}
