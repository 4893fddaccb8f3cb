//! English text modifiers applied with `#symbol.modifier#`.

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_alpha_num(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Apply a named modifier. Unknown modifiers leave the text unchanged.
pub fn apply(modifier: &str, text: &str) -> Option<String> {
    let out = match modifier {
        "capitalize" => capitalize(text),
        "capitalizeAll" => capitalize_all(text),
        "a" => article(text),
        "s" => plural(text),
        "firstS" => first_s(text),
        "ed" => past_tense(text),
        _ => return None,
    };
    Some(out)
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize the first letter of every word.
pub fn capitalize_all(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if !is_alpha_num(c) {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Prefix the indefinite article.
pub fn article(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        // "a unicorn", "a university"
        ['u' | 'U', _, 'i' | 'I', ..] => format!("a {}", text),
        [first, ..] if is_vowel(*first) => format!("an {}", text),
        _ => format!("a {}", text),
    }
}

pub fn plural(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [.., 's' | 'h' | 'x'] => format!("{}es", text),
        [.., before, 'y'] if !is_vowel(*before) => {
            format!("{}ies", &text[..text.len() - 1])
        }
        _ => format!("{}s", text),
    }
}

/// Pluralize only the first word.
pub fn first_s(text: &str) -> String {
    match text.split_once(' ') {
        Some((first, rest)) => format!("{} {}", plural(first), rest),
        None => plural(text),
    }
}

/// Past tense of the first word.
pub fn past_tense(text: &str) -> String {
    let (first, rest) = match text.split_once(' ') {
        Some((first, rest)) => (first, Some(rest)),
        None => (text, None),
    };
    let chars: Vec<char> = first.chars().collect();
    let verb = match chars.as_slice() {
        [.., 'e'] => format!("{}d", first),
        [.., before, 'y'] if !is_vowel(*before) => {
            format!("{}ied", &first[..first.len() - 1])
        }
        _ => format!("{}ed", first),
    };
    match rest {
        Some(rest) => format!("{} {}", verb, rest),
        None => verb,
    }
}
