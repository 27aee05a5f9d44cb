//! Identifier case conversion.
//!
//! Input is split into words at `_`, `-`, whitespace and case boundaries, so
//! every converter accepts every style: `user_id`, `userId`, `UserID` and
//! `user-id` all yield the words `user` + `id`.

/// Split `s` into lowercase words.
///
/// An uppercase run followed by a lowercase letter ends one word early so
/// acronyms stay together: `HTTPServer` → `http`, `server`.
pub fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user_account` → `UserAccount`
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// `user_account` → `userAccount`
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `UserAccount` → `user_account`
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

/// `UserAccount` → `user-account`
pub fn to_kebab_case(s: &str) -> String {
    words(s).join("-")
}

/// `UserAccount` → `USER_ACCOUNT`
pub fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}
