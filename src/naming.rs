use convert_case::{Case, Casing};

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("datum", "data"),
];

const UNCOUNTABLE: &[&str] = &["equipment", "information", "metadata", "series", "species"];

/// `Blog::PostComment` -> `blog_post_comment`
pub fn model_name(class_name: &str) -> String {
    class_name.replace("::", "_").to_case(Case::Snake)
}

/// `Blog::PostComment` -> `blog-post-comment`
pub fn slugify(name: &str) -> String {
    name.replace("::", "-").to_case(Case::Kebab)
}

/// `Blog::PostComment` -> `Post Comments`
pub fn model_display_name(class_name: &str) -> String {
    let last = class_name.rsplit("::").next().unwrap_or(class_name);
    let title = last.to_case(Case::Title);
    match title.rsplit_once(' ') {
        Some((head, word)) => format!("{head} {}", pluralize(word)),
        None => pluralize(&title),
    }
}

/// `owner_id` -> `Owner`, `created_at` -> `Created at`
pub fn humanize(attribute: &str) -> String {
    let trimmed = match attribute.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => stem,
        _ => attribute,
    };
    trimmed.to_case(Case::Sentence)
}

pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR_PLURALS
        .iter()
        .find(|(singular, _)| *singular == lower)
    {
        return match_leading_case(word, plural);
    }

    let mut chars = lower.chars().rev();
    let last = chars.next();
    let before_last = chars.next();
    match (before_last, last) {
        (Some(prev), Some('y')) if !is_vowel(prev) => {
            format!("{}ies", &word[..word.len() - 1])
        }
        (_, Some('s' | 'x' | 'z')) => format!("{word}es"),
        (Some('c' | 's'), Some('h')) => format!("{word}es"),
        (_, Some(_)) => format!("{word}s"),
        (_, None) => String::new(),
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn match_leading_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
