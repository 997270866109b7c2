//! Text rendering for diagnostics.
//!
//! Registry errors talk about types, and `std::any::type_name` returns
//! fully qualified paths. These helpers make those paths readable.

/// Renders a resolution path as a single line.
///
/// # Examples
/// ```
/// use sijill_support::rendering::render_path;
///
/// let path = vec!["Mailer", "SmtpClient", "Credentials"];
/// assert_eq!(render_path(&path), "Mailer → SmtpClient → Credentials");
/// ```
pub fn render_path(path: &[impl AsRef<str>]) -> String {
    let mut rendered = String::new();
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            rendered.push_str(" → ");
        }
        rendered.push_str(segment.as_ref());
    }
    rendered
}

/// Strips module paths from a type name, keeping generics intact.
///
/// ```
/// use sijill_support::rendering::shorten_type_name;
///
/// assert_eq!(shorten_type_name("app::mail::Mailer"), "Mailer");
/// assert_eq!(
///     shorten_type_name("alloc::sync::Arc<dyn app::log::Sink>"),
///     "Arc<dyn Sink>"
/// );
/// assert_eq!(
///     shorten_type_name("std::collections::HashMap<alloc::string::String, u32>"),
///     "HashMap<String, u32>"
/// );
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    let mut short = String::with_capacity(full_name.len());
    let mut segment = String::new();
    let mut chars = full_name.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' | '*' => {
                short.push_str(&segment);
                short.push(ch);
                segment.clear();
            }
            _ => segment.push(ch),
        }
    }

    short.push_str(&segment);
    short
}

/// Picks up to `limit` names from `available` that look like `requested`.
///
/// Matches are ranked: substring of the full name first, then substring of
/// the short name, then a shared prefix of at least three characters.
///
/// ```
/// use sijill_support::rendering::suggest_similar;
///
/// let registered = ["app::Mailer", "app::MailQueue", "app::Clock"];
/// let hits = suggest_similar("app::Mailr", &registered, 2);
/// assert_eq!(hits.len(), 2);
/// assert!(hits.iter().all(|h| h.contains("Mail")));
/// ```
pub fn suggest_similar(requested: &str, available: &[&str], limit: usize) -> Vec<String> {
    let wanted = requested.to_lowercase();
    let wanted_short = shorten_type_name(requested).to_lowercase();

    let mut ranked: Vec<(usize, &str)> = available
        .iter()
        .filter(|name| **name != requested)
        .filter_map(|&name| score(&wanted, &wanted_short, name).map(|s| (s, name)))
        .collect();

    // Ties go by name so the result does not depend on input order.
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn score(wanted: &str, wanted_short: &str, candidate: &str) -> Option<usize> {
    let full = candidate.to_lowercase();
    if full.contains(wanted) || wanted.contains(&full) {
        return Some(100);
    }

    let short = shorten_type_name(candidate).to_lowercase();
    if short.contains(wanted_short) || wanted_short.contains(&short) {
        return Some(80);
    }

    let shared = short
        .chars()
        .zip(wanted_short.chars())
        .take_while(|(a, b)| a == b)
        .count();
    (shared >= 3).then_some(shared * 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_single_segment() {
        assert_eq!(render_path(&["Mailer"]), "Mailer");
    }

    #[test]
    fn render_empty_path() {
        let path: Vec<String> = vec![];
        assert_eq!(render_path(&path), "");
    }

    #[test]
    fn shorten_plain_name() {
        assert_eq!(shorten_type_name("u32"), "u32");
    }

    #[test]
    fn shorten_nested_generics() {
        assert_eq!(
            shorten_type_name("core::option::Option<alloc::vec::Vec<app::Job>>"),
            "Option<Vec<Job>>"
        );
    }

    #[test]
    fn shorten_references_and_tuples() {
        assert_eq!(
            shorten_type_name("(&str, alloc::string::String)"),
            "(&str, String)"
        );
    }

    #[test]
    fn suggestions_skip_exact_match() {
        let available = ["app::Mailer"];
        assert!(suggest_similar("app::Mailer", &available, 3).is_empty());
    }

    #[test]
    fn suggestions_ranked_by_closeness() {
        let available = ["app::Clock", "app::MailerConfig", "app::Maildrop"];
        let hits = suggest_similar("app::Mailer", &available, 3);
        assert_eq!(hits[0], "app::MailerConfig");
        assert_eq!(hits[1], "app::Maildrop");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn suggestions_none_for_unrelated() {
        let available = ["app::Clock"];
        assert!(suggest_similar("xyz::Widget", &available, 3).is_empty());
    }

    #[test]
    fn suggestions_ties_ordered_by_name() {
        let forward = ["a::ClockC", "a::ClockA", "a::ClockD", "a::ClockB"];
        let mut backward = forward;
        backward.reverse();

        let expected = vec!["a::ClockA", "a::ClockB", "a::ClockC"];
        assert_eq!(suggest_similar("a::Clock", &forward, 3), expected);
        assert_eq!(suggest_similar("a::Clock", &backward, 3), expected);
    }

    #[test]
    fn suggestions_respect_limit() {
        let available = ["a::MailA", "a::MailB", "a::MailC"];
        assert_eq!(suggest_similar("a::Mail", &available, 2).len(), 2);
    }
}
