use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

/// `true` when `reference` contains `*` or `?`.
pub fn is_wildcard(reference: &str) -> bool {
    reference.contains(['*', '?'])
}

/// Compile a glob (`*` = any run within one path segment, `?` = one character).
pub fn glob_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re)
}

/// Pick one candidate matching `pattern`, breaking ties with `rng`.
///
/// Candidates come from an external scanner; the list order does not matter since
/// matches are sorted before sampling, so the same seed always gives the same pick.
pub fn pick_wildcard<R: Rng + ?Sized>(
    pattern: &str,
    candidates: &[String],
    rng: &mut R,
) -> Option<String> {
    let re = glob_regex(pattern).ok()?;
    let mut matches: Vec<&String> = candidates.iter().filter(|c| re.is_match(c)).collect();
    matches.sort();
    matches.dedup();
    matches.choose(rng).map(|s| (*s).clone())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/wildcard.rs"]
mod tests;
