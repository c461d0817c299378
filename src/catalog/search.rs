/// Filter channel names by a search term.
///
/// Matching is a case-insensitive substring test. Names starting with the
/// term come first, the rest follow; each part is sorted case-insensitively.
/// An empty term keeps every name.
pub fn search_channels<S: AsRef<str>>(names: &[S], term: &str) -> Vec<String> {
    let term = term.to_lowercase();
    let mut hits: Vec<(bool, String, &str)> = names
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|name| {
            let lower = name.to_lowercase();
            lower
                .contains(&term)
                .then(|| (!lower.starts_with(&term), lower, name))
        })
        .collect();
    hits.sort();
    hits.into_iter().map(|(_, _, name)| name.to_string()).collect()
}
