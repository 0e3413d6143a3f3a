use super::level::DampingFamily;

/// Strips a trailing damping-level marker from a method name.
///
/// Method names conventionally carry the dispersion level as their last
/// hyphen-separated segment (`"TPSS-D3(BJ)"`, `"B3LYP-D3ZERO"`). When that segment,
/// with parentheses removed, matches the resolved level moniker ignoring case, it
/// is dropped. Exactly one segment is removed at most.
///
/// Returns `None` for an empty method name, and for a name that is nothing but the
/// level marker. Either way the damping parameters must be supplied entirely
/// through explicit coefficients.
pub fn normalize_method(method: &str, family: DampingFamily) -> Option<String> {
    if method.is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = method.split('-').collect();
    let is_level_marker = segments.last().is_some_and(|last| {
        let cleaned: String = last.chars().filter(|c| !matches!(c, '(' | ')')).collect();
        cleaned.eq_ignore_ascii_case(family.moniker())
    });
    if is_level_marker {
        segments.pop();
    }

    let normalized = segments.join("-");
    (!normalized.is_empty()).then_some(normalized)
}
