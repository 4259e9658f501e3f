//! Parsing of generic type spellings (`Dictionary<string, List<int>>`).

/// Split `Base<args>` into the base name and the raw argument list.
///
/// Returns `None` when the name is not a generic application or its brackets do not balance.
pub fn split_application(name: &str) -> Option<(&str, &str)> {
    let open = name.find('<')?;
    let inner = name.strip_suffix('>')?.get(open + 1..)?;
    let base = &name[..open];
    if base.is_empty() || !balanced(inner) {
        return None;
    }
    Some((base, inner))
}

/// Split a generic argument list on top-level commas.
pub fn split_args(inner: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(inner[start..].trim());
    args
}

/// Whether a generic argument spells an opaque type parameter: a single upper-case letter or `T`
/// followed by an upper-case letter (`TKey`, `TResult`).
pub fn is_placeholder(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_uppercase(),
        (Some('T'), Some(second)) => second.is_ascii_uppercase() && name.chars().all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

fn balanced(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_arguments_split_at_top_level_only() {
        let (base, inner) = split_application("Dictionary<string,List<int>>").unwrap();
        assert_eq!(base, "Dictionary");
        assert_eq!(split_args(inner), vec!["string", "List<int>"]);
    }

    #[test]
    fn unbalanced_applications_are_rejected() {
        assert_eq!(split_application("List<int"), None);
        assert_eq!(split_application("List<int>>"), None);
        assert_eq!(split_application("<int>"), None);
        assert_eq!(split_application("String"), None);
    }

    #[test]
    fn placeholder_shapes() {
        assert!(is_placeholder("T"));
        assert!(is_placeholder("TKey"));
        assert!(!is_placeholder("TimeSpan"));
        assert!(!is_placeholder("int"));
        assert!(!is_placeholder("Type"));
    }
}
