/// Set-name markers the client UI prepends to a custom item name or type
/// line — e.g. `<<set:MS>><<set:M>><<set:S>>Rapture Nock`. Stripped before
/// storage; the markers carry display-formatting intent only.
pub fn strip_markers(raw: &str) -> &str {
    let mut rest = raw;
    loop {
        let trimmed = rest.strip_prefix("<<set:").and_then(|s| {
            let end = s.find(">>")?;
            Some(&s[end + 2..])
        });
        match trimmed {
            Some(next) => rest = next,
            None => break,
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_a_run_of_set_markers() {
        assert_eq!(
            strip_markers("<<set:MS>><<set:M>><<set:S>>Rapture Nock"),
            "Rapture Nock"
        );
    }

    #[test]
    fn leaves_unmarked_names_untouched() {
        assert_eq!(strip_markers("Karui Bow"), "Karui Bow");
    }

    #[test]
    fn leaves_a_dangling_unterminated_marker_untouched() {
        assert_eq!(strip_markers("<<set:MS"), "<<set:MS");
    }
}
