/// Non-fatal problems (skipped rows, unreadable archive) surface as
/// single-line `key=value` records on stderr so downstream log scrapers
/// can match on them.
pub fn emit(code: &str, stage: &str, subject: &str, reason: &str, err: &str) {
    eprintln!(
        "ARCVAULT_WARN code={} stage={} subject={} reason={} err={}",
        sanitize_value(code),
        sanitize_value(stage),
        sanitize_value(subject),
        sanitize_value(reason),
        sanitize_value(err),
    );
}

fn sanitize_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_sep = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else if ch.is_ascii_graphic() {
            out.push(ch);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "na".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_value;

    #[test]
    fn whitespace_collapses_to_underscores() {
        assert_eq!(sanitize_value("arc row  7"), "arc_row_7");
    }

    #[test]
    fn blank_values_fall_back() {
        assert_eq!(sanitize_value(" \t "), "na");
    }
}
