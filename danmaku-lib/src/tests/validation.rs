//! Markup and subtitle validation utilities

/// Outcome of validating one rendered document
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Number of `<d>` elements or `Dialogue` lines found
    pub items: usize,
}

/// Validate an XML markup document
pub fn validate_markup(content: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let warnings = Vec::new();
    let mut items = 0;

    if !content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n") {
        errors.push("Missing XML declaration".to_string());
    }

    let body = match (content.find("<i>"), content.rfind("</i>")) {
        (Some(start), Some(end)) if start < end => &content[start + 3..end],
        _ => {
            errors.push("Missing <i> root element".to_string());
            ""
        }
    };

    let mut rest = body;
    while let Some(start) = rest.find("<d p=\"") {
        let after = &rest[start + 6..];
        let Some(attr_end) = after.find("\">") else {
            errors.push("Unterminated p attribute".to_string());
            break;
        };
        let attr = &after[..attr_end];
        let fields: Vec<&str> = attr.split(',').collect();
        if fields.len() < 8 {
            errors.push(format!("p attribute has {} fields: {}", fields.len(), attr));
        } else {
            if fields[0].parse::<f64>().is_err() {
                errors.push(format!("Bad offset: {}", fields[0]));
            }
            if fields[1..6].iter().any(|f| f.parse::<i64>().is_err()) {
                errors.push(format!("Non-numeric attribute field: {}", attr));
            }
        }

        let text_start = &after[attr_end + 2..];
        let Some(text_end) = text_start.find("</d>") else {
            errors.push("Unterminated <d> element".to_string());
            break;
        };
        let text = &text_start[..text_end];
        if text.contains('<') || text.contains('>') || text.contains('"') {
            errors.push(format!("Unescaped character in text: {:?}", text));
        }
        if text
            .chars()
            .any(|c| (c.is_control() && !matches!(c, '\t' | '\n' | '\r')))
        {
            errors.push(format!("Control character in text: {:?}", text));
        }

        items += 1;
        rest = &text_start[text_end + 4..];
    }

    if !rest.trim().is_empty() {
        errors.push(format!("Unexpected content after last element: {:?}", rest));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        items,
    }
}

/// Parse an ASS `H:MM:SS.cc` timestamp into centiseconds
pub fn parse_ass_timestamp(ts: &str) -> Option<u64> {
    let (hms, cs) = ts.split_once('.')?;
    let mut parts = hms.split(':');
    let h: u64 = parts.next()?.parse().ok()?;
    let m: u64 = parts.next()?.parse().ok()?;
    let s: u64 = parts.next()?.parse().ok()?;
    let cs: u64 = cs.parse().ok()?;
    if parts.next().is_some() || m > 59 || s > 59 || cs > 99 {
        return None;
    }
    Some(((h * 60 + m) * 60 + s) * 100 + cs)
}

/// Validate an ASS subtitle script
pub fn validate_subtitle(content: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut items = 0;

    for section in ["[Script Info]", "[V4+ Styles]", "[Events]"] {
        if !content.lines().any(|l| l == section) {
            errors.push(format!("Missing {} section", section));
        }
    }
    if !content.lines().any(|l| l.starts_with("PlayResX: ")) {
        errors.push("Missing PlayResX".to_string());
    }
    if !content.lines().any(|l| l.starts_with("PlayResY: ")) {
        errors.push("Missing PlayResY".to_string());
    }
    if !content.lines().any(|l| l.starts_with("Style: Default,")) {
        errors.push("Missing Default style".to_string());
    }

    for line in content.lines().filter(|l| l.starts_with("Dialogue: ")) {
        let fields: Vec<&str> = line["Dialogue: ".len()..].splitn(10, ',').collect();
        if fields.len() != 10 {
            errors.push(format!("Dialogue has {} fields: {}", fields.len(), line));
            continue;
        }

        match (parse_ass_timestamp(fields[1]), parse_ass_timestamp(fields[2])) {
            (Some(start), Some(end)) => {
                if start > end {
                    errors.push(format!("Dialogue ends before it starts: {}", line));
                }
            }
            _ => errors.push(format!("Bad timestamps: {}", line)),
        }

        if fields[3] != "Default" {
            warnings.push(format!("Unexpected style {}", fields[3]));
        }

        let text = fields[9];
        let Some(close) = text.find('}').filter(|_| text.starts_with("{\\an")) else {
            errors.push(format!("Missing override block: {}", line));
            continue;
        };
        let body = &text[close + 1..];
        let mut prev = None;
        for c in body.chars() {
            if matches!(c, '{' | '}') && prev != Some('\\') {
                errors.push(format!("Unescaped brace in text: {}", line));
                break;
            }
            prev = Some(c);
        }

        items += 1;
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ass_timestamp() {
        assert_eq!(parse_ass_timestamp("0:00:01.50"), Some(150));
        assert_eq!(parse_ass_timestamp("1:02:03.04"), Some(372_304));
        assert_eq!(parse_ass_timestamp("0:61:00.00"), None);
        assert_eq!(parse_ass_timestamp("garbage"), None);
    }

    #[test]
    fn test_rejects_broken_markup() {
        let result = validate_markup("<i><d p=\"1.000,1\">x</d></i>");
        assert!(!result.is_valid);
        assert!(result.errors.len() >= 2);
    }
}
