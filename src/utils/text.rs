use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_text_unicode(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let ellipsis_width = ELLIPSIS.width();

    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - text_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_unicode() {
        assert_eq!(truncate_text_unicode("Hello", 10), "Hello");
        assert_eq!(truncate_text_unicode("Hello World!", 8), "Hello...");
        assert_eq!(truncate_text_unicode("", 5), "");
    }

    #[test]
    fn test_truncate_keeps_accented_text_within_width() {
        assert_eq!(truncate_text_unicode("Rez-de-chaussée", 20), "Rez-de-chaussée");
        assert_eq!(truncate_text_unicode("Propriétaire occupant", 10), "Proprié...");
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("Hello", 10), "Hello     ");
        assert_eq!(pad_to_width("Hello World", 5), "Hello World");
    }
}
