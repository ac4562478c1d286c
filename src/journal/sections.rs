//! Section and list-item extraction.
//!
//! Sections are `###` subsections of a session block. Their bodies are
//! turned into flat lists of cleaned item strings.

use super::grammar;

/// Returns the section opened by a `### <name>` heading.
///
/// The heading is matched case-insensitively against the whole heading
/// text, ignoring a trailing colon or a trailing parenthetical note such as
/// `(AM)`. The returned slice starts at the heading line and runs up to the
/// next `##`/`###` heading or the end of `text`; deeper headings stay inside.
pub fn extract_section<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let wanted = name.trim().to_lowercase();

    let heading = grammar::SECTION_HEADING
        .captures_iter(text)
        .find(|caps| heading_matches(&caps["name"], &wanted))?;
    let heading = heading.get(0)?;

    let end = grammar::SECTION_BOUNDARY
        .find_at(text, heading.end())
        .map(|m| m.start())
        .unwrap_or(text.len());

    Some(&text[heading.start()..end])
}

fn heading_matches(heading: &str, wanted: &str) -> bool {
    let heading = heading.trim().trim_end_matches(':').trim_end().to_lowercase();
    match heading.strip_prefix(wanted) {
        Some("") => true,
        Some(rest) => rest.trim_start().starts_with('('),
        None => false,
    }
}

/// Collects list items from a section body.
///
/// Numbered items come first, then bullets, then bold-only lines whose text
/// does not already appear inside an earlier item.
pub fn extract_list_items(body: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for caps in grammar::NUMBERED_ITEM.captures_iter(body) {
        push_cleaned(&mut items, &caps["text"]);
    }

    for caps in grammar::BULLET_ITEM.captures_iter(body) {
        push_cleaned(&mut items, &caps["text"]);
    }

    for caps in grammar::BOLD_LINE.captures_iter(body) {
        let text = clean_item(&caps["text"]);
        if text.is_empty() || items.iter().any(|item| item.contains(&text)) {
            continue;
        }
        items.push(text);
    }

    items
}

/// Items from the named section, or an empty list when it is missing.
pub fn section_items(text: &str, name: &str) -> Vec<String> {
    extract_section(text, name)
        .map(extract_list_items)
        .unwrap_or_default()
}

/// Strips bold and code delimiters plus surrounding whitespace.
pub fn clean_item(raw: &str) -> String {
    raw.replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .trim()
        .to_string()
}

fn push_cleaned(items: &mut Vec<String>, raw: &str) {
    let text = clean_item(raw);
    if !text.is_empty() {
        items.push(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "## Session 1: Parser\n\
        \n\
        ### What I Worked On\n\
        1. Split the journal\n\
        #### Detail\n\
        - nested bullet\n\
        \n\
        ### Learnings\n\
        - Regexes are enough\n\
        \n\
        ## Session 2: Next\n\
        ### Learnings\n\
        - Not this one\n";

    #[test]
    fn test_extract_section_case_insensitive() {
        let section = extract_section(BLOCK, "what i worked on").unwrap();
        assert!(section.starts_with("### What I Worked On"));
        assert!(section.contains("Split the journal"));
    }

    #[test]
    fn test_extract_section_stops_at_next_level_three() {
        let section = extract_section(BLOCK, "What I Worked On").unwrap();
        assert!(!section.contains("Regexes are enough"));
    }

    #[test]
    fn test_extract_section_keeps_deeper_headings() {
        let section = extract_section(BLOCK, "What I Worked On").unwrap();
        assert!(section.contains("#### Detail"));
        assert!(section.contains("nested bullet"));
    }

    #[test]
    fn test_extract_section_stops_at_level_two() {
        let section = extract_section(BLOCK, "Learnings").unwrap();
        assert!(section.contains("Regexes are enough"));
        assert!(!section.contains("Not this one"));
    }

    #[test]
    fn test_extract_section_missing() {
        assert!(extract_section(BLOCK, "Blockers").is_none());
        assert!(extract_section("", "Learnings").is_none());
    }

    #[test]
    fn test_extract_section_requires_whole_heading() {
        let text = "### Learnings and Notes\n- item\n";
        assert!(extract_section(text, "Learnings").is_none());
    }

    #[test]
    fn test_extract_section_tolerates_colon_and_note() {
        let text = "### Learnings:\n- colon\n### What I Worked On (AM)\n1. morning\n";
        assert_eq!(section_items(text, "Learnings"), vec!["colon"]);
        assert_eq!(section_items(text, "What I Worked On"), vec!["morning"]);
    }

    #[test]
    fn test_extract_section_at_end_of_text() {
        let text = "### Learnings";
        assert_eq!(extract_section(text, "Learnings"), Some("### Learnings"));
    }

    #[test]
    fn test_list_items_numbered_in_order() {
        let body = "1. **First** thing\n2. Second `thing`\n3. Third\n";
        assert_eq!(
            extract_list_items(body),
            vec!["First thing", "Second thing", "Third"]
        );
    }

    #[test]
    fn test_list_items_numbered_before_bullets() {
        let body = "- bullet one\n1. numbered one\n* bullet two\n";
        assert_eq!(
            extract_list_items(body),
            vec!["numbered one", "bullet one", "bullet two"]
        );
    }

    #[test]
    fn test_list_items_bold_lines_appended() {
        let body = "**Standalone**\n- an item\n";
        assert_eq!(extract_list_items(body), vec!["an item", "Standalone"]);
    }

    #[test]
    fn test_list_items_bold_line_already_captured_is_skipped() {
        let body = "1. **Parser** rewritten\n**Parser**\n";
        assert_eq!(extract_list_items(body), vec!["Parser rewritten"]);
    }

    #[test]
    fn test_list_items_empty_body() {
        assert!(extract_list_items("").is_empty());
        assert!(extract_list_items("Just prose, no list.\n").is_empty());
    }

    #[test]
    fn test_list_items_handles_crlf() {
        let body = "1. First\r\n- Second\r\n**Third**\r\n";
        assert_eq!(extract_list_items(body), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_clean_item_strips_only_bold_and_code() {
        assert_eq!(clean_item("  **bold** and `code`  "), "bold and code");
        assert_eq!(clean_item("__under__ *italic*"), "under *italic*");
    }

    #[test]
    fn test_section_items_missing_section() {
        assert!(section_items(BLOCK, "Blockers").is_empty());
    }
}
