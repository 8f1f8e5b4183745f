//! Search-form field mapping.

use html_scraper::{Html, Selector};
use tracing::warn;

use crate::records::FieldEntry;

/// Text of the select-all checkbox items, which carry no search id of
/// their own.
const SELECT_ALL_LABEL: &str = "Markera alla";

/// Extract every selectable search-form option from a search page.
///
/// The portal renders its filter categories as `<li>` items, each holding a
/// checkbox `<input>` whose (non-standard) `tag` attribute is the numeric
/// id the form posts back in `hfCategory1..3`. Item text comes in three
/// shapes: `"TKAUT - Automation och mekatronik"` (programme, split on the
/// first dash), a bare academic year like `"2013/2014"`, or a reading
/// period like `"Läsperiod 1"` (the latter two kept whole as the tag).
pub fn extract_field_entries(document: &str) -> Vec<FieldEntry> {
    let li_sel = Selector::parse("li").unwrap();
    let input_sel = Selector::parse("input").unwrap();

    let mut entries = Vec::new();

    for li in Html::parse_document(document).select(&li_sel) {
        let text = li.text().collect::<String>().trim().to_owned();
        if text.is_empty() || text == SELECT_ALL_LABEL {
            continue;
        }

        let sid = match li.select(&input_sel).next().and_then(|input| input.attr("tag")) {
            Some(sid) => sid.to_owned(),
            None => {
                warn!(item = text.as_str(), "Form option without a search id, skipping");
                continue;
            }
        };

        let (tag, name) = match text.split_once('-') {
            Some((tag, name)) => (tag.trim().to_owned(), name.trim().to_owned()),
            None => (text, String::new()),
        };

        entries.push(FieldEntry { tag, name, sid });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FORM: &str = r#"<html><body>
        <ul>
            <li><input type="checkbox" tag="0" />Markera alla</li>
            <li><input type="checkbox" tag="57" />TKAUT - Automation och mekatronik</li>
            <li><input type="checkbox" tag="275" />MPALG - Algoritmer, språk och logik</li>
        </ul>
        <ul>
            <li><input type="checkbox" tag="49" />2013/2014</li>
        </ul>
        <ul>
            <li><input type="checkbox" tag="1049" />Läsperiod 1</li>
        </ul>
    </body></html>"#;

    #[test]
    fn test_extract_field_entries_programmes() {
        let entries = extract_field_entries(SEARCH_FORM);
        assert_eq!(entries.len(), 4);

        assert_eq!(entries[0].tag, "TKAUT");
        assert_eq!(entries[0].name, "Automation och mekatronik");
        assert_eq!(entries[0].sid, "57");

        assert_eq!(entries[1].tag, "MPALG");
        assert_eq!(entries[1].sid, "275");
    }

    #[test]
    fn test_extract_field_entries_year_and_period_kept_whole() {
        let entries = extract_field_entries(SEARCH_FORM);

        assert_eq!(entries[2].tag, "2013/2014");
        assert_eq!(entries[2].name, "");
        assert_eq!(entries[2].sid, "49");

        assert_eq!(entries[3].tag, "Läsperiod 1");
        assert_eq!(entries[3].sid, "1049");
    }

    #[test]
    fn test_extract_field_entries_skips_select_all() {
        let entries = extract_field_entries(SEARCH_FORM);
        assert!(entries.iter().all(|e| e.tag != SELECT_ALL_LABEL));
    }

    #[test]
    fn test_extract_field_entries_skips_items_without_id() {
        let doc = r#"<ul><li>Plain text item</li>
            <li><input type="checkbox" tag="5" />TKDAT - Datateknik</li></ul>"#;
        let entries = extract_field_entries(doc);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tag, "TKDAT");
    }
}
