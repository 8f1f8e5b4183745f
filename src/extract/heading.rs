//! Course-heading decomposition.

use crate::error::ExtractError;
use crate::records::CourseHeading;

/// Decompose a free-text course heading into (tag, name, period, reading period).
///
/// The portal renders headings as `"<tag> <name...> <year> <reading period>"`,
/// e.g. `"ATH100 Arkitektur och stadsbyggande: En kulturhistorisk orientering
/// 2013/2014 LP3-LP4"`. The first token is the course tag, the last two are
/// the academic year and reading period, and everything in between (re-joined
/// with single spaces) is the name.
///
/// Headings with fewer than four tokens are ambiguous — there is no way to
/// tell which field is missing — and are rejected as [`ExtractError::MalformedHeading`].
pub fn parse_course_heading(text: &str) -> Result<CourseHeading, ExtractError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(ExtractError::MalformedHeading {
            text: text.trim().to_owned(),
        });
    }

    Ok(CourseHeading {
        tag: tokens[0].to_owned(),
        name: tokens[1..tokens.len() - 2].join(" "),
        period: tokens[tokens.len() - 2].to_owned(),
        reading_period: tokens[tokens.len() - 1].to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_course_heading_reference_example() {
        let heading = parse_course_heading(
            " ATH100 Arkitektur och stadsbyggande: En kulturhistorisk orientering 2013/2014 LP3-LP4  ",
        )
        .unwrap();
        assert_eq!(heading.tag, "ATH100");
        assert_eq!(
            heading.name,
            "Arkitektur och stadsbyggande: En kulturhistorisk orientering"
        );
        assert_eq!(heading.period, "2013/2014");
        assert_eq!(heading.reading_period, "LP3-LP4");
    }

    #[test]
    fn test_parse_course_heading_minimal() {
        let heading = parse_course_heading("TDA357 Databaser 2013/2014 LP2").unwrap();
        assert_eq!(heading.tag, "TDA357");
        assert_eq!(heading.name, "Databaser");
        assert_eq!(heading.period, "2013/2014");
        assert_eq!(heading.reading_period, "LP2");
    }

    #[test]
    fn test_parse_course_heading_collapses_internal_whitespace() {
        let heading = parse_course_heading("TDA357  Databaser\u{a0}och  modeller 2013/2014 LP2");
        // split_whitespace collapses runs and treats NBSP as a delimiter
        assert_eq!(heading.unwrap().name, "Databaser och modeller");
    }

    #[test]
    fn test_parse_course_heading_idempotent() {
        let first = parse_course_heading(
            " ATH100 Arkitektur och stadsbyggande: En kulturhistorisk orientering 2013/2014 LP3-LP4  ",
        )
        .unwrap();
        let rebuilt = format!(
            "{} {} {} {}",
            first.tag, first.name, first.period, first.reading_period
        );
        assert_eq!(parse_course_heading(&rebuilt).unwrap(), first);
    }

    #[test]
    fn test_parse_course_heading_three_tokens_rejected() {
        // tag + one name word + period, no reading period: ambiguous
        let err = parse_course_heading("TDA357 Databaser 2013/2014").unwrap_err();
        match err {
            ExtractError::MalformedHeading { text } => {
                assert_eq!(text, "TDA357 Databaser 2013/2014");
            }
            other => panic!("expected MalformedHeading, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_course_heading_empty_rejected() {
        assert!(parse_course_heading("").is_err());
        assert!(parse_course_heading("   ").is_err());
    }
}
