//! Section classification
//!
//! Groups a participant's data lines by the section label column. Comment
//! lines are set aside untouched.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::schema::RawLine;
use crate::segmenter::parse_header_date;
use crate::types::{ParticipantSegment, SegmentHeader};
use tracing::{debug, warn};

/// Lines sharing one section label, in log order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub label: &'a str,
    pub lines: Vec<RawLine<'a>>,
}

/// A participant segment split into comments, header and sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSegment<'a> {
    pub index: usize,
    pub comments: Vec<&'a str>,
    /// `None` when the segment carries no data lines at all
    pub header: Option<SegmentHeader>,
    /// Sections in order of first appearance
    pub sections: Vec<Section<'a>>,
}

impl<'a> ClassifiedSegment<'a> {
    /// Section by label
    pub fn section(&self, label: &str) -> Option<&Section<'a>> {
        self.sections.iter().find(|s| s.label == label)
    }

    /// Lines of a section; an absent section yields no lines
    pub fn lines_of(&self, label: &str) -> &[RawLine<'a>] {
        self.section(label).map(|s| s.lines.as_slice()).unwrap_or(&[])
    }

    /// Sections that can hold trials, in order of first appearance
    pub fn experimental_sections<'s>(
        &'s self,
        config: &'s ParserConfig,
    ) -> impl Iterator<Item = &'s Section<'a>> + 's {
        self.sections
            .iter()
            .filter(move |s| !config.is_administrative(s.label))
    }
}

/// Classify the lines of one participant segment
pub fn classify<'a>(
    segment: &ParticipantSegment<'a>,
    config: &ParserConfig,
) -> Result<ClassifiedSegment<'a>, ParseError> {
    let (comments, data): (Vec<&'a str>, Vec<&'a str>) = segment
        .lines
        .iter()
        .copied()
        .partition(|line| line.starts_with(config.comment_marker.as_str()));

    let lines: Vec<RawLine<'a>> = data
        .into_iter()
        .map(|line| RawLine::parse(line, config.delimiter))
        .collect();

    let header = match lines.first() {
        Some(first) => Some(SegmentHeader {
            received_at: first.received_at()?.to_string(),
            participant_hash: first.participant_hash()?.to_string(),
            received_on: comments.first().and_then(|c| parse_header_date(c)),
        }),
        None => {
            warn!(participant = segment.index, "segment has no data lines");
            None
        }
    };

    let mut sections: Vec<Section<'a>> = Vec::new();
    for line in lines {
        let label = line.section_label(config.section_label_column)?;
        match sections.iter_mut().find(|s| s.label == label) {
            Some(section) => section.lines.push(line),
            None => sections.push(Section {
                label,
                lines: vec![line],
            }),
        }
    }

    debug!(
        participant = segment.index,
        sections = sections.len(),
        comments = comments.len(),
        "classified segment"
    );

    Ok(ClassifiedSegment {
        index: segment.index,
        comments,
        header,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segment(lines: Vec<&str>) -> ParticipantSegment<'_> {
        ParticipantSegment { index: 1, lines }
    }

    #[test]
    fn test_classify_groups_by_label() {
        let seg = segment(vec![
            "# Results on Mon 01 Jan GMT",
            "1700000000,hash1,a,b,c,consent,x",
            "# another comment",
            "1700000000,hash1,a,b,c,block-1,x",
            "1700000000,hash1,a,b,c,consent,y",
            "1700000000,hash1,a,b,c,block-2,z",
        ]);
        let classified = classify(&seg, &ParserConfig::default()).unwrap();

        assert_eq!(classified.comments.len(), 2);
        let labels: Vec<&str> = classified.sections.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["consent", "block-1", "block-2"]);
        assert_eq!(classified.lines_of("consent").len(), 2);
        assert_eq!(
            classified.lines_of("consent")[1].text(),
            "1700000000,hash1,a,b,c,consent,y"
        );
        assert!(classified.lines_of("demographics").is_empty());
    }

    #[test]
    fn test_classify_header() {
        let seg = segment(vec![
            "# Results on Thu, 14 Sep 2023 12:34:56 GMT",
            "1694694896,d41d8cd98f00b204e9800998ecf8427e,a,b,c,consent",
        ]);
        let header = classify(&seg, &ParserConfig::default())
            .unwrap()
            .header
            .unwrap();

        assert_eq!(header.received_at, "1694694896");
        assert_eq!(header.participant_hash, "d41d8cd98f00b204e9800998ecf8427e");
        assert!(header.received_on.is_some());
    }

    #[test]
    fn test_classify_short_line_is_structural_error() {
        let seg = segment(vec!["1700000000,hash1,a,b,c,consent", "1700000000,hash1,a"]);
        let result = classify(&seg, &ParserConfig::default());
        assert!(matches!(
            result,
            Err(ParseError::Structural { field: "section_label", .. })
        ));
    }

    #[test]
    fn test_classify_comments_only() {
        let seg = segment(vec!["# Results on Mon 01 Jan GMT", "# nothing else"]);
        let classified = classify(&seg, &ParserConfig::default()).unwrap();
        assert!(classified.header.is_none());
        assert!(classified.sections.is_empty());
    }

    #[test]
    fn test_experimental_sections_skip_administrative() {
        let seg = segment(vec![
            "t,h,a,b,c,consent",
            "t,h,a,b,c,demographics",
            "t,h,a,b,c,block-1",
            "t,h,a,b,c,break",
            "t,h,a,b,c,block-2",
        ]);
        let config = ParserConfig::default();
        let classified = classify(&seg, &config).unwrap();
        let labels: Vec<&str> = classified
            .experimental_sections(&config)
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["block-1", "block-2"]);
    }
}
