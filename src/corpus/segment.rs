use crate::error::StartupError;
use crate::settings::Settings;

/// One scorable unit per non-blank page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub document: String,
    pub page_number: u32,
    pub title: String,
    pub text: String,
}

/// One fixed-size window of a page's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSection {
    pub document: String,
    pub page_number: u32,
    pub text: String,
}

/// Splits page text into a section and overlapping sub-sections.
/// Sizes are counted in chars, never bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    chunk_size: usize,
    overlap: usize,
    title_max_chars: usize,
}

impl Segmenter {
    /// Fails unless `0 <= overlap < chunk_size`; otherwise the window would never advance.
    pub fn new(settings: &Settings) -> Result<Self, StartupError> {
        settings.validate()?;
        Ok(Segmenter {
            chunk_size: settings.chunk_size,
            overlap: settings.chunk_overlap,
            title_max_chars: settings.title_max_chars,
        })
    }

    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// `None` for an empty or whitespace-only page.
    pub fn segment(
        &self,
        document: &str,
        page_number: u32,
        page_text: &str,
    ) -> Option<(Section, Vec<SubSection>)> {
        let text = page_text.trim();
        if text.is_empty() {
            return None;
        }

        let first_line = text.split('\n').next().unwrap_or(text);
        let title: String = first_line.chars().take(self.title_max_chars).collect();

        let sub_sections = self
            .windows(text)
            .into_iter()
            .map(|chunk| SubSection {
                document: document.to_string(),
                page_number,
                text: chunk.to_string(),
            })
            .collect();

        let section = Section {
            document: document.to_string(),
            page_number,
            title: title.trim().to_string(),
            text: text.to_string(),
        };

        Some((section, sub_sections))
    }

    /// Sliding windows of `chunk_size` chars starting every `stride` chars
    /// while the start offset is inside the text. The last one may be short.
    fn windows<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // byte offset of every char boundary, plus the end
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_len = bounds.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0usize;
        while start < char_len {
            let end = (start + self.chunk_size).min(char_len);
            chunks.push(&text[bounds[start]..bounds[end]]);
            start += self.stride();
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segmenter(chunk_size: usize, overlap: usize) -> Segmenter {
        Segmenter::new(&Settings {
            chunk_size,
            chunk_overlap: overlap,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn blank_page_yields_nothing() {
        let s = segmenter(512, 100);
        assert!(s.segment("a.pdf", 1, "").is_none());
        assert!(s.segment("a.pdf", 1, "  \n\t \n").is_none());
    }

    #[test]
    fn title_is_first_line() {
        let s = segmenter(512, 100);
        let (section, subs) = s
            .segment("a.pdf", 3, "\n  Introduction  \nBody text follows.\n")
            .unwrap();
        assert_eq!(section.title, "Introduction");
        assert_eq!(section.text, "Introduction  \nBody text follows.");
        assert_eq!(section.page_number, 3);
        assert_eq!(section.document, "a.pdf");
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].text, section.text);
    }

    #[test]
    fn title_truncated_then_trimmed() {
        let s = segmenter(512, 100);
        let line = format!("{} tail", "x".repeat(99));
        let (section, _) = s.segment("a.pdf", 1, &line).unwrap();
        // 99 x's + the space at position 100 is cut off by the trim
        assert_eq!(section.title, "x".repeat(99));
    }

    #[test]
    fn six_hundred_chars_make_two_windows() {
        let s = segmenter(512, 100);
        let text: String = (0..600).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let (_, subs) = s.segment("a.pdf", 1, &text).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].text, &text[..512]);
        assert_eq!(subs[1].text, &text[412..]);
        assert_eq!(subs[1].text.chars().count(), 188);
    }

    #[test]
    fn windows_respect_multibyte_chars() {
        let s = segmenter(4, 1);
        let (_, subs) = s.segment("a.pdf", 1, "héllo wörld").unwrap();
        let texts: Vec<_> = subs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["héll", "lo w", "wörl", "ld"]);
    }

    #[test]
    fn subsections_keep_raw_slices() {
        let s = segmenter(5, 0);
        let (_, subs) = s.segment("a.pdf", 1, "ab   cd   ef").unwrap();
        assert_eq!(subs[0].text, "ab   ");
        assert_eq!(subs[1].text, "cd   ");
        assert_eq!(subs[2].text, "ef");
    }

    #[test]
    fn invalid_overlap_rejected() {
        let settings = Settings {
            chunk_size: 10,
            chunk_overlap: 10,
            ..Settings::default()
        };
        assert!(Segmenter::new(&settings).is_err());
    }

    proptest! {
        #[test]
        fn windows_rebuild_page_text(
            text in "[a-zé \n]{1,300}",
            chunk_size in 1usize..40,
            overlap_seed in 0usize..40,
        ) {
            let overlap = overlap_seed % chunk_size;
            let s = segmenter(chunk_size, overlap);
            let Some((section, subs)) = s.segment("d.pdf", 1, &text) else {
                prop_assert!(text.trim().is_empty());
                return Ok(());
            };

            let mut rebuilt: String = subs[0].text.clone();
            for sub in &subs[1..] {
                rebuilt.extend(sub.text.chars().skip(overlap));
            }
            // a trailing window that fits inside the overlap adds nothing
            prop_assert_eq!(rebuilt, section.text);
        }

        #[test]
        fn window_count_matches_offsets(
            len in 1usize..2000,
            chunk_size in 1usize..600,
            overlap_seed in 0usize..600,
        ) {
            let overlap = overlap_seed % chunk_size;
            let s = segmenter(chunk_size, overlap);
            let text = "z".repeat(len);
            let (_, subs) = s.segment("d.pdf", 1, &text).unwrap();
            let stride = chunk_size - overlap;
            prop_assert_eq!(subs.len(), (len + stride - 1) / stride);
            prop_assert!(subs.iter().all(|s| s.text.len() <= chunk_size));
        }
    }
}
