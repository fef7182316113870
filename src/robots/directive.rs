//! Line scanning and directive recognition shared by the validator, linter and parser

/// Directive keywords recognized in a policy document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    UserAgent,
    Disallow,
    Allow,
    Sitemap,
    CrawlDelay,
}

impl Directive {
    const ALL: [Directive; 5] = [
        Directive::UserAgent,
        Directive::Disallow,
        Directive::Allow,
        Directive::Sitemap,
        Directive::CrawlDelay,
    ];

    /// The canonical spelling of the directive keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::UserAgent => "User-agent",
            Directive::Disallow => "Disallow",
            Directive::Allow => "Allow",
            Directive::Sitemap => "Sitemap",
            Directive::CrawlDelay => "Crawl-delay",
        }
    }

    /// Recognizes a trimmed line of the form `<keyword>:<value>`
    ///
    /// The keyword comparison is case-insensitive and must be immediately followed
    /// by a colon. The returned value is everything after the first colon, trimmed.
    pub fn recognize(line: &str) -> Option<(Directive, &str)> {
        let (key, value) = line.split_once(':')?;
        Self::ALL
            .into_iter()
            .find(|directive| key.eq_ignore_ascii_case(directive.keyword()))
            .map(|directive| (directive, value.trim()))
    }
}

/// Iterates over the significant lines of a document
///
/// Yields `(line_number, trimmed_line)` with 1-based line numbers, skipping blank
/// lines and `#` comments. A leading byte-order mark is ignored.
pub fn significant_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .trim_start_matches('\u{feff}')
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}
