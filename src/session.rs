//! Commit message editing sessions.
//!
//! An [`EditSession`] owns the session-local fill column. When a commit
//! message buffer is set up, the session runs its registered [`SetupHook`]s;
//! [`ProjectWidthHook`] is the hook that applies the per-project width.

use std::sync::LazyLock;

use regex::Regex;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};
use tracing::debug;

use crate::config::{ProjectWidths, DEFAULT_FILL_COLUMN};
use crate::git::RemoteUrlSource;
use crate::resolver::{self, Resolution};

/// Marks the start of the diff appended by `git commit --verbose`.
const SCISSORS_MARKER: &str = ">8";

static TRAILER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*: \S").unwrap());

static LIST_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])\s").unwrap());

/// A callback run when a commit message editing session starts.
pub trait SetupHook {
    /// Runs the hook against `session` for the repository behind `source`.
    fn run(&self, session: &mut EditSession, source: &dyn RemoteUrlSource);
}

/// Sets the session fill column from the project width mapping.
pub struct ProjectWidthHook<'a> {
    mapping: &'a ProjectWidths,
}

impl<'a> ProjectWidthHook<'a> {
    /// Creates the hook for `mapping`.
    pub fn new(mapping: &'a ProjectWidths) -> Self {
        Self { mapping }
    }
}

impl SetupHook for ProjectWidthHook<'_> {
    fn run(&self, session: &mut EditSession, source: &dyn RemoteUrlSource) {
        session.setup(source, self.mapping);
    }
}

/// Session-local state of one commit message being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    fill_column: usize,
    notices: Vec<String>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::with_fill_column(DEFAULT_FILL_COLUMN)
    }
}

impl EditSession {
    /// Creates a session at the default fill column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session starting at `fill_column`.
    pub fn with_fill_column(fill_column: usize) -> Self {
        Self {
            fill_column,
            notices: Vec::new(),
        }
    }

    /// Returns the current fill column.
    pub fn fill_column(&self) -> usize {
        self.fill_column
    }

    /// Sets the fill column for this session only.
    pub fn set_fill_column(&mut self, fill_column: usize) {
        self.fill_column = fill_column;
    }

    /// Notices produced while setting up the session, oldest first.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Applies the project width for the repository behind `source`.
    ///
    /// Returns the resolution when a width was applied. Without an `origin`
    /// remote or a matching project the session is left untouched.
    pub fn setup(
        &mut self,
        source: &dyn RemoteUrlSource,
        mapping: &ProjectWidths,
    ) -> Option<Resolution> {
        let remote_url = source.origin_url();
        let resolution = resolver::apply(remote_url.as_deref(), mapping)?;

        self.fill_column = resolution.width;
        self.notices.push(resolution.notice());
        Some(resolution)
    }

    /// Runs `hooks` in registration order.
    pub fn run_setup_hooks(&mut self, source: &dyn RemoteUrlSource, hooks: &[&dyn SetupHook]) {
        for hook in hooks {
            hook.run(self, source);
        }
    }

    /// Reflows a commit message to the session fill column.
    ///
    /// The subject line, comments, indented lines, list items and the
    /// trailer block are kept as they are. Everything after a scissors line
    /// is untouched. CRLF line endings are preserved.
    pub fn fill_message(&self, message: &str) -> String {
        let options = Options::new(self.fill_column)
            .break_words(false)
            .wrap_algorithm(WrapAlgorithm::FirstFit)
            .word_separator(WordSeparator::AsciiSpace)
            .word_splitter(WordSplitter::NoHyphenation);
        let newline = if message.contains("\r\n") { "\r\n" } else { "\n" };

        let lines: Vec<&str> = message.lines().collect();
        let Some((subject, rest)) = lines.split_first() else {
            return message.to_string();
        };

        let body_end = rest
            .iter()
            .position(|line| is_scissors(line))
            .unwrap_or(rest.len());
        let (body, tail) = rest.split_at(body_end);
        let trailers_start = trailer_block_start(body);

        let mut output: Vec<String> = vec![subject.to_string()];
        let mut paragraph: Vec<&str> = Vec::new();

        for (index, &line) in body.iter().enumerate() {
            let is_trailer = trailers_start.is_some_and(|start| index >= start);
            if line.trim().is_empty() || is_trailer || is_verbatim(line) {
                flush_paragraph(&mut paragraph, &mut output, &options);
                output.push(line.to_string());
            } else {
                paragraph.push(line);
            }
        }
        flush_paragraph(&mut paragraph, &mut output, &options);
        output.extend(tail.iter().map(|line| line.to_string()));

        debug!(width = self.fill_column, lines = output.len(), "Filled commit message");

        let mut filled = output.join(newline);
        if message.ends_with('\n') {
            filled.push_str(newline);
        }
        filled
    }
}

fn flush_paragraph(paragraph: &mut Vec<&str>, output: &mut Vec<String>, options: &Options<'_>) {
    if paragraph.is_empty() {
        return;
    }

    let text = paragraph
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ");
    output.extend(
        textwrap::wrap(&text, options)
            .into_iter()
            .map(|line| line.into_owned()),
    );
    paragraph.clear();
}

/// Returns the index where the trailer block starts.
///
/// Only the last paragraph can hold trailers, and only when every line in it
/// is `Key: value` shaped (indented continuation lines aside). Comment lines
/// are skipped.
fn trailer_block_start(body: &[&str]) -> Option<usize> {
    let mut start = None;

    for (index, line) in body.iter().enumerate().rev() {
        if line.starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            if start.is_some() {
                break;
            }
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        if !TRAILER_PATTERN.is_match(line) {
            return None;
        }
        start = Some(index);
    }

    start
}

fn is_scissors(line: &str) -> bool {
    line.starts_with('#') && line.contains(SCISSORS_MARKER)
}

fn is_verbatim(line: &str) -> bool {
    line.starts_with('#')
        || line.starts_with(char::is_whitespace)
        || LIST_ITEM_PATTERN.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::StaticRemote;

    #[test]
    fn new_session_uses_default_fill_column() {
        let session = EditSession::new();
        assert_eq!(session.fill_column(), 72);
        assert!(session.notices().is_empty());
    }

    #[test]
    fn setup_applies_project_width() {
        let mut session = EditSession::new();
        let source = StaticRemote::new("https://git.savannah.gnu.org/git/emacs.git");

        let resolution = session.setup(&source, &ProjectWidths::default());

        assert_eq!(resolution.map(|r| r.width), Some(64));
        assert_eq!(session.fill_column(), 64);
        assert_eq!(
            session.notices(),
            ["Set fill-column to 64 for project 'emacs'".to_string()]
        );
    }

    #[test]
    fn setup_without_remote_changes_nothing() {
        let mut session = EditSession::with_fill_column(80);
        assert_eq!(
            session.setup(&StaticRemote::none(), &ProjectWidths::default()),
            None
        );
        assert_eq!(session, EditSession::with_fill_column(80));
    }

    #[test]
    fn setup_unknown_project_changes_nothing() {
        let mut session = EditSession::new();
        let source = StaticRemote::new("git@github.com:rust-lang/rust.git");
        assert_eq!(session.setup(&source, &ProjectWidths::default()), None);
        assert_eq!(session.fill_column(), 72);
        assert!(session.notices().is_empty());
    }

    #[test]
    fn run_setup_hooks_in_order() {
        struct FixedWidth(usize);

        impl SetupHook for FixedWidth {
            fn run(&self, session: &mut EditSession, _source: &dyn RemoteUrlSource) {
                session.set_fill_column(self.0);
            }
        }

        let mapping = ProjectWidths::default();
        let project_hook = ProjectWidthHook::new(&mapping);
        let source = StaticRemote::new("git@host:org/auctex.git");

        let mut session = EditSession::new();
        session.run_setup_hooks(&source, &[&FixedWidth(100), &project_hook]);
        assert_eq!(session.fill_column(), 64);

        let mut session = EditSession::new();
        session.run_setup_hooks(&source, &[&project_hook, &FixedWidth(100)]);
        assert_eq!(session.fill_column(), 100);
    }

    #[test]
    fn fill_message_wraps_body() {
        let session = EditSession::with_fill_column(20);
        let message = "Subject line that is longer than twenty\n\
                       \n\
                       one two three four five six seven eight\n";

        assert_eq!(
            session.fill_message(message),
            "Subject line that is longer than twenty\n\
             \n\
             one two three four\n\
             five six seven eight\n"
        );
    }

    #[test]
    fn fill_message_joins_short_lines() {
        let session = EditSession::with_fill_column(30);
        let message = "Subject\n\nshort\nlines get\njoined together";

        assert_eq!(
            session.fill_message(message),
            "Subject\n\nshort lines get joined\ntogether"
        );
    }

    #[test]
    fn fill_message_keeps_comments_and_trailers() {
        let session = EditSession::with_fill_column(10);
        let message = "Subject\n\
                       \n\
                       alpha beta gamma\n\
                       \n\
                       Signed-off-by: Some Body <somebody@example.com>\n\
                       # Please enter the commit message for your changes.\n";

        assert_eq!(
            session.fill_message(message),
            "Subject\n\
             \n\
             alpha beta\n\
             gamma\n\
             \n\
             Signed-off-by: Some Body <somebody@example.com>\n\
             # Please enter the commit message for your changes.\n"
        );
    }

    #[test]
    fn fill_message_keeps_lists_and_indented_lines() {
        let session = EditSession::with_fill_column(10);
        let message = "Subject\n\n- a long list item here\n    indented code line\n";

        assert_eq!(session.fill_message(message), message);
    }

    #[test]
    fn fill_message_stops_at_scissors() {
        let session = EditSession::with_fill_column(10);
        let message = "Subject\n\
                       \n\
                       # ------------------------ >8 ------------------------\n\
                       diff --git a/file.txt b/file.txt with a long line\n";

        assert_eq!(session.fill_message(message), message);
    }

    #[test]
    fn fill_message_does_not_break_long_words() {
        let session = EditSession::with_fill_column(10);
        let message = "Subject\n\nhttps://example.com/a/very/long/url here";

        assert_eq!(
            session.fill_message(message),
            "Subject\n\nhttps://example.com/a/very/long/url\nhere"
        );
    }

    #[test]
    fn fill_message_wraps_key_value_shaped_prose() {
        let session = EditSession::with_fill_column(30);
        let message = "Subject\n\
                       \n\
                       The parser rejected input and\n\
                       note: this happens whenever the tokenizer sees two colons in a row\n";

        let filled = session.fill_message(message);

        assert_eq!(
            filled,
            "Subject\n\
             \n\
             The parser rejected input and\n\
             note: this happens whenever\n\
             the tokenizer sees two colons\n\
             in a row\n"
        );
        for line in filled.lines().skip(1) {
            assert!(line.len() <= 30, "line over fill column: {line:?}");
        }
    }

    #[test]
    fn fill_message_only_last_paragraph_holds_trailers() {
        let session = EditSession::with_fill_column(40);
        let message = "Subject\n\
                       \n\
                       Fixes: the crash when\n\
                       saving files\n\
                       \n\
                       Reviewed-by: A Reviewer <reviewer@example.com>\n\
                       Signed-off-by: Some Body <somebody@example.com>\n";

        assert_eq!(
            session.fill_message(message),
            "Subject\n\
             \n\
             Fixes: the crash when saving files\n\
             \n\
             Reviewed-by: A Reviewer <reviewer@example.com>\n\
             Signed-off-by: Some Body <somebody@example.com>\n"
        );
    }

    #[test]
    fn trailer_block_requires_every_line_trailer_shaped() {
        assert_eq!(
            trailer_block_start(&["", "Acked-by: A", "  continued", "Signed-off-by: B", "# comment"]),
            Some(1)
        );
        assert_eq!(trailer_block_start(&["", "Closes: #12", "and some prose"]), None);
        assert_eq!(trailer_block_start(&["", "# only a comment"]), None);
    }

    #[test]
    fn fill_message_preserves_crlf() {
        let session = EditSession::with_fill_column(10);
        let message = "Subject\r\n\r\nalpha beta gamma\r\n";

        assert_eq!(
            session.fill_message(message),
            "Subject\r\n\r\nalpha beta\r\ngamma\r\n"
        );
    }

    #[test]
    fn fill_message_empty() {
        assert_eq!(EditSession::new().fill_message(""), "");
    }
}
