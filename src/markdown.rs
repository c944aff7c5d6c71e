//! Minimal fenced-block splitter for model output.
//!
//! Text is cut on every ``` fence; pieces alternate between prose and code,
//! starting with prose.

/// Fence delimiter toggling between prose and code.
pub const FENCE: &str = "```";

/// Info strings dropped from the first line of a code block.
const LANGUAGE_TAGS: &[&str] = &[
	"python", "py", "bash", "sh", "shell", "console", "typescript", "ts", "javascript", "js",
	"json", "yaml", "toml", "rust", "c", "cpp", "c++", "cuda", "java", "go", "sql", "text",
	"markdown", "md",
];

/// One run of text between fences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
	/// Rendered as wrapped text.
	Prose(&'a str),
	/// Rendered preformatted.
	Code(&'a str),
}

impl<'a> Segment<'a> {
	/// Text of the segment.
	pub fn text(&self) -> &'a str {
		match self {
			Segment::Prose(s) | Segment::Code(s) => s,
		}
	}
}

/// Split `text` into alternating prose and code segments.
///
/// Odd-indexed pieces are code. A code piece whose first line is empty or a
/// known language tag (`python`, `bash`, ...) has that line dropped.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
	text.split(FENCE)
		.enumerate()
		.map(|(i, part)| {
			if i % 2 == 1 {
				Segment::Code(strip_language_tag(part))
			} else {
				Segment::Prose(part)
			}
		})
		.collect()
}

/// True when the text contains at least one fence.
pub fn has_code(text: &str) -> bool {
	text.contains(FENCE)
}

fn strip_language_tag(code: &str) -> &str {
	match code.split_once('\n') {
		Some((first, rest)) if is_language_tag(first.trim_end_matches('\r')) => rest,
		_ => code,
	}
}

fn is_language_tag(line: &str) -> bool {
	let tag = line.trim();
	tag.is_empty() || LANGUAGE_TAGS.iter().any(|known| known.eq_ignore_ascii_case(tag))
}
