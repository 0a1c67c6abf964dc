//! Group paths.
//!
//! A path is the list of group names from the root down to a node, written
//! `/editor/timeline`. The root is `/` (or the empty string). A literal `/` or
//! `\` inside a name is escaped as `\/` or `\\`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;


const SEP: char = '/';
const ESCAPE: char = '\\';

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupPath {
	segments: Vec<Arc<str>>,
}

impl GroupPath {
	pub fn root() -> Self {
		Self::default()
	}

	/// Parses a path string.
	///
	/// # Errors
	///
	/// Returns a [`PathError`] for doubled or trailing separators and for
	/// dangling or unknown escapes.
	pub fn parse(input: &str) -> Result<Self, PathError> {
		let body = input.strip_prefix(SEP).unwrap_or(input);
		if body.is_empty() {
			return Ok(Self::root());
		}

		let mut segments = Vec::new();
		let mut current = String::new();
		let mut chars = body.char_indices();
		let offset = input.len() - body.len();

		while let Some((idx, ch)) = chars.next() {
			match ch {
				ESCAPE => match chars.next() {
					Some((_, c @ (SEP | ESCAPE))) => current.push(c),
					Some((_, found)) => {
						return Err(PathError::UnknownEscape {
							path: input.to_string(),
							found,
						});
					}
					None => return Err(PathError::DanglingEscape { path: input.to_string() }),
				},
				SEP => {
					if current.is_empty() {
						return Err(PathError::EmptySegment {
							path: input.to_string(),
							position: offset + idx,
						});
					}
					segments.push(Arc::from(std::mem::take(&mut current)));
				}
				c => current.push(c),
			}
		}

		if current.is_empty() {
			return Err(PathError::TrailingSeparator { path: input.to_string() });
		}
		segments.push(Arc::from(current));
		Ok(Self { segments })
	}

	/// Path of the child group `name` below this one.
	pub fn child(&self, name: &str) -> Self {
		let mut segments = self.segments.clone();
		segments.push(Arc::from(name));
		Self { segments }
	}

	/// Parent path; `None` for the root.
	pub fn parent(&self) -> Option<Self> {
		let (_, rest) = self.segments.split_last()?;
		Some(Self { segments: rest.to_vec() })
	}

	/// Name of the last segment; `None` for the root.
	pub fn name(&self) -> Option<&str> {
		self.segments.last().map(|s| &**s)
	}

	pub fn segments(&self) -> impl ExactSizeIterator<Item = &str> {
		self.segments.iter().map(|s| &**s)
	}

	/// Number of segments; the root has depth 0.
	pub fn depth(&self) -> usize {
		self.segments.len()
	}

	pub fn is_root(&self) -> bool {
		self.segments.is_empty()
	}

	/// Segment-wise prefix test: `/editor` contains `/editor/timeline` but
	/// `/editor/time` does not contain `/editor/timeline`.
	pub fn is_ancestor_of_or_equal(&self, other: &Self) -> bool {
		self.segments.len() <= other.segments.len() && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
	}

	/// Segments of `other` below `self`, if `self` is an ancestor of (or equal to) `other`.
	pub(crate) fn relative_segments<'a>(&self, other: &'a Self) -> Option<&'a [Arc<str>]> {
		self.is_ancestor_of_or_equal(other).then(|| &other.segments[self.segments.len()..])
	}
}

impl fmt::Display for GroupPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.segments.is_empty() {
			return f.write_str("/");
		}
		for segment in &self.segments {
			f.write_str("/")?;
			for ch in segment.chars() {
				if matches!(ch, SEP | ESCAPE) {
					write!(f, "{ESCAPE}")?;
				}
				write!(f, "{ch}")?;
			}
		}
		Ok(())
	}
}

impl FromStr for GroupPath {
	type Err = PathError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Serialize for GroupPath {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for GroupPath {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Self::parse(&raw).map_err(serde::de::Error::custom)
	}
}
