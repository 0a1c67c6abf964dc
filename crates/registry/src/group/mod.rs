//! Shortcut group tree.
//!
//! Groups form a strict tree under one root. Each group's path doubles as its
//! lookup key and as the context scope for its bindings: a non-global binding
//! only applies while the focused context path is the group's path or one of
//! its descendants.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strokemap_primitives::Shortcut;

use crate::error::ShortcutError;
use crate::path::GroupPath;


/// Identifier of the command a shortcut invokes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(Arc<str>);

impl CommandId {
	pub fn new(id: impl Into<Arc<str>>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for CommandId {
	fn from(id: &str) -> Self {
		Self(Arc::from(id))
	}
}

impl From<String> for CommandId {
	fn from(id: String) -> Self {
		Self(Arc::from(id))
	}
}

impl fmt::Display for CommandId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A shortcut bound to a command inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutBinding {
	pub shortcut: Arc<Shortcut>,
	pub command_id: CommandId,
	/// Global bindings ignore the group's context restriction.
	#[serde(default)]
	pub is_global: bool,
}

/// A binding together with the path of the group that owns it.
#[derive(Debug, Clone, Copy)]
pub struct BindingRef<'a> {
	pub group: &'a GroupPath,
	pub binding: &'a ShortcutBinding,
}

/// A named tree node holding child groups and shortcut bindings.
///
/// The root's own name never appears in paths; its path is `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GroupDef", into = "GroupDef")]
pub struct ShortcutGroup {
	name: String,
	path: GroupPath,
	children: Vec<ShortcutGroup>,
	bindings: Vec<ShortcutBinding>,
}

impl Default for ShortcutGroup {
	fn default() -> Self {
		Self::root()
	}
}

impl ShortcutGroup {
	/// Creates an empty root group.
	pub fn root() -> Self {
		Self {
			name: String::new(),
			path: GroupPath::root(),
			children: Vec::new(),
			bindings: Vec::new(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn path(&self) -> &GroupPath {
		&self.path
	}

	/// Path of the parent group; `None` for the root.
	pub fn parent_path(&self) -> Option<GroupPath> {
		self.path.parent()
	}

	pub fn children(&self) -> &[ShortcutGroup] {
		&self.children
	}

	pub fn bindings(&self) -> &[ShortcutBinding] {
		&self.bindings
	}

	pub fn child(&self, name: &str) -> Option<&ShortcutGroup> {
		self.children.iter().find(|c| c.name == name)
	}

	pub fn child_mut(&mut self, name: &str) -> Option<&mut ShortcutGroup> {
		self.children.iter_mut().find(|c| c.name == name)
	}

	/// Appends an empty child group and returns it.
	///
	/// # Errors
	///
	/// [`ShortcutError::DuplicateName`] if a sibling already uses `name`,
	/// [`ShortcutError::InvalidName`] if `name` is empty.
	pub fn add_child_group(&mut self, name: impl Into<String>) -> Result<&mut ShortcutGroup, ShortcutError> {
		let name = name.into();
		if name.is_empty() {
			return Err(ShortcutError::InvalidName { name });
		}
		if self.child(&name).is_some() {
			return Err(ShortcutError::DuplicateName {
				parent: self.path.clone(),
				name,
			});
		}

		let path = self.path.child(&name);
		self.children.push(ShortcutGroup {
			name,
			path,
			children: Vec::new(),
			bindings: Vec::new(),
		});
		let last = self.children.len() - 1;
		Ok(&mut self.children[last])
	}

	/// Detaches and returns the child group `name`.
	pub fn remove_child_group(&mut self, name: &str) -> Option<ShortcutGroup> {
		let idx = self.children.iter().position(|c| c.name == name)?;
		Some(self.children.remove(idx))
	}

	/// Binds `shortcut` to `command_id` in this group.
	///
	/// # Errors
	///
	/// [`ShortcutError::DuplicateShortcut`] if the same stroke sequence is
	/// already bound in this group.
	pub fn add_binding(&mut self, shortcut: impl Into<Arc<Shortcut>>, command_id: impl Into<CommandId>, is_global: bool) -> Result<(), ShortcutError> {
		let shortcut = shortcut.into();
		let command_id = command_id.into();
		if let Some(existing) = self.binding_for(&shortcut) {
			return Err(ShortcutError::DuplicateShortcut {
				duplicates: vec![crate::error::DuplicateBinding {
					group: self.path.clone(),
					shortcut,
					kept_command: existing.command_id.clone(),
					duplicate_command: command_id,
				}],
			});
		}

		self.bindings.push(ShortcutBinding {
			shortcut,
			command_id,
			is_global,
		});
		Ok(())
	}

	/// Removes the binding whose stroke sequence equals `shortcut`.
	pub fn remove_binding(&mut self, shortcut: &Shortcut) -> Option<ShortcutBinding> {
		let idx = self.bindings.iter().position(|b| *b.shortcut == *shortcut)?;
		Some(self.bindings.remove(idx))
	}

	/// Swaps the shortcut instance of an existing binding, keeping its command,
	/// global flag and declaration position.
	///
	/// # Errors
	///
	/// [`ShortcutError::BindingNotFound`] if `old` is not bound here,
	/// [`ShortcutError::DuplicateShortcut`] if `new` is already bound to a
	/// different binding of this group.
	pub fn replace_binding(&mut self, old: &Shortcut, new: impl Into<Arc<Shortcut>>) -> Result<(), ShortcutError> {
		let new = new.into();
		let Some(idx) = self.bindings.iter().position(|b| *b.shortcut == *old) else {
			return Err(ShortcutError::BindingNotFound {
				group: self.path.clone(),
				shortcut: Arc::new(old.clone()),
			});
		};

		if let Some((other, existing)) = self.bindings.iter().enumerate().find(|(_, b)| *b.shortcut == *new)
			&& other != idx
		{
			return Err(ShortcutError::DuplicateShortcut {
				duplicates: vec![crate::error::DuplicateBinding {
					group: self.path.clone(),
					shortcut: new,
					kept_command: existing.command_id.clone(),
					duplicate_command: self.bindings[idx].command_id.clone(),
				}],
			});
		}

		self.bindings[idx].shortcut = new;
		Ok(())
	}

	/// Binding whose stroke sequence equals `shortcut`.
	pub fn binding_for(&self, shortcut: &Shortcut) -> Option<&ShortcutBinding> {
		self.bindings.iter().find(|b| *b.shortcut == *shortcut)
	}

	/// Looks up a group by its path string.
	///
	/// Paths are absolute. Returns `Ok(None)` when the path is well formed but
	/// names no group in this subtree.
	///
	/// # Errors
	///
	/// [`ShortcutError::InvalidPath`] if `path` cannot be parsed.
	pub fn find_group_by_path(&self, path: &str) -> Result<Option<&ShortcutGroup>, ShortcutError> {
		let path = GroupPath::parse(path)?;
		Ok(self.find_group(&path))
	}

	pub fn find_group(&self, path: &GroupPath) -> Option<&ShortcutGroup> {
		let rest = self.path.relative_segments(path)?;
		rest.iter().try_fold(self, |group, name| group.child(name))
	}

	pub fn find_group_mut(&mut self, path: &GroupPath) -> Option<&mut ShortcutGroup> {
		let rest = self.path.relative_segments(path)?.to_vec();
		rest.iter().try_fold(self, |group, name| group.child_mut(name))
	}

	/// Bindings of this group, followed (pre-order) by those of every
	/// descendant when `include_descendants` is set.
	pub fn enumerate_bindings(&self, include_descendants: bool) -> Vec<BindingRef<'_>> {
		let mut out = Vec::new();
		self.collect_bindings(include_descendants, &mut out);
		out
	}

	fn collect_bindings<'a>(&'a self, recurse: bool, out: &mut Vec<BindingRef<'a>>) {
		out.extend(self.bindings.iter().map(|binding| BindingRef { group: &self.path, binding }));
		if recurse {
			for child in &self.children {
				child.collect_bindings(true, out);
			}
		}
	}

	/// Recomputes every path in this subtree as if it were rooted at `path`.
	pub(crate) fn rebase(&mut self, path: GroupPath) {
		for child in &mut self.children {
			child.rebase(path.child(&child.name));
		}
		self.path = path;
	}
}

/// Serialized shape of a group: paths are derived, not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GroupDef {
	#[serde(default)]
	name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	children: Vec<GroupDef>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	bindings: Vec<ShortcutBinding>,
}

impl From<GroupDef> for ShortcutGroup {
	fn from(def: GroupDef) -> Self {
		fn build(def: GroupDef, path: GroupPath) -> ShortcutGroup {
			let children = def.children.into_iter().map(|c| {
				let child_path = path.child(&c.name);
				build(c, child_path)
			});
			ShortcutGroup {
				children: children.collect(),
				bindings: def.bindings,
				name: def.name,
				path,
			}
		}
		build(def, GroupPath::root())
	}
}

impl From<ShortcutGroup> for GroupDef {
	fn from(group: ShortcutGroup) -> Self {
		Self {
			name: group.name,
			children: group.children.into_iter().map(GroupDef::from).collect(),
			bindings: group.bindings,
		}
	}
}
