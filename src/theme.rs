//! Light/dark mode: persisted preference, system fallback and document class.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use log::warn;

use crate::error::StorageError;

/// Storage key holding the preference.
pub const THEME_KEY: &str = "theme";
/// Class set on `<html>` while dark mode is active.
pub const DARK_CLASS: &str = "dark";

/// Color scheme of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
	/// Light background, the default.
	#[default]
	Light,
	/// Dark background.
	Dark,
}

impl Theme {
	/// Stored and attribute form: `"light"` or `"dark"`.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	/// Inverse of [`Theme::as_str`].
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"light" => Some(Self::Light),
			"dark" => Some(Self::Dark),
			_ => None,
		}
	}

	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	/// Whether the `dark` class applies.
	pub fn is_dark(self) -> bool {
		self == Self::Dark
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// String key-value storage that survives a page reload.
pub trait PreferenceStore {
	/// Value under `key`, or `None` if never set.
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	/// Store `value` under `key`.
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalPreferences;

impl LocalPreferences {
	fn storage() -> Result<web_sys::Storage, StorageError> {
		web_sys::window()
			.and_then(|w| w.local_storage().ok().flatten())
			.ok_or(StorageError::Unavailable)
	}
}

impl PreferenceStore for LocalPreferences {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Self::storage()?
			.get_item(key)
			.map_err(|e| StorageError::Access(format!("{e:?}")))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		Self::storage()?
			.set_item(key, value)
			.map_err(|e| StorageError::Access(format!("{e:?}")))
	}
}

/// Process-local store, for hosts without `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
	values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferences {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.values.borrow().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.values.borrow_mut().insert(key.into(), value.into());
		Ok(())
	}
}

/// Theme to start with: the stored preference if valid, otherwise whatever
/// `system_prefers_dark` reports. The system is only consulted in the
/// fallback case.
pub fn resolve_theme(
	store: &impl PreferenceStore,
	system_prefers_dark: impl FnOnce() -> bool,
) -> Theme {
	let stored = store.get(THEME_KEY).unwrap_or_else(|e| {
		warn!("could not read theme preference: {e}");
		None
	});
	match stored.as_deref().and_then(Theme::parse) {
		Some(theme) => theme,
		None if system_prefers_dark() => Theme::Dark,
		None => Theme::Light,
	}
}

/// Persist `theme`; failures are logged and otherwise ignored.
pub fn save_theme(store: &impl PreferenceStore, theme: Theme) {
	if let Err(e) = store.set(THEME_KEY, theme.as_str()) {
		warn!("could not persist theme preference: {e}");
	}
}

/// Whether the browser reports `prefers-color-scheme: dark`.
pub fn system_prefers_dark() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
		.is_some_and(|mq| mq.matches())
}

/// Add or remove the dark class on the document element.
pub fn apply_to_document(theme: Theme) {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	else {
		return;
	};
	if let Err(e) = root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark()) {
		warn!("could not apply theme class: {e:?}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stored_preference_survives_reload_without_system_lookup() {
		let store = MemoryPreferences::default();
		save_theme(&store, Theme::Dark);

		let theme = resolve_theme(&store, || panic!("system preference consulted"));
		assert_eq!(theme, Theme::Dark);
	}

	#[test]
	fn stored_light_overrides_dark_system() {
		let store = MemoryPreferences::default();
		save_theme(&store, Theme::Light);
		assert_eq!(resolve_theme(&store, || true), Theme::Light);
	}

	#[test]
	fn falls_back_to_system_preference() {
		let store = MemoryPreferences::default();
		assert_eq!(resolve_theme(&store, || true), Theme::Dark);
		assert_eq!(resolve_theme(&store, || false), Theme::Light);
	}

	#[test]
	fn garbage_value_falls_back_to_system() {
		let store = MemoryPreferences::default();
		store.set(THEME_KEY, "sepia").unwrap();
		assert_eq!(resolve_theme(&store, || true), Theme::Dark);
	}

	#[test]
	fn toggle_round_trips() {
		assert_eq!(Theme::Light.toggled(), Theme::Dark);
		assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
		assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
	}

	struct BrokenStore;

	impl PreferenceStore for BrokenStore {
		fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
			Err(StorageError::Unavailable)
		}

		fn set(&self, _: &str, _: &str) -> Result<(), StorageError> {
			Err(StorageError::Access("quota exceeded".into()))
		}
	}

	#[test]
	fn storage_failures_are_not_fatal() {
		save_theme(&BrokenStore, Theme::Dark);
		assert_eq!(resolve_theme(&BrokenStore, || false), Theme::Light);
	}
}
