use leptos::prelude::*;

use crate::theme::{LocalPreferences, Theme, apply_to_document, resolve_theme, save_theme, system_prefers_dark};

/// Resolve the startup theme, apply it to the document and share it through
/// context.
pub fn provide_theme() -> RwSignal<Theme> {
	let theme = RwSignal::new(resolve_theme(&LocalPreferences, system_prefers_dark));
	apply_to_document(theme.get_untracked());
	provide_context(theme);
	theme
}

/// Theme shared by [`provide_theme`], or the light default outside of it.
pub fn use_theme() -> Signal<Theme> {
	use_context::<RwSignal<Theme>>()
		.map(Signal::from)
		.unwrap_or_else(|| Signal::stored(Theme::Light))
}

/// Fixed corner button flipping between light and dark.
#[component]
pub fn ThemeToggle() -> impl IntoView {
	let theme = use_context::<RwSignal<Theme>>().unwrap_or_else(provide_theme);

	let toggle = move |_| {
		let next = theme.get_untracked().toggled();
		theme.set(next);
		apply_to_document(next);
		save_theme(&LocalPreferences, next);
	};

	view! {
		<button
			class="theme-toggle"
			type="button"
			on:click=toggle
			aria-label=move || format!("Switch to {} mode", theme.get().toggled())
		>
			{move || if theme.get().is_dark() { "☀" } else { "☾" }}
		</button>
	}
}
