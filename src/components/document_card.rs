use leptos::prelude::*;

use crate::graph::NodeData;

/// Separator between breadcrumb segments.
const CRUMB_SEPARATOR: &str = " > ";

/// Similarity as a percentage with one decimal, e.g. `"87.5%"`.
pub fn similarity_percent(similarity: f64) -> String {
	format!("{:.1}%", similarity * 100.0)
}

/// Segments joined for display, or `None` when there are none.
pub fn breadcrumb(segments: &[String]) -> Option<String> {
	(!segments.is_empty()).then(|| segments.join(CRUMB_SEPARATOR))
}

/// One search result: block type, score, excerpt and where it lives.
#[component]
pub fn DocumentCard(#[prop(into)] data: Signal<NodeData>) -> impl IntoView {
	let block_type = move || data.with(|d| d.metadata.block_type.clone());
	let percent = move || data.with(|d| similarity_percent(d.similarity));
	let title_path = move || data.with(|d| breadcrumb(&d.metadata.page_title_path));
	let headings = move || data.with(|d| breadcrumb(&d.metadata.active_headings));

	view! {
		<article class="document-card">
			<header class="document-card__header">
				<span class="document-card__type">{block_type}</span>
				<span class="document-card__score">{percent}</span>
			</header>
			<p class="document-card__excerpt" title=move || data.with(|d| d.full_text.clone())>
				{move || data.with(|d| d.label.clone())}
			</p>
			<div class="document-card__meta">
				{move || {
					title_path()
						.map(|path| view! { <div class="document-card__crumb">"# " {path}</div> })
				}}
				{move || {
					headings()
						.map(|h| view! { <div class="document-card__crumb">"¶ " {h}</div> })
				}}
			</div>
		</article>
	}
}
