use leptos::prelude::*;

use super::select_value;
use crate::context::use_dashboard;
use crate::network::entities::{entity_degree, entity_kinds, top_entities};

const ENTITY_LIMIT: usize = 12;

/// Most mentioned entities of the global network, by type.
#[component]
pub fn EntityPanel() -> impl IntoView {
	let entities = use_dashboard().entities;

	let kinds = move || {
		entities.with(|e| {
			e.data()
				.map(|data| entity_kinds(data).into_iter().map(str::to_string).collect::<Vec<_>>())
				.unwrap_or_default()
		})
	};

	let rows = move || {
		let ranked: Vec<(String, u32, usize)> = entities.with(|e| {
			let Some(data) = e.data() else {
				return Vec::new();
			};
			let degree = entity_degree(data);
			top_entities(data, e.kind(), ENTITY_LIMIT)
				.into_iter()
				.map(|node| {
					let links = degree.get(node.id.as_str()).copied().unwrap_or(0);
					(node.label.clone(), node.count, links)
				})
				.collect()
		});
		ranked
			.into_iter()
			.map(|(label, count, links)| {
				view! {
					<li>
						<span class="entity-label">{label}</span>
						<span class="entity-count">{format!("{} mentions, {} links", count, links)}</span>
					</li>
				}
			})
			.collect_view()
	};

	view! {
		<Show when=move || entities.with(|e| e.data().is_some())>
			<section class="panel entity-panel">
				<h2>"Entities"</h2>
				<select on:change=move |ev| {
					let kind = select_value(event_target_value(&ev));
					entities.update(|e| e.set_kind(kind));
				}>
					<option value="">"All types"</option>
					{move || {
						kinds()
							.into_iter()
							.map(|kind| {
								let label = kind.clone();
								view! { <option value=kind>{label}</option> }
							})
							.collect_view()
					}}
				</select>
				<ol class="entity-list">{rows}</ol>
			</section>
		</Show>
	}
}
