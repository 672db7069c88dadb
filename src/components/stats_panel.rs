use leptos::prelude::*;

use crate::context::use_dashboard;

const TOP_LIMIT: usize = 8;

/// Counts over the currently visible articles.
#[component]
pub fn StatsPanel() -> impl IntoView {
	let derived = use_dashboard().view;

	let window = move || {
		derived.with(|v| {
			v.window
				.map(|w| format!("{} to {}", w.start, w.end))
				.unwrap_or_else(|| "No dated articles".to_string())
		})
	};
	let total = move || derived.with(|v| v.stats.total_count);

	let ranked = move |countries: bool| {
		let rows: Vec<(String, usize)> = derived.with(|v| {
			let top = if countries {
				v.stats.top_countries(TOP_LIMIT)
			} else {
				v.stats.top_newspapers(TOP_LIMIT)
			};
			top.into_iter().map(|(name, count)| (name.to_string(), count)).collect()
		});
		rows.into_iter()
			.map(|(name, count)| {
				view! {
					<li>
						<span class="stat-name">{name}</span>
						<span class="stat-count">{count}</span>
					</li>
				}
			})
			.collect_view()
	};

	let months = move || {
		derived.with(|v| {
			v.stats
				.timeline
				.iter()
				.map(|m| format!("{} ({})", m.month_key, m.count))
				.collect::<Vec<_>>()
				.join(", ")
		})
	};

	view! {
		<section class="panel stats-panel">
			<h2>"Visible articles"</h2>
			<p class="stat-window">{window}</p>
			<p class="stat-total">{total}</p>
			<p class="stat-months">{months}</p>
			<h3>"By country"</h3>
			<ul class="stat-list">{move || ranked(true)}</ul>
			<h3>"By newspaper"</h3>
			<ul class="stat-list">{move || ranked(false)}</ul>
		</section>
	}
}
