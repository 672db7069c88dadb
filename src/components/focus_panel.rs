use leptos::prelude::*;

use super::select_value;
use crate::context::use_dashboard;
use crate::data::FocusLevel;

const FOCUS_ROWS: usize = 10;

/// Article counts per region or prefecture of one country.
#[component]
pub fn FocusPanel() -> impl IntoView {
	let dashboard = use_dashboard();
	let focus = dashboard.focus;
	let countries = dashboard.config.with_value(|c| c.focus_countries());

	let country_options = countries
		.into_iter()
		.map(|country| {
			let label = country.clone();
			view! { <option value=country>{label}</option> }
		})
		.collect_view();

	let level_buttons = FocusLevel::ALL
		.into_iter()
		.map(|level| {
			view! {
				<button
					class:active=move || focus.with(|f| f.level() == level)
					on:click=move |_| {
						let country = focus.with_untracked(|f| f.country().map(str::to_string));
						dashboard.focus_country(country, level);
					}
				>
					{level.as_str()}
				</button>
			}
		})
		.collect_view();

	let rows = move || {
		focus.with(|f| {
			if let Some(message) = f.load_state().error() {
				return view! { <p class="load-error">{message.to_string()}</p> }.into_any();
			}
			let Some(counts) = f.counts() else {
				let text = if f.country().is_some() && f.load_state().is_loaded() {
					"No counts published for this country"
				} else {
					""
				};
				return view! { <p class="focus-empty">{text}</p> }.into_any();
			};
			let items = counts
				.ranked()
				.into_iter()
				.take(FOCUS_ROWS)
				.map(|(name, count)| {
					let name = name.to_string();
					view! {
						<li>
							<span class="focus-name">{name}</span>
							<span class="focus-count">{count}</span>
						</li>
					}
				})
				.collect_view();
			view! {
				<p class="focus-total">{format!("{} articles", counts.total_articles())}</p>
				<ol class="focus-list">{items}</ol>
			}
			.into_any()
		})
	};

	view! {
		<section class="panel focus-panel">
			<h2>"Country focus"</h2>
			<select on:change=move |ev| {
				let level = focus.with_untracked(|f| f.level());
				dashboard.focus_country(select_value(event_target_value(&ev)), level);
			}>
				<option value="">"Choose a country"</option>
				{country_options}
			</select>
			<div class="focus-levels">{level_buttons}</div>
			{rows}
		</section>
	}
}
