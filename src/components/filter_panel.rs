use std::collections::BTreeSet;

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::context::use_dashboard;
use crate::derive::DateRange;

/// A titled list of toggles over one filter dimension.
#[component]
fn CheckList(
	title: &'static str,
	#[prop(into)] options: Signal<Vec<String>>,
	#[prop(into)] selected: Signal<Vec<String>>,
	on_toggle: Callback<String>,
) -> impl IntoView {
	let rows = move || {
		let chosen = selected.get();
		options
			.get()
			.into_iter()
			.map(|option| {
				let checked = chosen.contains(&option);
				let value = option.clone();
				view! {
					<label class="check-row">
						<input
							type="checkbox"
							prop:checked=checked
							on:change=move |_| on_toggle.run(value.clone())
						/>
						{option}
					</label>
				}
			})
			.collect_view()
	};

	view! {
		<fieldset class="check-list">
			<legend>{title}</legend>
			{rows}
		</fieldset>
	}
}

/// Country, region, newspaper, keyword and date-range selection.
#[component]
pub fn FilterPanel() -> impl IntoView {
	let filters = use_dashboard().filters;

	let regions = Signal::derive(move || {
		filters.with(|f| {
			f.available()
				.regions
				.values()
				.flatten()
				.cloned()
				.collect::<BTreeSet<_>>()
				.into_iter()
				.collect::<Vec<_>>()
		})
	});

	let date_value = move |start: bool| {
		filters.with(|f| {
			f.selected()
				.date_range
				.map(|r| if start { r.start } else { r.end })
				.map(|d| d.format("%Y-%m-%d").to_string())
				.unwrap_or_default()
		})
	};

	let set_date_bound = move |start: bool, raw: String| {
		let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") else {
			filters.update(|f| f.set_date_range(None));
			return;
		};
		filters.update(|f| {
			let (lo, hi) = match f.selected().date_range {
				Some(r) => (r.start, r.end),
				None => (
					f.available().min_date.unwrap_or(date),
					f.available().max_date.unwrap_or(date),
				),
			};
			let range = if start {
				DateRange::new(date, hi)
			} else {
				DateRange::new(lo, date)
			};
			f.set_date_range(Some(range));
		});
	};

	view! {
		<section class="panel filter-panel">
			<h2>"Filters"</h2>
			<CheckList
				title="Countries"
				options=Signal::derive(move || filters.with(|f| f.available().countries.clone()))
				selected=Signal::derive(move || filters.with(|f| f.selected().countries.clone()))
				on_toggle=Callback::new(move |c: String| filters.update(|f| f.toggle_country(&c)))
			/>
			<CheckList
				title="Regions"
				options=regions
				selected=Signal::derive(move || filters.with(|f| f.selected().regions.clone()))
				on_toggle=Callback::new(move |r: String| filters.update(|f| f.toggle_region(&r)))
			/>
			<CheckList
				title="Newspapers"
				options=Signal::derive(move || filters.with(|f| f.available().newspapers.clone()))
				selected=Signal::derive(move || filters.with(|f| f.selected().newspapers.clone()))
				on_toggle=Callback::new(move |n: String| filters.update(|f| f.toggle_newspaper(&n)))
			/>
			<CheckList
				title="Keywords"
				options=Signal::derive(move || filters.with(|f| f.available().keywords.clone()))
				selected=Signal::derive(move || filters.with(|f| f.selected().keywords.clone()))
				on_toggle=Callback::new(move |k: String| filters.update(|f| f.toggle_keyword(&k)))
			/>
			<fieldset class="date-range">
				<legend>"Published between"</legend>
				<input
					type="date"
					prop:value=move || date_value(true)
					on:change=move |ev| set_date_bound(true, event_target_value(&ev))
				/>
				<input
					type="date"
					prop:value=move || date_value(false)
					on:change=move |ev| set_date_bound(false, event_target_value(&ev))
				/>
			</fieldset>
			<button on:click=move |_| filters.update(|f| f.clear())>"Clear filters"</button>
		</section>
	}
}
