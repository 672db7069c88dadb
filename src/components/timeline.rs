use leptos::prelude::*;

use crate::context::use_dashboard;
use crate::data::month_key;

/// Month stepper, playback toggle, position slider and the per-month
/// article histogram of the whole dataset.
#[component]
pub fn Timeline() -> impl IntoView {
	let dash = use_dashboard();
	let time = dash.time;

	let current_month = move || {
		time.with(|t| t.current_date().map(month_key))
			.unwrap_or_else(|| "-".to_string())
	};
	let position = move || time.with(|t| t.month_position()).unwrap_or((0, 0));
	let play_label = move || if time.with(|t| t.is_playing()) { "Pause" } else { "Play" };

	let bars = move || {
		let current = time.with(|t| t.current_date().map(month_key));
		dash.map.with(|m| {
			let peak = m.temporal().iter().map(|b| b.count).max().unwrap_or(0).max(1);
			m.temporal()
				.iter()
				.map(|bucket| {
					let key = bucket.key();
					let class = if current.as_deref() == Some(key.as_str()) {
						"timeline-bar current"
					} else {
						"timeline-bar"
					};
					let style = format!("height: {}%;", bucket.count * 100 / peak);
					let title = format!("{}: {}", key, bucket.count);
					view! { <div class=class style=style title=title></div> }
				})
				.collect_view()
		})
	};

	view! {
		<section class="panel timeline">
			<div class="timeline-controls">
				<button on:click=move |_| {
					time.update(|t| {
						t.step_months(-1);
					})
				}>"◀"</button>
				<button on:click=move |_| time.update(|t| t.toggle_playing())>{play_label}</button>
				<button on:click=move |_| {
					time.update(|t| {
						t.step_months(1);
					})
				}>"▶"</button>
				<span class="timeline-current">{current_month}</span>
			</div>
			<input
				type="range"
				class="timeline-slider"
				min="0"
				max=move || position().1.to_string()
				prop:value=move || position().0.to_string()
				on:input=move |ev| {
					if let Ok(offset) = event_target_value(&ev).parse::<u32>() {
						time.update(|t| t.seek_month(offset));
					}
				}
			/>
			<div class="timeline-histogram">{bars}</div>
		</section>
	}
}
