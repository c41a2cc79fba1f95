use leptos::prelude::*;
use log::warn;

use crate::analysis::AnalyzeResponse;
use crate::components::mind_map::{MindMap, MindMapData};

/// Bundled analysis reports, keyed by repository.
const REPORTS: &[(&str, &str)] = &[
	("acme/todo-app", include_str!("reports/todo_app.json")),
	("acme/payments", include_str!("reports/payments.json")),
];

fn load_report(index: usize) -> Result<AnalyzeResponse, serde_json::Error> {
	let (_, json) = REPORTS[index.min(REPORTS.len() - 1)];
	AnalyzeResponse::from_json(json)
}

#[component]
fn ReportSummary(report: AnalyzeResponse) -> impl IntoView {
	view! {
		<section class="card">
			<h2>"Project Summary"</h2>
			<p>{report.summary}</p>
		</section>
		<div class="card-row">
			<section class="card">
				<h2>"Technology Stack"</h2>
				<div class="badges">
					{report
						.tech_stack
						.into_iter()
						.map(|tech| view! { <span class="badge">{tech}</span> })
						.collect_view()}
				</div>
			</section>
			<section class="card">
				<h2>"Key Files"</h2>
				<ul class="files">
					{report
						.important_files
						.into_iter()
						.map(|file| view! { <li><code>{file}</code></li> })
						.collect_view()}
				</ul>
			</section>
		</div>
		<section class="card">
			<h2>"Execution Flow"</h2>
			<pre>{report.execution_flow}</pre>
		</section>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (selected, set_selected) = signal(0usize);

	// Each selection hands the canvas a whole new graph.
	let mind_map = Signal::derive(move || match load_report(selected.get()) {
		Ok(report) => report.mind_map,
		Err(e) => {
			warn!("Report has no usable mind map: {e}");
			MindMapData::default()
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<main class="report">
				<header class="report-header">
					<h1>"Repository Analysis Results"</h1>
					<nav class="report-picker">
						{REPORTS
							.iter()
							.enumerate()
							.map(|(i, (name, _))| {
								view! {
									<button
										class:active=move || selected.get() == i
										on:click=move |_| set_selected.set(i)
									>
										{*name}
									</button>
								}
							})
							.collect_view()}
					</nav>
				</header>
				{move || load_report(selected.get()).map(|report| view! { <ReportSummary report=report /> })}
				<section class="card">
					<h2>"Interactive Mind Map"</h2>
					<p class="subtitle">
						"Drag nodes to reposition. Pull from a node's lower handle to connect. Scroll to zoom. Drag background to pan."
					</p>
					<MindMap data=mind_map height=Some(600.0) />
				</section>
			</main>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bundled_reports_decode() {
		for (i, (name, _)) in REPORTS.iter().enumerate() {
			let report = load_report(i).unwrap_or_else(|e| panic!("{name}: {e}"));
			assert!(!report.mind_map.nodes.is_empty(), "{name}");
		}
	}
}
