use leptos::prelude::*;
use log::debug;
use wasm_bindgen_futures::spawn_local;

use super::state::{DetailPanel, PanelPhase};
use crate::components::markdown_view::Markdown;
use crate::gateway::GeminiGateway;
use crate::roadmap::TopicNode;
use crate::selection::SelectionState;

/// Side panel for the selected topic with its AI explanation.
#[component]
pub fn TopicPanel(selection: RwSignal<SelectionState>) -> impl IntoView {
	let gateway = expect_context::<GeminiGateway>();
	let panel = RwSignal::new(DetailPanel::default());

	Effect::new(move |_| {
		let Some(node) = selection.with(|s| s.open_node().cloned()) else {
			panel.update(DetailPanel::close);
			return;
		};
		let Some(ticket) = panel.try_update(|p| p.begin(&node)) else {
			return;
		};
		let gateway = gateway.clone();
		spawn_local(async move {
			let outcome = gateway.try_explain(&ticket.title, &ticket.analogy).await;
			let applied = panel.try_update(|p| p.resolve(&ticket, outcome)).unwrap_or(false);
			if !applied {
				debug!(
					"discarded stale explanation for {} (generation {})",
					ticket.topic_id, ticket.generation
				);
			}
		});
	});

	let on_close = Callback::new(move |()| selection.update(SelectionState::close_panel));

	view! {
		{move || {
			selection
				.with(|s| s.open_node().cloned())
				.map(|node| view! { <PanelBody node=node panel=panel on_close=on_close /> })
		}}
	}
}

#[component]
fn PanelBody(
	node: TopicNode,
	panel: RwSignal<DetailPanel>,
	on_close: Callback<()>,
) -> impl IntoView {
	let color = node.category.color();
	let analogy = node.analogy.clone().map(|a| {
		view! {
			<div class="panel-analogy">
				<span class="panel-analogy-bar"></span>
				<p>"\u{201c}"{a}"\u{201d}"</p>
			</div>
		}
	});
	let papers = (!node.papers.is_empty()).then(|| {
		view! {
			<div class="panel-card papers">
				<h4>"经典论文 (必读)"</h4>
				<ul>
					{node.papers.iter().map(|p| view! { <li>{p.clone()}</li> }).collect_view()}
				</ul>
			</div>
		}
	});
	let project = node.project_idea.clone().map(|idea| {
		view! {
			<div class="panel-card project">
				<h4>"实践项目建议"</h4>
				<p>{idea}</p>
			</div>
		}
	});
	let resources = (!node.resources.is_empty()).then(|| {
		view! {
			<div class="panel-card resources">
				<h4>"推荐资源 / 代码库"</h4>
				<ul>
					{node.resources.iter().map(|r| view! { <li>"# "{r.clone()}</li> }).collect_view()}
				</ul>
			</div>
		}
	});

	let explanation = move || match panel.with(|p| p.phase().clone()) {
		PanelPhase::Closed => ().into_any(),
		PanelPhase::Loading => view! {
			<div class="skeleton">
				<div class="skeleton-line w-3-4"></div>
				<div class="skeleton-line"></div>
				<div class="skeleton-line w-5-6"></div>
				<div class="skeleton-block"></div>
			</div>
		}
		.into_any(),
		PanelPhase::Ready(text) => view! { <Markdown text=text /> }.into_any(),
		PanelPhase::Error(reason) => {
			view! { <p class="panel-error">{PanelPhase::error_message(&reason)}</p> }.into_any()
		}
	};

	view! {
		<aside class="topic-panel">
			<header class="panel-header">
				<div>
					<div class="panel-badge">
						<span class="panel-dot" style:background-color=color style:color=color></span>
						<span class="panel-category">{node.category.label()}</span>
					</div>
					<h2>{node.title.clone()}</h2>
					{analogy}
				</div>
				<button class="panel-close" title="Close" on:click=move |_| on_close.run(())>
					"\u{2715}"
				</button>
			</header>
			<div class="panel-content">
				<section class="panel-section">
					<h3>"核心概念"</h3>
					<p class="panel-description">{node.description.clone()}</p>
				</section>
				<div class="panel-cards">{papers} {project} {resources}</div>
				<section class="panel-ai">
					<h3>"AI 导师深度解析"</h3>
					<p class="panel-ai-sub">"Powered by Gemini 2.5 \u{2022} CV/YOLO 背景定制"</p>
					{explanation}
				</section>
			</div>
		</aside>
	}
}
