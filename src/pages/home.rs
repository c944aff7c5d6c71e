use leptos::prelude::*;
use log::info;

use crate::components::chat_assistant::ChatAssistant;
use crate::components::roadmap_canvas::RoadmapCanvas;
use crate::components::topic_panel::TopicPanel;
use crate::gateway::{Gateway, GatewayConfig};
use crate::roadmap::{Roadmap, RoadmapError, TopicNode};
use crate::selection::SelectionState;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let roadmap: Result<Roadmap, RoadmapError> = Roadmap::builtin();

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
		}>{roadmap.map(|roadmap| view! { <RoadmapScreen roadmap=roadmap /> })}</ErrorBoundary>
	}
}

#[component]
fn RoadmapScreen(roadmap: Roadmap) -> impl IntoView {
	let config = GatewayConfig::from_build_env();
	if config.api_key().is_none() {
		info!("no API key configured; AI features will report it");
	}
	provide_context(Gateway::gemini(config));

	let selection = RwSignal::new(SelectionState::default());
	let roadmap = Signal::stored(roadmap);
	let on_select = Callback::new(move |topic: TopicNode| selection.update(|s| s.select(topic)));
	let chat_topic = Signal::derive(move || selection.with(|s| s.chat_scope().to_owned()));

	view! {
		<div class="app-shell">
			<header class="app-header">
				<div class="glass-panel title-card">
					<h1>"LLM 算法工程师之路"</h1>
					<p class="subtitle">"Systematic Path: CV to LLM"</p>
				</div>
				<div class="glass-panel hint">"点击节点获取 AI 定制详解 (结合您的 CV/YOLO 背景)"</div>
			</header>
			<main class="stage">
				<RoadmapCanvas roadmap=roadmap on_select=on_select />
			</main>
			<TopicPanel selection=selection />
			<ChatAssistant topic=chat_topic />
		</div>
	}
}
