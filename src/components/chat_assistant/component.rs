use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

use super::session::ChatSession;
use crate::components::markdown_view::Markdown;
use crate::gateway::{GeminiGateway, Role};

/// Floating chat window scoped to `topic`.
#[component]
pub fn ChatAssistant(#[prop(into)] topic: Signal<String>) -> impl IntoView {
	let gateway = StoredValue::new(expect_context::<GeminiGateway>());
	let session = RwSignal::new(ChatSession::default());
	let input = RwSignal::new(String::new());
	let open = RwSignal::new(false);
	let end_ref = NodeRef::<Div>::new();

	Effect::new(move |_| {
		session.track();
		if open.get() {
			if let Some(end) = end_ref.get() {
				end.scroll_into_view();
			}
		}
	});

	let send = move || {
		let text = input.get_untracked();
		let topic = topic.get_untracked();
		let Some(request) = session.try_update(|s| s.begin_send(&text, &topic)).flatten() else {
			return;
		};
		input.set(String::new());
		let gateway = gateway.get_value();
		spawn_local(async move {
			let outcome = gateway
				.try_chat(&request.history, &request.message, &request.topic)
				.await;
			session.update(|s| s.complete(outcome));
		});
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && !ev.shift_key() {
			ev.prevent_default();
			send();
		}
	};

	let messages = move || {
		session.with(|s| {
			s.messages()
				.iter()
				.map(|msg| {
					let class = match msg.role {
						Role::User => "chat-row user",
						Role::Assistant => "chat-row assistant",
					};
					let body = if msg.is_code {
						view! { <Markdown text=msg.text.clone() /> }.into_any()
					} else {
						msg.text.clone().into_any()
					};
					view! {
						<div class=class>
							<div class="chat-bubble">{body}</div>
						</div>
					}
				})
				.collect_view()
		})
	};

	view! {
		<div class="chat-assistant">
			<Show when=move || open.get()>
				<div class="chat-window">
					<div class="chat-header">
						<div class="chat-title">
							<span class="chat-live"></span>
							<span>"Assistant ("{move || topic.get()}")"</span>
						</div>
						<button class="chat-clear" on:click=move |_| session.update(ChatSession::clear)>
							"Clear"
						</button>
					</div>
					<div class="chat-messages">
						{messages}
						<Show when=move || session.with(ChatSession::is_composing)>
							<div class="chat-row assistant">
								<div class="chat-bubble typing">
									<span></span>
									<span></span>
									<span></span>
								</div>
							</div>
						</Show>
						<div node_ref=end_ref></div>
					</div>
					<div class="chat-input">
						<input
							type="text"
							placeholder="Ask regarding this topic..."
							prop:value=move || input.get()
							on:input=move |ev| input.set(event_target_value(&ev))
							on:keydown=on_keydown
						/>
						<button class="chat-send" title="Send" on:click=move |_| send()>
							"\u{27a4}"
						</button>
					</div>
				</div>
			</Show>
			<button class="chat-toggle" on:click=move |_| open.update(|o| *o = !*o)>
				{move || if open.get() { "\u{2303}" } else { "\u{1f4ac}" }}
			</button>
		</div>
	}
}
