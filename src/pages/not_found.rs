use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"404"</h1>
			<p>"这个节点不在路线图上。"</p>
			<a href="/">"返回路线图"</a>
		</div>
	}
}
