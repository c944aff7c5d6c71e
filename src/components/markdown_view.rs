use leptos::prelude::*;

use crate::markdown::{Segment, segments};

/// Model output with fenced blocks shown as code.
#[component]
pub fn Markdown(#[prop(into)] text: String) -> impl IntoView {
	let parts = segments(&text)
		.into_iter()
		.filter(|segment| !segment.text().is_empty())
		.map(|segment| match segment {
			Segment::Prose(prose) => view! { <span class="md-prose">{prose.to_owned()}</span> }.into_any(),
			Segment::Code(code) => view! {
				<pre class="md-code">
					<code>{code.to_owned()}</code>
				</pre>
			}
			.into_any(),
		})
		.collect_view();

	view! { <div class="markdown">{parts}</div> }
}
