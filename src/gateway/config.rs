/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Gemini REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Learner profile the explanations are tailored to.
pub const DEFAULT_BACKGROUND: &str =
	"具备深度学习基础的计算机视觉(CV)工程师，熟悉YOLOv3与模型剪枝(Pruning)";

/// Settings handed to [`Gateway::new`](super::Gateway::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	api_key: Option<String>,
	/// Model identifier sent with every request.
	pub model: String,
	/// Endpoint root, without trailing slash.
	pub base_url: String,
	/// Learner background woven into prompts.
	pub background: String,
}

impl Default for GatewayConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			model: DEFAULT_MODEL.into(),
			base_url: DEFAULT_BASE_URL.into(),
			background: DEFAULT_BACKGROUND.into(),
		}
	}
}

impl GatewayConfig {
	/// Read settings baked in at compile time.
	///
	/// A browser has no process environment, so `API_KEY` (or
	/// `GEMINI_API_KEY`), `GEMINI_MODEL` and `GEMINI_BASE_URL` are captured
	/// when the crate is built.
	pub fn from_build_env() -> Self {
		let mut config = Self::default();
		if let Some(key) = option_env!("API_KEY").or(option_env!("GEMINI_API_KEY")) {
			config = config.with_api_key(key);
		}
		if let Some(model) = option_env!("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
			config.model = model.trim().into();
		}
		if let Some(url) = option_env!("GEMINI_BASE_URL").filter(|u| !u.trim().is_empty()) {
			config.base_url = url.trim().trim_end_matches('/').into();
		}
		config
	}

	/// Set the credential. Blank keys count as missing.
	pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
		let key = key.into();
		let key = key.trim();
		self.api_key = (!key.is_empty()).then(|| key.to_owned());
		self
	}

	/// The credential, if one is configured.
	pub fn api_key(&self) -> Option<&str> {
		self.api_key.as_deref()
	}
}
