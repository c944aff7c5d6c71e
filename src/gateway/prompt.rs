use std::fmt::Write;

use super::types::ChatMessage;

/// Instruction asking for a tutored explanation of `topic`.
pub fn explain(topic: &str, analogy: &str, background: &str) -> String {
	format!(
		"你是一位世界级的 LLM 算法专家导师。
你的学生是一位 {background}。

请详细讲解主题: \"{topic}\"。

核心要求:
1. **语言**: 请使用专业、准确的中文。
2. **类比**: 必须使用计算机视觉 (CV)、YOLO、CNN、ResNet 或 模型剪枝 (Pruning) 相关的概念进行深度类比，帮助学生迁移知识。
3. **深度**: 解释为什么这对 LLM 至关重要。
4. **代码**: 如果适用，提供简短的 Python/PyTorch 代码片段（例如 Attention 实现，LoRA 配置等）。
5. **论文**: 推荐 1-2 篇该领域必读的经典论文。

特定上下文类比线索: {analogy}

请使用 Markdown 格式输出。"
	)
}

/// Instruction answering `message` in the context of `topic`, with the
/// prior transcript inlined.
pub fn chat(history: &[ChatMessage], message: &str, topic: &str, background: &str) -> String {
	let mut prompt = format!(
		"当前学习主题: {topic}。
用户背景: {background}，发表过 YOLOv3 剪枝论文。
请用中文回答，保持专业性，多用 CV 领域的类比。
"
	);
	if !history.is_empty() {
		prompt.push_str("\n对话记录:\n");
		for entry in history {
			let _ = writeln!(prompt, "{}: {}", entry.role.as_str(), entry.text);
		}
	}
	let _ = write!(
		prompt,
		"\n用户问题: {message}\n\n请简洁、技术性地回答。如果涉及到代码实现，请提供。"
	);
	prompt
}
