use super::Category::*;
use super::{TopicDef, topic};

pub(super) fn curriculum() -> TopicDef {
	topic(
		"root",
		"LLM 算法工程师进阶之路",
		Foundation,
		"从深度学习/CV 背景向大语言模型架构师转型的系统性路径。",
	)
	.analogy("类似于从传统的图像处理转向基于深度学习的计算机视觉（AlexNet时刻）。")
	.children(vec![
		phase1(),
		phase2(),
		phase3(),
		phase4(),
		phase5(),
		phase6(),
	])
}

fn phase1() -> TopicDef {
	topic(
		"phase1",
		"第一阶段：NLP 与 Transformer 基础",
		Foundation,
		"掌握处理序列数据的核心范式，理解\"注意力\"如何取代循环神经网络。",
	)
	.analogy("图像由像素组成矩阵，文本由Token组成序列。RNN像滑动窗口，Transformer像全图的Non-local Attention。")
	.children(vec![
		topic(
			"tokenization",
			"Tokenization (分词)",
			Foundation,
			"BPE (Byte-Pair Encoding), WordPiece, SentencePiece 原理。",
		)
		.analogy("类似于图像预处理中的 Resize 和 Normalization，将原始数据转为模型可读的 Input ID。")
		.resources(&["Hugging Face Tokenizers 文档", "Google SentencePiece GitHub"]),
		topic(
			"attention",
			"Attention & Mechanism",
			Architecture,
			"Self-Attention, Multi-Head Attention, Cross-Attention, Positional Encoding。",
		)
		.analogy("类似于 CV 中的 SE-Block (通道注意力) 或 Non-local Network，但在 NLP 中是全连接的全局交互。")
		.papers(&["Attention Is All You Need (Vaswani et al., 2017)"]),
		topic(
			"transformer_arch",
			"Transformer 架构详解",
			Architecture,
			"Encoder (BERT-style), Decoder (GPT-style), Encoder-Decoder (T5-style) 的区别与 LayerNorm 位置 (Pre-Norm vs Post-Norm)。",
		)
		.analogy("类似于 ResNet 中的 Residual Block 结构设计。Encoder 像特征提取器，Decoder 像生成器。")
		.project("从零用 PyTorch 实现一个 mini-Transformer 并训练它完成简单的序列反转任务。"),
	])
}

fn phase2() -> TopicDef {
	topic(
		"phase2",
		"第二阶段：主流 LLM 演进",
		Architecture,
		"理解从 BERT 到 LLaMA 的架构变迁，以及 Scaling Laws。",
	)
	.analogy("从 VGG -> ResNet -> EfficientNet -> YOLO 的演进路线。")
	.children(vec![
		topic(
			"bert_series",
			"Encoder (BERT/RoBERTa)",
			Architecture,
			"Masked Language Modeling (MLM), Next Sentence Prediction (NSP)。",
		)
		.analogy("类似于 CV 中的 Backbone 预训练 (ImageNet Pre-training)，用于提取强特征。")
		.papers(&["BERT: Pre-training of Deep Bidirectional Transformers (Devlin et al., 2018)"]),
		topic(
			"gpt_series",
			"Decoder (GPT-1/2/3)",
			Architecture,
			"Causal Language Modeling (Next Token Prediction), In-context Learning。",
		)
		.analogy("类似于生成对抗网络 (GAN) 或 自回归模型，专注于生成。")
		.papers(&["Language Models are Few-Shot Learners (GPT-3 paper)"]),
		topic(
			"llama_modern",
			"现代 LLM (LLaMA/Mistral)",
			Architecture,
			"RoPE (旋转位置编码), SwiGLU (激活函数), RMSNorm, GQA (分组查询注意力)。",
		)
		.analogy("YOLOv3/v4 中的各种 \"Bag of Freebies\" 技巧 (如 Mish 激活, CSPNet 结构)。")
		.papers(&["LLaMA: Open and Efficient Foundation Language Models", "Mistral 7B"])
		.project("阅读 LLaMA 源码 (Facebook Research)，对比标准 Transformer 的代码差异。"),
	])
}

fn phase3() -> TopicDef {
	topic(
		"phase3",
		"第三阶段：预训练与系统工程",
		Training,
		"如何训练千亿参数模型？数据管线与分布式训练基础设施。",
	)
	.analogy("在 ImageNet 上训练超大 ResNet，需要多机多卡。")
	.children(vec![
		topic(
			"data_pipeline",
			"数据工程",
			Training,
			"数据清洗、去重 (MinHash/SimHash)、质量过滤、混合配比。",
		)
		.analogy("CV 中的 Data Augmentation (Mixup, Mosaic) 和数据集清洗。")
		.resources(&["RefinedWeb Dataset Paper", "WanJuan (万卷) Dataset"]),
		topic(
			"distributed_training",
			"分布式训练框架",
			Training,
			"Data Parallel (DDP/FSDP), Tensor Parallel (Megatron), Pipeline Parallel, ZeRO (DeepSpeed)。",
		)
		.analogy("YOLO训练时的多卡同步 BatchNorm，但 LLM 需要切分模型本身因为显存放不下。")
		.resources(&["Megatron-LM 代码库", "DeepSpeed 教程"]),
	])
}

fn phase4() -> TopicDef {
	topic(
		"phase4",
		"第四阶段：微调与对齐 (SFT & RLHF)",
		Alignment,
		"让模型听从指令，符合人类价值观。",
	)
	.analogy("从 ImageNet 预训练权重迁移到 COCO 数据集进行 Object Detection 微调。")
	.children(vec![
		topic(
			"sft",
			"指令微调 (SFT)",
			Alignment,
			"Instruction Tuning, Prompt Engineering, Chat 模板构建。",
		)
		.analogy("在特定数据集上 Fine-tune YOLO，调整最后一层输出头。")
		.papers(&["Finetuned Language Models Are Zero-Shot Learners (FLAN)"])
		.project("使用 Alpaca 或 Firefly 数据集，对 LLaMA-2-7b 进行 SFT，构建一个垂直领域问答助手。"),
		topic(
			"peft",
			"参数高效微调 (PEFT)",
			Optimization,
			"LoRA (Low-Rank Adaptation), QLoRA, P-Tuning, Adapter。",
		)
		.analogy("类似于只训练模型的最后几层或特定的 BatchNorm 层，冻结 Backbone。")
		.papers(&["LoRA: Low-Rank Adaptation of Large Language Models"])
		.project("使用 Hugging Face PEFT 库实现 LoRA 微调，对比全量微调的显存占用和效果。"),
		topic(
			"rlhf",
			"RLHF & DPO",
			Alignment,
			"Reward Modeling, PPO (Proximal Policy Optimization), DPO (Direct Preference Optimization)。",
		)
		.analogy("类似于使用自定义的 Loss Function (如 IoU Loss, Focal Loss) 强行纠正模型的困难样本行为。")
		.papers(&[
			"Training language models to follow instructions with human feedback (InstructGPT)",
			"Direct Preference Optimization (DPO)",
		]),
	])
}

fn phase5() -> TopicDef {
	topic(
		"phase5",
		"第五阶段：推理优化与压缩",
		Optimization,
		"模型压缩、量化、加速。这是你结合 YOLO 剪枝经验的绝佳切入点。",
	)
	.analogy("YOLO-Nano, MobileNet, 模型剪枝 (Pruning) 与 Int8 量化。")
	.children(vec![
		topic(
			"quantization",
			"模型量化 (Quantization)",
			Optimization,
			"Post-Training Quantization (PTQ), GPTQ, AWQ, 4-bit/8-bit 推理。",
		)
		.analogy("TensorRT INT8 加速，权重精度压缩。")
		.resources(&["AutoGPTQ", "BitsAndBytes"]),
		topic(
			"pruning_sparsity",
			"剪枝与稀疏化",
			Optimization,
			"结构化剪枝 (Structured Pruning), SparseGPT, MoE (混合专家模型)。",
		)
		.analogy("你本科论文研究的 \"Network Pruning\"，移除冗余的神经元或通道。LLM 中更关注 Attention Head 的剪枝。")
		.papers(&["SparseGPT: Massive Language Models Can Be Accurately Pruned in One-Shot"])
		.project("复现 SparseGPT 算法，尝试对 OPT 或 LLaMA 模型进行不同稀疏度的剪枝实验。"),
		topic(
			"inference_acc",
			"推理加速系统",
			Optimization,
			"FlashAttention, PagedAttention (vLLM), Continuous Batching。",
		)
		.analogy("类似于 CUDA Kernel 优化，提升 GPU 利用率。")
		.resources(&["vLLM GitHub", "FlashAttention Paper"]),
	])
}

fn phase6() -> TopicDef {
	topic(
		"phase6",
		"第六阶段：前沿应用与 RAG",
		Deployment,
		"LangChain, Agents, Vector Database。",
	)
	.analogy("将 YOLO 集成到自动驾驶系统或监控系统中，配合传统 CV 算法。")
	.children(vec![
		topic(
			"rag",
			"RAG (检索增强生成)",
			Deployment,
			"Vector Database (Milvus, FAISS), Embedding 模型, Rerank 策略。",
		)
		.analogy("类似于图像检索 (Image Retrieval) 配合分类网络。")
		.project("构建一个基于本地知识库 (PDF文档) 的问答系统，使用 LangChain + FAISS + LLaMA。"),
		topic(
			"agents",
			"Agents (智能体)",
			Deployment,
			"ReAct 框架, Tool Use (Function Calling), AutoGPT。",
		)
		.analogy("类似于机器人控制系统，视觉感知后执行物理动作。")
		.papers(&["ReAct: Synergizing Reasoning and Acting in Language Models"]),
	])
}
