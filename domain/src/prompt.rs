use crate::chat::{ChatMessage, Role};

pub const DEFAULT_PERSONA: &str = "你是一個處理員工疑難雜症的人力資源HR AI助理君君(JunJun)。請用常見員工能夠聽懂的繁體中文語言和親切的口吻來回答，兩句話簡單描述，上限是三句。相關問題可能包括不限於外籍移工、實習計畫、薪資考勤、保險、海外派駐、教育訓練等問題，您也可以根據檢索到的文件回答問題，除了協助回答相關問題也可以和大家聊天。";

pub const DEFAULT_CONTEXT_PREFIX: &str = "以下是從資料庫查詢的結果：";

pub const DEFAULT_FALLBACK_REPLY: &str = "目前無相關資料，以通用資料直接回應。";

/// Deployment-specific wording of the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProfile {
    pub persona: String,
    pub context_prefix: String,
    /// Returned as the answer when retrieval yields nothing.
    pub fallback_reply: String,
}

impl Default for PromptProfile {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            context_prefix: DEFAULT_CONTEXT_PREFIX.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }
}

impl PromptProfile {
    /// persona, user text, retrieved context, empty assistant slot.
    pub fn transcript(&self, user_text: &str, context: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Role::System, self.persona.as_str()),
            ChatMessage::new(Role::User, user_text),
            ChatMessage::new(Role::System, format!("{}{}", self.context_prefix, context)),
            ChatMessage::new(Role::Assistant, ""),
        ]
    }
}
