//! Prompt text and sampling temperature for every action.

use selchord_config::ActionId;

/// A fully rendered prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
    pub temperature: f32,
}

const SUPPORT_ASSISTANT: &str = "You are a helpful support assistant.";

const INTERNAL_SYSTEM: &str = "You are a helpful assistant that formats customer issues for internal engineering discussions. Create clear, distinct Question and Background sections where the Question is direct and actionable, and Background provides necessary context.";

const DOCS_SYSTEM: &str = "You are a helpful assistant that extracts Datadog-specific keywords for documentation search. Always return keywords in English only, maximum 3 keywords, separated by spaces without quotes, commas, or any punctuation. Translate any non-English terms to their English equivalents.";

const TICKET_SYSTEM: &str = "You are a helpful assistant that analyzes customer text to determine if it's an error log (search directly) or general issue (extract maximum 4 keywords). Always start your response with either 'ERROR_LOG:' or 'KEYWORDS:'";

const TRANSLATE_SYSTEM: &str = "あなたは専門的な翻訳者です。言語を自動検出して適切な言語に翻訳してください。日本語⇔英語の翻訳を中心に、自然で正確な翻訳を提供してください。";

const IMPROVE_SYSTEM: &str = "あなたは日本語の文章校正の専門家です。同じ内容を3つの異なるスタイル（標準・丁寧・簡潔）で改善し、それぞれを明確に区別して提示してください。";

const JAPANESE_SYSTEM: &str =
    "あなたは専門的な翻訳者です。任意の言語のテキストを自然で正確な日本語に翻訳してください。";

const CHINESE_SYSTEM: &str = "你是專業的翻譯師。請將任何語言的文本翻譯成自然準確的繁體中文。";

/// Render the prompt `action` sends for `text`.
pub fn prompt_for(action: ActionId, text: &str) -> Prompt {
    match action {
        ActionId::ConfluenceSearch => Prompt {
            system: SUPPORT_ASSISTANT,
            user: format!(
                "Convert the following customer message into a short, clear technical question (maximum 10-15 words). Focus on the main issue and make it a proper question. Return only the question without quotes or additional formatting:\n\n{text}"
            ),
            temperature: 0.2,
        },
        ActionId::InternalQuestion => Prompt {
            system: INTERNAL_SYSTEM,
            user: internal_question(text),
            temperature: 0.2,
        },
        ActionId::DocsSearch => Prompt {
            system: DOCS_SYSTEM,
            user: docs_keywords(text),
            temperature: 0.1,
        },
        ActionId::TicketSearch => Prompt {
            system: TICKET_SYSTEM,
            user: ticket_keywords(text),
            temperature: 0.1,
        },
        ActionId::Translate => Prompt {
            system: TRANSLATE_SYSTEM,
            user: format!(
                "以下のテキストを翻訳してください。言語を自動検出して、適切な言語に翻訳してください：

- 日本語のテキストの場合：英語に翻訳
- 英語のテキストの場合：日本語に翻訳
- その他の言語の場合：英語に翻訳

翻訳のガイドライン：
1. 自然で流暢な翻訳にする
2. 技術用語は適切に翻訳する
3. 文脈を考慮した翻訳にする
4. ビジネス文書として適切な表現にする
5. 翻訳結果のみを返す（説明や注釈は不要）

翻訳対象テキスト：
{text}

翻訳結果："
            ),
            temperature: 0.3,
        },
        ActionId::ImproveJapanese => Prompt {
            system: IMPROVE_SYSTEM,
            user: format!(
                "以下の日本語テキストを、より自然で丁寧なビジネス日本語に改善してください。**3つの異なるバリエーション**を提供してください。

改善の観点：
1. 文法の正確性を向上させる
2. より自然で流暢な表現にする
3. 敬語や丁寧語を適切に使用する
4. 数値や単位の表記を統一する
5. 文章の流れを改善し、読みやすくする
6. ビジネス文書として適切な表現にする

以下の形式で回答してください：

【バリエーション1：標準的な改善】
[最も一般的で標準的な改善版]

【バリエーション2：より丁寧な表現】
[より敬語を使った丁寧な改善版]

【バリエーション3：簡潔で明確な表現】
[簡潔さを重視した改善版]

元のテキスト：
{text}"
            ),
            temperature: 0.5,
        },
        ActionId::TranslateJapanese => Prompt {
            system: JAPANESE_SYSTEM,
            user: format!(
                "以下のテキストを日本語に翻訳してください。言語を自動検出して、自然で流暢な日本語に翻訳してください。

翻訳のガイドライン：
1. 自然で流暢な日本語にする
2. 技術用語や専門用語は適切な日本語に翻訳する
3. 文脈を考慮した翻訳にする
4. ビジネス文書として適切な表現にする
5. 翻訳結果のみを返す（説明や注釈は不要）

翻訳対象テキスト：
{text}

日本語翻訳結果："
            ),
            temperature: 0.3,
        },
        ActionId::TranslateChinese => Prompt {
            system: CHINESE_SYSTEM,
            user: format!(
                "請將以下文本翻譯成繁體中文。請自動檢測語言並翻譯成自然流暢的繁體中文。

翻譯指導原則：
1. 翻譯成自然流暢的繁體中文
2. 技術用語和專業術語要適當翻譯
3. 考慮文本的上下文
4. 使用適合商業文書的表達方式
5. 只返回翻譯結果（不需要說明或註釋）

待翻譯文本：
{text}

繁體中文翻譯結果："
            ),
            temperature: 0.3,
        },
    }
}

fn internal_question(text: &str) -> String {
    format!(
        r#"Convert the following customer issue into a direct question format for asking internal TEE engineers. You MUST follow this exact format and ALWAYS end with "Thank you for your help in advance!":

Question:
[A single, direct, actionable question that TEE can immediately understand and answer - should be one clear sentence asking for specific help or information]

Background:
[Detailed context about the customer's situation, what they're trying to do, or what error they're encountering - only include this section if the question needs additional context to be understood]

Thank you for your help in advance!

IMPORTANT: You MUST always include "Thank you for your help in advance!" at the end of every response.

Guidelines:
- Question should be ONE clear, direct question that gets straight to the point
- Question should ask for specific help, guidance, or information
- Background should provide context that helps TEE understand the customer's situation
- Background should include relevant details like error messages, configurations, or customer goals
- Only include Background section if the question needs additional context
- Keep it concise and professional
- ALWAYS end with "Thank you for your help in advance!"

Examples:

Example 1 (Simple question - no background needed):
Customer: "How do I set up alerts for high CPU usage?"
→
Question: How can a customer set up alerts for high CPU usage in Datadog?

Thank you for your help in advance!

Example 2 (Complex issue - background needed):
Customer: "We're getting 'could not update remote-config state: rpc error: code = Unknown desc = database not open' when trying to enable APM on our Node.js app"
→
Question: How can we resolve the 'database not open' error when enabling APM?

Background:
Customer is trying to enable APM on their Node.js application but getting this specific error: "could not update remote-config state: rpc error: code = Unknown desc = database not open"

Thank you for your help in advance!

Example 3 (Feature question with context):
Customer: "Our team wants to monitor custom business metrics from our e-commerce platform but we're not sure which approach is best for high-volume data"
→
Question: What's the recommended approach for monitoring custom business metrics from a high-volume e-commerce platform?

Background:
Customer has an e-commerce platform that generates high-volume data and wants to monitor custom business metrics, but they're unsure about the best implementation approach.

Thank you for your help in advance!

Here's the customer issue:

{text}"#
    )
}

fn docs_keywords(text: &str) -> String {
    format!(
        r#"Extract Datadog-related keywords from the following customer message. Return ONLY English keywords (maximum 3 keywords) separated by spaces. No quotes, commas, or punctuation.

IMPORTANT RULES:
- Always return keywords in ENGLISH only, never in Japanese or other languages
- Maximum 3 keywords only
- Use standard Datadog terminology in English
- Translate Japanese terms to their English equivalents

Examples:
- "ブラウザテストに設定するStep(操作記録)の実行する/しないをif分のような形で制御できないか" → browser test step
- "Is it possible to view custom events from Java Flight Recorder on Datadog's Java Profile screen" → Java Profile recorder
- "How to configure APM traces for Node.js application" → APM traces Node.js
- "ログエクスプローラーでログが表示されない" → Log Explorer logs

Customer message: {text}

English keywords:"#
    )
}

fn ticket_keywords(text: &str) -> String {
    format!(
        r#"Analyze the following text and determine if it's an error log or a general customer issue.

If it's an ERROR LOG (contains technical error messages, stack traces, error codes, or system logs):
- Return "ERROR_LOG:" followed by the exact error message

If it's a GENERAL ISSUE (customer questions, feature requests, general problems):
- Return "KEYWORDS:" followed by relevant keywords separated by spaces (maximum 4 keywords)

Examples:
- "could not update remote-config state: rpc error: code = Unknown desc = database not open" → ERROR_LOG:could not update remote-config state: rpc error: code = Unknown desc = database not open
- "How to configure dashboard alerts for high CPU usage?" → KEYWORDS:dashboard alerts CPU usage
- "RUM session replay feature not working properly on mobile devices" → KEYWORDS:RUM session replay mobile

Customer text: {text}

Response:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_embeds_the_text() {
        for action in ActionId::ALL {
            let prompt = prompt_for(action, "SELECTED-TEXT-MARKER");
            assert!(
                prompt.user.contains("SELECTED-TEXT-MARKER"),
                "{} prompt lost the text",
                action
            );
            assert!(!prompt.system.is_empty());
        }
    }

    #[test]
    fn test_temperatures() {
        assert_eq!(prompt_for(ActionId::ConfluenceSearch, "x").temperature, 0.2);
        assert_eq!(prompt_for(ActionId::InternalQuestion, "x").temperature, 0.2);
        assert_eq!(prompt_for(ActionId::DocsSearch, "x").temperature, 0.1);
        assert_eq!(prompt_for(ActionId::TicketSearch, "x").temperature, 0.1);
        assert_eq!(prompt_for(ActionId::Translate, "x").temperature, 0.3);
        assert_eq!(prompt_for(ActionId::ImproveJapanese, "x").temperature, 0.5);
        assert_eq!(prompt_for(ActionId::TranslateChinese, "x").temperature, 0.3);
    }

    #[test]
    fn test_internal_question_demands_closing_line() {
        let prompt = prompt_for(ActionId::InternalQuestion, "x");
        assert!(prompt.user.contains("Thank you for your help in advance!"));
    }
}
