use crate::request::{GenerationRequest, Keywords};

/// Rendered when the caller gave no extra instructions
const NO_INSTRUCTIONS: &str = "None provided";

/// Prompt template collection
///
/// Every builder is a pure function of its arguments: no I/O, no clock, no
/// randomness. Prior-stage text is embedded verbatim.
pub struct PromptTemplates;

/// Fields shared by the draft stage and the direct route
pub struct ArticleBrief<'a> {
    pub topic: &'a str,
    pub audience: &'a str,
    pub tone: &'a str,
    pub keywords: String,
    pub outline: Option<&'a str>,
    pub target_length: Option<u32>,
    pub additional_instructions: Option<&'a str>,
}

impl PromptTemplates {
    /// Stage 1: outline with SEO considerations
    pub fn outline_prompt(request: &GenerationRequest) -> String {
        format!(
            r#"You are an expert content strategist specializing in the {niche} niche.

Task: Create a detailed outline for a {length}-word blog post on "{topic}".

Consider the following:
- The blog should have a {tone} tone
- Target audience: {audience}
- Target keywords: {keywords}
- The outline should include a compelling title, introduction, 3-5 main sections with subpoints, and a conclusion
- Each section should address a specific aspect of the topic
- Include suggestions for statistics or examples to include

Additional instructions: {instructions}

Format the outline with clear headings and bullet points. This outline will be used to write a full blog post."#,
            niche = request.niche(),
            length = request.target_length(),
            topic = request.topic(),
            tone = request.tone(),
            audience = request.audience_or_default(),
            keywords = request.keywords(),
            instructions = request.additional_instructions().unwrap_or(NO_INSTRUCTIONS),
        )
    }

    /// Stage 2: full article written from the outline
    pub fn draft_prompt(request: &GenerationRequest, outline: &str) -> String {
        let audience = request.audience_or_default();
        let tone = request.tone().to_string();
        Self::article_prompt(&ArticleBrief {
            topic: request.topic(),
            audience: &audience,
            tone: &tone,
            keywords: request.keywords().to_string(),
            outline: Some(outline),
            target_length: Some(request.target_length()),
            additional_instructions: Some(
                request.additional_instructions().unwrap_or(NO_INSTRUCTIONS),
            ),
        })
    }

    /// Stage 3: SEO and readability pass over the draft
    pub fn enhancement_prompt(request: &GenerationRequest, draft: &str) -> String {
        format!(
            r#"You are an SEO expert and content editor.

Task: Review and enhance the following blog post for SEO optimization and readability:

{draft}

Enhancements to make:
- Ensure the title is SEO-friendly and compelling
- Optimize keyword density for these terms: {keywords}
- Improve readability with better paragraph structure if needed
- Ensure headings follow proper hierarchy (# for main title, ## for sections, ### for subsections)
- Add internal linking suggestions in [brackets] where relevant
- Ensure the content maintains a {tone} tone
- Keep the total word count close to {length} words

Return the enhanced blog post in markdown format. Do not include the [brackets] suggestions in the final output, just improve the content directly."#,
            keywords = request.keywords(),
            tone = request.tone(),
            length = request.target_length(),
        )
    }

    /// Single-call article from caller-supplied fields, no outline stage
    pub fn direct_prompt(topic: &str, tone: &str, audience: &str, keywords: &Keywords) -> String {
        Self::article_prompt(&ArticleBrief {
            topic,
            audience,
            tone,
            keywords: keywords.to_string(),
            outline: None,
            target_length: None,
            additional_instructions: None,
        })
    }

    /// One-shot summary of finished content
    pub fn summary_prompt(content: &str) -> String {
        format!(
            r#"You are a professional content summarizer.

Task: Create a concise summary of the following blog post:

{content}

Guidelines:
- The summary should be approximately 150-200 words
- Capture the main points and key takeaways
- Maintain the original tone
- Format in 2-3 paragraphs
- Include the most important information that would give a reader a good overview

Return only the summary text."#
        )
    }

    /// Article template shared by the draft stage and the direct route
    pub fn article_prompt(brief: &ArticleBrief<'_>) -> String {
        let mut prompt = String::from(
            "\nYou are a professional blog writer with expertise in SEO, content marketing, and storytelling.\n\n",
        );

        prompt.push_str("📝 Task:\n");
        prompt.push_str(&format!(
            "Write a detailed, engaging, and SEO-optimized blog article on the topic: **\"{}\"**\n",
            brief.topic
        ));
        if let Some(outline) = brief.outline {
            prompt.push_str("Use this outline as a guide:\n");
            prompt.push_str(outline);
            prompt.push('\n');
        }

        prompt.push_str(&format!("\n🎯 Target Audience:\n{}\n", brief.audience));
        prompt.push_str(&format!("\n🗣️ Tone:\n{}\n", brief.tone));
        prompt.push_str(&format!(
            "\n🔍 Keywords to include naturally:\n{}\n",
            brief.keywords
        ));

        prompt.push_str(
            "\n✅ Format Requirements:\n\
             - Start with an attention-grabbing hook\n\
             - Use short paragraphs, bullet points, and subheadings (H2/H3)\n\
             - Make it informative and easy to read\n\
             - Include practical tips or value-driven insights\n\
             - End with a strong conclusion or call-to-action\n",
        );
        if let Some(length) = brief.target_length {
            prompt.push_str(&format!(
                "- The total word count should be approximately {length} words\n"
            ));
        }

        prompt.push_str(
            "\n🚫 Don'ts:\n\
             - No robotic tone\n\
             - No unnecessary repetition\n\
             - No generic filler text\n",
        );
        prompt.push_str(
            "\n💡 Goal:\n\
             The blog should feel like it's written by a human expert. Make it natural, helpful, and ready to publish.\n",
        );

        if let Some(instructions) = brief.additional_instructions {
            prompt.push_str(&format!("\nAdditional instructions: {instructions}\n"));
        }

        prompt.push_str(
            "\nReturn only the blog content. Do not include any extra comments or explanations.\n",
        );
        prompt
    }
}
