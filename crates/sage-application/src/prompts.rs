//! Prompt templates for the assistants.
//!
//! All prompts are rendered from embedded minijinja templates, so every
//! provider call goes through a typed rendering function instead of ad-hoc
//! string interpolation at the call sites.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;
use sage_core::plan::LearningPathRequest;
use sage_core::route::RetrievalRoute;
use sage_core::{Result, SageError};

const WEEKLY_FOCUS: &str = "\
Create a weekly focus for week {{ week }} of {{ duration_weeks }} weeks \
learning {{ topic }}{% if focus %} with specific focus on {{ focus }}{% endif %}.
Keep it concise in one line.";

const QA_RETRIEVE: &str = "\
You are an assistant for question-answering tasks.
The router selected the {{ route }} source for this question.
{% if route == \"vectorstore\" %}\
Answer from the indexed reference document.
{% else %}\
Answer as a summary of current, reputable web sources.
{% endif %}
Question: {{ question }}

Return a clear and concise text as response.";

const QA_GRADE_RELEVANCE: &str = "\
You are a grader assessing relevance of a retrieved answer to a user question.

Question: {{ question }}

Retrieved answer:
{{ retrieved }}

Give a binary score 'yes' or 'no' to indicate whether the retrieved answer \
is relevant to the question. Answer with a single word.";

const QA_GRADE_GROUNDING: &str = "\
You are a hallucination grader assessing whether an answer is grounded in facts.

Question: {{ question }}

Answer under review:
{{ retrieved }}

Give a binary score 'yes' or 'no' to indicate whether the answer is grounded. \
Answer with a single word.";

const QA_ANSWER: &str = "\
You are an assistant for question-answering tasks.

Question: {{ question }}

Retrieved information:
{{ retrieved }}

Relevance verdict: {{ relevance }}
Grounding verdict: {{ grounding }}

Return a clear and concise response to the question. If a verdict above is \
'no', say so and qualify the answer accordingly.";

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("weekly_focus", WEEKLY_FOCUS)
        .expect("weekly_focus template is valid");
    env.add_template("qa_retrieve", QA_RETRIEVE)
        .expect("qa_retrieve template is valid");
    env.add_template("qa_grade_relevance", QA_GRADE_RELEVANCE)
        .expect("qa_grade_relevance template is valid");
    env.add_template("qa_grade_grounding", QA_GRADE_GROUNDING)
        .expect("qa_grade_grounding template is valid");
    env.add_template("qa_answer", QA_ANSWER)
        .expect("qa_answer template is valid");
    env
});

fn render(name: &str, ctx: minijinja::Value) -> Result<String> {
    TEMPLATES
        .get_template(name)
        .and_then(|template| template.render(ctx))
        .map_err(|err| SageError::Serialization {
            format: "template".to_string(),
            message: err.to_string(),
        })
}

/// The weekly-focus prompt for one week of a learning path.
pub fn weekly_focus(request: &LearningPathRequest, week: u32) -> Result<String> {
    render(
        "weekly_focus",
        context! {
            week => week,
            duration_weeks => request.duration_weeks,
            topic => request.topic,
            focus => request.focus,
        },
    )
}

/// The retrieval prompt for the selected source.
pub fn qa_retrieve(question: &str, route: RetrievalRoute) -> Result<String> {
    render(
        "qa_retrieve",
        context! {
            question => question,
            route => route.label(),
        },
    )
}

/// The relevance-grading prompt.
pub fn qa_grade_relevance(question: &str, retrieved: &str) -> Result<String> {
    render(
        "qa_grade_relevance",
        context! {
            question => question,
            retrieved => retrieved,
        },
    )
}

/// The grounding-grading prompt.
pub fn qa_grade_grounding(question: &str, retrieved: &str) -> Result<String> {
    render(
        "qa_grade_grounding",
        context! {
            question => question,
            retrieved => retrieved,
        },
    )
}

/// The final answer prompt, carrying the pipeline's intermediate results.
pub fn qa_answer(
    question: &str,
    retrieved: &str,
    relevance: &str,
    grounding: &str,
) -> Result<String> {
    render(
        "qa_answer",
        context! {
            question => question,
            retrieved => retrieved,
            relevance => relevance,
            grounding => grounding,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LearningPathRequest {
        LearningPathRequest {
            topic: "Python Programming".to_string(),
            focus: "Web Development".to_string(),
            duration_weeks: 4,
            hours_per_week: 5,
        }
    }

    #[test]
    fn test_weekly_focus_mentions_topic_and_week() {
        let prompt = weekly_focus(&request(), 2).unwrap();
        assert!(prompt.contains("week 2 of 4 weeks"));
        assert!(prompt.contains("Python Programming"));
        assert!(prompt.contains("Web Development"));
        assert!(prompt.contains("one line"));
    }

    #[test]
    fn test_weekly_focus_without_specific_focus() {
        let mut req = request();
        req.focus = String::new();
        let prompt = weekly_focus(&req, 1).unwrap();
        assert!(!prompt.contains("specific focus"));
    }

    #[test]
    fn test_qa_retrieve_varies_with_route() {
        let document = qa_retrieve("What is self-attention?", RetrievalRoute::Document).unwrap();
        assert!(document.contains("vectorstore"));
        assert!(document.contains("reference document"));

        let web = qa_retrieve("What is the weather?", RetrievalRoute::WebSearch).unwrap();
        assert!(web.contains("web_search"));
        assert!(web.contains("web sources"));
    }

    #[test]
    fn test_grading_prompts_ask_for_binary_score() {
        let relevance = qa_grade_relevance("q", "a").unwrap();
        assert!(relevance.contains("'yes' or 'no'"));

        let grounding = qa_grade_grounding("q", "a").unwrap();
        assert!(grounding.contains("'yes' or 'no'"));
    }

    #[test]
    fn test_answer_prompt_carries_verdicts() {
        let prompt = qa_answer("q", "retrieved text", "yes", "no").unwrap();
        assert!(prompt.contains("Relevance verdict: yes"));
        assert!(prompt.contains("Grounding verdict: no"));
        assert!(prompt.contains("retrieved text"));
    }
}
