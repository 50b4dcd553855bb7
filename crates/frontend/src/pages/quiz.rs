use std::collections::HashMap;

use contracts::api::AnswerScore;
use contracts::domain::{
    grade_mcq, AnswerMap, QuestionKind, Quiz, QuizAttempt, QuizQuestion,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::session::SessionContext;

/// Quiz view: generate a quiz for the selected PDF, take it, submit for a
/// local MCQ score, then let the backend grade the open-ended answers.
#[component]
pub fn QuizPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let quiz = RwSignal::new(None::<Quiz>);
    let answers = RwSignal::new(AnswerMap::new());
    let submitted = RwSignal::new(false);
    let score = RwSignal::new(0u32);
    let generating = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    // Backend feedback for SAQ answers, keyed by question index.
    let saq_feedback = RwSignal::new(HashMap::<String, AnswerScore>::new());

    let generate = move |_| {
        let Some(doc) = ctx.selected_document() else {
            return;
        };
        generating.set(true);
        error.set(None);
        submitted.set(false);
        answers.set(AnswerMap::new());
        saq_feedback.set(HashMap::new());

        spawn_local(async move {
            match api::generate_quiz(&doc.name).await {
                Ok(questions) => quiz.set(Some(Quiz::new(doc.id.clone(), questions))),
                Err(err) => {
                    log::error!("Quiz generation failed: {}", err);
                    quiz.set(None);
                    error.set(Some(err));
                }
            }
            generating.set(false);
        });
    };

    let submit = move |_| {
        let Some(current) = quiz.get_untracked() else {
            return;
        };
        let Some(doc) = ctx.selected_document() else {
            return;
        };
        let submitted_answers = answers.get_untracked();

        let (correct, total) = grade_mcq(&current.questions, &submitted_answers);
        let attempt = QuizAttempt::new(
            &current,
            doc.name.clone(),
            correct,
            total,
            submitted_answers.clone(),
        );
        score.set(attempt.score);
        ctx.record_attempt(attempt);
        submitted.set(true);

        // Open-ended grading runs after the fact; a failure is logged and
        // does not block the MCQ results already on screen.
        let questions = current.questions.clone();
        spawn_local(async move {
            match api::analyze_quiz_attempt(&questions, &submitted_answers).await {
                Ok(scores) => saq_feedback.set(scores),
                Err(err) => log::warn!("Answer analysis failed: {}", err),
            }
        });
    };

    view! {
        <div class="quiz-page">
            {move || {
                if ctx.selected_document().is_none() {
                    return view! {
                        <div class="page-placeholder">
                            <p>"Please select a PDF to generate a quiz"</p>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="quiz-main">
                        <div class="quiz-toolbar">
                            <h2>"Quiz Generator"</h2>
                            <button on:click=generate disabled=move || generating.get()>
                                {move || if generating.get() { "Generating..." } else { "Generate Quiz" }}
                            </button>
                        </div>

                        {move || {
                            error.get().map(|err| view! { <p class="quiz-error">{err}</p> })
                        }}

                        {move || {
                            quiz.get()
                                .map(|current| {
                                    view! {
                                        <div class="quiz-questions">
                                            {current
                                                .questions
                                                .iter()
                                                .enumerate()
                                                .map(|(idx, q)| {
                                                    question_view(
                                                            idx,
                                                            q.clone(),
                                                            answers,
                                                            submitted,
                                                            saq_feedback,
                                                        )
                                                        .into_any()
                                                })
                                                .collect_view()}
                                            {move || {
                                                (!submitted.get())
                                                    .then(|| {
                                                        view! {
                                                            <button class="quiz-submit" on:click=submit>
                                                                "Submit Answers"
                                                            </button>
                                                        }
                                                    })
                                            }}
                                            {move || {
                                                submitted
                                                    .get()
                                                    .then(|| {
                                                        view! {
                                                            <div class="quiz-result">
                                                                <p class="quiz-score">{move || format!("{}%", score.get())}</p>
                                                                <p>"Your score has been saved to progress tracking"</p>
                                                            </div>
                                                        }
                                                    })
                                            }}
                                        </div>
                                    }
                                })
                        }}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

fn question_view(
    idx: usize,
    q: QuizQuestion,
    answers: RwSignal<AnswerMap>,
    submitted: RwSignal<bool>,
    saq_feedback: RwSignal<HashMap<String, AnswerScore>>,
) -> impl IntoView {
    let explanation = q.explanation.clone();
    let body = match q.kind {
        QuestionKind::Mcq => {
            let correct = q.correct_answer;
            view! {
                <div class="mcq-options">
                    {q
                        .options
                        .iter()
                        .enumerate()
                        .map(|(opt_idx, option)| {
                            let chosen = Memo::new(move |_| {
                                answers.with(|a| {
                                    a.get(&idx).and_then(|v| v.parse::<usize>().ok()) == Some(opt_idx)
                                })
                            });
                            let class = move || {
                                if submitted.get() {
                                    if Some(opt_idx) == correct {
                                        "mcq-option mcq-option-correct"
                                    } else if chosen.get() {
                                        "mcq-option mcq-option-wrong"
                                    } else {
                                        "mcq-option"
                                    }
                                } else if chosen.get() {
                                    "mcq-option mcq-option-chosen"
                                } else {
                                    "mcq-option"
                                }
                            };
                            view! {
                                <button
                                    class=class
                                    disabled=move || submitted.get()
                                    on:click=move |_| {
                                        answers
                                            .update(|a| {
                                                a.insert(idx, opt_idx.to_string());
                                            })
                                    }
                                >
                                    {option.clone()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            }
            .into_any()
        }
        QuestionKind::Saq => view! {
            <div class="saq-answer">
                <textarea
                    placeholder="Type your answer..."
                    disabled=move || submitted.get()
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        answers
                            .update(|a| {
                                a.insert(idx, text);
                            })
                    }
                ></textarea>
                {move || {
                    saq_feedback
                        .with(|fb| fb.get(&idx.to_string()).cloned())
                        .map(|graded| {
                            view! {
                                <p class="saq-feedback">
                                    {format!("{}/10: {}", graded.score, graded.feedback)}
                                </p>
                            }
                        })
                }}
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="quiz-question">
            <p class="question-text">{format!("{}. {}", idx + 1, q.question)}</p>
            {body}
            {move || {
                (submitted.get() && explanation.is_some())
                    .then(|| {
                        view! { <p class="question-explanation">{explanation.clone()}</p> }
                    })
            }}
        </div>
    }
}
