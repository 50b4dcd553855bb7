use contracts::analytics::{compute_statistics, Statistics, TopicStat};
use leptos::prelude::*;

use crate::session::SessionContext;

/// Progress view: summary cards and the strong/weak topic breakdown, derived
/// from the attempt history on every change.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let stats = Memo::new(move |_| ctx.state.with(|s| compute_statistics(&s.quiz_attempts)));

    view! {
        <div class="dashboard-page">
            <h2>"Your Progress"</h2>
            {move || {
                let s = stats.get();
                if s.total_quizzes == 0 {
                    view! {
                        <div class="page-placeholder">
                            <p>"Take a quiz to start tracking your progress"</p>
                        </div>
                    }
                    .into_any()
                } else {
                    dashboard_body(s).into_any()
                }
            }}
        </div>
    }
}

fn dashboard_body(s: Statistics) -> impl IntoView {
    let trend = s.improvement;
    view! {
        <div class="dashboard-body">
            <div class="stat-grid">
                <StatCard title="Quizzes Taken" value=s.total_quizzes.to_string() />
                <StatCard title="Average Score" value=format!("{}%", s.avg_score) />
                <StatCard title="Highest Score" value=format!("{}%", s.highest_score) />
                <StatCard title="Lowest Score" value=format!("{}%", s.lowest_score) />
                <StatCard title="Recent Activity" value=format!("{} of last 7", s.recent_streak) />
                <div class="stat-card">
                    <p class="stat-value">
                        {if trend > 0 { format!("↑ {}%", trend) } else if trend < 0 { format!("↓ {}%", trend.abs()) } else { "—".to_string() }}
                    </p>
                    <p class="stat-title">"Improvement (last 3 vs previous 3)"</p>
                </div>
            </div>

            <div class="topics-grid">
                <TopicList title="Strong Topics" topics=s.topics_analysis.strong empty_hint="No strong topics yet" />
                <TopicList title="Needs Work" topics=s.topics_analysis.weak empty_hint="No weak topics yet" />
            </div>
        </div>
    }
}

#[component]
fn StatCard(title: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="stat-card">
            <p class="stat-value">{value}</p>
            <p class="stat-title">{title}</p>
        </div>
    }
}

#[component]
fn TopicList(
    title: &'static str,
    topics: Vec<TopicStat>,
    empty_hint: &'static str,
) -> impl IntoView {
    view! {
        <div class="topic-list">
            <h3>{title}</h3>
            {if topics.is_empty() {
                view! { <p class="topic-empty">{empty_hint}</p> }.into_any()
            } else {
                topics
                    .into_iter()
                    .map(|t| {
                        view! {
                            <div class="topic-row">
                                <span class="topic-name">{t.name}</span>
                                <span class="topic-score">{format!("{}%", t.avg_score)}</span>
                                <span class="topic-attempts">
                                    {format!("{} attempt{}", t.attempts, if t.attempts == 1 { "" } else { "s" })}
                                </span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
